pub trait RawAssetLoader {
    /// Reads the whole file behind `path`, which is relative to the loader's root.
    /// In case of a caching implementation, this may need to clone the whole buffer!
    fn load_raw_owned(&self, path: &str) -> Result<Vec<u8>, anyhow::Error>;
}
