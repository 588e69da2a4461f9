use std::path::{Path, PathBuf};

use anyhow::Context;
use log::trace;

use crate::io::common::loader::RawAssetLoader;

/// Loads files relative to the directory of the imported asset.
pub struct FsLoader {
    base_dir: PathBuf,
}

impl FsLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl RawAssetLoader for FsLoader {
    fn load_raw_owned(&self, path: &str) -> Result<Vec<u8>, anyhow::Error> {
        // Joining an absolute path replaces the base directory, which is what we want for the
        // (opt-in) absolute texture references.
        let full_path = self.base_dir.join(path);
        let buf = std::fs::read(&full_path).with_context(|| format!("Reading {}", full_path.display()))?;
        trace!("Loaded {} ({} bytes)", full_path.display(), buf.len());
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_relative_to_the_base_dir() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("sceneport-fs-loader-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("textures"))?;
        std::fs::write(dir.join("textures").join("a.bin"), [1u8, 2, 3])?;

        let loader = FsLoader::new(&dir);
        assert_eq!(loader.base_dir(), dir.as_path());
        assert_eq!(loader.load_raw_owned("textures/a.bin")?, vec![1, 2, 3]);
        assert!(loader.load_raw_owned("textures/missing.bin").is_err());

        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }
}
