/// Contrasting to the importers, that convert already decoded records into our rendering IR,
/// Loaders are a lot more high level. They drive the import session and the decoders and pipe the
/// results into the importers.
pub mod scene_loader;
pub mod texture_loader;
