//! Deduplication of the resources that multiple importer results share.
//!
//! Whoever resolves a reference first takes care of loading it (i.e. [`crate::rendering::loader`])
//! and the result is stored in the resolver's cache, where future resolutions of the same reference
//! string will clone it from. Textures are currently the only such resource: materials refer to
//! them by path or as `*N` and the same texture is typically used by many materials.
//!
//! Failures are cached the same way, a broken reference is only ever attempted (and reported) once.
//! The cache lives as long as the resolver, which is one import.
pub mod resolver;
pub mod texture_generator;
