//! Imports scenes through a native asset importer and rebuilds them as owned, engine agnostic
//! meshes, materials and node trees (see [`rendering::loader::scene_loader::SceneLoader`]).
use sceneport_files::ParserError;
use thiserror::Error;

/// Anything that aborts an import. Nothing of the scene is returned in that case, but the native
/// scene is still released.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("The importer could not load {path}: {reason}")]
    Invocation { path: String, reason: String },

    #[error("Decoding the imported scene failed: {0}")]
    Decode(#[from] ParserError),

    #[error("Node \"{node}\" references mesh {index}, but there are only {count} meshes")]
    MeshIndexOutOfRange { node: String, index: u32, count: usize },

    #[error("Mesh \"{mesh}\" references material {index}, but there are only {count} materials")]
    MaterialIndexOutOfRange { mesh: String, index: u32, count: usize },
}

pub mod io;
pub mod rendering;
pub mod settings;
