/// This module will handle converting the records from sceneport-files into an intermediate representation,
/// that can then be used to build actual meshes, materials and nodes in any engine.
/// The records still mirror the native layout (row-major matrices, arbitrary polygons, `*N` texture
/// references), the importers produce what a renderer expects instead.
pub mod hierarchy_importer;
pub mod material_importer;
pub mod mesh_importer;
