use bitflags::bitflags;
use sceneport_files_derive_parseable::Parse;

use crate::common::types::{AiString, Pointer, Vector3D};

/// `AI_MAX_NUMBER_OF_TEXTURECOORDS`
pub const MAX_TEXTURE_COORDS: usize = 8;
/// `AI_MAX_NUMBER_OF_COLOR_SETS`
pub const MAX_COLOR_SETS: usize = 8;

bitflags! {
    /// `aiPrimitiveType`
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct PrimitiveTypes: u32 {
        const POINT = 0x1;
        const LINE = 0x2;
        const TRIANGLE = 0x4;
        const POLYGON = 0x8;
    }
}

/// The leading part of `aiMesh`, up to and including its name.
#[derive(Debug, Clone, Parse)]
pub struct MeshRecordRaw {
    pub primitive_types: u32,
    pub num_vertices: u32,
    pub num_faces: u32,
    pub _padding0: u32,
    pub vertices: Pointer,
    pub normals: Pointer,
    pub tangents: Pointer,
    pub bitangents: Pointer,
    pub colors: [Pointer; MAX_COLOR_SETS],
    pub texture_coords: [Pointer; MAX_TEXTURE_COORDS],
    pub num_uv_components: [u32; MAX_TEXTURE_COORDS],
    pub faces: Pointer,
    pub num_bones: u32,
    pub _padding1: u32,
    pub bones: Pointer,
    pub material_index: u32,
    pub name: AiString,
}

/// `aiFace`
#[derive(Debug, Copy, Clone, Parse)]
pub struct FaceRecordRaw {
    pub num_indices: u32,
    pub _padding0: u32,
    pub indices: Pointer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceRecord {
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct MeshRecord {
    pub name: String,
    pub primitive_types: PrimitiveTypes,
    pub vertices: Vec<Vector3D>,
    /// Always [`MAX_TEXTURE_COORDS`] channels, `None` where the native slot was null.
    pub texture_coords: Vec<Option<Vec<Vector3D>>>,
    pub num_uv_components: [u32; MAX_TEXTURE_COORDS],
    pub faces: Vec<FaceRecord>,
    pub material_index: u32,
}

impl MeshRecord {
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn texture_coords(&self, channel: usize) -> Option<&[Vector3D]> {
        self.texture_coords.get(channel)?.as_deref()
    }
}
