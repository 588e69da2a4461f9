use bitflags::bitflags;
use sceneport_files_derive_parseable::Parse;

use crate::common::types::Pointer;
use crate::material::types::MaterialRecord;
use crate::mesh::types::MeshRecord;
use crate::node::types::NodeRecord;
use crate::texture::types::TextureRecord;

bitflags! {
    /// `aiScene::mFlags`
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct SceneFlags: u32 {
        const INCOMPLETE = 0x1;
        const VALIDATED = 0x2;
        const VALIDATION_WARNING = 0x4;
        const NON_VERBOSE_FORMAT = 0x8;
        const TERRAIN = 0x10;
        const ALLOW_SHARED = 0x20;
    }
}

bitflags! {
    /// The post-processing steps requested from the import library (`aiPostProcessSteps`).
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ImportFlags: u32 {
        const CALC_TANGENT_SPACE = 0x1;
        const JOIN_IDENTICAL_VERTICES = 0x2;
        const MAKE_LEFT_HANDED = 0x4;
        const TRIANGULATE = 0x8;
        const GEN_NORMALS = 0x20;
        const GEN_UV_COORDS = 0x40000;
        const TRANSFORM_UV_COORDS = 0x80000;
        const FLIP_UVS = 0x800000;
        const FLIP_WINDING_ORDER = 0x1000000;
        const EMBED_TEXTURES = 0x10000000;
    }
}

impl ImportFlags {
    /// UV generation and embedded textures, which is what the material and mesh importers rely on.
    pub const ASSET_PIPELINE: ImportFlags = ImportFlags::GEN_UV_COORDS
        .union(ImportFlags::TRANSFORM_UV_COORDS)
        .union(ImportFlags::EMBED_TEXTURES);

    /// Left-handed coordinates on top of [`ImportFlags::ASSET_PIPELINE`].
    pub const LEFT_HANDED_PIPELINE: ImportFlags = ImportFlags::ASSET_PIPELINE.union(ImportFlags::MAKE_LEFT_HANDED);
}

/// The leading part of `aiScene`. Lights, cameras, metadata and skeletons follow, but are never read.
#[derive(Debug, Copy, Clone, Parse)]
pub struct SceneHeader {
    pub flags: u32,
    pub _padding0: u32,
    pub root_node: Pointer,
    pub num_meshes: u32,
    pub _padding1: u32,
    pub meshes: Pointer,
    pub num_materials: u32,
    pub _padding2: u32,
    pub materials: Pointer,
    pub num_animations: u32,
    pub _padding3: u32,
    pub animations: Pointer,
    pub num_textures: u32,
    pub _padding4: u32,
    pub textures: Pointer,
}

impl SceneHeader {
    pub fn scene_flags(&self) -> SceneFlags {
        SceneFlags::from_bits_retain(self.flags)
    }
}

/// Everything decoded from one blob. The records cross reference each other by index only
/// (node -> mesh, mesh -> material, material -> `*N` texture), so this owns all of them.
#[derive(Debug, Clone)]
pub struct SceneAsset {
    pub flags: SceneFlags,
    pub meshes: Vec<MeshRecord>,
    pub materials: Vec<MaterialRecord>,
    pub textures: Vec<TextureRecord>,
    pub num_animations: u32,
    pub root: NodeRecord,
}
