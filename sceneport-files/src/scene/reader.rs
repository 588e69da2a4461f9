use crate::ParserError;
use crate::common::reader::Blob;
use crate::common::types::Pointer;
use crate::material::reader::MaterialReader;
use crate::mesh::reader::MeshReader;
use crate::node::reader::NodeReader;
use crate::scene::types::{SceneAsset, SceneHeader};
use crate::texture::reader::TextureReader;

pub struct SceneReader {}

impl SceneReader {
    pub fn parse_header(blob: &Blob, address: Pointer) -> Result<SceneHeader, ParserError> {
        blob.read_required::<SceneHeader>(address, "aiScene")
    }

    /// Decodes the whole scene rooted at `address` into owned records. Animations are only counted.
    pub fn parse_scene(blob: &Blob, address: Pointer) -> Result<SceneAsset, ParserError> {
        let header = SceneReader::parse_header(blob, address)?;

        let materials = blob.read_pointer_array(
            header.materials,
            header.num_materials as usize,
            "aiScene::mMaterials",
            MaterialReader::parse_material,
        )?;

        let meshes = blob.read_pointer_array(
            header.meshes,
            header.num_meshes as usize,
            "aiScene::mMeshes",
            MeshReader::parse_mesh,
        )?;

        let textures = blob.read_pointer_array(
            header.textures,
            header.num_textures as usize,
            "aiScene::mTextures",
            TextureReader::parse_texture,
        )?;

        if header.root_node.is_null() {
            return Err(ParserError::NullPointer {
                field: "aiScene::mRootNode",
            });
        }
        let root = NodeReader::parse_node(blob, header.root_node)?;

        Ok(SceneAsset {
            flags: header.scene_flags(),
            meshes,
            materials,
            textures,
            num_animations: header.num_animations,
            root,
        })
    }
}
