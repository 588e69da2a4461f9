use crate::ParserError;
use crate::common::types::{Color4D, Pointer, Vector3D};
use crate::scene::reader::SceneReader;
use crate::scene::types::{ImportFlags, SceneFlags};
use crate::writer::{MaterialDesc, MeshDesc, NodeDesc, SceneBuilder};

const BASE: u64 = 0x50_0000;

fn triangle_scene() -> SceneBuilder {
    SceneBuilder::new()
        .with_material(MaterialDesc::colored("White", Color4D::WHITE))
        .with_mesh(MeshDesc::new(
            "Triangle",
            vec![
                Vector3D { x: 0.0, y: 0.0, z: 0.0 },
                Vector3D { x: 1.0, y: 0.0, z: 0.0 },
                Vector3D { x: 0.0, y: 1.0, z: 0.0 },
            ],
            vec![vec![0, 1, 2]],
            0,
        ))
        .with_root(NodeDesc::new("Root").with_meshes(&[0]))
}

#[test]
fn decodes_the_whole_scene() -> Result<(), anyhow::Error> {
    let mut builder = triangle_scene();
    builder.flags = (SceneFlags::VALIDATED | SceneFlags::NON_VERBOSE_FORMAT).bits();
    let built = builder.build(BASE);
    let blob = built.blob();

    let header = SceneReader::parse_header(&blob, built.scene)?;
    assert_eq!(header.num_meshes, 1);
    assert_eq!(header.num_materials, 1);
    assert_eq!(header.num_textures, 0);
    assert!(header.textures.is_null());

    let scene = SceneReader::parse_scene(&blob, built.scene)?;
    assert_eq!(scene.flags, SceneFlags::VALIDATED | SceneFlags::NON_VERBOSE_FORMAT);
    assert_eq!(scene.meshes.len(), 1);
    assert_eq!(scene.materials.len(), 1);
    assert!(scene.textures.is_empty());
    assert_eq!(scene.root.meshes, vec![0]);
    Ok(())
}

#[test]
fn missing_root_node_is_an_error() {
    let built = SceneBuilder::new().build(BASE);
    let blob = built.blob();

    assert!(matches!(
        SceneReader::parse_scene(&blob, built.scene),
        Err(ParserError::NullPointer {
            field: "aiScene::mRootNode"
        })
    ));
}

#[test]
fn scene_pointer_must_be_inside_the_blob() {
    let built = triangle_scene().build(BASE);
    let blob = built.blob();

    assert!(matches!(
        SceneReader::parse_scene(&blob, Pointer(BASE - 0x1000)),
        Err(ParserError::OutOfBounds { .. })
    ));
    assert!(matches!(
        SceneReader::parse_scene(&blob, Pointer::NULL),
        Err(ParserError::NullPointer { field: "aiScene" })
    ));
}

#[test]
fn pipeline_flags_use_the_native_bits() {
    assert_eq!(ImportFlags::ASSET_PIPELINE.bits(), 0x100C_0000);
    assert!(ImportFlags::LEFT_HANDED_PIPELINE.contains(ImportFlags::MAKE_LEFT_HANDED));
    assert!(!ImportFlags::ASSET_PIPELINE.contains(ImportFlags::FLIP_WINDING_ORDER));
}
