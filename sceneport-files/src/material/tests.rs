use crate::common::types::Color4D;
use crate::material::types::MaterialRecord;
use crate::scene::reader::SceneReader;
use crate::writer::{MaterialDesc, NodeDesc, SceneBuilder};

const BASE: u64 = 0x20_0000;

fn decode(materials: Vec<MaterialDesc>) -> Result<Vec<MaterialRecord>, anyhow::Error> {
    let builder = materials
        .into_iter()
        .fold(SceneBuilder::new(), SceneBuilder::with_material)
        .with_root(NodeDesc::new("Root"));
    let built = builder.build(BASE);
    let blob = built.blob();
    Ok(SceneReader::parse_scene(&blob, built.scene)?.materials)
}

#[test]
fn decodes_name_color_and_texture() -> Result<(), anyhow::Error> {
    let red = Color4D {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    let materials = decode(vec![
        MaterialDesc::colored("Red", red),
        MaterialDesc::colored("Bricks", Color4D::WHITE).with_texture("textures/bricks.png"),
    ])?;

    assert_eq!(materials[0].name.as_deref(), Some("Red"));
    assert_eq!(materials[0].diffuse, Some(red));
    assert_eq!(materials[0].diffuse_texture, None);
    assert_eq!(materials[1].diffuse_texture.as_deref(), Some("textures/bricks.png"));
    Ok(())
}

#[test]
fn material_without_properties_is_empty() -> Result<(), anyhow::Error> {
    let materials = decode(vec![MaterialDesc::default()])?;
    assert_eq!(materials, vec![MaterialRecord::default()]);
    Ok(())
}

#[test]
fn embedded_texture_reference_is_kept_verbatim() -> Result<(), anyhow::Error> {
    let materials = decode(vec![MaterialDesc::default().with_texture("*2")])?;
    assert_eq!(materials[0].diffuse_texture.as_deref(), Some("*2"));
    assert_eq!(materials[0].diffuse, None);
    Ok(())
}
