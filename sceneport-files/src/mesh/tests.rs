use crate::ParserError;
use crate::common::types::{Pointer, Vector3D};
use crate::mesh::reader::MeshReader;
use crate::mesh::types::PrimitiveTypes;
use crate::scene::reader::SceneReader;
use crate::writer::{MeshDesc, NodeDesc, SceneBuilder};

const BASE: u64 = 0x1_0000;

fn v(x: f32, y: f32, z: f32) -> Vector3D {
    Vector3D { x, y, z }
}

fn quad_and_triangle() -> MeshDesc {
    MeshDesc::new(
        "Mixed",
        vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 1.0, 0.0), v(0.0, 1.0, 0.0)],
        vec![vec![0, 1, 2], vec![0, 1, 2, 3]],
        3,
    )
}

#[test]
fn decodes_vertices_faces_and_name() -> Result<(), anyhow::Error> {
    let built = SceneBuilder::new()
        .with_mesh(quad_and_triangle())
        .with_root(NodeDesc::new("Root"))
        .build(BASE);
    let blob = built.blob();
    let header = SceneReader::parse_header(&blob, built.scene)?;
    let mesh_pointer = blob.read_pointer(header.meshes)?;
    let mesh = MeshReader::parse_mesh(&blob, mesh_pointer)?;

    assert_eq!(mesh.name, "Mixed");
    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.vertices[2], v(1.0, 1.0, 0.0));
    assert_eq!(mesh.faces.len(), 2);
    assert_eq!(mesh.faces[0].indices, vec![0, 1, 2]);
    assert_eq!(mesh.faces[1].indices, vec![0, 1, 2, 3]);
    assert_eq!(mesh.material_index, 3);
    assert_eq!(mesh.primitive_types, PrimitiveTypes::TRIANGLE | PrimitiveTypes::POLYGON);
    Ok(())
}

#[test]
fn null_texture_coordinate_slots_are_absent_channels() -> Result<(), anyhow::Error> {
    let uvs = vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 1.0, 0.0), v(0.0, 1.0, 0.0)];
    let built = SceneBuilder::new()
        .with_mesh(quad_and_triangle().with_texture_coords(uvs.clone()))
        .with_root(NodeDesc::new("Root"))
        .build(BASE);
    let blob = built.blob();
    let scene = SceneReader::parse_scene(&blob, built.scene)?;
    let mesh = &scene.meshes[0];

    assert_eq!(mesh.texture_coords.len(), 8);
    assert_eq!(mesh.texture_coords(0), Some(uvs.as_slice()));
    assert!(mesh.texture_coords(1).is_none());
    assert_eq!(mesh.num_uv_components[0], 2);
    Ok(())
}

#[test]
fn vertex_pointer_outside_of_the_blob_fails() -> Result<(), anyhow::Error> {
    let mut built = SceneBuilder::new()
        .with_mesh(quad_and_triangle())
        .with_root(NodeDesc::new("Root"))
        .build(BASE);
    let mesh_pointer = {
        let blob = built.blob();
        let header = SceneReader::parse_header(&blob, built.scene)?;
        blob.read_pointer(header.meshes)?
    };

    // aiMesh::mVertices
    let vertices_field = mesh_pointer.offset(16).unwrap();
    built.writer.write_pointer_at(vertices_field, Pointer(0xdead_beef_0000));

    let blob = built.blob();
    assert!(matches!(
        MeshReader::parse_mesh(&blob, mesh_pointer),
        Err(ParserError::OutOfBounds { .. })
    ));

    built.writer.write_pointer_at(vertices_field, Pointer::NULL);
    let blob = built.blob();
    assert!(matches!(
        MeshReader::parse_mesh(&blob, mesh_pointer),
        Err(ParserError::NullPointer {
            field: "aiMesh::mVertices"
        })
    ));
    Ok(())
}
