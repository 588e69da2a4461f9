use glam::Vec3;
use itertools::Itertools;
use log::{debug, trace};
use sceneport_files::mesh::types::MeshRecord;

use crate::rendering::common::coordinate_systems::{WindingPolicy, native_to_uv, native_to_vec3};
use crate::rendering::common::diagnostics::{DiagnosticLog, ImportDiagnostic};
use crate::rendering::common::mesh_utils::MeshUtils;
use crate::rendering::common::types::{Mesh, VertexBuffers};

pub struct MeshImporter {}

impl MeshImporter {
    /// Converts the record at `mesh_index` into a triangle list. Faces that aren't triangles or that
    /// point outside of the vertex buffer are skipped and reported.
    pub fn create_mesh(
        mesh_index: usize,
        record: &MeshRecord,
        winding: WindingPolicy,
        diagnostics: &mut DiagnosticLog,
    ) -> Mesh {
        let verts = record.vertices.iter().map(native_to_vec3).collect_vec();

        // Only the first channel is used, the native importer generates it if requested.
        let uvs = record
            .texture_coords(0)
            .map(|channel| channel.iter().map(native_to_uv).collect_vec())
            .unwrap_or_default();

        let mut indices = Vec::<u32>::with_capacity(record.faces.len() * 3);
        for (face_index, face) in record.faces.iter().enumerate() {
            let [i0, i1, i2] = face.indices[..] else {
                debug!(
                    "Skipped polygon of mesh {}: {:?}",
                    record.name,
                    MeshImporter::face_positions(&verts, &face.indices)
                );
                diagnostics.report(ImportDiagnostic::UnsupportedPolygon {
                    mesh: mesh_index,
                    face: face_index,
                    index_count: face.indices.len(),
                });
                continue;
            };

            if let Some(&index) = [i0, i1, i2].iter().find(|&&i| i as usize >= verts.len()) {
                diagnostics.report(ImportDiagnostic::InvalidFaceIndex {
                    mesh: mesh_index,
                    face: face_index,
                    index,
                });
                continue;
            }

            indices.extend_from_slice(&winding.apply([i0, i1, i2]));
        }

        let normals = MeshUtils::compute_normals(&verts, &indices);
        let bounds = MeshUtils::compute_bounds(&verts);
        trace!(
            "Mesh {} \"{}\": {} vertices, {} triangles",
            mesh_index,
            record.name,
            verts.len(),
            indices.len() / 3
        );

        Mesh {
            name: record.name.clone(),
            index_buffer: indices,
            bounds,
            material_index: record.material_index,
            vertex_buffers: VertexBuffers {
                position_buffer: verts,
                normals_buffer: normals,
                texcoord_buffer_0: uvs,
            },
        }
    }

    fn face_positions(verts: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
        indices
            .iter()
            .filter_map(|&index| verts.get(index as usize).copied())
            .collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use sceneport_files::common::types::Vector3D;
    use sceneport_files::mesh::types::{FaceRecord, MAX_TEXTURE_COORDS, PrimitiveTypes};
    use sceneport_files::scene::types::ImportFlags;

    use super::*;
    use crate::rendering::common::coordinate_systems::FrontFace;

    fn record(faces: Vec<Vec<u32>>) -> MeshRecord {
        let v = |x, y, z| Vector3D { x, y, z };
        MeshRecord {
            name: "Test".to_string(),
            primitive_types: PrimitiveTypes::TRIANGLE,
            vertices: vec![v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 1.0, 0.0), v(1.0, 1.0, 0.0)],
            texture_coords: vec![None; MAX_TEXTURE_COORDS],
            num_uv_components: [0; MAX_TEXTURE_COORDS],
            faces: faces.into_iter().map(|indices| FaceRecord { indices }).collect(),
            material_index: 0,
        }
    }

    fn default_winding() -> WindingPolicy {
        WindingPolicy::new(ImportFlags::LEFT_HANDED_PIPELINE, FrontFace::Clockwise)
    }

    #[test]
    fn triangles_are_flipped() {
        let mut diagnostics = DiagnosticLog::default();
        let mesh = MeshImporter::create_mesh(
            0,
            &record(vec![vec![0, 1, 2], vec![1, 3, 2]]),
            default_winding(),
            &mut diagnostics,
        );

        assert_eq!(mesh.index_buffer, vec![0, 2, 1, 1, 2, 3]);
        assert_eq!(mesh.vertex_buffers.position_buffer.len(), 4);
        assert_eq!(mesh.vertex_buffers.normals_buffer.len(), 4);
        assert!(mesh.vertex_buffers.texcoord_buffer_0.is_empty());
        assert_eq!(mesh.bounds.max, Vec3::new(1.0, 1.0, 0.0));
        assert!(diagnostics.entries().is_empty());
    }

    #[test]
    fn polygons_and_lines_are_skipped() {
        let mut diagnostics = DiagnosticLog::default();
        let mesh = MeshImporter::create_mesh(
            2,
            &record(vec![vec![0, 1, 3, 2], vec![0, 1], vec![0, 1, 2]]),
            default_winding(),
            &mut diagnostics,
        );

        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(
            diagnostics.entries(),
            &[
                ImportDiagnostic::UnsupportedPolygon {
                    mesh: 2,
                    face: 0,
                    index_count: 4
                },
                ImportDiagnostic::UnsupportedPolygon {
                    mesh: 2,
                    face: 1,
                    index_count: 2
                },
            ]
        );
    }

    #[test]
    fn out_of_range_indices_are_skipped() {
        let mut diagnostics = DiagnosticLog::default();
        let mesh = MeshImporter::create_mesh(0, &record(vec![vec![0, 1, 9]]), default_winding(), &mut diagnostics);

        assert!(mesh.index_buffer.is_empty());
        assert_eq!(
            diagnostics.entries(),
            &[ImportDiagnostic::InvalidFaceIndex {
                mesh: 0,
                face: 0,
                index: 9
            }]
        );
    }

    #[test]
    fn first_uv_channel_is_used() {
        let mut source = record(vec![]);
        let uv = |x, y| Vector3D { x, y, z: 0.0 };
        source.texture_coords[0] = Some(vec![uv(0.0, 0.0), uv(1.0, 0.0), uv(0.0, 1.0), uv(1.0, 1.0)]);
        source.texture_coords[1] = Some(vec![uv(9.0, 9.0); 4]);

        let mesh = MeshImporter::create_mesh(0, &source, default_winding(), &mut DiagnosticLog::default());
        assert_eq!(mesh.vertex_buffers.texcoord_buffer_0[3], Vec2::new(1.0, 1.0));
    }
}
