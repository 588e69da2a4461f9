use crate::ParserError;
use crate::common::reader::Blob;
use crate::common::types::{Pointer, Vector3D};
use crate::mesh::types::{FaceRecord, FaceRecordRaw, MeshRecord, MeshRecordRaw, PrimitiveTypes};

pub struct MeshReader {}

impl MeshReader {
    pub fn parse_mesh(blob: &Blob, address: Pointer) -> Result<MeshRecord, ParserError> {
        let raw = blob.read_required::<MeshRecordRaw>(address, "aiMesh")?;
        let num_vertices = raw.num_vertices as usize;

        let vertices = blob.read_inline_array::<Vector3D>(raw.vertices, num_vertices, "aiMesh::mVertices")?;

        let texture_coords = raw
            .texture_coords
            .iter()
            .map(|&channel| {
                if channel.is_null() {
                    Ok(None)
                } else {
                    blob.read_inline_array::<Vector3D>(channel, num_vertices, "aiMesh::mTextureCoords")
                        .map(Some)
                }
            })
            .collect::<Result<Vec<_>, ParserError>>()?;

        let faces = blob
            .read_inline_array::<FaceRecordRaw>(raw.faces, raw.num_faces as usize, "aiMesh::mFaces")?
            .into_iter()
            .map(|face| MeshReader::resolve_face(blob, face))
            .collect::<Result<Vec<_>, ParserError>>()?;

        Ok(MeshRecord {
            name: raw.name.0,
            primitive_types: PrimitiveTypes::from_bits_retain(raw.primitive_types),
            vertices,
            texture_coords,
            num_uv_components: raw.num_uv_components,
            faces,
            material_index: raw.material_index,
        })
    }

    fn resolve_face(blob: &Blob, face: FaceRecordRaw) -> Result<FaceRecord, ParserError> {
        Ok(FaceRecord {
            indices: blob.read_inline_array::<u32>(face.indices, face.num_indices as usize, "aiFace::mIndices")?,
        })
    }
}
