use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::ParserError;
use crate::common::reader::Blob;
use crate::common::types::{Color4D, Pointer};
use crate::material::types::{
    MATKEY_COLOR_DIFFUSE, MATKEY_NAME, MATKEY_TEXTURE, MaterialRaw, MaterialRecord, PropertyRaw, PropertyType,
    TEXTURE_TYPE_DIFFUSE, TEXTURE_TYPE_NONE,
};

pub struct MaterialReader {}

impl MaterialReader {
    pub fn parse_material(blob: &Blob, address: Pointer) -> Result<MaterialRecord, ParserError> {
        let raw = blob.read_required::<MaterialRaw>(address, "aiMaterial")?;
        let properties = blob.read_pointer_array(
            raw.properties,
            raw.num_properties as usize,
            "aiMaterial::mProperties",
            |blob, property| blob.read::<PropertyRaw>(property),
        )?;

        let mut material = MaterialRecord::default();
        for property in &properties {
            if property.matches(MATKEY_NAME, TEXTURE_TYPE_NONE, 0) {
                material.name = MaterialReader::read_string(blob, property)?;
            } else if property.matches(MATKEY_COLOR_DIFFUSE, TEXTURE_TYPE_NONE, 0) {
                material.diffuse = MaterialReader::read_color(blob, property)?;
            } else if property.matches(MATKEY_TEXTURE, TEXTURE_TYPE_DIFFUSE, 0) {
                material.diffuse_texture = MaterialReader::read_string(blob, property)?;
            }
        }

        Ok(material)
    }

    /// String payloads are a serialized `aiString`, but trimmed to the actual length: a u32 length,
    /// the characters and a terminating NUL. `None` if the property isn't a string.
    fn read_string(blob: &Blob, property: &PropertyRaw) -> Result<Option<String>, ParserError> {
        if property.kind() != PropertyType::String {
            return Ok(None);
        }

        let data = blob.read_bytes(
            property.data,
            property.data_length as usize,
            "aiMaterialProperty::mData",
        )?;
        let mut rdr = Cursor::new(data.as_slice());
        let length = rdr.read_u32::<LittleEndian>()? as usize;

        let chars = data.get(4..4 + length).ok_or(ParserError::FormatError {
            reason: "String property is shorter than its length prefix",
        })?;
        Ok(Some(String::from_utf8_lossy(chars).into_owned()))
    }

    /// Colors are stored as 3 (rgb, opaque) or 4 (rgba) floats or doubles. Other encodings are
    /// ignored, like the native `Get<aiColor4D>` does for mismatching types.
    fn read_color(blob: &Blob, property: &PropertyRaw) -> Result<Option<Color4D>, ParserError> {
        let components: Vec<f32> = match property.kind() {
            PropertyType::Float => blob
                .read_inline_array::<f32>(
                    property.data,
                    property.data_length as usize / 4,
                    "aiMaterialProperty::mData",
                )?,
            PropertyType::Double => blob
                .read_inline_array::<f64>(
                    property.data,
                    property.data_length as usize / 8,
                    "aiMaterialProperty::mData",
                )?
                .into_iter()
                .map(|component| component as f32)
                .collect(),
            _ => return Ok(None),
        };

        Ok(match components.as_slice() {
            [r, g, b, a, ..] => Some(Color4D {
                r: *r,
                g: *g,
                b: *b,
                a: *a,
            }),
            [r, g, b] => Some(Color4D {
                r: *r,
                g: *g,
                b: *b,
                a: 1.0,
            }),
            _ => None,
        })
    }
}
