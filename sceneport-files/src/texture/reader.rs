use crate::ParserError;
use crate::common::reader::Blob;
use crate::common::types::{Pointer, Texel};
use crate::texture::types::{TextureData, TextureRaw, TextureRecord};

pub struct TextureReader {}

impl TextureReader {
    pub fn parse_texture(blob: &Blob, address: Pointer) -> Result<TextureRecord, ParserError> {
        let raw = blob.read_required::<TextureRaw>(address, "aiTexture")?;

        let data = if raw.height == 0 {
            TextureData::Compressed(blob.read_bytes(raw.data, raw.width as usize, "aiTexture::pcData")?)
        } else {
            let count = (raw.width as usize)
                .checked_mul(raw.height as usize)
                .ok_or(ParserError::FormatError {
                    reason: "Texture dimensions overflow",
                })?;
            TextureData::Texels(blob.read_inline_array::<Texel>(raw.data, count, "aiTexture::pcData")?)
        };

        let hint_length = raw
            .format_hint
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(raw.format_hint.len());

        Ok(TextureRecord {
            width: raw.width,
            height: raw.height,
            format_hint: String::from_utf8_lossy(&raw.format_hint[..hint_length]).into_owned(),
            filename: raw.filename.0,
            data,
        })
    }
}
