use sceneport_files_derive_parseable::Parse;

use crate::common::types::{AiString, Pointer, Texel};

/// `HINTMAXTEXTURELEN`
pub const FORMAT_HINT_LENGTH: usize = 9;

/// `aiTexture`
#[derive(Debug, Clone, Parse)]
pub struct TextureRaw {
    pub width: u32,
    pub height: u32,
    pub format_hint: [u8; FORMAT_HINT_LENGTH],
    pub _padding0: [u8; 7],
    pub data: Pointer,
    pub filename: AiString,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextureData {
    /// `width * height` texels, row by row, top row first.
    Texels(Vec<Texel>),
    /// The texture file as it was embedded into the source asset (e.g. png), `format_hint` tells
    /// which codec it needs.
    Compressed(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextureRecord {
    pub width: u32,
    /// 0 for [`TextureData::Compressed`], then `width` is the byte length.
    pub height: u32,
    pub format_hint: String,
    pub filename: String,
    pub data: TextureData,
}

impl TextureRecord {
    pub fn is_compressed(&self) -> bool {
        matches!(self.data, TextureData::Compressed(_))
    }
}
