use num_enum::FromPrimitive;
use sceneport_files_derive_parseable::Parse;

use crate::common::types::{AiString, Color4D, Pointer};

pub const MATKEY_NAME: &str = "?mat.name";
pub const MATKEY_COLOR_DIFFUSE: &str = "$clr.diffuse";
pub const MATKEY_TEXTURE: &str = "$tex.file";

/// `aiTextureType_NONE`, the semantic of every non-texture property.
pub const TEXTURE_TYPE_NONE: u32 = 0;
/// `aiTextureType_DIFFUSE`
pub const TEXTURE_TYPE_DIFFUSE: u32 = 1;

/// `aiMaterial`
#[derive(Debug, Copy, Clone, Parse)]
pub struct MaterialRaw {
    pub properties: Pointer,
    pub num_properties: u32,
    pub num_allocated: u32,
}

/// `aiMaterialProperty`
#[derive(Debug, Clone, Parse)]
pub struct PropertyRaw {
    pub key: AiString,
    pub semantic: u32,
    pub index: u32,
    pub data_length: u32,
    pub property_type: u32,
    pub _padding0: u32,
    pub data: Pointer,
}

/// `aiPropertyTypeInfo`
#[repr(u32)]
#[derive(FromPrimitive, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PropertyType {
    Float = 0x1,
    Double = 0x2,
    String = 0x3,
    Integer = 0x4,
    Buffer = 0x5,
    #[default]
    Unknown,
}

impl PropertyRaw {
    pub fn kind(&self) -> PropertyType {
        PropertyType::from(self.property_type)
    }

    pub fn matches(&self, key: &str, semantic: u32, index: u32) -> bool {
        self.key.as_str() == key && self.semantic == semantic && self.index == index
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialRecord {
    pub name: Option<String>,
    pub diffuse: Option<Color4D>,
    /// Either a path relative to the asset or `*N`, referring to the embedded texture `N`.
    pub diffuse_texture: Option<String>,
}
