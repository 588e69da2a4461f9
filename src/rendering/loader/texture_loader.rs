use std::path::Path;

use anyhow::{Context, anyhow, bail};
use image::{ImageFormat, Rgba, RgbaImage};
use log::{trace, warn};
use sceneport_files::common::types::Texel;
use sceneport_files::texture::types::{TextureData, TextureRecord};

use crate::io::common::loader::RawAssetLoader;

/// Turns encoded image files (png, jpeg, ...) into pixels, rows top-down as stored in the file.
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8], format_hint: &str) -> Result<RgbaImage, anyhow::Error>;
}

/// [`ImageDecoder`] backed by the `image` crate.
pub struct CodecDecoder;

impl ImageDecoder for CodecDecoder {
    fn decode(&self, bytes: &[u8], format_hint: &str) -> Result<RgbaImage, anyhow::Error> {
        // The hint is an extension like "png" or "jpg", but may also be empty.
        let image = match ImageFormat::from_extension(format_hint) {
            Some(format) => image::load_from_memory_with_format(bytes, format),
            None => image::load_from_memory(bytes),
        }
        .with_context(|| format!("Decoding {} bytes (hint: {:?})", bytes.len(), format_hint))?;

        Ok(image.to_rgba8())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureReference<'r> {
    /// `*N`
    Embedded(usize),
    External(&'r str),
}

impl<'r> TextureReference<'r> {
    /// Only `*` followed by a non-negative integer is embedded, everything else (e.g. `*abc.png`) is a path.
    pub fn parse(reference: &'r str) -> Self {
        match reference.strip_prefix('*').map(str::parse::<usize>) {
            Some(Ok(index)) => TextureReference::Embedded(index),
            _ => TextureReference::External(reference),
        }
    }
}

/// Whether `path` is anchored somewhere else than the asset directory, independent of the host OS:
/// `/a.png`, `\a.png`, `C:\a.png` and `C:a.png` are all rooted.
pub fn is_rooted(path: &str) -> bool {
    if path.starts_with(['/', '\\']) || Path::new(path).has_root() {
        return true;
    }

    let mut chars = path.chars();
    matches!((chars.next(), chars.next()), (Some(drive), Some(':')) if drive.is_ascii_alphabetic())
}

pub struct TextureLoader {}

impl TextureLoader {
    /// Resolves a (non-empty) diffuse texture reference. The returned image is stored bottom-up.
    pub fn load(
        reference: &str,
        embedded: &[TextureRecord],
        loader: &dyn RawAssetLoader,
        decoder: &dyn ImageDecoder,
        allow_absolute_paths: bool,
    ) -> Result<RgbaImage, anyhow::Error> {
        match TextureReference::parse(reference) {
            TextureReference::Embedded(index) => {
                let record = embedded.get(index).ok_or_else(|| {
                    anyhow!(
                        "Embedded texture {} does not exist, there are {}",
                        index,
                        embedded.len()
                    )
                })?;
                TextureLoader::load_embedded(record, decoder)
            }
            TextureReference::External(path) => {
                if is_rooted(path) && !allow_absolute_paths {
                    warn!("Refusing to load the absolute texture path {}", path);
                    bail!("Absolute texture paths are not allowed");
                }

                let bytes = loader.load_raw_owned(path)?;
                let extension = Path::new(path)
                    .extension()
                    .and_then(|extension| extension.to_str())
                    .unwrap_or_default();
                let mut image = decoder.decode(&bytes, extension)?;
                image::imageops::flip_vertical_in_place(&mut image);
                Ok(image)
            }
        }
    }

    pub fn load_embedded(record: &TextureRecord, decoder: &dyn ImageDecoder) -> Result<RgbaImage, anyhow::Error> {
        match &record.data {
            TextureData::Texels(texels) => TextureLoader::decode_texels(record.width, record.height, texels),
            TextureData::Compressed(bytes) => {
                trace!("Decoding embedded {} ({} bytes)", record.format_hint, bytes.len());
                let mut image = decoder.decode(bytes, &record.format_hint)?;
                image::imageops::flip_vertical_in_place(&mut image);
                Ok(image)
            }
        }
    }

    /// Repacks top-down BGRA texels into a bottom-up RGBA8 image.
    pub fn decode_texels(width: u32, height: u32, texels: &[Texel]) -> Result<RgbaImage, anyhow::Error> {
        if texels.len() != width as usize * height as usize {
            bail!(
                "Expected {}x{} texels, but there are {}",
                width,
                height,
                texels.len()
            );
        }

        Ok(RgbaImage::from_fn(width, height, |x, y| {
            let texel = texels[(height - 1 - y) as usize * width as usize + x as usize];
            Rgba([texel.r, texel.g, texel.b, texel.a])
        }))
    }
}
