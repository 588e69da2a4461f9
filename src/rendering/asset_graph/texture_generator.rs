use std::sync::Arc;

use log::debug;
use sceneport_files::texture::types::TextureRecord;

use crate::io::common::loader::RawAssetLoader;
use crate::rendering::asset_graph::resolver::ResourceGenerator;
use crate::rendering::common::types::Texture;
use crate::rendering::loader::texture_loader::{ImageDecoder, TextureLoader};

/// Either the texture or why it couldn't be loaded. Failures are cached like successes.
pub type TextureResolution = Result<Arc<Texture>, String>;

/// Loads the textures of one scene: embedded ones from its texture records, others through `loader`.
pub struct TextureGenerator<'a> {
    embedded: &'a [TextureRecord],
    loader: &'a dyn RawAssetLoader,
    decoder: &'a dyn ImageDecoder,
    allow_absolute_paths: bool,
}

impl<'a> TextureGenerator<'a> {
    pub fn new(
        embedded: &'a [TextureRecord],
        loader: &'a dyn RawAssetLoader,
        decoder: &'a dyn ImageDecoder,
        allow_absolute_paths: bool,
    ) -> Self {
        Self {
            embedded,
            loader,
            decoder,
            allow_absolute_paths,
        }
    }
}

impl ResourceGenerator<TextureResolution> for TextureGenerator<'_> {
    fn generate(&self, name: &str) -> TextureResolution {
        debug!("Loading texture {}", name);

        TextureLoader::load(
            name,
            self.embedded,
            self.loader,
            self.decoder,
            self.allow_absolute_paths,
        )
        .map(|data| {
            Arc::new(Texture {
                reference: name.to_string(),
                data,
            })
        })
        .map_err(|err| format!("{:#}", err))
    }
}
