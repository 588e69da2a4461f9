use std::path::Path;

use itertools::Itertools;
use log::{info, trace, warn};
use sceneport_files::scene::reader::SceneReader;
use sceneport_files::scene::types::{SceneAsset, SceneFlags};

use crate::ImportError;
use crate::io::common::loader::RawAssetLoader;
use crate::io::native::session::{ImportSession, NativeImporter};
use crate::rendering::asset_graph::resolver::Resolver;
use crate::rendering::asset_graph::texture_generator::TextureGenerator;
use crate::rendering::common::coordinate_systems::WindingPolicy;
use crate::rendering::common::diagnostics::DiagnosticLog;
use crate::rendering::common::types::ImportedScene;
use crate::rendering::importer::hierarchy_importer::HierarchyImporter;
use crate::rendering::importer::material_importer::MaterialImporter;
use crate::rendering::importer::mesh_importer::MeshImporter;
use crate::rendering::loader::texture_loader::{CodecDecoder, ImageDecoder};
use crate::settings::ImportSettings;

/// Runs whole imports: native import, decoding the scene memory and rebuilding it as an [`ImportedScene`].
pub struct SceneLoader<'a> {
    settings: &'a ImportSettings,
    assets: &'a dyn RawAssetLoader,
    decoder: &'a dyn ImageDecoder,
}

impl<'a> SceneLoader<'a> {
    /// External textures are loaded through `assets`, relative to wherever it is rooted.
    pub fn new(settings: &'a ImportSettings, assets: &'a dyn RawAssetLoader) -> Self {
        Self {
            settings,
            assets,
            decoder: &CodecDecoder,
        }
    }

    pub fn with_decoder(mut self, decoder: &'a dyn ImageDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn import<I: NativeImporter>(&self, importer: &I, path: &Path) -> Result<ImportedScene, ImportError> {
        let session = ImportSession::open(importer, path, self.settings.flags)?;
        let (blob, scene) = session.blob();
        trace!("Decoding the scene of {} at {:?}", session.path().display(), scene);

        let asset = SceneReader::parse_scene(&blob, scene)?;
        self.convert(&asset)
        // the session and thus the native scene is released here, on success and on error.
    }

    /// Rebuilds a decoded scene. All indices between the records are validated here, so the
    /// result can be used without further checks.
    pub fn convert(&self, asset: &SceneAsset) -> Result<ImportedScene, ImportError> {
        if asset.flags.contains(SceneFlags::INCOMPLETE) {
            warn!("The scene is flagged as incomplete, it may lack meshes");
        }
        if asset.num_animations > 0 {
            info!("Skipping {} animations", asset.num_animations);
        }
        info!(
            "Importing {} meshes, {} materials, {} embedded textures and {} nodes",
            asset.meshes.len(),
            asset.materials.len(),
            asset.textures.len(),
            asset.root.count()
        );

        if let Some(mesh) = asset
            .meshes
            .iter()
            .find(|mesh| mesh.material_index as usize >= asset.materials.len())
        {
            return Err(ImportError::MaterialIndexOutOfRange {
                mesh: mesh.name.clone(),
                index: mesh.material_index,
                count: asset.materials.len(),
            });
        }

        let mut diagnostics = DiagnosticLog::default();
        let winding = WindingPolicy::new(self.settings.flags, self.settings.front_face);

        let meshes = asset
            .meshes
            .iter()
            .enumerate()
            .map(|(index, record)| MeshImporter::create_mesh(index, record, winding, &mut diagnostics))
            .collect_vec();

        let textures = Resolver::new(TextureGenerator::new(
            &asset.textures,
            self.assets,
            self.decoder,
            self.settings.allow_absolute_texture_paths,
        ));
        let materials = asset
            .materials
            .iter()
            .enumerate()
            .map(|(index, record)| MaterialImporter::create_material(index, record, &textures, &mut diagnostics))
            .collect_vec();
        trace!("Resolved {} distinct textures", textures.len());

        let roots = HierarchyImporter::build(&asset.root, &meshes)?;

        Ok(ImportedScene {
            meshes,
            materials,
            roots,
            diagnostics: diagnostics.into_entries(),
        })
    }
}
