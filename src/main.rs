use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::{Quat, Vec3};
use sceneport::io::fs::loader::FsLoader;
use sceneport::io::native::captured::CapturedBlobImporter;
use sceneport::rendering::common::types::{Material, Mesh};
use sceneport::rendering::importer::hierarchy_importer::SceneSink;
use sceneport::rendering::loader::scene_loader::SceneLoader;
use sceneport::settings::{CliArgs, ImportSettings};

/// Prints the node tree as it would be created in an engine.
#[derive(Default)]
struct TreePrinter {
    depths: Vec<usize>,
}

impl SceneSink for TreePrinter {
    type NodeId = usize;

    fn create_node(
        &mut self,
        parent: Option<usize>,
        name: &str,
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) -> usize {
        let depth = parent.map_or(0, |parent| self.depths[parent] + 1);
        println!(
            "{:indent$}{} (t: {}, r: {}, s: {})",
            "",
            name,
            translation,
            rotation,
            scale,
            indent = depth * 2
        );

        self.depths.push(depth);
        self.depths.len() - 1
    }

    fn attach_render_instance(&mut self, node: usize, mesh: &Mesh, material: &Material) {
        println!(
            "{:indent$}- {} ({} triangles, center {}, extents {}) with {} {}",
            "",
            mesh.name,
            mesh.triangle_count(),
            mesh.bounds.center(),
            mesh.bounds.extents(),
            material.name,
            material
                .albedo_texture
                .as_ref()
                .map(|texture| format!("[{:?}]", texture))
                .unwrap_or_default(),
            indent = self.depths[node] * 2 + 2
        );
    }
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let args = CliArgs::parse();
    log::trace!("Starting with args: {:?}", args);

    let settings = ImportSettings::from(&args);
    let asset_path = args.asset_path.clone().unwrap_or_else(|| {
        args.image
            .parent()
            .map(|parent| parent.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let assets = FsLoader::new(asset_path);
    log::debug!("Resolving texture paths relative to {}", assets.base_dir().display());
    let importer = CapturedBlobImporter::new(args.base_address);
    let scene = SceneLoader::new(&settings, &assets)
        .import(&importer, &args.image)
        .with_context(|| format!("Importing {}", args.image.display()))?;

    scene.emit(&mut TreePrinter::default());

    for diagnostic in &scene.diagnostics {
        println!("warning: {}", diagnostic);
    }

    Ok(())
}
