use glam::Vec4;
use sceneport_files::common::types::Color4D;
use sceneport_files::material::types::MaterialRecord;

use crate::rendering::asset_graph::resolver::{ResourceGenerator, Resolver};
use crate::rendering::asset_graph::texture_generator::TextureResolution;
use crate::rendering::common::diagnostics::{DiagnosticLog, ImportDiagnostic};
use crate::rendering::common::types::Material;

pub struct MaterialImporter {}

impl MaterialImporter {
    pub fn create_material<G: ResourceGenerator<TextureResolution>>(
        material_index: usize,
        record: &MaterialRecord,
        textures: &Resolver<G, TextureResolution>,
        diagnostics: &mut DiagnosticLog,
    ) -> Material {
        let diffuse = record.diffuse.unwrap_or(Color4D::WHITE);

        let albedo_texture = match record.diffuse_texture.as_deref() {
            None | Some("") => None,
            Some(reference) => match textures.resolve(reference) {
                (Ok(texture), _) => Some(texture),
                (Err(reason), generated) => {
                    // Every broken reference is reported once, no matter how many materials use it.
                    if generated {
                        diagnostics.report(ImportDiagnostic::TextureResolution {
                            reference: reference.to_string(),
                            reason,
                        });
                    }
                    None
                }
            },
        };

        Material {
            name: record
                .name
                .clone()
                .unwrap_or_else(|| format!("Material{}", material_index)),
            base_color: Vec4::new(diffuse.r, diffuse.g, diffuse.b, diffuse.a),
            albedo_texture,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::rendering::common::types::Texture;

    /// Succeeds for names starting with "ok".
    struct FakeTextures;

    impl ResourceGenerator<TextureResolution> for FakeTextures {
        fn generate(&self, name: &str) -> TextureResolution {
            if name.starts_with("ok") {
                Ok(Arc::new(Texture {
                    reference: name.to_string(),
                    data: image::RgbaImage::new(1, 1),
                }))
            } else {
                Err("broken".to_string())
            }
        }
    }

    fn textured(reference: &str) -> MaterialRecord {
        MaterialRecord {
            name: None,
            diffuse: None,
            diffuse_texture: Some(reference.to_string()),
        }
    }

    #[test]
    fn defaults_to_white_without_texture() {
        let resolver = Resolver::new(FakeTextures);
        let mut diagnostics = DiagnosticLog::default();

        let material =
            MaterialImporter::create_material(3, &MaterialRecord::default(), &resolver, &mut diagnostics);
        assert_eq!(material.name, "Material3");
        assert_eq!(material.base_color, Vec4::ONE);
        assert!(material.albedo_texture.is_none());

        let material = MaterialImporter::create_material(0, &textured(""), &resolver, &mut diagnostics);
        assert!(material.albedo_texture.is_none());
        assert!(resolver.is_empty());
        assert!(diagnostics.entries().is_empty());
    }

    #[test]
    fn shares_textures_and_reports_failures_once() {
        let resolver = Resolver::new(FakeTextures);
        let mut diagnostics = DiagnosticLog::default();

        let a = MaterialImporter::create_material(0, &textured("ok.png"), &resolver, &mut diagnostics);
        let b = MaterialImporter::create_material(1, &textured("ok.png"), &resolver, &mut diagnostics);
        MaterialImporter::create_material(2, &textured("bad.png"), &resolver, &mut diagnostics);
        MaterialImporter::create_material(3, &textured("bad.png"), &resolver, &mut diagnostics);

        assert!(Arc::ptr_eq(
            a.albedo_texture.as_ref().unwrap(),
            b.albedo_texture.as_ref().unwrap()
        ));
        assert_eq!(
            diagnostics.entries(),
            &[ImportDiagnostic::TextureResolution {
                reference: "bad.png".to_string(),
                reason: "broken".to_string()
            }]
        );
        assert_eq!(resolver.len(), 2);
    }
}
