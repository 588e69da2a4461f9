use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sceneport_files::scene::types::ImportFlags;

use crate::rendering::common::coordinate_systems::FrontFace;

#[derive(Parser, Debug)]
#[command(name = "sceneport")]
#[command(version)]
#[command(about = "Rebuilds the scene graph of a captured asset import")]
pub struct CliArgs {
    /// The captured memory of an imported scene, starting with its aiScene record.
    pub image: PathBuf,

    /// The address the image had been mapped at when it was captured.
    #[arg(long, env = "SCENEPORT_BASE_ADDRESS", default_value = "0x10000", value_parser = parse_address)]
    pub base_address: u64,

    #[arg(long, value_enum, env = "SCENEPORT_FRONT_FACE", default_value_t = FrontFaceArg::Cw)]
    pub front_face: FrontFaceArg,

    /// The faces in the image have been emitted clockwise (aiProcess_FlipWindingOrder).
    #[arg(long, env = "SCENEPORT_FLIP_WINDING")]
    pub flip_winding_order: bool,

    #[arg(
        long,
        env = "SCENEPORT_ALLOW_ABSOLUTE_TEXTURE_PATHS",
        help = "Caution: This lets the scene read arbitrary image files from your machine!"
    )]
    pub allow_absolute_texture_paths: bool,

    /// Where relative texture paths are resolved, defaults to the directory of the image.
    #[arg(long, env = "SCENEPORT_ASSET_PATH")]
    pub asset_path: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrontFaceArg {
    Cw,
    Ccw,
}

impl From<FrontFaceArg> for FrontFace {
    fn from(value: FrontFaceArg) -> Self {
        match value {
            FrontFaceArg::Cw => FrontFace::Clockwise,
            FrontFaceArg::Ccw => FrontFace::CounterClockwise,
        }
    }
}

// 0x prefixed hex or decimal
fn parse_address(input: &str) -> Result<u64, String> {
    let parsed = match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => input.replace('_', "").parse::<u64>(),
    };

    match parsed {
        Ok(0) => Err("The base address must not be null".to_string()),
        Ok(address) => Ok(address),
        Err(err) => Err(format!("Invalid address {}: {}", input, err)),
    }
}

/// Everything the import itself can be configured with.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSettings {
    /// Passed on to the native importer, also decides the winding of the emitted faces.
    pub flags: ImportFlags,
    /// The winding the target engine treats as front facing.
    pub front_face: FrontFace,
    pub allow_absolute_texture_paths: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            flags: ImportFlags::LEFT_HANDED_PIPELINE,
            front_face: FrontFace::Clockwise,
            allow_absolute_texture_paths: false,
        }
    }
}

impl From<&CliArgs> for ImportSettings {
    fn from(args: &CliArgs) -> Self {
        let mut flags = ImportSettings::default().flags;
        flags.set(ImportFlags::FLIP_WINDING_ORDER, args.flip_winding_order);

        Self {
            flags,
            front_face: args.front_face.into(),
            allow_absolute_texture_paths: args.allow_absolute_texture_paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_left_handed_pipeline() -> Result<(), anyhow::Error> {
        let args = CliArgs::try_parse_from(["sceneport", "scene.bin"])?;
        let settings = ImportSettings::from(&args);

        assert_eq!(args.base_address, 0x10000);
        assert_eq!(settings, ImportSettings::default());
        assert!(settings.flags.contains(ImportFlags::MAKE_LEFT_HANDED));
        assert!(!settings.allow_absolute_texture_paths);
        Ok(())
    }

    #[test]
    fn flags_are_derived_from_the_arguments() -> Result<(), anyhow::Error> {
        let args = CliArgs::try_parse_from([
            "sceneport",
            "scene.bin",
            "--base-address",
            "0x7fff_0000",
            "--front-face",
            "ccw",
            "--flip-winding-order",
            "--allow-absolute-texture-paths",
        ])?;
        let settings = ImportSettings::from(&args);

        assert_eq!(args.base_address, 0x7fff_0000);
        assert_eq!(settings.front_face, FrontFace::CounterClockwise);
        assert!(settings.flags.contains(ImportFlags::FLIP_WINDING_ORDER));
        assert!(settings.allow_absolute_texture_paths);
        Ok(())
    }

    #[test]
    fn addresses_must_not_be_null() {
        assert_eq!(parse_address("4096"), Ok(4096));
        assert!(parse_address("0x0").is_err());
        assert!(parse_address("main").is_err());
    }
}
