use log::warn;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportDiagnostic {
    #[error("Face {face} of mesh {mesh} has {index_count} indices, only triangles are supported")]
    UnsupportedPolygon {
        mesh: usize,
        face: usize,
        index_count: usize,
    },

    #[error("Face {face} of mesh {mesh} references the missing vertex {index}")]
    InvalidFaceIndex { mesh: usize, face: usize, index: u32 },

    #[error("Texture \"{reference}\" could not be resolved: {reason}")]
    TextureResolution { reference: String, reason: String },
}

/// Collects the diagnostics of one import, logging each of them as it comes in.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: Vec<ImportDiagnostic>,
}

impl DiagnosticLog {
    pub fn report(&mut self, diagnostic: ImportDiagnostic) {
        warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[ImportDiagnostic] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ImportDiagnostic> {
        self.entries
    }
}
