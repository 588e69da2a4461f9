use std::cell::RefCell;
use std::path::Path;

use log::{debug, warn};
use sceneport_files::common::reader::Blob;
use sceneport_files::common::types::Pointer;
use sceneport_files::scene::types::ImportFlags;

use crate::io::native::session::NativeImporter;

/// A scene as it was laid out in the import library's memory, captured into a file. The file
/// starts with the `aiScene` record, which had been mapped at `base_address`.
pub struct CapturedScene {
    base_address: u64,
    data: Vec<u8>,
}

impl CapturedScene {
    pub fn new(base_address: u64, data: Vec<u8>) -> Self {
        Self { base_address, data }
    }
}

/// Plays the role of the import library for previously captured scenes. Post-processing has already
/// happened when the scene was captured, so the requested flags can't be honored anymore.
pub struct CapturedBlobImporter {
    base_address: u64,
    last_error: RefCell<String>,
}

impl CapturedBlobImporter {
    pub fn new(base_address: u64) -> Self {
        Self {
            base_address,
            last_error: RefCell::new(String::new()),
        }
    }
}

impl NativeImporter for CapturedBlobImporter {
    type Handle = CapturedScene;

    fn import(&self, path: &Path, flags: ImportFlags) -> Option<CapturedScene> {
        debug!("Ignoring {:?}, {} has been captured post-processed", flags, path.display());

        match std::fs::read(path) {
            Ok(data) if data.is_empty() => {
                *self.last_error.borrow_mut() = "The captured image is empty".to_string();
                None
            }
            Ok(data) => Some(CapturedScene::new(self.base_address, data)),
            Err(err) => {
                warn!("Could not read the captured image {}: {}", path.display(), err);
                *self.last_error.borrow_mut() = err.to_string();
                None
            }
        }
    }

    fn error_string(&self) -> String {
        self.last_error.borrow().clone()
    }

    fn blob<'h>(&self, handle: &'h CapturedScene) -> (Blob<'h>, Pointer) {
        (
            Blob::new(handle.base_address, &handle.data),
            Pointer(handle.base_address),
        )
    }

    fn release(&self, handle: &CapturedScene) {
        debug!("Releasing {} captured bytes", handle.data.len());
    }
}
