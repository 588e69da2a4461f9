use std::path::{Path, PathBuf};

use log::{debug, trace};
use sceneport_files::common::reader::Blob;
use sceneport_files::common::types::Pointer;
use sceneport_files::scene::types::ImportFlags;

use crate::ImportError;

/// The narrow surface of the native import library: import a file into native memory, look at that
/// memory and release it again.
pub trait NativeImporter {
    /// Owns one imported scene until it is passed to [`NativeImporter::release`].
    type Handle;

    /// `None` if the library failed, [`NativeImporter::error_string`] then tells why.
    fn import(&self, path: &Path, flags: ImportFlags) -> Option<Self::Handle>;

    fn error_string(&self) -> String;

    /// The memory of the imported scene and the address of its `aiScene` record inside of it.
    fn blob<'h>(&self, handle: &'h Self::Handle) -> (Blob<'h>, Pointer);

    fn release(&self, handle: &Self::Handle);
}

/// One imported scene. The native memory is released exactly once, when the session is dropped,
/// including when decoding failed or panicked. Blobs borrowed from the session can't outlive it.
pub struct ImportSession<'i, I: NativeImporter> {
    importer: &'i I,
    handle: I::Handle,
    path: PathBuf,
}

impl<'i, I: NativeImporter> ImportSession<'i, I> {
    pub fn open(importer: &'i I, path: &Path, flags: ImportFlags) -> Result<Self, ImportError> {
        trace!("Importing {} with {:?}", path.display(), flags);

        let handle = importer.import(path, flags).ok_or_else(|| ImportError::Invocation {
            path: path.display().to_string(),
            reason: importer.error_string(),
        })?;

        Ok(Self {
            importer,
            handle,
            path: path.to_path_buf(),
        })
    }

    pub fn blob(&self) -> (Blob<'_>, Pointer) {
        self.importer.blob(&self.handle)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<I: NativeImporter> Drop for ImportSession<'_, I> {
    fn drop(&mut self) {
        self.importer.release(&self.handle);
        debug!("Released the native scene of {}", self.path.display());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct FakeImporter {
        fail: bool,
        released: Cell<usize>,
    }

    impl NativeImporter for FakeImporter {
        type Handle = ();

        fn import(&self, _path: &Path, _flags: ImportFlags) -> Option<()> {
            (!self.fail).then_some(())
        }

        fn error_string(&self) -> String {
            "Unable to open file".to_string()
        }

        fn blob<'h>(&self, _handle: &'h ()) -> (Blob<'h>, Pointer) {
            (Blob::new(0x1000, &[]), Pointer(0x1000))
        }

        fn release(&self, _handle: &()) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn importer(fail: bool) -> FakeImporter {
        FakeImporter {
            fail,
            released: Cell::new(0),
        }
    }

    #[test]
    fn releases_once_on_drop() -> Result<(), anyhow::Error> {
        let importer = importer(false);
        {
            let session = ImportSession::open(&importer, Path::new("scene.dae"), ImportFlags::empty())?;
            assert_eq!(session.path(), Path::new("scene.dae"));
            assert_eq!(importer.released.get(), 0);
        }
        assert_eq!(importer.released.get(), 1);
        Ok(())
    }

    #[test]
    fn null_scene_is_an_invocation_error() {
        let importer = importer(true);
        let result = ImportSession::open(&importer, Path::new("broken.fbx"), ImportFlags::empty());

        match result {
            Err(ImportError::Invocation { path, reason }) => {
                assert_eq!(path, "broken.fbx");
                assert_eq!(reason, "Unable to open file");
            }
            _ => panic!("Expected an invocation error"),
        }
        assert_eq!(importer.released.get(), 0);
    }
}
