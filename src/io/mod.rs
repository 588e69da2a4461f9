//! Access to everything outside of the process: the native importer and texture files.
pub mod common;
pub mod fs;
pub mod native;
