/// Reads scenes from a memory image that has been captured from the import library.
pub mod captured;
pub mod session;
