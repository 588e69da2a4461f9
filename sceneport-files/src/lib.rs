//! Bounds-checked decoding of the import library's in-memory scene layout.
//!
//! Everything in here works on a [`common::reader::Blob`], a borrowed view onto the native memory
//! of one import, and produces owned records. Nothing returned by the readers keeps a reference
//! into the blob, so the caller is free to release the native scene as soon as decoding is done.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Reading {len} bytes at {address:#x} leaves the blob [{base:#x}, {base:#x} + {blob_len})")]
    OutOfBounds {
        address: u64,
        len: usize,
        base: u64,
        blob_len: usize,
    },

    #[error("Required pointer {field} is null")]
    NullPointer { field: &'static str },

    #[error("The blob is violating the expected layout, because: {reason}")]
    FormatError { reason: &'static str },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

pub mod common;
pub mod material;
pub mod mesh;
pub mod node;
pub mod scene;
pub mod texture;

#[cfg(any(test, feature = "test-tools"))]
pub mod writer;
