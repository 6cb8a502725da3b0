// In: src/error.rs

//! This module defines the single, unified error type for the entire vbz library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every public operation returns `Result<_, VbzError>`. The numeric error
//! sentinel of the C interface only exists in `crate::ffi`, where a `VbzError`
//! is collapsed into `VBZ_ERROR_SIZE` at the boundary.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VbzError {
    // =========================================================================
    // === Input-Shape Errors
    // =========================================================================
    #[error("Unsupported element width: {0} (expected 1, 2, 4 or 8)")]
    UnsupportedElementWidth(u32),

    #[error("Buffer length mismatch: expected a multiple of {0}, got {1}")]
    BufferMismatch(usize, usize),

    #[error("Input of {0} bytes is too large for the sized length field")]
    InputTooLarge(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // === Capacity Errors
    // =========================================================================
    #[error("Destination too small: {required} bytes required, capacity is {capacity}")]
    DestinationTooSmall { required: usize, capacity: usize },

    // =========================================================================
    // === Format Errors (decode side)
    // =========================================================================
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u32),

    #[error("Group varint stream truncated: needed {needed} bytes at offset {offset}, {available} available")]
    TruncatedStream {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Control byte {key:#04x} encodes a {width}-byte value, element width is {element_width}")]
    InvalidWidthCode {
        key: u8,
        width: usize,
        element_width: usize,
    },

    #[error("Group varint stream has {0} unconsumed trailing bytes")]
    TrailingBytes(usize),

    #[error("Sized payload of {0} bytes is too short to hold the length field")]
    SizedHeaderMissing(usize),

    // =========================================================================
    // === Secondary Compressor Errors
    // =========================================================================
    #[error("Secondary compressor failed: {0}")]
    SecondaryCompressor(String),
}

impl From<serde_json::Error> for VbzError {
    fn from(err: serde_json::Error) -> Self {
        VbzError::InvalidConfig(err.to_string())
    }
}
