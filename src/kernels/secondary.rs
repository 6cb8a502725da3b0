//! The injected, general-purpose byte compressor that optionally runs after
//! group varint packing.
//!
//! The codec core only talks to this trait, so the pipeline can be exercised
//! with `Passthrough` in tests and with `ZstdCompressor` in production.

use crate::error::VbzError;

/// A whole-buffer byte compressor with a declared worst-case expansion.
pub trait SecondaryCompressor {
    /// Compresses `input` at effort `level` (always > 0 when called by the codec).
    fn compress(&self, input: &[u8], level: u32) -> Result<Vec<u8>, VbzError>;

    /// Decompresses `input`, failing if the result would exceed `max_len` bytes.
    fn decompress(&self, input: &[u8], max_len: usize) -> Result<Vec<u8>, VbzError>;

    /// Upper bound on `compress` output for an input of `len` bytes.
    fn max_compressed_size(&self, len: usize) -> usize;
}

impl<C: SecondaryCompressor + ?Sized> SecondaryCompressor for &C {
    fn compress(&self, input: &[u8], level: u32) -> Result<Vec<u8>, VbzError> {
        (**self).compress(input, level)
    }

    fn decompress(&self, input: &[u8], max_len: usize) -> Result<Vec<u8>, VbzError> {
        (**self).decompress(input, max_len)
    }

    fn max_compressed_size(&self, len: usize) -> usize {
        (**self).max_compressed_size(len)
    }
}

/// Identity stand-in: stores bytes unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SecondaryCompressor for Passthrough {
    fn compress(&self, input: &[u8], _level: u32) -> Result<Vec<u8>, VbzError> {
        Ok(input.to_vec())
    }

    fn decompress(&self, input: &[u8], max_len: usize) -> Result<Vec<u8>, VbzError> {
        if input.len() > max_len {
            return Err(VbzError::SecondaryCompressor(format!(
                "stored block of {} bytes exceeds limit of {}",
                input.len(),
                max_len
            )));
        }
        Ok(input.to_vec())
    }

    fn max_compressed_size(&self, len: usize) -> usize {
        len
    }
}
