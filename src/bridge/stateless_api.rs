// In: src/bridge/stateless_api.rs

//! Free functions over the production Zstandard-backed codec. Each call takes
//! its options by reference and holds no state between calls.

use serde::Serialize;

use crate::bridge::codec::Codec;
use crate::config::CompressionOptions;
use crate::error::VbzError;
use crate::traits::{Element, Lane};
use crate::utils::{read_elements, typed_slice_to_bytes};

/// Upper bound on the output of `compress` or `compress_sized` for
/// `input_len` input bytes.
pub fn max_compressed_size(input_len: usize, options: &CompressionOptions) -> Result<usize, VbzError> {
    Ok(Codec::new(*options)?.max_compressed_size(input_len))
}

pub fn compress(input: &[u8], dest: &mut [u8], options: &CompressionOptions) -> Result<usize, VbzError> {
    Codec::new(*options)?.compress(input, dest)
}

pub fn decompress(compressed: &[u8], dest: &mut [u8], options: &CompressionOptions) -> Result<usize, VbzError> {
    Codec::new(*options)?.decompress(compressed, dest)
}

pub fn compress_sized(input: &[u8], dest: &mut [u8], options: &CompressionOptions) -> Result<usize, VbzError> {
    Codec::new(*options)?.compress_sized(input, dest)
}

pub fn decompress_sized(compressed: &[u8], dest: &mut [u8], options: &CompressionOptions) -> Result<usize, VbzError> {
    Codec::new(*options)?.decompress_sized(compressed, dest)
}

/// Reads the original length recorded by `compress_sized`.
pub fn decompressed_size(compressed: &[u8], options: &CompressionOptions) -> Result<usize, VbzError> {
    Codec::new(*options)?.decompressed_size(compressed)
}

//==================================================================================
// Typed helpers
//==================================================================================

fn check_width<T: Element>(options: &CompressionOptions) -> Result<(), VbzError> {
    let width = <T::Unsigned as Lane>::WIDTH;
    if width != options.element_width {
        return Err(VbzError::InvalidConfig(format!(
            "options declare {} elements but the slice holds {} elements",
            options.element_width, width
        )));
    }
    Ok(())
}

/// Compresses a typed slice into a sized payload.
pub fn compress_slice<T: Element>(values: &[T], options: &CompressionOptions) -> Result<Vec<u8>, VbzError> {
    check_width::<T>(options)?;
    let input = typed_slice_to_bytes(values);
    let mut dest = vec![0u8; Codec::new(*options)?.max_compressed_size(input.len())];
    let written = compress_sized(&input, &mut dest, options)?;
    dest.truncate(written);
    Ok(dest)
}

/// Decodes a payload produced by `compress_slice` back into typed values.
pub fn decompress_to_vec<T: Element>(compressed: &[u8], options: &CompressionOptions) -> Result<Vec<T>, VbzError> {
    check_width::<T>(options)?;
    let bytes = Codec::new(*options)?.decompress_sized_to_vec(compressed)?;
    read_elements::<T>(&bytes)
}

//==================================================================================
// Diagnostics
//==================================================================================

/// Size summary for a sized payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompressionStats {
    pub original_size: usize,
    pub compressed_size: usize,
    /// `original_size / compressed_size`; 0.0 for an empty payload.
    pub ratio: f64,
}

/// Reports sizes for a payload produced by `compress_sized` without decoding it.
pub fn analyze(compressed: &[u8], options: &CompressionOptions) -> Result<CompressionStats, VbzError> {
    let original_size = decompressed_size(compressed, options)?;
    let compressed_size = compressed.len();
    let ratio = if compressed_size == 0 {
        0.0
    } else {
        original_size as f64 / compressed_size as f64
    };
    log::debug!(
        "vbz analyze: {} -> {} bytes (ratio {:.3})",
        original_size,
        compressed_size,
        ratio
    );
    Ok(CompressionStats {
        original_size,
        compressed_size,
        ratio,
    })
}
