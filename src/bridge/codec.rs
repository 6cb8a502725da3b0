// In: src/bridge/codec.rs

//! The stateful facade: a `Codec` owns one `CompressionOptions` value and a
//! secondary compressor, so the same options are always used to encode and to
//! decode. Every method delegates to the single-sourced pipeline core and only
//! chooses the framing.

use crate::config::CompressionOptions;
use crate::error::VbzError;
use crate::kernels::{SecondaryCompressor, ZstdCompressor};
use crate::pipeline::{self, Framing};

/// Copies an encoded buffer into a caller-owned destination.
fn copy_into(encoded: &[u8], dest: &mut [u8]) -> Result<usize, VbzError> {
    let capacity = dest.len();
    let target = dest
        .get_mut(..encoded.len())
        .ok_or(VbzError::DestinationTooSmall {
            required: encoded.len(),
            capacity,
        })?;
    target.copy_from_slice(encoded);
    Ok(encoded.len())
}

#[derive(Debug, Clone)]
pub struct Codec<C = ZstdCompressor> {
    options: CompressionOptions,
    compressor: C,
}

impl Codec<ZstdCompressor> {
    /// Creates a codec backed by Zstandard. Fails if the options name a wire
    /// revision this build does not implement.
    pub fn new(options: CompressionOptions) -> Result<Self, VbzError> {
        Self::with_compressor(options, ZstdCompressor)
    }
}

impl<C: SecondaryCompressor> Codec<C> {
    pub fn with_compressor(options: CompressionOptions, compressor: C) -> Result<Self, VbzError> {
        options.validate()?;
        Ok(Self { options, compressor })
    }

    pub fn options(&self) -> &CompressionOptions {
        &self.options
    }

    //==============================================================================
    // Sizing
    //==============================================================================

    /// Upper bound for `compress` and `compress_sized` on an input of
    /// `input_len` bytes.
    pub fn max_compressed_size(&self, input_len: usize) -> usize {
        pipeline::max_compressed_size(input_len, &self.options, &self.compressor)
    }

    /// Reads the original byte length embedded by `compress_sized` without
    /// decoding anything else.
    pub fn decompressed_size(&self, compressed: &[u8]) -> Result<usize, VbzError> {
        pipeline::decompressed_size(compressed, &self.options)
    }

    //==============================================================================
    // Caller-owned buffers
    //==============================================================================

    /// Compresses `input` into `dest`, returning the number of bytes written.
    pub fn compress(&self, input: &[u8], dest: &mut [u8]) -> Result<usize, VbzError> {
        let encoded = self.compress_to_vec(input)?;
        copy_into(&encoded, dest)
    }

    /// Decompresses `compressed` into `dest`, which must be exactly the
    /// original length. Use the sized variants when that length is unknown.
    pub fn decompress(&self, compressed: &[u8], dest: &mut [u8]) -> Result<usize, VbzError> {
        pipeline::decompress_framed(compressed, dest, &self.options, &self.compressor, Framing::Raw)
    }

    pub fn compress_sized(&self, input: &[u8], dest: &mut [u8]) -> Result<usize, VbzError> {
        let encoded = self.compress_sized_to_vec(input)?;
        copy_into(&encoded, dest)
    }

    pub fn decompress_sized(&self, compressed: &[u8], dest: &mut [u8]) -> Result<usize, VbzError> {
        pipeline::decompress_framed(compressed, dest, &self.options, &self.compressor, Framing::Sized)
    }

    //==============================================================================
    // Owned buffers
    //==============================================================================

    pub fn compress_to_vec(&self, input: &[u8]) -> Result<Vec<u8>, VbzError> {
        pipeline::compress_framed(input, &self.options, &self.compressor, Framing::Raw)
    }

    pub fn compress_sized_to_vec(&self, input: &[u8]) -> Result<Vec<u8>, VbzError> {
        pipeline::compress_framed(input, &self.options, &self.compressor, Framing::Sized)
    }

    /// Decodes a sized payload into a freshly allocated buffer of exactly the
    /// recorded length.
    pub fn decompress_sized_to_vec(&self, compressed: &[u8]) -> Result<Vec<u8>, VbzError> {
        let mut out = vec![0u8; self.decompressed_size(compressed)?];
        let written = self.decompress_sized(compressed, &mut out)?;
        out.truncate(written);
        Ok(out)
    }
}
