//! This module contains the Zstandard implementation of the secondary
//! compressor.
//!
//! This is the Final Stage transform in the compression pipeline. It takes the
//! packed group varint stream and applies a general-purpose entropy coder. Zstd
//! decides on its own when a block is better stored raw; the adapter returns
//! whatever frame zstd produces. This module is a safe, panic-free wrapper
//! around the `zstd` crate's bulk API.

use crate::error::VbzError;
use crate::kernels::secondary::SecondaryCompressor;

/// Clamps a caller level into the range the linked zstd library accepts.
fn effective_level(level: u32) -> i32 {
    let range = zstd::compression_level_range();
    let max = *range.end();
    i32::try_from(level).map_or(max, |level| level.min(max))
}

/// The production secondary compressor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZstdCompressor;

impl SecondaryCompressor for ZstdCompressor {
    fn compress(&self, input: &[u8], level: u32) -> Result<Vec<u8>, VbzError> {
        zstd::bulk::compress(input, effective_level(level))
            .map_err(|e| VbzError::SecondaryCompressor(format!("zstd compress: {}", e)))
    }

    fn decompress(&self, input: &[u8], max_len: usize) -> Result<Vec<u8>, VbzError> {
        // The frame records its content size; bulk decompression refuses to
        // grow past `max_len`.
        zstd::bulk::decompress(input, max_len)
            .map_err(|e| VbzError::SecondaryCompressor(format!("zstd decompress: {}", e)))
    }

    fn max_compressed_size(&self, len: usize) -> usize {
        zstd::zstd_safe::compress_bound(len)
    }
}

//==================================================================================
// Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zstd_roundtrip_simple_text() {
        let original_bytes =
            b"hello world, this is a test of zstd compression. hello world, this is a test."
                .to_vec();

        let compressed_bytes = ZstdCompressor.compress(&original_bytes, 3).unwrap();
        assert!(compressed_bytes.len() < original_bytes.len());

        let decompressed_bytes = ZstdCompressor
            .decompress(&compressed_bytes, original_bytes.len())
            .unwrap();
        assert_eq!(original_bytes, decompressed_bytes);
    }

    #[test]
    fn test_zstd_roundtrip_highly_compressible_data() {
        let original_bytes = vec![42u8; 10_000];
        let compressed_bytes = ZstdCompressor.compress(&original_bytes, 5).unwrap();
        assert!(compressed_bytes.len() < 50);
        assert!(compressed_bytes.len() <= ZstdCompressor.max_compressed_size(10_000));

        let decompressed_bytes = ZstdCompressor.decompress(&compressed_bytes, 10_000).unwrap();
        assert_eq!(original_bytes, decompressed_bytes);
    }

    #[test]
    fn test_zstd_levels_above_maximum_are_clamped() {
        assert_eq!(effective_level(u32::MAX), *zstd::compression_level_range().end());
        assert_eq!(effective_level(100), *zstd::compression_level_range().end());
        assert_eq!(effective_level(1), 1);

        let original_bytes = vec![7u8; 512];
        let compressed_bytes = ZstdCompressor.compress(&original_bytes, 100).unwrap();
        assert_eq!(
            ZstdCompressor.decompress(&compressed_bytes, 512).unwrap(),
            original_bytes
        );
    }

    #[test]
    fn test_zstd_decompress_invalid_data() {
        let result = ZstdCompressor.decompress(&[1, 2, 3, 4, 5], 100);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("zstd"));
        }
    }

    #[test]
    fn test_zstd_decompress_respects_limit() {
        let compressed_bytes = ZstdCompressor.compress(&[9u8; 1000], 1).unwrap();
        assert!(ZstdCompressor.decompress(&compressed_bytes, 999).is_err());
    }
}
