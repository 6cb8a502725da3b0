// In: src/ffi/mod.rs

//! The C interface. This is the only place the numeric error sentinel exists:
//! every `VbzError` raised below is logged and collapsed into
//! `VBZ_ERROR_SIZE` on the way out.
//!
//! Invariant: no successful call returns `VBZ_ERROR_SIZE`. Sizes that would
//! collide with it are reported as errors instead.

use std::slice;
use std::sync::Once;

use log::LevelFilter;

use crate::bridge::Codec;
use crate::config::CompressionOptions;
use crate::error::VbzError;

#[allow(non_camel_case_types)]
pub type vbz_size_t = u32;

/// Returned by every sized entry point on failure.
pub const VBZ_ERROR_SIZE: vbz_size_t = vbz_size_t::MAX;

/// The C view of `CompressionOptions`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct CompressionOptionsC {
    pub perform_delta_zig_zag: bool,
    /// 1, 2, 4 or 8.
    pub integer_size: u32,
    /// 0 disables the Zstandard stage.
    pub zstd_compression_level: u32,
    pub vbz_version: u32,
}

impl TryFrom<&CompressionOptionsC> for CompressionOptions {
    type Error = VbzError;

    fn try_from(raw: &CompressionOptionsC) -> Result<Self, Self::Error> {
        CompressionOptions::from_raw(
            raw.perform_delta_zig_zag,
            raw.integer_size,
            raw.zstd_compression_level,
            raw.vbz_version,
        )
    }
}

//==================================================================================
// Boundary helpers
//==================================================================================

fn to_size(result: Result<usize, VbzError>) -> vbz_size_t {
    match result {
        Ok(size) => match vbz_size_t::try_from(size) {
            Ok(size) if size != VBZ_ERROR_SIZE => size,
            _ => {
                log::error!("vbz: result size {} does not fit vbz_size_t", size);
                VBZ_ERROR_SIZE
            }
        },
        Err(e) => {
            log::error!("vbz: {}", e);
            VBZ_ERROR_SIZE
        }
    }
}

unsafe fn codec_from(options: *const CompressionOptionsC) -> Result<Codec, VbzError> {
    let raw = options
        .as_ref()
        .ok_or_else(|| VbzError::InvalidConfig("options pointer is null".to_string()))?;
    Codec::new(CompressionOptions::try_from(raw)?)
}

unsafe fn input_slice<'a>(ptr: *const u8, len: vbz_size_t) -> Result<&'a [u8], VbzError> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(VbzError::InvalidConfig("source pointer is null".to_string()));
    }
    Ok(slice::from_raw_parts(ptr, len as usize))
}

unsafe fn output_slice<'a>(ptr: *mut u8, len: vbz_size_t) -> Result<&'a mut [u8], VbzError> {
    if len == 0 {
        return Ok(&mut []);
    }
    if ptr.is_null() {
        return Err(VbzError::InvalidConfig("destination pointer is null".to_string()));
    }
    Ok(slice::from_raw_parts_mut(ptr, len as usize))
}

type Op = fn(&Codec, &[u8], &mut [u8]) -> Result<usize, VbzError>;

unsafe fn run(
    source: *const u8,
    source_size: vbz_size_t,
    destination: *mut u8,
    destination_capacity: vbz_size_t,
    options: *const CompressionOptionsC,
    op: Op,
) -> vbz_size_t {
    let result = (|| {
        let codec = codec_from(options)?;
        let input = input_slice(source, source_size)?;
        let dest = output_slice(destination, destination_capacity)?;
        op(&codec, input, dest)
    })();
    to_size(result)
}

//==================================================================================
// Exported functions
//==================================================================================

/// Returns true if `result` is the error sentinel.
#[no_mangle]
pub extern "C" fn vbz_is_error(result: vbz_size_t) -> bool {
    result == VBZ_ERROR_SIZE
}

/// Upper bound on the output of `vbz_compress` or `vbz_compress_sized` for
/// `source_size` bytes.
///
/// # Safety
/// `options` must be null or point to a valid `CompressionOptionsC`.
#[no_mangle]
pub unsafe extern "C" fn vbz_max_compressed_size(
    source_size: vbz_size_t,
    options: *const CompressionOptionsC,
) -> vbz_size_t {
    to_size(codec_from(options).map(|codec| codec.max_compressed_size(source_size as usize)))
}

/// # Safety
/// `source` must be readable for `source_size` bytes, `destination` writable
/// for `destination_capacity` bytes, and `options` null or valid.
#[no_mangle]
pub unsafe extern "C" fn vbz_compress(
    source: *const u8,
    source_size: vbz_size_t,
    destination: *mut u8,
    destination_capacity: vbz_size_t,
    options: *const CompressionOptionsC,
) -> vbz_size_t {
    run(source, source_size, destination, destination_capacity, options, Codec::compress)
}

/// # Safety
/// Same contract as `vbz_compress`.
#[no_mangle]
pub unsafe extern "C" fn vbz_decompress(
    source: *const u8,
    source_size: vbz_size_t,
    destination: *mut u8,
    destination_capacity: vbz_size_t,
    options: *const CompressionOptionsC,
) -> vbz_size_t {
    run(source, source_size, destination, destination_capacity, options, Codec::decompress)
}

/// # Safety
/// Same contract as `vbz_compress`.
#[no_mangle]
pub unsafe extern "C" fn vbz_compress_sized(
    source: *const u8,
    source_size: vbz_size_t,
    destination: *mut u8,
    destination_capacity: vbz_size_t,
    options: *const CompressionOptionsC,
) -> vbz_size_t {
    run(source, source_size, destination, destination_capacity, options, Codec::compress_sized)
}

/// # Safety
/// Same contract as `vbz_compress`.
#[no_mangle]
pub unsafe extern "C" fn vbz_decompress_sized(
    source: *const u8,
    source_size: vbz_size_t,
    destination: *mut u8,
    destination_capacity: vbz_size_t,
    options: *const CompressionOptionsC,
) -> vbz_size_t {
    run(source, source_size, destination, destination_capacity, options, Codec::decompress_sized)
}

/// Reads the original length embedded by `vbz_compress_sized`.
///
/// # Safety
/// `source` must be readable for `source_size` bytes and `options` null or valid.
#[no_mangle]
pub unsafe extern "C" fn vbz_decompressed_size(
    source: *const u8,
    source_size: vbz_size_t,
    options: *const CompressionOptionsC,
) -> vbz_size_t {
    let result = (|| {
        let codec = codec_from(options)?;
        codec.decompressed_size(input_slice(source, source_size)?)
    })();
    to_size(result)
}

//==================================================================================
// Logging
//==================================================================================

static INIT_LOGGER: Once = Once::new();

/// Routes `log` output to stderr at debug level (trace when `with_metrics`
/// is set, which also enables the `vbz::metrics` records). Only the first
/// call has any effect.
#[no_mangle]
pub extern "C" fn vbz_enable_verbose_logging(with_metrics: bool) {
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(if with_metrics {
            LevelFilter::Trace
        } else {
            LevelFilter::Debug
        });

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        let _ = builder.try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    fn options(delta: bool, size: u32, level: u32) -> CompressionOptionsC {
        CompressionOptionsC {
            perform_delta_zig_zag: delta,
            integer_size: size,
            zstd_compression_level: level,
            vbz_version: 0,
        }
    }

    #[test]
    fn test_c_roundtrip_matches_known_payload() {
        let opts = options(true, 4, 0);
        let input: Vec<u8> = [5i32, 4, 3, 2, 1].iter().flat_map(|v| v.to_le_bytes()).collect();

        unsafe {
            let bound = vbz_max_compressed_size(input.len() as u32, &opts);
            assert!(!vbz_is_error(bound));

            let mut compressed = vec![0u8; bound as usize];
            let written = vbz_compress(
                input.as_ptr(),
                input.len() as u32,
                compressed.as_mut_ptr(),
                bound,
                &opts,
            );
            assert_eq!(written, 7);
            assert_eq!(&compressed[..7], &[0, 0, 10, 1, 1, 1, 1]);

            let mut out = vec![0u8; input.len()];
            let read = vbz_decompress(compressed.as_ptr(), written, out.as_mut_ptr(), out.len() as u32, &opts);
            assert_eq!(read as usize, input.len());
            assert_eq!(out, input);
        }
    }

    #[test]
    fn test_c_sized_roundtrip_with_zstd() {
        let opts = options(true, 2, 3);
        let input: Vec<u8> = (0..500i16).flat_map(|v| (v * 3).to_le_bytes()).collect();

        unsafe {
            let bound = vbz_max_compressed_size(input.len() as u32, &opts);
            let mut compressed = vec![0u8; bound as usize];
            let written = vbz_compress_sized(
                input.as_ptr(),
                input.len() as u32,
                compressed.as_mut_ptr(),
                bound,
                &opts,
            );
            assert!(!vbz_is_error(written));

            let size = vbz_decompressed_size(compressed.as_ptr(), written, &opts);
            assert_eq!(size as usize, input.len());

            let mut out = vec![0u8; size as usize];
            let read = vbz_decompress_sized(compressed.as_ptr(), written, out.as_mut_ptr(), size, &opts);
            assert_eq!(read, size);
            assert_eq!(out, input);
        }
    }

    #[test]
    fn test_c_bound_covers_sized_output_of_incompressible_input() {
        let opts = options(false, 4, 0);
        let input = i32::MIN.to_le_bytes();

        unsafe {
            let bound = vbz_max_compressed_size(input.len() as u32, &opts);
            assert_eq!(bound, 9);

            let mut compressed = vec![0u8; bound as usize];
            let written = vbz_compress_sized(input.as_ptr(), 4, compressed.as_mut_ptr(), bound, &opts);
            assert!(!vbz_is_error(written));
            assert_eq!(written, bound);

            let mut out = [0u8; 4];
            let read = vbz_decompress_sized(compressed.as_ptr(), written, out.as_mut_ptr(), 4, &opts);
            assert_eq!(read, 4);
            assert_eq!(out, input);
        }
    }

    #[test]
    fn test_c_bound_too_large_for_size_type_is_an_error() {
        unsafe {
            assert!(vbz_is_error(vbz_max_compressed_size(u32::MAX - 1, &options(true, 4, 0))));
        }
    }

    #[test]
    fn test_c_errors_collapse_to_sentinel() {
        let input = [1u8, 2, 3];
        let mut out = [0u8; 16];
        unsafe {
            // Three bytes are not a whole number of 2-byte elements.
            let bad_shape = vbz_compress(input.as_ptr(), 3, out.as_mut_ptr(), 16, &options(true, 2, 0));
            assert!(vbz_is_error(bad_shape));

            let bad_width = vbz_max_compressed_size(16, &options(true, 3, 0));
            assert!(vbz_is_error(bad_width));

            let mut bad_version = options(true, 2, 0);
            bad_version.vbz_version = 5;
            assert!(vbz_is_error(vbz_max_compressed_size(16, &bad_version)));

            assert!(vbz_is_error(vbz_max_compressed_size(16, ptr::null())));
            assert!(vbz_is_error(vbz_compress(ptr::null(), 4, out.as_mut_ptr(), 16, &options(true, 2, 0))));
            assert!(vbz_is_error(vbz_decompressed_size(input.as_ptr(), 3, &options(true, 2, 0))));
        }
    }

    #[test]
    fn test_empty_input_through_c() {
        let opts = options(true, 4, 0);
        unsafe {
            let written = vbz_compress(ptr::null(), 0, ptr::null_mut(), 0, &opts);
            assert_eq!(written, 0);
        }
        assert!(!vbz_is_error(0));
        assert!(vbz_is_error(VBZ_ERROR_SIZE));
    }
}
