//! The single-sourced codec core shared by every framing.
//!
//! Compression: bytes -> typed elements -> (delta + zig-zag) -> group varint
//! -> (secondary compressor) -> framed payload.
//! Decompression runs the same stages in reverse. Every call is synchronous
//! and keeps all of its scratch state on the stack or in call-local vectors.

use std::borrow::Cow;

use crate::config::{CompressionOptions, ElementWidth};
use crate::error::VbzError;
use crate::kernels::secondary::SecondaryCompressor;
use crate::kernels::{delta, group_varint};
use crate::pipeline::framing::{read_size_field, Framing, SIZE_FIELD_LEN};
use crate::traits::Element;
use crate::utils::{read_elements, write_elements};

//==================================================================================
// 1. Sizing
//==================================================================================

/// Upper bound on the output of either framing for `input_len` input bytes.
///
/// Covers the group varint worst case (every element at full width plus one
/// control byte per group), whatever the secondary compressor declares for
/// that intermediate length, and the sized length field, so one buffer of
/// this size fits raw and sized output alike. Saturates at `usize::MAX`.
pub fn max_compressed_size<C: SecondaryCompressor>(
    input_len: usize,
    options: &CompressionOptions,
    compressor: &C,
) -> usize {
    let width = options.element_width;
    let element_count = input_len.div_ceil(width.bytes());
    let packed_max = group_varint::max_packed_size(element_count, width);
    let payload_max = if options.uses_secondary_compression() {
        compressor.max_compressed_size(packed_max)
    } else {
        packed_max
    };
    payload_max.saturating_add(SIZE_FIELD_LEN)
}

//==================================================================================
// 2. Compression
//==================================================================================

fn pack_elements<T: Element>(input: &[u8], perform_delta_zig_zag: bool) -> Result<Vec<u8>, VbzError> {
    let values = read_elements::<T>(input)?;
    let lanes = delta::encode(&values, perform_delta_zig_zag);
    let mut packed = Vec::new();
    group_varint::encode(&lanes, &mut packed);
    Ok(packed)
}

/// Runs the full compression pipeline and returns the framed payload.
pub fn compress_framed<C: SecondaryCompressor>(
    input: &[u8],
    options: &CompressionOptions,
    compressor: &C,
    framing: Framing,
) -> Result<Vec<u8>, VbzError> {
    options.validate()?;
    let width = options.element_width;
    if input.len() % width.bytes() != 0 {
        return Err(VbzError::BufferMismatch(width.bytes(), input.len()));
    }

    let packed = match width {
        ElementWidth::One => pack_elements::<i8>(input, options.perform_delta_zig_zag)?,
        ElementWidth::Two => pack_elements::<i16>(input, options.perform_delta_zig_zag)?,
        ElementWidth::Four => pack_elements::<i32>(input, options.perform_delta_zig_zag)?,
        ElementWidth::Eight => pack_elements::<i64>(input, options.perform_delta_zig_zag)?,
    };

    let mut framed = Vec::with_capacity(framing.header_len() + packed.len());
    framing.write_header(input.len(), &mut framed)?;

    if options.uses_secondary_compression() {
        let compressed = compressor.compress(&packed, options.compression_level)?;
        log_metric!(
            "event" = "compress",
            "input_len" = input.len(),
            "packed_len" = packed.len(),
            "secondary_len" = compressed.len()
        );
        framed.extend_from_slice(&compressed);
    } else {
        log_metric!(
            "event" = "compress",
            "input_len" = input.len(),
            "packed_len" = packed.len()
        );
        framed.extend_from_slice(&packed);
    }

    log::debug!(
        "vbz compress: {} bytes of {} elements -> {} bytes ({:?} framing)",
        input.len(),
        width,
        framed.len(),
        framing
    );
    Ok(framed)
}

//==================================================================================
// 3. Decompression
//==================================================================================

fn unpack_elements<T: Element>(
    packed: &[u8],
    element_count: usize,
    perform_delta_zig_zag: bool,
    dest: &mut [u8],
) -> Result<usize, VbzError> {
    let lanes = group_varint::decode::<T::Unsigned>(packed, element_count)?;
    let values = delta::decode::<T>(&lanes, perform_delta_zig_zag);
    write_elements(&values, dest)
}

/// Runs the inverse pipeline over a framed payload, writing into `dest`.
/// Returns the number of bytes written.
///
/// `Framing::Raw` carries no length, so `dest` must be exactly the original
/// length: its capacity fixes the element count, and a stream holding more or
/// fewer elements is rejected. `Framing::Sized` uses the recorded length and
/// accepts any `dest` at least that long.
pub fn decompress_framed<C: SecondaryCompressor>(
    framed: &[u8],
    dest: &mut [u8],
    options: &CompressionOptions,
    compressor: &C,
    framing: Framing,
) -> Result<usize, VbzError> {
    options.validate()?;
    let width = options.element_width;

    let (original_len, payload) = framing.split(framed)?;
    let output_len = original_len.unwrap_or(dest.len());
    if output_len % width.bytes() != 0 {
        return Err(VbzError::BufferMismatch(width.bytes(), output_len));
    }
    if output_len > dest.len() {
        return Err(VbzError::DestinationTooSmall {
            required: output_len,
            capacity: dest.len(),
        });
    }
    let element_count = output_len / width.bytes();

    let packed: Cow<'_, [u8]> = if options.uses_secondary_compression() {
        let max_len = group_varint::max_packed_size(element_count, width);
        Cow::Owned(compressor.decompress(payload, max_len)?)
    } else {
        Cow::Borrowed(payload)
    };

    let perform_delta_zig_zag = options.perform_delta_zig_zag;
    let written = match width {
        ElementWidth::One => unpack_elements::<i8>(&packed, element_count, perform_delta_zig_zag, dest)?,
        ElementWidth::Two => unpack_elements::<i16>(&packed, element_count, perform_delta_zig_zag, dest)?,
        ElementWidth::Four => unpack_elements::<i32>(&packed, element_count, perform_delta_zig_zag, dest)?,
        ElementWidth::Eight => unpack_elements::<i64>(&packed, element_count, perform_delta_zig_zag, dest)?,
    };

    log_metric!(
        "event" = "decompress",
        "framed_len" = framed.len(),
        "packed_len" = packed.len(),
        "output_len" = written
    );
    Ok(written)
}

/// Reads the original byte length recorded by `Framing::Sized`.
pub fn decompressed_size(framed: &[u8], options: &CompressionOptions) -> Result<usize, VbzError> {
    options.validate()?;
    read_size_field(framed)
}
