//! This module provides a set of shared, low-level utility functions used
//! throughout the vbz core.
//!
//! Its primary responsibilities include:
//! 1.  Converting between caller-owned byte buffers (any alignment) and typed
//!     little-endian integer values.
//! 2.  Reading and writing the truncated little-endian value runs used by the
//!     group varint format.

use bytemuck::Pod;
use num_traits::PrimInt;

use crate::error::VbzError;

//==================================================================================
// 1. Byte <-> Element Conversion
//==================================================================================

/// Reads a byte buffer as a sequence of little-endian integers of type `T`.
///
/// # Errors
/// Returns `VbzError::BufferMismatch` if the byte length is not a multiple of
/// the size of `T`.
pub fn read_elements<T>(bytes: &[u8]) -> Result<Vec<T>, VbzError>
where
    T: PrimInt + Pod,
{
    let width = std::mem::size_of::<T>();
    if bytes.len() % width != 0 {
        return Err(VbzError::BufferMismatch(width, bytes.len()));
    }
    Ok(bytes
        .chunks_exact(width)
        .map(|chunk| T::from_le(bytemuck::pod_read_unaligned::<T>(chunk)))
        .collect())
}

/// Writes `values` into the front of `dest` as little-endian bytes and returns
/// the number of bytes written.
pub fn write_elements<T>(values: &[T], dest: &mut [u8]) -> Result<usize, VbzError>
where
    T: PrimInt + Pod,
{
    let width = std::mem::size_of::<T>();
    let required = values.len() * width;
    if dest.len() < required {
        return Err(VbzError::DestinationTooSmall {
            required,
            capacity: dest.len(),
        });
    }
    for (chunk, value) in dest[..required].chunks_exact_mut(width).zip(values) {
        chunk.copy_from_slice(bytemuck::bytes_of(&value.to_le()));
    }
    Ok(required)
}

/// Converts a slice of primitive integers into a little-endian `Vec<u8>`.
pub fn typed_slice_to_bytes<T>(data: &[T]) -> Vec<u8>
where
    T: PrimInt + Pod,
{
    let mut out = Vec::with_capacity(std::mem::size_of_val(data));
    for value in data {
        out.extend_from_slice(bytemuck::bytes_of(&value.to_le()));
    }
    out
}

//==================================================================================
// 2. Truncated Value Runs
//==================================================================================

/// Number of bytes needed to hold `value` without leading zero bytes (at least 1).
#[inline]
pub fn significant_bytes<U: PrimInt>(value: U) -> usize {
    let bits = std::mem::size_of::<U>() * 8 - value.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

/// Appends the low `len` bytes of `value`, least-significant first.
#[inline]
pub fn push_truncated_le<U>(value: U, len: usize, out: &mut Vec<u8>)
where
    U: PrimInt + Pod,
{
    let le = value.to_le();
    out.extend_from_slice(&bytemuck::bytes_of(&le)[..len]);
}

/// Reads a value from `src` (1..=size_of::<U>() bytes, least-significant
/// first), zero-extending it to the full width of `U`.
#[inline]
pub fn read_truncated_le<U>(src: &[u8]) -> U
where
    U: PrimInt + Pod,
{
    let mut value = U::zero();
    bytemuck::bytes_of_mut(&mut value)[..src.len()].copy_from_slice(src);
    U::from_le(value)
}
