//! This module contains the pure, stateless kernels for performing Zig-zag
//! encoding and decoding.
//!
//! Zig-zag is a lossless, bitwise mapping of signed integers to unsigned
//! integers of the same width: `0, -1, 1, -2, 2, ...` become `0, 1, 2, 3, 4, ...`.
//! Small magnitudes of either sign therefore stay small. All arithmetic is
//! carried out at the element's own width; nothing is promoted.

use bytemuck::Pod;
use num_traits::{PrimInt, WrappingSub};

use crate::traits::{Element, HasSigned};

//==================================================================================
// 1. Generic Core Logic
//==================================================================================

/// Encodes a single signed integer using the Zig-zag algorithm.
#[inline]
pub fn encode_val<T: Element>(n: T) -> T::Unsigned {
    let bits = std::mem::size_of::<T>() * 8;
    // `>>` on a signed PrimInt is arithmetic, so this yields all-ones for negatives.
    bytemuck::cast((n << 1) ^ (n >> (bits - 1)))
}

/// Decodes a single unsigned integer back to its signed representation.
#[inline]
pub fn decode_val<U>(n: U) -> U::Signed
where
    U: PrimInt + WrappingSub + Pod + HasSigned,
    U::Signed: Pod,
{
    let sign_mask = U::zero().wrapping_sub(&(n & U::one()));
    bytemuck::cast((n >> 1) ^ sign_mask)
}

//==================================================================================
// 2. Slice API
//==================================================================================

/// Zig-zag encodes every value of `input_slice`.
pub fn encode<T: Element>(input_slice: &[T]) -> Vec<T::Unsigned> {
    input_slice.iter().map(|&value| encode_val(value)).collect()
}

/// Zig-zag decodes every value of `input_slice`.
pub fn decode<T: Element>(input_slice: &[T::Unsigned]) -> Vec<T> {
    input_slice.iter().map(|&value| decode_val(value)).collect()
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
