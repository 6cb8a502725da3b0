//! This module contains the pure, stateless kernels for the delta + zig-zag
//! transform that runs ahead of group varint packing.
//!
//! Forward differences of slowly changing signals are small, and zig-zag keeps
//! small negative differences small once they are viewed as unsigned. The
//! first element is a difference from an implicit zero origin. Differences
//! wrap at the element width, so every input sequence survives the round trip.
//!
//! The core algorithms are implemented **in-place**; the public API wraps them
//! for the pipeline, which hands typed slices in and gets unsigned lanes out.

use crate::kernels::zigzag;
use crate::traits::Element;

//==================================================================================
// 1. Generic Core Logic (In-Place)
//==================================================================================

/// Replaces `data[i]` with `data[i] - data[i - 1]`. `data[0]` is unchanged.
fn encode_slice_inplace<T: Element>(data: &mut [T]) {
    // Iterate backwards to use original values for calculation
    for i in (1..data.len()).rev() {
        data[i] = data[i].wrapping_sub(&data[i - 1]);
    }
}

/// Prefix-sums `data` in place, inverting `encode_slice_inplace`.
fn decode_slice_inplace<T: Element>(data: &mut [T]) {
    // Iterate forwards to use the newly-decoded values for subsequent sums
    for i in 1..data.len() {
        data[i] = data[i].wrapping_add(&data[i - 1]);
    }
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Produces the unsigned lanes handed to the group varint packer.
///
/// With `perform_delta_zig_zag` disabled the values pass through unchanged
/// (their bit patterns are reinterpreted, not zig-zag mapped).
pub fn encode<T: Element>(input_slice: &[T], perform_delta_zig_zag: bool) -> Vec<T::Unsigned> {
    if !perform_delta_zig_zag {
        return input_slice.iter().map(|&value| bytemuck::cast::<T, T::Unsigned>(value)).collect();
    }
    let mut data_vec = input_slice.to_vec();
    encode_slice_inplace(&mut data_vec);
    zigzag::encode(&data_vec)
}

/// Reconstructs the signed elements from the unpacked lanes.
pub fn decode<T: Element>(lanes: &[T::Unsigned], perform_delta_zig_zag: bool) -> Vec<T> {
    if !perform_delta_zig_zag {
        return lanes.iter().map(|&lane| bytemuck::cast::<T::Unsigned, T>(lane)).collect();
    }
    let mut data_vec = zigzag::decode::<T>(lanes);
    decode_slice_inplace(&mut data_vec);
    data_vec
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
