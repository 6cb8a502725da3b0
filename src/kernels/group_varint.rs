//! This module contains the pure, stateless kernels for group varint packing
//! and unpacking of unsigned lanes.
//!
//! # Format
//!
//! A packed stream is a key block followed by a data block:
//!
//! ```text
//! [ key 0 | key 1 | ... | key K-1 ][ value bytes of element 0 | element 1 | ... ]
//! ```
//!
//! Each key (control byte) describes one group of consecutive elements. Slot `j`
//! of the group lives in bits `[j * b, (j + 1) * b)` of the key and stores the
//! element's byte length minus one. Values are written least-significant byte
//! first, truncated to their own length (at least one byte), with no padding.
//!
//! | element width | bits per slot | elements per key |
//! |---------------|---------------|------------------|
//! | 1, 2, 4       | 2             | 4                |
//! | 8             | 4             | 2                |
//!
//! The final key covers only the elements that are present; its unused slots
//! are zero and contribute no data bytes.

use crate::config::ElementWidth;
use crate::error::VbzError;
use crate::traits::Lane;
use crate::utils::{push_truncated_le, read_truncated_le, significant_bytes};

//==================================================================================
// 1. Layout
//==================================================================================

/// Bit layout of a control byte for one element width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct KeyLayout {
    width: usize,
    bits: u32,
    slots: usize,
    slot_mask: u8,
    /// Slot bits that can only be set by a length longer than `width`.
    overflow_mask: u8,
}

impl KeyLayout {
    const fn of(width: ElementWidth) -> Self {
        let bits = width.control_bits();
        let slots = width.elements_per_control_byte();
        let slot_mask = ((1u16 << bits) - 1) as u8;
        let max_code = (width.bytes() - 1) as u8;

        let mut overflow_mask = 0u8;
        let mut slot = 0;
        while slot < slots {
            overflow_mask |= (slot_mask & !max_code) << (slot as u32 * bits);
            slot += 1;
        }

        Self {
            width: width.bytes(),
            bits,
            slots,
            slot_mask,
            overflow_mask,
        }
    }

    #[inline]
    fn len_at(&self, key: u8, slot: usize) -> usize {
        ((key >> (slot as u32 * self.bits)) & self.slot_mask) as usize + 1
    }

    /// Mask over the slots used by a group of `present` elements.
    #[inline]
    fn present_mask(&self, present: usize) -> u8 {
        ((1u16 << (present as u32 * self.bits)) - 1) as u8
    }

    #[inline]
    fn check_key(&self, key: u8, present: usize) -> Result<(), VbzError> {
        let bad = key & self.overflow_mask & self.present_mask(present);
        if bad != 0 {
            let slot = (bad.trailing_zeros() / self.bits) as usize;
            return Err(VbzError::InvalidWidthCode {
                key,
                width: self.len_at(key, slot),
                element_width: self.width,
            });
        }
        Ok(())
    }
}

//==================================================================================
// 2. Sizing
//==================================================================================

/// Number of control bytes for `count` elements of `width`.
pub fn key_bytes(count: usize, width: ElementWidth) -> usize {
    count.div_ceil(width.elements_per_control_byte())
}

/// Worst-case packed size: every element stored at full width. Saturates at
/// `usize::MAX`.
pub fn max_packed_size(count: usize, width: ElementWidth) -> usize {
    count
        .saturating_mul(width.bytes())
        .saturating_add(key_bytes(count, width))
}

//==================================================================================
// 3. Encode
//==================================================================================

/// Packs `values` and appends the stream to `out`.
pub fn encode<U: Lane>(values: &[U], out: &mut Vec<u8>) {
    let layout = KeyLayout::of(U::WIDTH);
    let key_start = out.len();
    let key_len = key_bytes(values.len(), U::WIDTH);

    out.reserve(max_packed_size(values.len(), U::WIDTH));
    out.resize(key_start + key_len, 0);

    for (group_idx, group) in values.chunks(layout.slots).enumerate() {
        let mut key = 0u8;
        for (slot, &value) in group.iter().enumerate() {
            let len = significant_bytes(value);
            key |= ((len - 1) as u8) << (slot as u32 * layout.bits);
            push_truncated_le(value, len, out);
        }
        out[key_start + group_idx] = key;
    }
}

//==================================================================================
// 4. Decode
//==================================================================================

/// Unpacks exactly `count` lanes from `stream`.
///
/// # Errors
/// Returns `TruncatedStream` when a key demands more bytes than remain,
/// `InvalidWidthCode` when a key encodes a length wider than `U`, and
/// `TrailingBytes` when the stream holds more data than `count` elements use.
pub fn decode<U: Lane>(stream: &[u8], count: usize) -> Result<Vec<U>, VbzError> {
    let layout = KeyLayout::of(U::WIDTH);
    let key_len = key_bytes(count, U::WIDTH);
    if stream.len() < key_len {
        return Err(VbzError::TruncatedStream {
            offset: 0,
            needed: key_len,
            available: stream.len(),
        });
    }
    let (keys, data) = stream.split_at(key_len);

    let mut values = Vec::with_capacity(count);
    let mut pos = 0usize;
    let mut remaining = count;

    for &key in keys {
        let present = remaining.min(layout.slots);
        layout.check_key(key, present)?;

        // One bounds check per group, then branch-free reads.
        let group_len: usize = (0..present).map(|slot| layout.len_at(key, slot)).sum();
        if pos + group_len > data.len() {
            return Err(VbzError::TruncatedStream {
                offset: key_len + pos,
                needed: group_len,
                available: data.len() - pos,
            });
        }
        for slot in 0..present {
            let len = layout.len_at(key, slot);
            values.push(read_truncated_le::<U>(&data[pos..pos + len]));
            pos += len;
        }
        remaining -= present;
    }

    if pos != data.len() {
        return Err(VbzError::TrailingBytes(data.len() - pos));
    }
    Ok(values)
}

//==================================================================================
// 5. Unit Tests
//==================================================================================
