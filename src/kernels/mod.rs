//! This module declares the pure, stateless kernels the codec pipeline is
//! assembled from.

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Value Reduction
pub mod delta;
pub mod zigzag;

/// Byte-Width Reduction
pub mod group_varint;

/// Final Stage: Entropy Coding
pub mod secondary;
pub mod zstd;

pub use self::secondary::{Passthrough, SecondaryCompressor};
pub use self::zstd::ZstdCompressor;
