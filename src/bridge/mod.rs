// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing Rust API of the vbz library. It wraps the
// pure `pipeline` engine and fixes the production secondary compressor.
//
// Data Flow (Compression):
//
//   1. [Stateful Facade (Codec)]        -> owns CompressionOptions + SecondaryCompressor
//         |
//         `-> picks Framing::Raw or Framing::Sized ->
//
//   2. [Pipeline Engine (pipeline::core)] -> Returns `Result<Vec<u8>>` (framed payload)
//         |
//         `-> copied into the caller's destination buffer
//
// Data Flow (Decompression):
//
//   1. [Stateful Facade (Codec)]        -> Receives `&[u8]` and a destination
//         |
//         `-> [Pipeline Engine] writes decoded bytes straight into the destination
//
//   2. [Stateless API]                  -> free functions and typed helpers that
//                                          build a Zstandard-backed Codec per call
//
// ====================================================================================
pub mod codec;
pub mod stateless_api;

// --- Stateful API ---
pub use codec::Codec;

// --- Stateless API (for FFI and testing) ---
pub use stateless_api::{
    analyze, compress, compress_sized, compress_slice, decompress, decompress_sized, decompress_to_vec,
    decompressed_size, max_compressed_size, CompressionStats,
};

#[cfg(test)]
mod tests;
