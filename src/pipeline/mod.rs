//! The codec pipeline: one shared core and the framings wrapped around it.

pub mod core;
pub mod framing;

pub use self::core::{compress_framed, decompress_framed, decompressed_size, max_compressed_size};
pub use self::framing::{Framing, SIZE_FIELD_LEN};
