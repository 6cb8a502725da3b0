//! This file is the root of the `vbz` Rust crate.
//!
//! A lossless codec for streams of fixed-width signed integers: an optional
//! delta + zig-zag transform, group varint packing, and an optional Zstandard
//! pass, with raw or length-prefixed framing.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`pipeline`, `kernels`, etc.)
//!     so the Rust compiler knows they exist.
//! 2.  Re-exporting the handful of types most callers need.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

#[doc(hidden)]
pub use log as __log;

pub mod bridge;
pub mod config;
pub mod error;
pub mod ffi;
pub mod kernels;
pub mod pipeline;
pub mod traits;
pub mod utils;

//==================================================================================
// 2. Re-exports
//==================================================================================
pub use bridge::{Codec, CompressionStats};
pub use config::{CompressionOptions, ElementWidth, DEFAULT_FORMAT_VERSION};
pub use error::VbzError;
pub use kernels::{Passthrough, SecondaryCompressor, ZstdCompressor};
pub use pipeline::Framing;
pub use traits::Element;
