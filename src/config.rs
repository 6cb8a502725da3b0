// In: src/config.rs

//! The single source of truth for vbz compression configuration.
//!
//! `CompressionOptions` is an immutable value created once by the caller and
//! handed, unchanged, to both the compress and decompress side. Nothing about
//! the options is recorded in the compressed bytes, so a mismatch between the
//! two sides must be caught by validation or by the decoder's format checks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::VbzError;

//==================================================================================
// I. Format Versions
//==================================================================================

/// The wire revision written and accepted by this implementation.
pub const DEFAULT_FORMAT_VERSION: u32 = 0;

/// Every wire revision this implementation can decode.
pub const SUPPORTED_FORMAT_VERSIONS: &[u32] = &[DEFAULT_FORMAT_VERSION];

//==================================================================================
// II. Element Width
//==================================================================================

/// The byte width of one integer in the input and in the decoded output.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "u32", into = "u32")]
pub enum ElementWidth {
    One,
    Two,
    Four,
    Eight,
}

impl ElementWidth {
    /// Width in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            ElementWidth::One => 1,
            ElementWidth::Two => 2,
            ElementWidth::Four => 4,
            ElementWidth::Eight => 8,
        }
    }

    /// Number of bits each element occupies inside a group varint control byte.
    pub const fn control_bits(self) -> u32 {
        match self {
            ElementWidth::Eight => 4,
            _ => 2,
        }
    }

    /// Number of elements described by a single control byte.
    pub const fn elements_per_control_byte(self) -> usize {
        (8 / self.control_bits()) as usize
    }
}

impl TryFrom<u32> for ElementWidth {
    type Error = VbzError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ElementWidth::One),
            2 => Ok(ElementWidth::Two),
            4 => Ok(ElementWidth::Four),
            8 => Ok(ElementWidth::Eight),
            other => Err(VbzError::UnsupportedElementWidth(other)),
        }
    }
}

impl From<ElementWidth> for u32 {
    fn from(width: ElementWidth) -> Self {
        width.bytes() as u32
    }
}

impl fmt::Display for ElementWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-byte", self.bytes())
    }
}

//==================================================================================
// III. CompressionOptions
//==================================================================================

/// Options shared by the compress and decompress side of one stream.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CompressionOptions {
    /// Apply the delta + zig-zag transform before packing.
    #[serde(default = "default_true")]
    pub perform_delta_zig_zag: bool,

    /// Width of each integer element.
    #[serde(default = "default_element_width")]
    pub element_width: ElementWidth,

    /// `0` skips the secondary compressor, anything else is its effort level.
    #[serde(default = "default_compression_level")]
    pub compression_level: u32,

    /// Wire revision tag, checked on both sides.
    #[serde(default)]
    pub format_version: u32,
}

impl CompressionOptions {
    pub fn new(perform_delta_zig_zag: bool, element_width: ElementWidth, compression_level: u32) -> Self {
        Self {
            perform_delta_zig_zag,
            element_width,
            compression_level,
            format_version: DEFAULT_FORMAT_VERSION,
        }
    }

    /// Builds options from the raw integers used at the C boundary.
    pub fn from_raw(
        perform_delta_zig_zag: bool,
        integer_size: u32,
        compression_level: u32,
        format_version: u32,
    ) -> Result<Self, VbzError> {
        let options = Self {
            perform_delta_zig_zag,
            element_width: ElementWidth::try_from(integer_size)?,
            compression_level,
            format_version,
        };
        options.validate()?;
        Ok(options)
    }

    /// Parses options from a JSON document, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, VbzError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), VbzError> {
        if !SUPPORTED_FORMAT_VERSIONS.contains(&self.format_version) {
            return Err(VbzError::UnsupportedVersion(self.format_version));
        }
        Ok(())
    }

    pub fn uses_secondary_compression(&self) -> bool {
        self.compression_level > 0
    }
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            perform_delta_zig_zag: default_true(),
            element_width: default_element_width(),
            compression_level: default_compression_level(),
            format_version: DEFAULT_FORMAT_VERSION,
        }
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

fn default_element_width() -> ElementWidth {
    ElementWidth::Two
}

fn default_compression_level() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_width_from_u32() {
        assert_eq!(ElementWidth::try_from(1).unwrap(), ElementWidth::One);
        assert_eq!(ElementWidth::try_from(8).unwrap(), ElementWidth::Eight);
        assert_eq!(
            ElementWidth::try_from(3),
            Err(VbzError::UnsupportedElementWidth(3))
        );
    }

    #[test]
    fn test_control_layout_per_width() {
        assert_eq!(ElementWidth::Four.elements_per_control_byte(), 4);
        assert_eq!(ElementWidth::One.elements_per_control_byte(), 4);
        assert_eq!(ElementWidth::Eight.elements_per_control_byte(), 2);
    }

    #[test]
    fn test_from_json_applies_defaults() {
        let options = CompressionOptions::from_json(r#"{ "element_width": 4 }"#).unwrap();
        assert_eq!(options.element_width, ElementWidth::Four);
        assert!(options.perform_delta_zig_zag);
        assert_eq!(options.compression_level, 1);
        assert_eq!(options.format_version, DEFAULT_FORMAT_VERSION);
    }

    #[test]
    fn test_from_json_rejects_bad_width_and_version() {
        let bad_width = CompressionOptions::from_json(r#"{ "element_width": 3 }"#);
        assert!(matches!(bad_width, Err(VbzError::InvalidConfig(_))));

        let bad_version = CompressionOptions::from_json(r#"{ "format_version": 7 }"#);
        assert_eq!(bad_version, Err(VbzError::UnsupportedVersion(7)));
    }

    #[test]
    fn test_json_roundtrip_keeps_width_as_integer() {
        let options = CompressionOptions::new(false, ElementWidth::Eight, 5);
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"element_width\":8"));
        assert_eq!(CompressionOptions::from_json(&json).unwrap(), options);
    }
}
