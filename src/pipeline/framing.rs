//! Framing strategies wrapped around the shared core payload.
//!
//! `Framing::Raw` emits the core payload as-is; the decoder must be told the
//! exact original length. `Framing::Sized` prefixes the payload
//! with the original byte length so the decoder can size its buffer from the
//! compressed bytes alone.

use crate::error::VbzError;

/// Width of the original-length field in the sized framing.
pub const SIZE_FIELD_LEN: usize = std::mem::size_of::<u32>();

/// Whether a length field precedes the core payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    Raw,
    Sized,
}

impl Framing {
    pub fn header_len(self) -> usize {
        match self {
            Framing::Raw => 0,
            Framing::Sized => SIZE_FIELD_LEN,
        }
    }

    /// Appends this framing's header for an input of `original_len` bytes.
    pub fn write_header(self, original_len: usize, out: &mut Vec<u8>) -> Result<(), VbzError> {
        if self == Framing::Sized {
            let field = u32::try_from(original_len).map_err(|_| VbzError::InputTooLarge(original_len))?;
            out.extend_from_slice(&field.to_le_bytes());
        }
        Ok(())
    }

    /// Splits a framed buffer into the recorded original length (if any) and
    /// the core payload.
    pub fn split(self, framed: &[u8]) -> Result<(Option<usize>, &[u8]), VbzError> {
        match self {
            Framing::Raw => Ok((None, framed)),
            Framing::Sized => {
                let original_len = read_size_field(framed)?;
                Ok((Some(original_len), &framed[SIZE_FIELD_LEN..]))
            }
        }
    }
}

/// Reads the original length recorded at the front of a sized payload.
pub fn read_size_field(framed: &[u8]) -> Result<usize, VbzError> {
    let field: [u8; SIZE_FIELD_LEN] = framed
        .get(..SIZE_FIELD_LEN)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(VbzError::SizedHeaderMissing(framed.len()))?;
    Ok(u32::from_le_bytes(field) as usize)
}
