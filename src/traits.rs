//! This module defines shared traits used across different kernels.

use bytemuck::Pod;
use num_traits::{PrimInt, Signed, Unsigned, WrappingAdd, WrappingSub};
use std::fmt::Debug;

use crate::config::ElementWidth;

/// A trait that maps a signed integer type to its unsigned counterpart.
pub trait HasUnsigned {
    type Unsigned: Lane + HasSigned<Signed = Self>;
}

/// A trait that maps an unsigned integer type to its signed counterpart.
pub trait HasSigned {
    type Signed;
}

/// An unsigned integer that the group varint packer stores, one per element.
pub trait Lane: PrimInt + Unsigned + WrappingSub + Pod + Debug {
    const WIDTH: ElementWidth;
}

// Implement the traits for every integer width the codec supports.
macro_rules! impl_signed_unsigned_pair {
    ($S:ty, $U:ty, $W:expr) => {
        impl HasUnsigned for $S {
            type Unsigned = $U;
        }
        impl HasSigned for $U {
            type Signed = $S;
        }
        impl Lane for $U {
            const WIDTH: ElementWidth = $W;
        }
    };
}

impl_signed_unsigned_pair!(i8, u8, ElementWidth::One);
impl_signed_unsigned_pair!(i16, u16, ElementWidth::Two);
impl_signed_unsigned_pair!(i32, u32, ElementWidth::Four);
impl_signed_unsigned_pair!(i64, u64, ElementWidth::Eight);

/// A signed, fixed-width element the codec can carry end to end.
///
/// All arithmetic on elements wraps at the element's own width.
pub trait Element: PrimInt + Signed + WrappingAdd + WrappingSub + Pod + Debug + HasUnsigned {}

impl<T> Element for T where T: PrimInt + Signed + WrappingAdd + WrappingSub + Pod + Debug + HasUnsigned
{}
