//! Compact ("nBits") encoding of 256-bit difficulty targets.
//!
//! A compact target packs a one-byte exponent and a three-byte mantissa:
//!
//! ```text
//! target = mantissa * 256^(exponent - 3)
//! ```
//!
//! The top bit of the mantissa is a sign bit. Negative and overflowing values
//! can be represented, and are flagged by [`decode`] rather than rejected,
//! so that the caller decides how to treat them.
use super::{Bits, Target};

/// Sign bit of the compact mantissa.
const SIGN_BIT: u32 = 0x0080_0000;
/// Mask of the unsigned compact mantissa.
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// A decoded compact target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// The target magnitude.
    pub target: Target,
    /// Whether the sign bit was set on a non-zero mantissa.
    pub negative: bool,
    /// Whether the value doesn't fit in 256 bits.
    pub overflow: bool,
}

impl Decoded {
    /// Return the target if it is usable as a proof-of-work threshold, ie. it
    /// is neither negative, zero nor overflowing.
    pub fn into_valid(self) -> Option<Target> {
        if self.negative || self.overflow || self.target.is_zero() {
            None
        } else {
            Some(self.target)
        }
    }
}

/// Decode a compact target.
///
/// ```
/// use ion_common::block::compact;
/// use ion_common::block::Target;
///
/// let decoded = compact::decode(0x1d00ffff);
///
/// assert_eq!(decoded.target, Target::from(0xffffu64) << 208usize);
/// assert!(!decoded.negative);
/// assert!(!decoded.overflow);
/// ```
pub fn decode(bits: Bits) -> Decoded {
    let size = bits >> 24;
    let word = bits & MANTISSA_MASK;

    let target = if size <= 3 {
        Target::from(u64::from(word >> (8 * (3 - size))))
    } else {
        shl(Target::from(u64::from(word)), 8 * (size as usize - 3))
    };
    let negative = word != 0 && (bits & SIGN_BIT) != 0;
    let overflow = word != 0
        && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));

    Decoded {
        target,
        negative,
        overflow,
    }
}

/// Encode a target into its compact representation, using the smallest
/// exponent that keeps the mantissa clear of the sign bit.
///
/// ```
/// use ion_common::block::compact;
/// use ion_common::block::Target;
///
/// assert_eq!(compact::encode(&(Target::from(0xffffu64) << 208usize)), 0x1d00ffff);
/// assert_eq!(compact::encode(&Target::from(0x80u64)), 0x02008000);
/// assert_eq!(compact::encode(&Target::zero()), 0);
/// ```
pub fn encode(target: &Target) -> Bits {
    let mut size = (target.bits() as u32 + 7) / 8;
    let mut compact = if size <= 3 {
        (target.low_u64() << (8 * (3 - size))) as u32
    } else {
        (*target >> (8 * (size as usize - 3))).low_u64() as u32
    };

    // The mantissa would read as negative: move one byte into the exponent.
    if compact & SIGN_BIT != 0 {
        compact >>= 8;
        size += 1;
    }
    compact | (size << 24)
}

/// Left shift that yields zero once every bit has been shifted out.
fn shl(value: Target, shift: usize) -> Target {
    if shift >= 256 {
        Target::zero()
    } else {
        value << shift
    }
}
