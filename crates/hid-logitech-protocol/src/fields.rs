//! Sub-byte wire fields.
//!
//! The classic protocol packs 3-bit slopes, 1-bit inverts, and 4-bit steps
//! next to each other inside single bytes. Each field gets its own type so a
//! value can only reach the encoder already inside its range.

#![deny(static_mut_refs)]

use serde::{Deserialize, Serialize};

macro_rules! bounded_field {
    ($(#[$meta:meta])* $name:ident, $mask:expr) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(try_from = "u8", into = "u8")]
        pub struct $name(u8);

        impl $name {
            /// All bits the field may occupy.
            pub const MASK: u8 = $mask;
            pub const ZERO: Self = Self(0);
            pub const MAX: Self = Self($mask);

            /// Validated constructor; `None` when `value` has bits outside the mask.
            pub const fn new(value: u8) -> Option<Self> {
                if value & !Self::MASK == 0 {
                    Some(Self(value))
                } else {
                    None
                }
            }

            /// Keep only the bits the wire format carries.
            pub const fn from_masked(value: u8) -> Self {
                Self(value & Self::MASK)
            }

            /// Clamp `value` to the field's maximum.
            pub const fn saturating(value: u8) -> Self {
                if value > Self::MASK {
                    Self(Self::MASK)
                } else {
                    Self(value)
                }
            }

            pub const fn get(self) -> u8 {
                self.0
            }
        }

        impl TryFrom<u8> for $name {
            type Error = String;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                Self::new(value).ok_or_else(|| {
                    format!(
                        concat!(stringify!($name), " value {} exceeds mask {:#04x}"),
                        value,
                        Self::MASK
                    )
                })
            }
        }

        impl From<$name> for u8 {
            fn from(field: $name) -> u8 {
                field.0
            }
        }
    };
}

bounded_field!(
    /// 3-bit spring/damper slope (0–7).
    Slope3,
    0b0111
);

bounded_field!(
    /// 1-bit direction invert flag.
    InvertBit,
    0b0001
);

bounded_field!(
    /// 4-bit trapezoid slope step (0–15).
    Nibble,
    0b1111
);

bounded_field!(
    /// 5-bit rev-light mask; bit 0 is the leftmost LED.
    LedPattern,
    0b0001_1111
);

/// Pack two 4-bit values into one byte, `high` in the upper nibble.
pub const fn pack_nibbles(high: u8, low: u8) -> u8 {
    ((high & 0x0F) << 4) | (low & 0x0F)
}

/// Split a byte into `(high, low)` nibbles.
pub const fn unpack_nibbles(byte: u8) -> (u8, u8) {
    (byte >> 4, byte & 0x0F)
}
