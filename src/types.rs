//! Core type definitions for the RTP audio pipeline.
//!
//! Provides zero-cost newtypes to prevent field mixups at compile time.
//! All types use `#[repr(transparent)]` for guaranteed zero runtime cost.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Macro to generate RTP field newtype wrappers with common implementations
macro_rules! rtp_newtype {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty) => $prefix:literal
        $(, custom_methods: { $($custom:tt)* })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[derive(Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Creates a new instance
            #[inline]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Raw value
            #[inline]
            pub const fn value(self) -> $inner {
                self.0
            }

            /// Wrapping subtraction returning the inner type
            #[inline]
            pub const fn wrapping_sub(self, rhs: Self) -> $inner {
                self.0.wrapping_sub(rhs.0)
            }

            $($($custom)*)?
        }

        // Display with custom prefix
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        // Deref for transparent access
        impl Deref for $name {
            type Target = $inner;

            #[inline]
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        // From/Into conversions
        impl From<$inner> for $name {
            #[inline]
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            #[inline]
            fn from(value: $name) -> Self {
                value.0
            }
        }

        // Enable direct comparisons with raw values
        impl PartialEq<$inner> for $name {
            #[inline]
            fn eq(&self, other: &$inner) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for $inner {
            #[inline]
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

rtp_newtype!(
    /// 7-bit RTP payload type identifying the codec of the payload.
    PayloadType(u8) => "PT"
);

rtp_newtype!(
    /// RTP sequence number (16-bit, wraps).
    SequenceNumber(u16) => "SN",
    custom_methods: {
        /// Converts the sequence number to big-endian bytes.
        #[inline]
        pub fn to_be_bytes(self) -> [u8; 2] {
            self.0.to_be_bytes()
        }
    }
);

rtp_newtype!(
    /// RTP media timestamp (32-bit, wraps).
    Timestamp(u32) => "TS",
    custom_methods: {
        /// Converts the timestamp to big-endian bytes.
        #[inline]
        pub fn to_be_bytes(self) -> [u8; 4] {
            self.0.to_be_bytes()
        }
    }
);

rtp_newtype!(
    /// RTP Synchronization Source (SSRC) identifier.
    Ssrc(u32) => "SSRC",
    custom_methods: {
        /// Converts the SSRC to big-endian bytes.
        #[inline]
        pub fn to_be_bytes(self) -> [u8; 4] {
            self.0.to_be_bytes()
        }
    }
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_type_usage() {
        let pt = PayloadType::new(0);
        assert_eq!(pt, 0);
        assert_eq!(format!("{}", pt), "PT0");

        let pt: PayloadType = 18u8.into();
        assert_eq!(pt.value(), 18);
    }

    #[test]
    fn sequence_number_wrapping_distance() {
        let first = SequenceNumber::new(65534);
        let later = SequenceNumber::new(1);
        assert_eq!(later.wrapping_sub(first), 3);
    }

    #[test]
    fn ssrc_round_trips_to_be_bytes() {
        let ssrc = Ssrc::new(0x343d_a99b);
        assert_eq!(ssrc.to_be_bytes(), [0x34, 0x3d, 0xa9, 0x9b]);
        assert_eq!(format!("{}", ssrc), format!("SSRC{}", 0x343da99bu32));
    }

    #[test]
    fn zero_cost_verification() {
        assert_eq!(std::mem::size_of::<PayloadType>(), std::mem::size_of::<u8>());
        assert_eq!(
            std::mem::size_of::<SequenceNumber>(),
            std::mem::size_of::<u16>()
        );
        assert_eq!(std::mem::size_of::<Timestamp>(), std::mem::size_of::<u32>());
        assert_eq!(std::mem::size_of::<Ssrc>(), std::mem::size_of::<u32>());
    }
}
