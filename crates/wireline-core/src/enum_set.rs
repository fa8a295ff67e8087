//! # EnumSet — Bit-Packed Sets Over Small Enumerations
//!
//! A set of enum members stored as one `i32` of bits, for enumerations
//! whose members map to distinct bit positions in `0..32`. The JSON form is
//! the raw bit pattern as a plain integer — there is no name mapping, so
//! the encoding is fragile to renumbering members. That is an accepted
//! constraint of the wire protocol, not something to repair here.
//!
//! Because the backing word is a *signed* 32-bit integer, a set with bit 31
//! raised encodes as a negative number. Decoders wrap any integral JSON
//! number to 32 bits, mirroring the 32-bit coercion peer implementations
//! apply.

use std::marker::PhantomData;
use std::ops::{BitAnd, BitOr};

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WireError;
use crate::json::{FromJson, ToJson};

/// Maps an enumeration member to its bit position.
///
/// Positions must be distinct and lie in `0..32`. Out-of-range positions
/// are masked to five bits, matching 32-bit shift semantics, rather than
/// rejected.
pub trait BitIndex: Copy {
    /// The member's bit position.
    fn bit_index(self) -> u32;
}

/// A bit-packed set of `T` members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumSet<T> {
    bits: i32,
    members: PhantomData<T>,
}

impl<T: BitIndex> EnumSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        EnumSet {
            bits: 0,
            members: PhantomData,
        }
    }

    /// Builds a set directly from its bit representation.
    pub fn from_bits(bits: i32) -> Self {
        EnumSet {
            bits,
            members: PhantomData,
        }
    }

    /// The raw bit representation.
    pub fn bits(&self) -> i32 {
        self.bits
    }

    /// Whether no member is present.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    fn mask(member: T) -> i32 {
        1i32.wrapping_shl(member.bit_index())
    }

    /// Tests whether a member is present.
    pub fn test(&self, member: T) -> bool {
        self.bits & Self::mask(member) != 0
    }

    /// Adds a member. Returns `&mut Self` so mutations chain.
    pub fn set(&mut self, member: T) -> &mut Self {
        self.bits |= Self::mask(member);
        self
    }

    /// Removes a member. Returns `&mut Self` so mutations chain.
    pub fn unset(&mut self, member: T) -> &mut Self {
        self.bits &= !Self::mask(member);
        self
    }

    /// Consuming builder form of [`EnumSet::set`].
    pub fn with(mut self, member: T) -> Self {
        self.bits |= Self::mask(member);
        self
    }
}

impl<T: BitIndex> Default for EnumSet<T> {
    fn default() -> Self {
        EnumSet::new()
    }
}

impl<T: BitIndex> From<T> for EnumSet<T> {
    fn from(member: T) -> Self {
        EnumSet::new().with(member)
    }
}

impl<T: BitIndex> BitOr for EnumSet<T> {
    type Output = EnumSet<T>;

    fn bitor(self, other: EnumSet<T>) -> EnumSet<T> {
        EnumSet::from_bits(self.bits | other.bits)
    }
}

impl<T: BitIndex> BitAnd for EnumSet<T> {
    type Output = EnumSet<T>;

    fn bitand(self, other: EnumSet<T>) -> EnumSet<T> {
        EnumSet::from_bits(self.bits & other.bits)
    }
}

impl<T: BitIndex> ToJson for EnumSet<T> {
    fn to_json(&self) -> Value {
        Value::from(self.bits)
    }
}

impl<T: BitIndex> FromJson for EnumSet<T> {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        let wide = value
            .as_i64()
            .ok_or_else(|| WireError::mismatch("a bit mask integer", value))?;
        Ok(EnumSet::from_bits(wide as i32))
    }
}

impl<T: BitIndex> Serialize for EnumSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.bits)
    }
}

impl<'de, T: BitIndex> Deserialize<'de> for EnumSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wide = i64::deserialize(deserializer)?;
        Ok(EnumSet::from_bits(wide as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Channel {
        Red,
        Green,
        Blue,
    }

    impl BitIndex for Channel {
        fn bit_index(self) -> u32 {
            self as u32
        }
    }

    #[derive(Debug, Clone, Copy)]
    struct TopBit;

    impl BitIndex for TopBit {
        fn bit_index(self) -> u32 {
            31
        }
    }

    #[test]
    fn test_starts_empty() {
        let channels: EnumSet<Channel> = EnumSet::new();
        assert!(channels.is_empty());
        assert!(!channels.test(Channel::Red));
        assert!(!channels.test(Channel::Green));
        assert!(!channels.test(Channel::Blue));
    }

    #[test]
    fn test_set_test_and_unset() {
        let mut channels = EnumSet::new();
        channels.set(Channel::Red).set(Channel::Blue);
        assert!(channels.test(Channel::Red));
        assert!(!channels.test(Channel::Green));
        assert!(channels.test(Channel::Blue));
        assert_eq!(channels.bits(), 0b101);

        channels.unset(Channel::Red);
        assert!(!channels.test(Channel::Red));
        assert_eq!(channels.bits(), 0b100);
    }

    #[test]
    fn test_builder_and_single_member_forms() {
        let channels = EnumSet::new().with(Channel::Red).with(Channel::Green);
        assert_eq!(channels.bits(), 0b011);
        assert_eq!(EnumSet::from(Channel::Blue).bits(), 0b100);
    }

    #[test]
    fn test_union_and_intersection() {
        let warm = EnumSet::from(Channel::Red);
        let cold = EnumSet::new().with(Channel::Green).with(Channel::Blue);
        assert_eq!((warm | cold).bits(), 0b111);
        assert!((warm & cold).is_empty());
    }

    #[test]
    fn test_round_trips_through_the_raw_integer() {
        let channels = EnumSet::new().with(Channel::Red).with(Channel::Blue);
        assert_eq!(channels.to_json(), json!(5));
        let decoded = EnumSet::<Channel>::from_json(&json!(5)).unwrap();
        assert!(decoded.test(Channel::Red));
        assert!(!decoded.test(Channel::Green));
        assert!(decoded.test(Channel::Blue));
    }

    #[test]
    fn test_bit_31_encodes_as_a_negative_number() {
        let top = EnumSet::from(TopBit);
        assert_eq!(top.bits(), i32::MIN);
        assert_eq!(top.to_json(), json!(-2_147_483_648i64));
        let decoded = EnumSet::<TopBit>::from_json(&top.to_json()).unwrap();
        assert!(decoded.test(TopBit));
    }

    #[test]
    fn test_decode_wraps_wide_integers_to_32_bits() {
        let wrapped = EnumSet::<Channel>::from_json(&json!(1i64 << 32)).unwrap();
        assert!(wrapped.is_empty());
        let low_bits = EnumSet::<Channel>::from_json(&json!((1i64 << 32) | 0b10)).unwrap();
        assert!(low_bits.test(Channel::Green));
    }

    #[test]
    fn test_shift_amounts_mask_to_five_bits() {
        #[derive(Debug, Clone, Copy)]
        struct Overflowing;

        impl BitIndex for Overflowing {
            fn bit_index(self) -> u32 {
                33
            }
        }

        assert_eq!(EnumSet::from(Overflowing).bits(), 0b10);
    }

    #[test]
    fn test_non_integer_json_is_a_shape_error() {
        assert!(EnumSet::<Channel>::from_json(&json!("0b101")).is_err());
        assert!(EnumSet::<Channel>::from_json(&json!(1.5)).is_err());
    }

    #[test]
    fn test_serde_uses_the_raw_integer() {
        let channels = EnumSet::new().with(Channel::Green);
        assert_eq!(serde_json::to_value(channels).unwrap(), json!(2));
        let back: EnumSet<Channel> = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(back, channels);
    }
}
