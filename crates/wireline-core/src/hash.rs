//! # Hash Substrate — 32-Bit Mixing and Pluggable Key Hashing
//!
//! Defines the two hash primitives every keyed container in this crate is
//! built on, plus the `HashKey` trait that lets arbitrary value types plug
//! into the container layer.
//!
//! ## Cross-Implementation Compatibility
//!
//! `hash_string` and `hash_combine` must produce identical results on every
//! platform and in every peer implementation of this wire protocol, because
//! hash values are compared across process and version boundaries. Both are
//! therefore specified down to the bit:
//!
//! - All arithmetic is 32-bit signed with silent wraparound.
//! - `hash_string` iterates UTF-16 code units, not Unicode scalar values.
//!   A supplementary-plane character contributes its two surrogate units.
//! - `hash_combine` uses the golden-ratio mixing constant `0x9e3779b9` with
//!   an arithmetic right shift of the seed.
//!
//! Do not "fix" the wraparound or switch to `u64` arithmetic; the overflow
//! behavior is part of the contract.
//!
//! ## Key Dispatch
//!
//! A hash code in this protocol is either an integer (for values that define
//! their own hash) or a string (the canonical-text fallback for primitives).
//! `HashCode` captures that union; `HashKey` is the capability trait the
//! containers are generic over.

/// Polynomial rolling hash over a string's UTF-16 code units.
///
/// Computes `hash = hash * 31 + unit` for each code unit, wrapping every
/// step to 32-bit signed. The empty string hashes to `0`.
pub fn hash_string(value: &str) -> i32 {
    let mut hash = 0i32;
    for unit in value.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    hash
}

/// Mixes `hash` into `seed`, returning the combined hash.
///
/// Computes `seed ^ (hash + 0x9e3779b9 + (seed << 6) + (seed >> 2))` with
/// every addition wrapping at 32 bits and `>>` arithmetic. The result is
/// deterministic and order-sensitive: `hash_combine(a, b)` and
/// `hash_combine(b, a)` differ in general, which is what makes chained
/// combines usable for ordered field tuples.
pub fn hash_combine(seed: i32, hash: i32) -> i32 {
    seed ^ hash
        .wrapping_add(0x9e37_79b9_u32 as i32)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

/// A key's hash: an integer for types with their own hash function, or the
/// key's canonical text for primitive fallback hashing.
///
/// The two variants never compare equal to each other, so an integer `5` and
/// the string `"5"` land in distinct buckets — matching the untyped
/// protocol, where a numeric hash and a string hash are distinct map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashCode {
    /// A 32-bit hash produced by the value's own hash function.
    Int(i32),
    /// The canonical-text fallback for values without a hash function.
    Str(String),
}

impl From<i32> for HashCode {
    fn from(hash: i32) -> Self {
        HashCode::Int(hash)
    }
}

impl From<String> for HashCode {
    fn from(text: String) -> Self {
        HashCode::Str(text)
    }
}

impl From<&str> for HashCode {
    fn from(text: &str) -> Self {
        HashCode::Str(text.to_owned())
    }
}

/// A value usable as a container key: structural equality plus a stable
/// hash code.
///
/// Value types with a defined wire hash return `HashCode::Int`; primitives
/// fall back to `HashCode::Str` of their canonical text. Implementations
/// must keep the usual invariant that equal keys produce equal hash codes.
pub trait HashKey: PartialEq {
    /// Returns the hash code used to select this key's bucket.
    fn hash_code(&self) -> HashCode;
}

macro_rules! impl_hash_key_via_text {
    ($($ty:ty),* $(,)?) => {
        $(impl HashKey for $ty {
            fn hash_code(&self) -> HashCode {
                HashCode::Str(self.to_string())
            }
        })*
    };
}

impl_hash_key_via_text!(i32, i64, u32, bool);

impl HashKey for String {
    fn hash_code(&self) -> HashCode {
        HashCode::Str(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_hashes_to_zero() {
        assert_eq!(hash_string(""), 0);
    }

    #[test]
    fn test_single_character_hashes_to_its_code_unit() {
        assert_eq!(hash_string("a"), 97);
        assert_eq!(hash_string("é"), 233);
    }

    #[test]
    fn test_known_string_vectors() {
        assert_eq!(hash_string("ab"), 3105);
        assert_eq!(hash_string("hello"), 99_162_322);
        assert_eq!(hash_string("hello world"), 1_794_106_052);
        assert_eq!(hash_string("wireline"), -1_000_040_967);
    }

    #[test]
    fn test_long_string_wraps_at_32_bits() {
        assert_eq!(
            hash_string("The quick brown fox jumps over the lazy dog"),
            -609_428_141
        );
    }

    #[test]
    fn test_supplementary_plane_hashes_as_two_surrogate_units() {
        // U+1F600 is the units D83D DE00, not the scalar value 1F600.
        assert_eq!(hash_string("😀"), 1_772_899);
        assert_ne!(hash_string("😀"), 0x1F600);
    }

    #[test]
    fn test_combine_known_vectors() {
        assert_eq!(hash_combine(0, 0), -1_640_531_527);
        assert_eq!(hash_combine(1, 2), -1_640_531_462);
        assert_eq!(hash_combine(2, 1), -1_640_531_400);
        assert_eq!(hash_combine(-1, 1), 1_640_531_590);
    }

    #[test]
    fn test_combine_wraps_on_overflow() {
        assert_eq!(hash_combine(i32::MAX, i32::MAX), 1_103_660_680);
    }

    #[test]
    fn test_combine_is_order_sensitive() {
        assert_ne!(hash_combine(1, 2), hash_combine(2, 1));
        assert_ne!(hash_combine(0, 7), hash_combine(7, 0));
    }

    #[test]
    fn test_int_and_str_codes_never_collide() {
        assert_ne!(HashCode::Int(5), HashCode::from("5"));
        assert_eq!(i32::hash_code(&5), HashCode::from("5"));
    }

    #[test]
    fn test_primitive_keys_fall_back_to_text() {
        assert_eq!(true.hash_code(), HashCode::from("true"));
        assert_eq!((-12i64).hash_code(), HashCode::from("-12"));
        assert_eq!("key".to_owned().hash_code(), HashCode::from("key"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Oracle formulation of `hash_string` with 64-bit arithmetic reduced
    /// mod 2^32, kept independent of the wrapping-i32 production path.
    fn hash_string_oracle(value: &str) -> i32 {
        let mut hash = 0i64;
        for unit in value.encode_utf16() {
            hash = (hash * 31 + i64::from(unit)) & 0xFFFF_FFFF;
        }
        hash as u32 as i32
    }

    proptest! {
        #[test]
        fn string_hash_matches_mod_2_32_oracle(s in ".*") {
            prop_assert_eq!(hash_string(&s), hash_string_oracle(&s));
        }

        #[test]
        fn combine_is_deterministic(seed in any::<i32>(), hash in any::<i32>()) {
            prop_assert_eq!(hash_combine(seed, hash), hash_combine(seed, hash));
        }

        #[test]
        fn combine_matches_mod_2_32_oracle(seed in any::<i32>(), hash in any::<i32>()) {
            let sum = (i64::from(hash)
                + 0x9e37_79b9_i64
                + (i64::from(seed) << 6)
                + (i64::from(seed) >> 2)) as u32;
            let oracle = seed ^ (sum as i32);
            prop_assert_eq!(hash_combine(seed, hash), oracle);
        }
    }
}
