//! # Date — Fixed-Width Calendar Date With Sentinels
//!
//! A calendar date as the wire protocol represents it: an eight-character
//! `YYYYMMDD` block, or one of three sentinel strings for the unbounded and
//! absent cases.
//!
//! ## Decoding Invariant
//!
//! The decoder does direct character-code arithmetic on UTF-16 units — no
//! general-purpose date parser, no calendar validation. A month of 13 or a
//! day of 40 passes through unchanged, and non-digit characters contribute
//! their (meaningless) code offsets. This is deliberate: peer
//! implementations of the protocol decode the same way, and round-trip
//! equality across implementations matters more here than early rejection.
//! Validation happens only at the optional [`Date::to_chrono`] boundary.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WireError;
use crate::hash::{hash_combine, hash_string, HashCode, HashKey};
use crate::json::{pad_two, FromJson, ToJson};

/// A calendar date, or one of the three sentinel values.
///
/// Sentinels are ordinary enum variants, so they are compile-time constants
/// with structural equality: `Date::PosInfinity == Date::PosInfinity` holds
/// for any two occurrences, with no shared-singleton machinery.
///
/// # Construction
///
/// - [`Date::new()`] — from year/month/day fields, unvalidated.
/// - [`FromJson::from_json`] — from the wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Date {
    /// A concrete calendar date. Fields are unvalidated wire values.
    Ymd {
        /// Calendar year, as decoded.
        year: i32,
        /// Calendar month, nominally 1 through 12.
        month: i32,
        /// Calendar day, nominally 1 through 31.
        day: i32,
    },
    /// A date infinitely in the future.
    PosInfinity,
    /// A date infinitely in the past.
    NegInfinity,
    /// The absent date.
    NotADate,
}

impl Date {
    /// Constructs a concrete date. Fields are taken as-is, unvalidated.
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        Date::Ymd { year, month, day }
    }

    /// The year, or `None` for sentinels.
    pub fn year(&self) -> Option<i32> {
        match self {
            Date::Ymd { year, .. } => Some(*year),
            _ => None,
        }
    }

    /// The month, or `None` for sentinels.
    pub fn month(&self) -> Option<i32> {
        match self {
            Date::Ymd { month, .. } => Some(*month),
            _ => None,
        }
    }

    /// The day, or `None` for sentinels.
    pub fn day(&self) -> Option<i32> {
        match self {
            Date::Ymd { day, .. } => Some(*day),
            _ => None,
        }
    }

    /// Decodes the wire text form.
    ///
    /// Reads exactly the first eight UTF-16 units of a non-sentinel string;
    /// extra characters are ignored (a combined date-time string decodes its
    /// date prefix this way) and absent digit positions decode as zero.
    pub(crate) fn decode(text: &str) -> Self {
        match text {
            "+infinity" => return Date::PosInfinity,
            "-infinity" => return Date::NegInfinity,
            "not-a-date-time" => return Date::NotADate,
            _ => {}
        }
        let mut digits = [0i32; 8];
        for (digit, unit) in digits.iter_mut().zip(text.encode_utf16()) {
            *digit = i32::from(unit) - i32::from(b'0');
        }
        Date::Ymd {
            year: 1000 * digits[0] + 100 * digits[1] + 10 * digits[2] + digits[3],
            month: 10 * digits[4] + digits[5],
            day: 10 * digits[6] + digits[7],
        }
    }

    /// Hash of this date, stable across platforms and versions.
    ///
    /// Concrete dates chain [`hash_combine`] over year, month, day from a
    /// zero seed; sentinels hash their wire strings.
    pub fn hash_value(&self) -> i32 {
        match self {
            Date::Ymd { year, month, day } => {
                hash_combine(hash_combine(hash_combine(0, *year), *month), *day)
            }
            Date::PosInfinity => hash_string("+infinity"),
            Date::NegInfinity => hash_string("-infinity"),
            Date::NotADate => hash_string("not-a-date-time"),
        }
    }

    /// Validating conversion to a chrono calendar date.
    ///
    /// The infinities clamp to [`chrono::NaiveDate::MAX`] and
    /// [`chrono::NaiveDate::MIN`]; the absent date and any field combination
    /// chrono rejects (month 13, day 0, ...) yield `None`.
    pub fn to_chrono(&self) -> Option<chrono::NaiveDate> {
        match self {
            Date::PosInfinity => Some(chrono::NaiveDate::MAX),
            Date::NegInfinity => Some(chrono::NaiveDate::MIN),
            Date::NotADate => None,
            Date::Ymd { year, month, day } => {
                let month = u32::try_from(*month).ok()?;
                let day = u32::try_from(*day).ok()?;
                chrono::NaiveDate::from_ymd_opt(*year, month, day)
            }
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Date::PosInfinity => f.write_str("+infinity"),
            Date::NegInfinity => f.write_str("-infinity"),
            Date::NotADate => f.write_str("not-a-date-time"),
            Date::Ymd { year, month, day } => write!(
                f,
                "{year}{}{}",
                pad_two(f64::from(*month)),
                pad_two(f64::from(*day))
            ),
        }
    }
}

impl ToJson for Date {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl FromJson for Date {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        let text = value
            .as_str()
            .ok_or_else(|| WireError::mismatch("a date string", value))?;
        Ok(Date::decode(text))
    }
}

impl HashKey for Date {
    fn hash_code(&self) -> HashCode {
        HashCode::Int(self.hash_value())
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Date::decode(&text))
    }
}
