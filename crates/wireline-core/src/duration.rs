//! # Duration — Tick-Counted Time Spans With Infinite Sentinels
//!
//! A span of time as a signed tick count at 1000 ticks per second, stored in
//! an `f64` so the two infinite sentinels are the IEEE infinities and
//! fractional seconds survive exactly as the wire carries them.
//!
//! ## Decoding Invariant
//!
//! The `[-]HH:MM:SS[.fraction]` decoder walks UTF-16 units and does plain
//! digit arithmetic up to each delimiter. There is no validation: minutes of
//! 75 or stray letters produce a deterministic (garbage) tick count, never
//! an error. Ticks are assembled at tick scale, where hours, minutes, whole
//! seconds, and a fraction of up to three digits are all integer-valued
//! `f64` terms, so every whole-tick span the encoder emits decodes back to
//! the same ticks.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WireError;
use crate::hash::{hash_combine, HashCode, HashKey};
use crate::json::{pad_two, FromJson, ToJson};

/// A signed time span counted in ticks of one millisecond.
///
/// # Construction
///
/// - [`Duration::from_ticks()`] — from a raw tick count.
/// - [`Duration::ZERO`], [`Duration::POS_INFINITY`],
///   [`Duration::NEG_INFINITY`] — the sentinel constants.
/// - [`FromJson::from_json`] — from the wire encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duration {
    ticks: f64,
}

/// The hours/minutes/seconds decomposition of a [`Duration`].
///
/// Produced by truncating division on the signed tick count, so for negative
/// spans the sign appears only on the units the division leaves nonzero:
/// minus 45 seconds is `{0, 0, -45}`, not `{-0, -0, -45}` normalized across
/// all fields. Callers must not re-normalize this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeParts {
    /// Whole hours, truncated toward zero.
    pub hours: f64,
    /// Whole minutes after removing hours.
    pub minutes: f64,
    /// Remaining seconds, fraction included.
    pub seconds: f64,
}

impl Duration {
    /// Ticks in one second.
    pub const TICKS_PER_SECOND: f64 = 1000.0;
    /// Seconds in one minute.
    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    /// Minutes in one hour.
    pub const MINUTES_PER_HOUR: f64 = 60.0;
    /// Ticks in one minute.
    pub const TICKS_PER_MINUTE: f64 = Self::TICKS_PER_SECOND * Self::SECONDS_PER_MINUTE;
    /// Ticks in one hour.
    pub const TICKS_PER_HOUR: f64 = Self::TICKS_PER_MINUTE * Self::MINUTES_PER_HOUR;

    /// The infinite future-directed span.
    pub const POS_INFINITY: Duration = Duration {
        ticks: f64::INFINITY,
    };
    /// The infinite past-directed span.
    pub const NEG_INFINITY: Duration = Duration {
        ticks: f64::NEG_INFINITY,
    };
    /// The empty span.
    pub const ZERO: Duration = Duration { ticks: 0.0 };

    /// Constructs a span from a raw tick count.
    pub fn from_ticks(ticks: f64) -> Self {
        Duration { ticks }
    }

    /// The raw tick count.
    pub fn ticks(&self) -> f64 {
        self.ticks
    }

    /// This span expressed in whole-and-fractional seconds.
    pub fn total_seconds(&self) -> f64 {
        self.ticks / Self::TICKS_PER_SECOND
    }

    /// This span expressed in whole-and-fractional minutes.
    pub fn total_minutes(&self) -> f64 {
        self.ticks / Self::TICKS_PER_MINUTE
    }

    /// This span expressed in whole-and-fractional hours.
    pub fn total_hours(&self) -> f64 {
        self.ticks / Self::TICKS_PER_HOUR
    }

    /// Decomposes the span into hours, minutes and seconds.
    pub fn split(&self) -> TimeParts {
        let mut ticks = self.ticks;
        let hours = (ticks / Self::TICKS_PER_HOUR).trunc();
        ticks -= hours * Self::TICKS_PER_HOUR;
        let minutes = (ticks / Self::TICKS_PER_MINUTE).trunc();
        ticks -= minutes * Self::TICKS_PER_MINUTE;
        let seconds = ticks / Self::TICKS_PER_SECOND;
        TimeParts {
            hours,
            minutes,
            seconds,
        }
    }

    /// Decodes the wire text form.
    pub(crate) fn decode(text: &str) -> Self {
        match text {
            "" => return Duration::ZERO,
            "+infinity" => return Duration::POS_INFINITY,
            "-infinity" => return Duration::NEG_INFINITY,
            _ => {}
        }
        let units: Vec<u16> = text.encode_utf16().collect();
        let digit = |index: usize| f64::from(i32::from(units[index]) - i32::from(b'0'));
        let mut index = 0;
        let sign = if units[0] == u16::from(b'-') {
            index = 1;
            -1.0
        } else {
            1.0
        };
        let mut hours = 0.0;
        while index < units.len() && units[index] != u16::from(b':') {
            hours = 10.0 * hours + digit(index);
            index += 1;
        }
        index += 1;
        let mut minutes = 0.0;
        while index < units.len() && units[index] != u16::from(b':') {
            minutes = 10.0 * minutes + digit(index);
            index += 1;
        }
        index += 1;
        let mut seconds = 0.0;
        while index < units.len() && units[index] != u16::from(b'.') {
            seconds = 10.0 * seconds + digit(index);
            index += 1;
        }
        index += 1;
        let mut fraction = 0.0;
        let mut fraction_digits = 0;
        while index < units.len() {
            fraction = 10.0 * fraction + digit(index);
            fraction_digits += 1;
            index += 1;
        }
        // Whole units and the fraction meet at tick scale, where both sides
        // are integer-valued for fractions of up to three digits.
        let whole_ticks = Self::TICKS_PER_SECOND
            * (Self::SECONDS_PER_MINUTE * Self::MINUTES_PER_HOUR * hours
                + Self::SECONDS_PER_MINUTE * minutes
                + seconds);
        let fraction_ticks = fraction * 10f64.powi(3 - fraction_digits);
        Duration::from_ticks(sign * (whole_ticks + fraction_ticks))
    }

    /// Hash of this span, stable across platforms and versions.
    ///
    /// Mixes the two 32-bit halves of the tick count's IEEE bit pattern, so
    /// equal spans (including the infinities) hash equal everywhere.
    pub fn hash_value(&self) -> i32 {
        let bits = self.ticks.to_bits();
        hash_combine((bits >> 32) as i32, bits as i32)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ticks == f64::INFINITY {
            return f.write_str("+infinity");
        }
        if self.ticks == f64::NEG_INFINITY {
            return f.write_str("-infinity");
        }
        if self.ticks < 0.0 {
            f.write_str("-")?;
        }
        let parts = Duration::from_ticks(self.ticks.abs()).split();
        write!(
            f,
            "{}:{}:{}",
            pad_two(parts.hours),
            pad_two(parts.minutes),
            pad_two(parts.seconds)
        )
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Duration {
        Duration::from_ticks(self.ticks + other.ticks)
    }
}

impl Sub for Duration {
    type Output = Duration;

    fn sub(self, other: Duration) -> Duration {
        Duration::from_ticks(self.ticks - other.ticks)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        Duration::from_ticks(-self.ticks)
    }
}

impl Mul<f64> for Duration {
    type Output = Duration;

    fn mul(self, scalar: f64) -> Duration {
        Duration::from_ticks(self.ticks * scalar)
    }
}

impl Mul<Duration> for f64 {
    type Output = Duration;

    fn mul(self, span: Duration) -> Duration {
        span * self
    }
}

impl ToJson for Duration {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl FromJson for Duration {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        let text = value
            .as_str()
            .ok_or_else(|| WireError::mismatch("a duration string", value))?;
        Ok(Duration::decode(text))
    }
}

impl HashKey for Duration {
    fn hash_code(&self) -> HashCode {
        HashCode::Int(self.hash_value())
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Duration::decode(&text))
    }
}
