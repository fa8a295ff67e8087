//! # DateTime — Combined Calendar Date and Time of Day
//!
//! A point in time: a [`Date`] plus a [`Duration`] time of day. The wire
//! form is the date block immediately followed by `T` and an `HHMMSS` time
//! block with no separators — unlike a standalone duration, which is
//! colon-separated. An optional `.` extends the seconds with a fraction.
//!
//! Sentinel handling rides entirely on the date component: a date-time is
//! infinite or absent exactly when its date is, regardless of the time of
//! day it happens to carry.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::date::Date;
use crate::duration::Duration;
use crate::error::WireError;
use crate::hash::{hash_combine, HashCode, HashKey};
use crate::json::{pad_two, FromJson, ToJson};

/// A point in time, or one of the three sentinel values.
///
/// # Construction
///
/// - [`DateTime::new()`] — from a date and a time of day.
/// - [`DateTime::POS_INFINITY`], [`DateTime::NEG_INFINITY`],
///   [`DateTime::NOT_A_DATE_TIME`] — the sentinel constants.
/// - [`FromJson::from_json`] — from the wire encoding.
/// - `Default` is [`DateTime::NOT_A_DATE_TIME`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateTime {
    date: Date,
    time_of_day: Duration,
}

impl DateTime {
    /// A point infinitely in the future.
    pub const POS_INFINITY: DateTime = DateTime {
        date: Date::PosInfinity,
        time_of_day: Duration::ZERO,
    };
    /// A point infinitely in the past.
    pub const NEG_INFINITY: DateTime = DateTime {
        date: Date::NegInfinity,
        time_of_day: Duration::ZERO,
    };
    /// The absent point in time.
    pub const NOT_A_DATE_TIME: DateTime = DateTime {
        date: Date::NotADate,
        time_of_day: Duration::ZERO,
    };

    /// Constructs a point in time from its two components.
    pub fn new(date: Date, time_of_day: Duration) -> Self {
        DateTime { date, time_of_day }
    }

    /// The calendar date component.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The time-of-day component.
    pub fn time_of_day(&self) -> Duration {
        self.time_of_day
    }

    /// Decodes the wire text form.
    ///
    /// The first eight UTF-16 units decode as the date; units 9 through 14
    /// are the `HHMMSS` digit pairs; unit 15 may start a seconds fraction.
    /// Absent positions decode as zero digits, like the date decoder.
    fn decode(text: &str) -> Self {
        match text {
            "+infinity" => return DateTime::POS_INFINITY,
            "-infinity" => return DateTime::NEG_INFINITY,
            "not-a-date-time" => return DateTime::NOT_A_DATE_TIME,
            _ => {}
        }
        let date = Date::decode(text);
        let units: Vec<u16> = text.encode_utf16().collect();
        let digit = |index: usize| {
            f64::from(
                units
                    .get(index)
                    .map_or(0, |unit| i32::from(*unit) - i32::from(b'0')),
            )
        };
        let hours = 10.0 * digit(9) + digit(10);
        let minutes = 10.0 * digit(11) + digit(12);
        let seconds = 10.0 * digit(13) + digit(14);
        let mut fraction = 0.0;
        let mut fraction_digits = 0;
        let mut index = 15;
        if index < units.len() && units[index] == u16::from(b'.') {
            index += 1;
            while index < units.len() {
                fraction = 10.0 * fraction + digit(index);
                fraction_digits += 1;
                index += 1;
            }
        }
        // Whole units and the fraction meet at tick scale, where both sides
        // are integer-valued for fractions of up to three digits.
        let whole_ticks = Duration::TICKS_PER_SECOND
            * (Duration::SECONDS_PER_MINUTE * Duration::MINUTES_PER_HOUR * hours
                + Duration::SECONDS_PER_MINUTE * minutes
                + seconds);
        let fraction_ticks = fraction * 10f64.powi(3 - fraction_digits);
        DateTime::new(date, Duration::from_ticks(whole_ticks + fraction_ticks))
    }

    /// Hash of this point in time, stable across platforms and versions.
    pub fn hash_value(&self) -> i32 {
        hash_combine(self.date.hash_value(), self.time_of_day.hash_value())
    }

    /// Validating conversion to a chrono naive date-time.
    ///
    /// The infinities clamp to [`chrono::NaiveDateTime::MAX`] and
    /// [`chrono::NaiveDateTime::MIN`]. The absent sentinel, a non-calendar
    /// date, or a time of day outside `0..24h` yield `None`. The time of
    /// day converts at millisecond precision.
    pub fn to_chrono(&self) -> Option<chrono::NaiveDateTime> {
        match self.date {
            Date::PosInfinity => return Some(chrono::NaiveDateTime::MAX),
            Date::NegInfinity => return Some(chrono::NaiveDateTime::MIN),
            Date::NotADate => return None,
            Date::Ymd { .. } => {}
        }
        let date = self.date.to_chrono()?;
        let ticks = self.time_of_day.ticks();
        if !ticks.is_finite() || ticks < 0.0 {
            return None;
        }
        let millis = ticks as i64;
        let hours = u32::try_from(millis / 3_600_000).ok()?;
        let time = chrono::NaiveTime::from_hms_milli_opt(
            hours,
            (millis / 60_000 % 60) as u32,
            (millis / 1000 % 60) as u32,
            (millis % 1000) as u32,
        )?;
        Some(date.and_time(time))
    }
}

impl Default for DateTime {
    fn default() -> Self {
        DateTime::NOT_A_DATE_TIME
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.date {
            Date::PosInfinity => f.write_str("+infinity"),
            Date::NegInfinity => f.write_str("-infinity"),
            Date::NotADate => f.write_str("not-a-date-time"),
            Date::Ymd { .. } => {
                let parts = self.time_of_day.split();
                write!(
                    f,
                    "{}T{}{}{}",
                    self.date,
                    pad_two(parts.hours),
                    pad_two(parts.minutes),
                    pad_two(parts.seconds)
                )
            }
        }
    }
}

impl ToJson for DateTime {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl FromJson for DateTime {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        let text = value
            .as_str()
            .ok_or_else(|| WireError::mismatch("a date-time string", value))?;
        Ok(DateTime::decode(text))
    }
}

impl HashKey for DateTime {
    fn hash_code(&self) -> HashCode {
        HashCode::Int(self.hash_value())
    }
}

impl Serialize for DateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(DateTime::decode(&text))
    }
}
