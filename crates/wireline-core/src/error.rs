//! # Error Types — Wire Decoding Failures
//!
//! Defines `WireError`, the single failure type raised by this crate. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Only JSON *shape* problems are errors: a number where a string was
//!   required, a map entry that is not a two-element array.
//! - Malformed *text* inside a correctly-shaped string is never an error.
//!   The fixed-width decoders run their digit arithmetic on whatever code
//!   units arrive and produce a deterministic (garbage) value instead.
//!   Callers that need calendar validation use the `to_chrono` conversions.

use thiserror::Error;

/// Failure to decode a JSON value into a wire type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The JSON value has the wrong type for the target.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// What the decoder required, e.g. `"a string"`.
        expected: &'static str,
        /// What the JSON value actually was.
        found: &'static str,
    },

    /// A map entry was an array of the wrong length.
    #[error("expected a [key, value] pair, found an array of {0} elements")]
    MalformedPair(usize),

    /// An object was missing a required field.
    #[error("missing field {0:?}")]
    MissingField(&'static str),
}

impl WireError {
    /// Builds a `TypeMismatch` against the actual kind of `found`.
    pub fn mismatch(expected: &'static str, found: &serde_json::Value) -> Self {
        WireError::TypeMismatch {
            expected,
            found: crate::json::json_type_name(found),
        }
    }
}
