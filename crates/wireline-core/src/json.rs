//! # JSON Substrate — The Single Wire Conversion Seam
//!
//! Every type that crosses the wire declares its encoding by implementing
//! `ToJson` and `FromJson` over `serde_json::Value`. Containers, composite
//! values, and the client glue are generic over these traits, so no layer
//! ever needs to know a concrete element type.
//!
//! ## Design
//!
//! - `to_json` is infallible: every in-memory value has an encoding.
//! - `from_json` fails only on JSON *shape* mismatches (`WireError`). Text
//!   content inside a well-shaped string is decoded leniently by the value
//!   types themselves.
//! - Sequences map element-wise through the element's own conversion;
//!   primitives pass through unchanged. This mirrors the wire protocol,
//!   which has no envelope or type tags.

use serde_json::Value;

use crate::error::WireError;

/// Conversion of a value into its JSON wire form.
pub trait ToJson {
    /// Encodes `self` as a JSON value.
    fn to_json(&self) -> Value;
}

/// Reconstruction of a value from its JSON wire form.
pub trait FromJson: Sized {
    /// Decodes a value from JSON, failing only on a shape mismatch.
    fn from_json(value: &Value) -> Result<Self, WireError>;
}

/// Names a JSON value's kind for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Zero-pads a component to two characters when it is below ten.
///
/// Fractional values keep their fraction (`3.5` becomes `"03.5"`); values of
/// ten or more print as-is. Used by every fixed-width temporal encoder.
pub(crate) fn pad_two(value: f64) -> String {
    if value == 0.0 {
        "00".to_owned()
    } else if value < 10.0 {
        format!("0{value}")
    } else {
        value.to_string()
    }
}

impl ToJson for Value {
    fn to_json(&self) -> Value {
        self.clone()
    }
}

impl FromJson for Value {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        Ok(value.clone())
    }
}

impl ToJson for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromJson for bool {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        value
            .as_bool()
            .ok_or_else(|| WireError::mismatch("a boolean", value))
    }
}

impl ToJson for i32 {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl FromJson for i32 {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        let wide = value
            .as_i64()
            .ok_or_else(|| WireError::mismatch("an integer", value))?;
        i32::try_from(wide).map_err(|_| WireError::TypeMismatch {
            expected: "a 32-bit integer",
            found: "a number",
        })
    }
}

impl ToJson for i64 {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl FromJson for i64 {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        value
            .as_i64()
            .ok_or_else(|| WireError::mismatch("an integer", value))
    }
}

impl ToJson for f64 {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl FromJson for f64 {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        value
            .as_f64()
            .ok_or_else(|| WireError::mismatch("a number", value))
    }
}

impl ToJson for str {
    fn to_json(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl ToJson for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FromJson for String {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| WireError::mismatch("a string", value))
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Value {
        match self {
            Some(inner) => inner.to_json(),
            None => Value::Null,
        }
    }
}

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_json(other).map(Some),
        }
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        let elements = value
            .as_array()
            .ok_or_else(|| WireError::mismatch("an array", value))?;
        elements.iter().map(T::from_json).collect()
    }
}
