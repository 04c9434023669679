//! JSON scalar codec for the optional phone number.
//!
//! Wire contract: an absent value (or one with blank raw text) is `null`; a
//! present value is the *original raw text* as a JSON string, never a
//! reformatted canonical form. Decoding is strict: `null` and blank strings
//! are absent, anything else must parse as an international number.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::domain::{parser, PhoneNumber};
use crate::error::{WireError, WireResult};

/// Types that travel as a single JSON scalar on the wire.
///
/// The pipeline's default-value registry uses this to precompute a type's
/// absent wire form and to strict-check scalars before typed decode.
pub trait WireScalar: Sized {
    /// The JSON scalar form of this value.
    fn to_wire(&self) -> Value;

    /// Strict decode of the JSON scalar form.
    ///
    /// # Errors
    ///
    /// Returns [`WireError`] when the value has the wrong JSON type or its
    /// text does not parse.
    fn from_wire(value: &Value) -> WireResult<Self>;
}

impl WireScalar for PhoneNumber {
    fn to_wire(&self) -> Value {
        if self.has_empty_raw() {
            // Raw is blank, so we send null
            Value::Null
        } else {
            // Not blank; holds a valid or invalid number; send it as-is
            Value::String(self.to_raw_string().to_string())
        }
    }

    fn from_wire(value: &Value) -> WireResult<Self> {
        match value {
            Value::Null => Ok(PhoneNumber::absent()),
            Value::String(text) if text.trim().is_empty() => Ok(PhoneNumber::absent()),
            Value::String(text) => parser::strict().parse(text).map_err(WireError::from),
            other => Err(WireError::UnexpectedType {
                found: json_type_name(other),
            }),
        }
    }
}

/// JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// Serde support - serialize as the raw string, or null when blank
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.has_empty_raw() {
            serializer.serialize_none()
        } else {
            serializer.serialize_str(self.to_raw_string())
        }
    }
}

// Serde support - deserialize from string or null with strict parsing
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = Option::<String>::deserialize(deserializer)?;
        match text {
            None => Ok(PhoneNumber::absent()),
            Some(text) if text.trim().is_empty() => Ok(PhoneNumber::absent()),
            Some(text) => parser::strict()
                .parse(&text)
                .map_err(serde::de::Error::custom),
        }
    }
}
