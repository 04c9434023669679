//! Error types for the codec pipeline.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Value-level parse errors live in [`crate::domain::errors`]; the types here cover
//! the wire boundary and pipeline configuration.

use thiserror::Error;

use crate::domain::PhoneNumberError;

/// Errors that can occur while decoding or encoding a JSON document.
#[derive(Error, Debug)]
pub enum WireError {
    /// The document is not well-formed JSON, or typed decode rejected it
    #[error("malformed JSON document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A marked field of a registered record failed its strict scalar decode
    #[error("field `{field}` of `{record}`: {source}")]
    Field {
        /// Type name of the record being decoded
        record: &'static str,
        /// JSON name of the offending field
        field: &'static str,
        /// The underlying scalar failure
        #[source]
        source: Box<WireError>,
    },

    /// A standalone phone-number scalar failed its strict decode
    #[error(transparent)]
    Scalar(#[from] PhoneNumberError),

    /// The JSON value has the wrong shape for the expected scalar
    #[error("expected a phone number string or null, found {found}")]
    UnexpectedType {
        /// JSON type name of the value that was found
        found: &'static str,
    },

    /// The decoded (or about-to-be-encoded) document violates an invariant
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors raised while building a [`crate::codec::JsonPipeline`].
///
/// These are deploy-time bugs (a forgotten registration), not data errors,
/// and are surfaced once at pipeline build rather than per record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A marked field's value type has no registered default-value factory
    #[error("no default value registered for `{value_type}` (field `{field}` of `{record}`)")]
    MissingDefault {
        /// Record type declaring the field
        record: &'static str,
        /// JSON name of the field
        field: &'static str,
        /// Type name of the field's value type
        value_type: &'static str,
    },

    /// The same record type was given more than one field table
    #[error("field table for `{record}` registered more than once")]
    DuplicateTable {
        /// Record type with the duplicate table
        record: &'static str,
    },
}

/// A named invariant violation reported by [`crate::codec::Validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{invariant}")]
pub struct ValidationError {
    invariant: String,
}

impl ValidationError {
    /// Create a validation error naming the violated invariant.
    pub fn new(invariant: impl Into<String>) -> Self {
        Self {
            invariant: invariant.into(),
        }
    }

    /// The violated invariant, as given to [`ValidationError::new`].
    pub fn invariant(&self) -> &str {
        &self.invariant
    }
}

/// Convenience type alias for Results with WireError
pub type WireResult<T> = Result<T, WireError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ParseErrorKind, PhoneNumberError};

    #[test]
    fn test_error_display() {
        let err = WireError::UnexpectedType { found: "number" };
        assert_eq!(
            err.to_string(),
            "expected a phone number string or null, found number"
        );

        let err = ConfigError::MissingDefault {
            record: "ContactCard",
            field: "phone_number",
            value_type: "PhoneNumber",
        };
        assert_eq!(
            err.to_string(),
            "no default value registered for `PhoneNumber` (field `phone_number` of `ContactCard`)"
        );

        let err = ValidationError::new("name is required");
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_field_error_carries_context() {
        let scalar = WireError::Scalar(PhoneNumberError::parse(
            "1234",
            ParseErrorKind::MissingCountryCode,
        ));
        let err = WireError::Field {
            record: "ContactCard",
            field: "phone_number",
            source: Box::new(scalar),
        };
        let text = err.to_string();
        assert!(text.contains("ContactCard"), "got: {}", text);
        assert!(text.contains("phone_number"), "got: {}", text);
    }
}
