//! Domain-level phone number errors.

use std::fmt;

use thiserror::Error;

/// Reason a piece of text failed to parse as an international phone number.
///
/// Grammar implementations report their own error set; whatever does not map
/// onto one of these kinds collapses to [`ParseErrorKind::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// Catch-all for grammar failures with no more specific kind
    General,
    /// The text has no leading `+` or `00` country-code prefix
    MissingCountryCode,
    /// The calling code (or region hint) is not a known country
    InvalidCountryCode,
    /// The text is not a phone number at all
    NotANumber,
    /// Too few digits remain after the international dialing prefix
    TooShortAfterIdd,
    /// The national significant number is too short
    TooShortNsn,
    /// The number is longer than any valid phone number
    TooLong,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::General => "could not be parsed",
            Self::MissingCountryCode => "missing country code",
            Self::InvalidCountryCode => "invalid country code",
            Self::NotANumber => "not a number",
            Self::TooShortAfterIdd => "too short after IDD prefix",
            Self::TooShortNsn => "national number too short",
            Self::TooLong => "number too long",
        };
        f.write_str(text)
    }
}

/// Errors produced by the phone number construction modes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The text did not conform to the phone number grammar
    #[error("{text:?} is not an international phone number: {kind}")]
    Parse {
        /// The offending input text
        text: String,
        /// Why the parse failed
        kind: ParseErrorKind,
    },

    /// A required phone number was blank
    #[error("phone number is required")]
    Missing,
}

impl PhoneNumberError {
    /// Build a parse failure for the given input text.
    pub fn parse(text: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self::Parse {
            text: text.into(),
            kind,
        }
    }

    /// The parse failure kind, if this is a parse failure.
    pub fn kind(&self) -> Option<ParseErrorKind> {
        match self {
            Self::Parse { kind, .. } => Some(*kind),
            Self::Missing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PhoneNumberError::parse("1234", ParseErrorKind::MissingCountryCode);
        assert_eq!(
            err.to_string(),
            "\"1234\" is not an international phone number: missing country code"
        );

        let err = PhoneNumberError::Missing;
        assert_eq!(err.to_string(), "phone number is required");
    }

    #[test]
    fn test_kind_accessor() {
        let err = PhoneNumberError::parse("abc", ParseErrorKind::NotANumber);
        assert_eq!(err.kind(), Some(ParseErrorKind::NotANumber));
        assert_eq!(PhoneNumberError::Missing.kind(), None);
    }
}
