//! Pluggable parse policy.

use super::errors::PhoneNumberError;
use super::phone::PhoneNumber;

/// A parse policy turning raw text into a [`PhoneNumber`].
///
/// The wire codec and most callers want [`StrictParser`]; batch imports that
/// must never abort on a bad row can inject [`LenientParser`] at their own
/// boundary instead.
pub trait NumberParser: Send + Sync {
    /// Parse the text under this policy.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneNumberError`] when the policy rejects the text;
    /// lenient policies never do.
    fn parse(&self, text: &str) -> Result<PhoneNumber, PhoneNumberError>;
}

/// Strict international parsing: blank is absent, anything else must parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictParser;

impl NumberParser for StrictParser {
    fn parse(&self, text: &str) -> Result<PhoneNumber, PhoneNumberError> {
        PhoneNumber::parse_optional(text)
    }
}

/// Lenient parsing: unparseable text degrades to an absent value that keeps
/// the original raw text. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LenientParser;

impl NumberParser for LenientParser {
    fn parse(&self, text: &str) -> Result<PhoneNumber, PhoneNumberError> {
        Ok(PhoneNumber::raw(text))
    }
}

/// The default strict policy, shared by reference.
pub fn strict() -> &'static dyn NumberParser {
    &StrictParser
}
