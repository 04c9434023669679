//! Phone number grammar capability.
//!
//! The codec and the domain values treat the grammar as an opaque collaborator:
//! it turns text into a [`CanonicalNumber`], validates it, formats it, and maps
//! calling codes to ISO regions. The crate ships [`BuiltinGrammar`], a coarse
//! table-driven implementation; embedders needing carrier-grade metadata can
//! implement [`PhoneGrammar`] on top of a full metadata set and reuse the rest
//! of the crate unchanged.

pub mod builtin;

pub use builtin::BuiltinGrammar;

use once_cell::sync::Lazy;
use thiserror::Error;

/// Output styles supported by [`PhoneGrammar::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    /// Compact E.164 form, e.g. `+36301234567`
    E164,
    /// Human-readable international form, e.g. `+36 301 234 567`
    International,
}

/// Errors reported by a grammar implementation.
///
/// The set is non-exhaustive on purpose: richer grammars may fail in ways the
/// built-in one cannot, and callers map anything unrecognized to a general
/// parse failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GrammarError {
    /// The calling code or region hint does not name a known country
    #[error("invalid country calling code")]
    InvalidCountryCode,

    /// The text does not look like a phone number at all
    #[error("the string supplied did not seem to be a phone number")]
    NotANumber,

    /// Too few digits after the international dialing prefix
    #[error("the string is too short after the IDD prefix")]
    TooShortAfterIdd,

    /// The national significant number is too short
    #[error("the national number is too short")]
    TooShortNsn,

    /// The number has more digits than any valid phone number
    #[error("the number is too long")]
    TooLong,
}

/// A parsed phone number in canonical form: calling code plus the national
/// significant number, digits only. Sufficient to re-format in any style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalNumber {
    calling_code: u16,
    national: String,
}

impl CanonicalNumber {
    /// Assemble a canonical number from its parts.
    ///
    /// Grammar implementations are the intended callers; `national` must be
    /// digits only.
    pub fn new(calling_code: u16, national: impl Into<String>) -> Self {
        Self {
            calling_code,
            national: national.into(),
        }
    }

    /// The country calling code, e.g. 36 for Hungary.
    pub fn calling_code(&self) -> u16 {
        self.calling_code
    }

    /// The national significant number, digits only.
    pub fn national(&self) -> &str {
        &self.national
    }
}

/// Capability surface of the phone number grammar.
///
/// Implementations are stateless and reentrant; the shared instance returned
/// by [`shared`] is constructed once and used concurrently by every caller.
pub trait PhoneGrammar: Send + Sync {
    /// Parse `text` into canonical form.
    ///
    /// With `region_hint: None` the text must carry its own country calling
    /// code (`+` or `00` prefix). With a hint, national-format text is
    /// resolved against that region.
    fn parse(&self, text: &str, region_hint: Option<&str>) -> Result<CanonicalNumber, GrammarError>;

    /// Whether the number is valid in its country, as far as the grammar knows.
    fn is_valid(&self, number: &CanonicalNumber) -> bool;

    /// Format the number in the requested style.
    fn format(&self, number: &CanonicalNumber, style: FormatStyle) -> String;

    /// The ISO region for a calling code, or an empty string if unknown.
    fn region_for_calling_code(&self, calling_code: u16) -> String;
}

static SHARED: Lazy<BuiltinGrammar> = Lazy::new(BuiltinGrammar::new);

/// The process-wide grammar instance.
///
/// Lazily initialized on first use, immutable afterwards.
pub fn shared() -> &'static dyn PhoneGrammar {
    &*SHARED
}
