//! Optional phone number value.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::errors::{ParseErrorKind, PhoneNumberError};
use super::number::StructuredNumber;
use crate::grammar::{self, GrammarError};

/// An international phone number that behaves like an `Option`.
///
/// The value itself is never "null": it is either present (the text parsed)
/// or absent, and in both states it remembers the raw text it was built from.
/// Check [`PhoneNumber::is_present`] before calling [`PhoneNumber::get`], or
/// use [`PhoneNumber::number`] for checked access.
///
/// # Example
///
/// ```
/// use phonewire::PhoneNumber;
///
/// let phone = PhoneNumber::parse_optional("+36301234567").unwrap();
/// assert!(phone.is_present());
/// assert_eq!(phone.get().to_e164(), "+36301234567");
///
/// let nothing = PhoneNumber::parse_optional("").unwrap();
/// assert!(nothing.is_absent());
/// ```
#[derive(Clone)]
pub struct PhoneNumber {
    /// Original input text; empty string when built from nothing.
    raw: String,
    inner: Inner,
}

#[derive(Clone)]
enum Inner {
    Absent,
    Present(StructuredNumber),
}

impl PhoneNumber {
    /// An absent phone number.
    ///
    /// Every absent value compares equal to every other absent value.
    pub fn absent() -> Self {
        Self {
            raw: String::new(),
            inner: Inner::Absent,
        }
    }

    /// Parse optional text as an international phone number.
    ///
    /// Blank input yields an absent value. Non-blank input must carry its own
    /// country calling code (`+` or `00` prefix); national-format text is
    /// rejected with [`ParseErrorKind::MissingCountryCode`].
    ///
    /// # Errors
    ///
    /// Returns [`PhoneNumberError::Parse`] if non-blank text fails to parse.
    pub fn parse_optional(text: &str) -> Result<Self, PhoneNumberError> {
        if text.trim().is_empty() {
            return Ok(Self::absent_with_raw(text));
        }
        Ok(Self::present(text, Self::parse_international(text)?))
    }

    /// Parse required text as an international phone number.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneNumberError::Missing`] for blank input, or
    /// [`PhoneNumberError::Parse`] if the text fails to parse.
    pub fn parse_required(text: &str) -> Result<Self, PhoneNumberError> {
        if text.trim().is_empty() {
            return Err(PhoneNumberError::Missing);
        }
        Ok(Self::present(text, Self::parse_international(text)?))
    }

    /// Parse optional text as a national or international phone number.
    ///
    /// Intended for imports from spreadsheets and other external systems
    /// where numbers come in national format. `region_hint` is a 2-letter
    /// ISO country code (like `US`, `HU`) used to resolve national-format
    /// text; blank input yields an absent value without the hint being
    /// looked at.
    ///
    /// # Errors
    ///
    /// Returns [`PhoneNumberError::Parse`] if non-blank text fails to parse
    /// or the hint is blank or unknown.
    pub fn parse_national(text: &str, region_hint: &str) -> Result<Self, PhoneNumberError> {
        if text.trim().is_empty() {
            return Ok(Self::absent_with_raw(text));
        }
        if region_hint.trim().is_empty() {
            return Err(PhoneNumberError::parse(
                text,
                ParseErrorKind::InvalidCountryCode,
            ));
        }
        let number = grammar::shared()
            .parse(text, Some(region_hint.trim()))
            .map(StructuredNumber::from_canonical)
            .map_err(|err| PhoneNumberError::parse(text, kind_for(&err)))?;
        Ok(Self::present(text, number))
    }

    /// Try to parse text as an international phone number, never failing.
    ///
    /// Blank input yields an absent value. Unparseable non-blank input also
    /// yields an absent value, but the original text is retained and
    /// reported by [`PhoneNumber::to_raw_string`] and flagged by
    /// [`PhoneNumber::has_absent_raw`]. That retained text is display-only
    /// data; nothing downstream should treat it as a number.
    ///
    /// # Example
    ///
    /// ```
    /// use phonewire::PhoneNumber;
    ///
    /// let garbage = PhoneNumber::raw("not a number");
    /// assert!(garbage.is_absent());
    /// assert!(garbage.has_absent_raw());
    /// assert_eq!(garbage.to_raw_string(), "not a number");
    /// ```
    pub fn raw(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::absent_with_raw(text);
        }
        match Self::parse_international(text) {
            Ok(number) => Self::present(text, number),
            Err(_) => Self::absent_with_raw(text),
        }
    }

    /// Unwrap an optional phone number, turning `None` into an absent value.
    pub fn or_absent(value: Option<PhoneNumber>) -> Self {
        value.unwrap_or_else(Self::absent)
    }

    /// True if data is present and safe to pass to [`PhoneNumber::get`].
    pub fn is_present(&self) -> bool {
        matches!(self.inner, Inner::Present(_))
    }

    /// True if no data is present.
    pub fn is_absent(&self) -> bool {
        !self.is_present()
    }

    /// The parsed number.
    ///
    /// # Panics
    ///
    /// Panics with "no phone number present" when the value is absent;
    /// calling this without checking [`PhoneNumber::is_present`] is a bug in
    /// the caller. Use [`PhoneNumber::number`] for checked access.
    pub fn get(&self) -> &StructuredNumber {
        match &self.inner {
            Inner::Present(number) => number,
            Inner::Absent => panic!("no phone number present"),
        }
    }

    /// The parsed number, if present.
    pub fn number(&self) -> Option<&StructuredNumber> {
        match &self.inner {
            Inner::Present(number) => Some(number),
            Inner::Absent => None,
        }
    }

    /// The original raw text, or an empty string if there was none.
    pub fn to_raw_string(&self) -> &str {
        &self.raw
    }

    /// True if the raw text is blank.
    pub fn has_empty_raw(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// True if the raw text is not blank.
    pub fn has_raw(&self) -> bool {
        !self.has_empty_raw()
    }

    /// True if the raw text is not blank and it parsed.
    pub fn has_present_raw(&self) -> bool {
        self.has_raw() && self.is_present()
    }

    /// True if the raw text is not blank and it did not parse.
    pub fn has_absent_raw(&self) -> bool {
        self.has_raw() && self.is_absent()
    }

    /// The E.164 string, if a number is present.
    pub fn iso_string(&self) -> Option<String> {
        self.number().map(StructuredNumber::to_e164)
    }

    /// The raw text, if it is not blank.
    pub fn non_empty_raw(&self) -> Option<&str> {
        if self.has_raw() {
            Some(self.raw.as_str())
        } else {
            None
        }
    }

    /// Readable rendering for display surfaces.
    ///
    /// Present values format through the grammar; absent values with retained
    /// raw text echo that text verbatim. Use it only for read-only display,
    /// because it can return invalid raw data too.
    pub fn to_display_string(&self) -> String {
        match &self.inner {
            Inner::Present(number) => number.to_readable(),
            Inner::Absent => self.non_empty_raw().unwrap_or_default().to_string(),
        }
    }

    fn absent_with_raw(text: &str) -> Self {
        Self {
            raw: text.to_string(),
            inner: Inner::Absent,
        }
    }

    fn present(text: &str, number: StructuredNumber) -> Self {
        Self {
            raw: text.to_string(),
            inner: Inner::Present(number),
        }
    }

    fn parse_international(text: &str) -> Result<StructuredNumber, PhoneNumberError> {
        let trimmed = text.trim();
        // International numbers only; 1234 is not a phone number, just a string.
        if !trimmed.starts_with('+') && !trimmed.starts_with("00") {
            return Err(PhoneNumberError::parse(
                text,
                ParseErrorKind::MissingCountryCode,
            ));
        }
        grammar::shared()
            .parse(trimmed, None)
            .map(StructuredNumber::from_canonical)
            .map_err(|err| PhoneNumberError::parse(text, kind_for(&err)))
    }
}

fn kind_for(err: &GrammarError) -> ParseErrorKind {
    match err {
        GrammarError::InvalidCountryCode => ParseErrorKind::InvalidCountryCode,
        GrammarError::NotANumber => ParseErrorKind::NotANumber,
        GrammarError::TooShortAfterIdd => ParseErrorKind::TooShortAfterIdd,
        GrammarError::TooShortNsn => ParseErrorKind::TooShortNsn,
        GrammarError::TooLong => ParseErrorKind::TooLong,
        // Grammar implementations may grow error kinds we do not know about.
        #[allow(unreachable_patterns)]
        _ => ParseErrorKind::General,
    }
}

impl Default for PhoneNumber {
    fn default() -> Self {
        Self::absent()
    }
}

// Equality delegates to the parsed payload: raw spelling does not matter for
// present values, and all absent values are interchangeable.
impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (Inner::Absent, Inner::Absent) => true,
            (Inner::Present(a), Inner::Present(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PhoneNumber {}

impl Hash for PhoneNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.inner {
            Inner::Absent => state.write_u8(0),
            Inner::Present(number) => {
                state.write_u8(1);
                number.hash(state);
            }
        }
    }
}

// Developer rendering: raw text always, parsed details when present.
impl fmt::Debug for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Absent => f
                .debug_struct("PhoneNumber")
                .field("raw", &self.raw)
                .finish(),
            Inner::Present(number) => f
                .debug_struct("PhoneNumber")
                .field("raw", &self.raw)
                .field("e164", &number.to_e164())
                .field("country", &number.country().iso_code())
                .finish(),
        }
    }
}

// Display = to_display_string; read-only surfaces only, may echo invalid raw.
impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_blank_is_absent() {
        assert!(PhoneNumber::parse_optional("").unwrap().is_absent());
        assert!(PhoneNumber::parse_optional("   ").unwrap().is_absent());
    }

    #[test]
    fn test_parse_optional_rejects_national_format() {
        let err = PhoneNumber::parse_optional("301234567").unwrap_err();
        assert_eq!(err.kind(), Some(ParseErrorKind::MissingCountryCode));
    }

    #[test]
    fn test_parse_optional_accepts_idd_prefix() {
        let phone = PhoneNumber::parse_optional("0036301234567").unwrap();
        assert_eq!(phone.get().to_e164(), "+36301234567");
    }

    #[test]
    fn test_parse_required_blank_fails() {
        assert_eq!(
            PhoneNumber::parse_required("  ").unwrap_err(),
            PhoneNumberError::Missing
        );
        assert!(PhoneNumber::parse_required("+36301234567").is_ok());
    }

    #[test]
    fn test_parse_national() {
        let phone = PhoneNumber::parse_national("(415) 555-1234", "US").unwrap();
        assert_eq!(phone.get().country().iso_code(), "US");

        // Blank input does not validate the hint
        assert!(PhoneNumber::parse_national("", "").unwrap().is_absent());

        let err = PhoneNumber::parse_national("4155551234", "").unwrap_err();
        assert_eq!(err.kind(), Some(ParseErrorKind::InvalidCountryCode));
    }

    #[test]
    fn test_raw_never_fails() {
        assert!(PhoneNumber::raw("").is_absent());
        assert!(PhoneNumber::raw("+36301234567").is_present());

        let garbage = PhoneNumber::raw("garbage");
        assert!(garbage.is_absent());
        assert_eq!(garbage.to_raw_string(), "garbage");
        assert!(garbage.has_absent_raw());
    }

    #[test]
    fn test_equality_by_payload_not_spelling() {
        let compact = PhoneNumber::raw("+36301234567");
        let spaced = PhoneNumber::raw("+36 30 123 4567");
        assert_eq!(compact, spaced);
        assert_ne!(compact.to_raw_string(), spaced.to_raw_string());
    }

    #[test]
    fn test_absent_values_are_interchangeable() {
        assert_eq!(PhoneNumber::absent(), PhoneNumber::raw(""));
        assert_eq!(PhoneNumber::absent(), PhoneNumber::raw("garbage"));
        assert_ne!(PhoneNumber::absent(), PhoneNumber::raw("+36301234567"));
    }

    #[test]
    fn test_hash_agrees_with_eq() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(PhoneNumber::raw("+36301234567"));
        assert!(set.contains(&PhoneNumber::raw("+36 30 123 4567")));
        set.insert(PhoneNumber::absent());
        assert!(set.contains(&PhoneNumber::raw("garbage")));
    }

    #[test]
    #[should_panic(expected = "no phone number present")]
    fn test_get_panics_when_absent() {
        PhoneNumber::absent().get();
    }

    #[test]
    fn test_checked_access() {
        assert!(PhoneNumber::absent().number().is_none());
        assert!(PhoneNumber::raw("+36301234567").number().is_some());
    }

    #[test]
    fn test_raw_predicates() {
        let present = PhoneNumber::raw("+36301234567");
        assert!(present.has_raw() && present.has_present_raw());
        assert!(!present.has_absent_raw());

        let absent = PhoneNumber::absent();
        assert!(absent.has_empty_raw());
        assert!(!absent.has_raw());
    }

    #[test]
    fn test_string_helpers() {
        let present = PhoneNumber::raw("+36301234567");
        assert_eq!(present.iso_string().as_deref(), Some("+36301234567"));
        assert_eq!(present.non_empty_raw(), Some("+36301234567"));

        let garbage = PhoneNumber::raw("garbage");
        assert_eq!(garbage.iso_string(), None);
        assert_eq!(garbage.to_display_string(), "garbage");

        assert_eq!(PhoneNumber::absent().to_display_string(), "");
    }

    #[test]
    fn test_display_formats_present_numbers() {
        let phone = PhoneNumber::raw("+36301234567");
        assert_eq!(phone.to_string(), phone.get().to_readable());
    }

    #[test]
    fn test_or_absent() {
        assert!(PhoneNumber::or_absent(None).is_absent());
        let phone = PhoneNumber::raw("+36301234567");
        assert_eq!(PhoneNumber::or_absent(Some(phone.clone())), phone);
    }

    #[test]
    fn test_debug_rendering() {
        let debug = format!("{:?}", PhoneNumber::raw("+36301234567"));
        assert!(debug.contains("+36301234567"), "got: {}", debug);
        assert!(debug.contains("HU"), "got: {}", debug);

        let debug = format!("{:?}", PhoneNumber::raw("garbage"));
        assert!(debug.contains("garbage"), "got: {}", debug);
    }
}
