//! Table-driven built-in grammar.
//!
//! Metadata here is a deliberately coarse subset of the real numbering plans:
//! one primary ISO region per calling code and a national-number length range.
//! Good enough for routing, storage and tests; swap in a full [`PhoneGrammar`]
//! implementation where carrier-grade validation matters.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{CanonicalNumber, FormatStyle, GrammarError, PhoneGrammar};

/// Formatting characters tolerated inside a phone number.
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-.()/]+").expect("Failed to compile separator regex"));

/// Shape of a normalized number: optional `+`, then digits.
static NORMALIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]+$").expect("Failed to compile normalized-shape regex"));

/// National numbers shorter than this fail parsing outright.
const MIN_NSN_DIGITS: usize = 2;

/// National numbers longer than this fail parsing outright.
const MAX_NSN_DIGITS: usize = 16;

struct RegionMeta {
    calling_code: u16,
    iso: &'static str,
    min_nsn: u8,
    max_nsn: u8,
}

/// Primary region per calling code with national-number length bounds.
static REGIONS: &[RegionMeta] = &[
    RegionMeta { calling_code: 1, iso: "US", min_nsn: 10, max_nsn: 10 },
    RegionMeta { calling_code: 7, iso: "RU", min_nsn: 10, max_nsn: 10 },
    RegionMeta { calling_code: 20, iso: "EG", min_nsn: 8, max_nsn: 10 },
    RegionMeta { calling_code: 27, iso: "ZA", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 30, iso: "GR", min_nsn: 10, max_nsn: 10 },
    RegionMeta { calling_code: 31, iso: "NL", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 32, iso: "BE", min_nsn: 8, max_nsn: 9 },
    RegionMeta { calling_code: 33, iso: "FR", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 34, iso: "ES", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 36, iso: "HU", min_nsn: 8, max_nsn: 9 },
    RegionMeta { calling_code: 39, iso: "IT", min_nsn: 6, max_nsn: 11 },
    RegionMeta { calling_code: 40, iso: "RO", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 41, iso: "CH", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 43, iso: "AT", min_nsn: 4, max_nsn: 13 },
    RegionMeta { calling_code: 44, iso: "GB", min_nsn: 7, max_nsn: 10 },
    RegionMeta { calling_code: 45, iso: "DK", min_nsn: 8, max_nsn: 8 },
    RegionMeta { calling_code: 46, iso: "SE", min_nsn: 7, max_nsn: 13 },
    RegionMeta { calling_code: 47, iso: "NO", min_nsn: 5, max_nsn: 8 },
    RegionMeta { calling_code: 48, iso: "PL", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 49, iso: "DE", min_nsn: 6, max_nsn: 11 },
    RegionMeta { calling_code: 51, iso: "PE", min_nsn: 8, max_nsn: 9 },
    RegionMeta { calling_code: 52, iso: "MX", min_nsn: 10, max_nsn: 10 },
    RegionMeta { calling_code: 54, iso: "AR", min_nsn: 10, max_nsn: 10 },
    RegionMeta { calling_code: 55, iso: "BR", min_nsn: 10, max_nsn: 11 },
    RegionMeta { calling_code: 56, iso: "CL", min_nsn: 8, max_nsn: 9 },
    RegionMeta { calling_code: 57, iso: "CO", min_nsn: 8, max_nsn: 10 },
    RegionMeta { calling_code: 58, iso: "VE", min_nsn: 10, max_nsn: 10 },
    RegionMeta { calling_code: 60, iso: "MY", min_nsn: 7, max_nsn: 9 },
    RegionMeta { calling_code: 61, iso: "AU", min_nsn: 5, max_nsn: 9 },
    RegionMeta { calling_code: 62, iso: "ID", min_nsn: 5, max_nsn: 10 },
    RegionMeta { calling_code: 63, iso: "PH", min_nsn: 8, max_nsn: 10 },
    RegionMeta { calling_code: 64, iso: "NZ", min_nsn: 3, max_nsn: 10 },
    RegionMeta { calling_code: 65, iso: "SG", min_nsn: 8, max_nsn: 8 },
    RegionMeta { calling_code: 66, iso: "TH", min_nsn: 8, max_nsn: 9 },
    RegionMeta { calling_code: 81, iso: "JP", min_nsn: 9, max_nsn: 10 },
    RegionMeta { calling_code: 82, iso: "KR", min_nsn: 8, max_nsn: 11 },
    RegionMeta { calling_code: 84, iso: "VN", min_nsn: 7, max_nsn: 10 },
    RegionMeta { calling_code: 86, iso: "CN", min_nsn: 7, max_nsn: 11 },
    RegionMeta { calling_code: 90, iso: "TR", min_nsn: 10, max_nsn: 10 },
    RegionMeta { calling_code: 91, iso: "IN", min_nsn: 10, max_nsn: 10 },
    RegionMeta { calling_code: 92, iso: "PK", min_nsn: 9, max_nsn: 10 },
    RegionMeta { calling_code: 98, iso: "IR", min_nsn: 6, max_nsn: 10 },
    RegionMeta { calling_code: 212, iso: "MA", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 213, iso: "DZ", min_nsn: 8, max_nsn: 9 },
    RegionMeta { calling_code: 216, iso: "TN", min_nsn: 8, max_nsn: 8 },
    RegionMeta { calling_code: 234, iso: "NG", min_nsn: 7, max_nsn: 10 },
    RegionMeta { calling_code: 254, iso: "KE", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 351, iso: "PT", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 352, iso: "LU", min_nsn: 6, max_nsn: 9 },
    RegionMeta { calling_code: 353, iso: "IE", min_nsn: 7, max_nsn: 9 },
    RegionMeta { calling_code: 358, iso: "FI", min_nsn: 5, max_nsn: 12 },
    RegionMeta { calling_code: 359, iso: "BG", min_nsn: 7, max_nsn: 9 },
    RegionMeta { calling_code: 370, iso: "LT", min_nsn: 8, max_nsn: 8 },
    RegionMeta { calling_code: 371, iso: "LV", min_nsn: 8, max_nsn: 8 },
    RegionMeta { calling_code: 372, iso: "EE", min_nsn: 7, max_nsn: 8 },
    RegionMeta { calling_code: 380, iso: "UA", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 385, iso: "HR", min_nsn: 8, max_nsn: 9 },
    RegionMeta { calling_code: 386, iso: "SI", min_nsn: 8, max_nsn: 8 },
    RegionMeta { calling_code: 420, iso: "CZ", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 421, iso: "SK", min_nsn: 9, max_nsn: 9 },
    RegionMeta { calling_code: 852, iso: "HK", min_nsn: 8, max_nsn: 8 },
    RegionMeta { calling_code: 886, iso: "TW", min_nsn: 8, max_nsn: 9 },
    RegionMeta { calling_code: 966, iso: "SA", min_nsn: 8, max_nsn: 9 },
    RegionMeta { calling_code: 971, iso: "AE", min_nsn: 8, max_nsn: 9 },
    RegionMeta { calling_code: 972, iso: "IL", min_nsn: 8, max_nsn: 9 },
    RegionMeta { calling_code: 974, iso: "QA", min_nsn: 8, max_nsn: 8 },
];

static BY_CODE: Lazy<HashMap<u16, &'static RegionMeta>> =
    Lazy::new(|| REGIONS.iter().map(|r| (r.calling_code, r)).collect());

static BY_ISO: Lazy<HashMap<&'static str, &'static RegionMeta>> =
    Lazy::new(|| REGIONS.iter().map(|r| (r.iso, r)).collect());

/// The crate's built-in [`PhoneGrammar`] implementation.
#[derive(Debug, Default)]
pub struct BuiltinGrammar;

impl BuiltinGrammar {
    /// Create a grammar instance. All instances share the static metadata.
    pub fn new() -> Self {
        Self
    }

    /// Strip separators and fold the `00` dialing prefix into `+`.
    fn normalize(text: &str) -> Result<String, GrammarError> {
        let stripped = SEPARATORS.replace_all(text.trim(), "");
        let mut normalized = stripped.into_owned();
        if let Some(rest) = normalized.strip_prefix("00") {
            normalized = format!("+{}", rest);
        }
        if normalized.is_empty() || !NORMALIZED.is_match(&normalized) {
            return Err(GrammarError::NotANumber);
        }
        Ok(normalized)
    }

    fn parse_international(digits: &str) -> Result<CanonicalNumber, GrammarError> {
        if digits.len() <= 2 {
            return Err(GrammarError::TooShortAfterIdd);
        }
        // Calling codes are 1-3 digits; take the longest known prefix.
        let meta = (1..=3.min(digits.len()))
            .rev()
            .filter_map(|len| digits[..len].parse::<u16>().ok())
            .find_map(|code| BY_CODE.get(&code))
            .ok_or(GrammarError::InvalidCountryCode)?;
        let national = &digits[meta.calling_code.to_string().len()..];
        Self::check_nsn(national)?;
        Ok(CanonicalNumber::new(meta.calling_code, national))
    }

    fn parse_national(digits: &str, region: &str) -> Result<CanonicalNumber, GrammarError> {
        let meta = BY_ISO
            .get(region.to_ascii_uppercase().as_str())
            .ok_or(GrammarError::InvalidCountryCode)?;
        // One leading zero is the usual national dialing prefix.
        let national = digits.strip_prefix('0').unwrap_or(digits);
        Self::check_nsn(national)?;
        Ok(CanonicalNumber::new(meta.calling_code, national))
    }

    fn check_nsn(national: &str) -> Result<(), GrammarError> {
        if national.len() < MIN_NSN_DIGITS {
            return Err(GrammarError::TooShortNsn);
        }
        if national.len() > MAX_NSN_DIGITS {
            return Err(GrammarError::TooLong);
        }
        Ok(())
    }

    /// Space the national number into readable groups of three, merging a
    /// trailing single digit into the last group.
    fn group_national(national: &str) -> String {
        let digits: Vec<char> = national.chars().collect();
        let mut groups: Vec<String> = digits.chunks(3).map(|c| c.iter().collect()).collect();
        if groups.len() > 1 && groups.last().map(String::len) == Some(1) {
            let last = groups.pop().unwrap_or_default();
            if let Some(prev) = groups.last_mut() {
                prev.push_str(&last);
            }
        }
        groups.join(" ")
    }
}

impl PhoneGrammar for BuiltinGrammar {
    fn parse(&self, text: &str, region_hint: Option<&str>) -> Result<CanonicalNumber, GrammarError> {
        let normalized = Self::normalize(text)?;
        match normalized.strip_prefix('+') {
            Some(digits) => Self::parse_international(digits),
            None => match region_hint {
                Some(region) => Self::parse_national(&normalized, region),
                None => Err(GrammarError::InvalidCountryCode),
            },
        }
    }

    fn is_valid(&self, number: &CanonicalNumber) -> bool {
        match BY_CODE.get(&number.calling_code()) {
            Some(meta) => {
                let len = number.national().len();
                len >= meta.min_nsn as usize && len <= meta.max_nsn as usize
            }
            None => false,
        }
    }

    fn format(&self, number: &CanonicalNumber, style: FormatStyle) -> String {
        match style {
            FormatStyle::E164 => format!("+{}{}", number.calling_code(), number.national()),
            FormatStyle::International => format!(
                "+{} {}",
                number.calling_code(),
                Self::group_national(number.national())
            ),
        }
    }

    fn region_for_calling_code(&self, calling_code: u16) -> String {
        BY_CODE
            .get(&calling_code)
            .map(|meta| meta.iso.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> BuiltinGrammar {
        BuiltinGrammar::new()
    }

    #[test]
    fn test_parse_international() {
        let number = grammar().parse("+36301234567", None).unwrap();
        assert_eq!(number.calling_code(), 36);
        assert_eq!(number.national(), "301234567");
    }

    #[test]
    fn test_parse_tolerates_formatting() {
        let spaced = grammar().parse("+36 30 123-4567", None).unwrap();
        let compact = grammar().parse("+36301234567", None).unwrap();
        assert_eq!(spaced, compact);
    }

    #[test]
    fn test_parse_idd_prefix() {
        let number = grammar().parse("0036301234567", None).unwrap();
        assert_eq!(number.calling_code(), 36);
        assert_eq!(number.national(), "301234567");
    }

    #[test]
    fn test_parse_three_digit_calling_code() {
        let number = grammar().parse("+351912345678", None).unwrap();
        assert_eq!(number.calling_code(), 351);
        assert_eq!(number.national(), "912345678");
    }

    #[test]
    fn test_parse_unknown_calling_code() {
        let err = grammar().parse("+999123456789", None).unwrap_err();
        assert_eq!(err, GrammarError::InvalidCountryCode);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            grammar().parse("call me maybe", None).unwrap_err(),
            GrammarError::NotANumber
        );
        assert_eq!(
            grammar().parse("+36abc", None).unwrap_err(),
            GrammarError::NotANumber
        );
    }

    #[test]
    fn test_parse_too_short_after_idd() {
        assert_eq!(
            grammar().parse("+1", None).unwrap_err(),
            GrammarError::TooShortAfterIdd
        );
    }

    #[test]
    fn test_parse_nsn_length_bounds() {
        assert_eq!(
            grammar().parse("+361", None).unwrap_err(),
            GrammarError::TooShortNsn
        );
        assert_eq!(
            grammar().parse("+3612345678901234567", None).unwrap_err(),
            GrammarError::TooLong
        );
    }

    #[test]
    fn test_parse_national_with_hint() {
        let number = grammar().parse("(415) 555-1234", Some("US")).unwrap();
        assert_eq!(number.calling_code(), 1);
        assert_eq!(number.national(), "4155551234");

        // Hint is case-insensitive and the trunk zero is dropped
        let number = grammar().parse("030 1234567", Some("hu")).unwrap();
        assert_eq!(number.calling_code(), 36);
        assert_eq!(number.national(), "301234567");
    }

    #[test]
    fn test_parse_national_unknown_region() {
        assert_eq!(
            grammar().parse("301234567", Some("XX")).unwrap_err(),
            GrammarError::InvalidCountryCode
        );
    }

    #[test]
    fn test_parse_national_without_hint_fails() {
        assert_eq!(
            grammar().parse("301234567", None).unwrap_err(),
            GrammarError::InvalidCountryCode
        );
    }

    #[test]
    fn test_validity_by_region_length() {
        let g = grammar();
        assert!(g.is_valid(&g.parse("+36301234567", None).unwrap()));
        // 5-digit national number is too short for Hungary
        assert!(!g.is_valid(&CanonicalNumber::new(36, "12345")));
    }

    #[test]
    fn test_format_styles() {
        let g = grammar();
        let number = g.parse("+36301234567", None).unwrap();
        assert_eq!(g.format(&number, FormatStyle::E164), "+36301234567");
        assert_eq!(g.format(&number, FormatStyle::International), "+36 301 234 567");
    }

    #[test]
    fn test_region_for_calling_code() {
        let g = grammar();
        assert_eq!(g.region_for_calling_code(36), "HU");
        assert_eq!(g.region_for_calling_code(44), "GB");
        assert_eq!(g.region_for_calling_code(999), "");
    }
}
