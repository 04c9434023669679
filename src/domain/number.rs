//! Parsed phone number payload.

use crate::grammar::{self, CanonicalNumber, FormatStyle};

/// Country derived from the calling code of a parsed number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Country {
    iso_code: String,
    calling_code: u16,
}

impl Country {
    /// 2-character ISO country code, or an empty string if not known.
    pub fn iso_code(&self) -> &str {
        &self.iso_code
    }

    /// The calling code in the phone number.
    pub fn calling_code(&self) -> u16 {
        self.calling_code
    }
}

/// The fully parsed representation of a phone number.
///
/// Constructed once at parse time and immutable afterwards; equality and hash
/// are defined over the canonical number, so two differently-spelled inputs
/// that parse to the same number compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructuredNumber {
    number: CanonicalNumber,
    country: Country,
}

impl StructuredNumber {
    pub(crate) fn from_canonical(number: CanonicalNumber) -> Self {
        let calling_code = number.calling_code();
        let country = Country {
            iso_code: grammar::shared().region_for_calling_code(calling_code),
            calling_code,
        };
        Self { number, country }
    }

    /// Country based on the calling code in the phone number, as far as we know.
    pub fn country(&self) -> &Country {
        &self.country
    }

    /// The country calling code, e.g. 36 for Hungary.
    pub fn calling_code(&self) -> u16 {
        self.number.calling_code()
    }

    /// Whether the number is valid in its country, as far as we know.
    pub fn is_valid(&self) -> bool {
        grammar::shared().is_valid(&self.number)
    }

    /// E.164 encoded string, e.g. `+36301234567`.
    pub fn to_e164(&self) -> String {
        grammar::shared().format(&self.number, FormatStyle::E164)
    }

    /// Human-readable international string.
    pub fn to_readable(&self) -> String {
        grammar::shared().format(&self.number, FormatStyle::International)
    }
}
