//! Phonewire - optional international phone-number values with a strict JSON codec pipeline.
//!
//! This library provides a phone number type that behaves like an `Option`
//! (never null, possibly absent, always remembering its raw text) together
//! with the codec machinery to move it through JSON APIs: absent values
//! travel as `null`, present values travel as their original raw string, and
//! decoding is strict unless the embedder opts into leniency.
//!
//! # Architecture
//!
//! - **domain**: the optional phone number value, its parsed payload, parse
//!   modes, and parse policies
//! - **grammar**: the opaque phone-number grammar capability and the built-in
//!   table-driven implementation
//! - **codec**: the JSON pipeline: default-value registry, per-record field
//!   tables, decode-time normalization, the scalar wire codec, validation
//! - **error**: wire, configuration, and validation error types
//!
//! # Example
//!
//! ```
//! use phonewire::{FieldTable, JsonPipeline, PhoneNumber, Validate, ValidationError};
//! use phonewire::codec::require_non_blank;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct ContactCard {
//!     name: String,
//!     phone_number: PhoneNumber,
//! }
//!
//! impl Validate for ContactCard {
//!     fn validate(&self) -> Result<(), ValidationError> {
//!         require_non_blank(&self.name, "name")
//!     }
//! }
//!
//! let pipeline = JsonPipeline::builder()
//!     .register_default(PhoneNumber::absent)
//!     .register_record(
//!         FieldTable::for_record::<ContactCard>().optional_value::<PhoneNumber>("phone_number"),
//!     )
//!     .build()
//!     .unwrap();
//!
//! // The phone_number field is missing from the wire, yet decodes as absent
//! let card: ContactCard = pipeline.decode(r#"{"name":"Ada"}"#).unwrap();
//! assert!(card.phone_number.is_absent());
//! ```

// Re-export commonly used types
pub mod codec;
pub mod domain;
pub mod error;
pub mod grammar;

pub use codec::{
    DefaultValueRegistry, FieldTable, JsonPipeline, JsonPipelineBuilder, Validate, WireScalar,
};
pub use domain::{
    Country, LenientParser, NumberParser, ParseErrorKind, PhoneNumber, PhoneNumberError,
    StrictParser, StructuredNumber,
};
pub use error::{ConfigError, ConfigResult, ValidationError, WireError, WireResult};
pub use grammar::{BuiltinGrammar, CanonicalNumber, FormatStyle, GrammarError, PhoneGrammar};
