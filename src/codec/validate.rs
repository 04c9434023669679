//! Post-decode / pre-encode validation.

use crate::domain::PhoneNumber;
use crate::error::ValidationError;

/// Invariant checks the pipeline runs after decoding and before encoding.
///
/// Implement this on record types; the failure message should name the
/// violated invariant ("name is required"), since that text is what reaches
/// API consumers and logs.
pub trait Validate {
    /// Check the value's invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the first violated invariant.
    fn validate(&self) -> Result<(), ValidationError>;
}

// Ordered collections validate element-wise; there are no null slots to
// reject after decode, so the element check is the whole contract.
impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        for item in self {
            item.validate()?;
        }
        Ok(())
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }
}

// A phone number is structurally sound in both of its states; whether
// retained-but-unparseable raw text is acceptable is a record-level call
// (see `PhoneNumber::has_absent_raw`).
impl Validate for PhoneNumber {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Fail with the given invariant when the condition does not hold.
pub fn require(condition: bool, invariant: &str) -> Result<(), ValidationError> {
    if condition {
        Ok(())
    } else {
        Err(ValidationError::new(invariant))
    }
}

/// Require a non-blank string field, reporting `"{what} is required"`.
pub fn require_non_blank(text: &str, what: &str) -> Result<(), ValidationError> {
    require(!text.trim().is_empty(), &format!("{} is required", what))
}
