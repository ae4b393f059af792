//! Text length validator
//!
//! Length is measured in Unicode scalar values (chars), the unit a text
//! input's `minlength`/`maxlength` constraints count in.

use crate::foundation::{FieldErrors, NativeAttributes, Validate, ValidationError};
use crate::value::Value;

/// Validates the length of text values.
///
/// Only [`Value::Text`] is checked; every other variant passes. Each bound
/// that is violated contributes its own kind, so an inverted range can
/// report both `minLength` and `maxLength`.
///
/// Declares the `minLength`/`maxLength` native attributes.
///
/// # Examples
///
/// ```
/// use formtree_validator::validators::length_range;
/// use formtree_validator::foundation::{kinds, Validate};
/// use formtree_validator::value::Value;
///
/// let validator = length_range(Some(2), Some(4));
/// assert!(validator.validate(&Value::from("añb")).is_ok());
/// assert!(validator.validate(&Value::from("a")).unwrap_err().contains(kinds::MIN_LENGTH));
/// assert!(validator.validate(&Value::from(123456)).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LengthRange {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    attributes: NativeAttributes,
}

impl LengthRange {
    #[must_use]
    pub fn new(min_length: Option<usize>, max_length: Option<usize>) -> Self {
        Self {
            min_length,
            max_length,
            attributes: NativeAttributes::new().with_length(min_length, max_length),
        }
    }
}

impl Validate for LengthRange {
    type Input = Value;

    fn validate(&self, input: &Value) -> Result<(), FieldErrors> {
        let Some(text) = input.as_str() else {
            return Ok(());
        };
        let length = text.chars().count();
        let mut errors = FieldErrors::new();

        if let Some(min) = self.min_length.filter(|&min| length < min) {
            errors.insert(ValidationError::min_length(min, length));
        }
        if let Some(max) = self.max_length.filter(|&max| length > max) {
            errors.insert(ValidationError::max_length(max, length));
        }

        errors.into_option().map_or(Ok(()), Err)
    }

    fn attributes(&self) -> Option<&NativeAttributes> {
        Some(&self.attributes)
    }
}

/// Creates a [`LengthRange`] validator.
#[must_use]
pub fn length_range(min_length: Option<usize>, max_length: Option<usize>) -> LengthRange {
    LengthRange::new(min_length, max_length)
}

// ============================================================================
// TESTS
// ============================================================================
