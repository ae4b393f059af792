//! Presence validator

use crate::foundation::{NativeAttributes, ValidationError};
use crate::validators::is_blank;
use crate::value::Value;

/// Whether a value counts as empty for [`Required`].
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null | Value::InvalidDate => true,
        Value::Number(n) => n.is_nan(),
        Value::Text(s) => is_blank(s),
        Value::Files(files) => files.is_empty(),
        Value::Bool(_) | Value::Date(_) => false,
    }
}

crate::validator! {
    /// Validates that a field holds something.
    ///
    /// Nil, NaN, blank text, an empty file list and an unparseable date are
    /// all empty. `0` and `false` are values and pass.
    ///
    /// Declares the `required` native attribute.
    ///
    /// # Examples
    ///
    /// ```
    /// use formtree_validator::validators::required;
    /// use formtree_validator::foundation::Validate;
    /// use formtree_validator::value::Value;
    ///
    /// let validator = required();
    /// assert!(validator.validate(&Value::from(0)).is_ok());
    /// assert!(validator.validate(&Value::from(false)).is_ok());
    /// assert!(validator.validate(&Value::from("   ")).is_err());
    /// assert!(validator.validate(&Value::Null).is_err());
    /// ```
    pub Required { attributes: NativeAttributes } for Value;
    rule(self, input) { !is_empty_value(input) }
    error(self, input) { ValidationError::required() }
    attributes(self) { Some(&self.attributes) }
    new() {
        Self {
            attributes: NativeAttributes::new().with_required(true),
        }
    }
    fn required();
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Validate, kinds};
    use crate::value::BlobRef;

    #[test]
    fn test_empty_values_fail() {
        let validator = required();
        for value in [
            Value::Undefined,
            Value::Null,
            Value::Number(f64::NAN),
            Value::from(""),
            Value::from(" \t\n"),
            Value::Files(Vec::new()),
            Value::InvalidDate,
        ] {
            let errors = validator.validate(&value).unwrap_err();
            assert!(errors.contains(kinds::REQUIRED), "{value:?} should be empty");
        }
    }

    #[test]
    fn test_present_values_pass() {
        let validator = required();
        assert!(validator.validate(&Value::from(0)).is_ok());
        assert!(validator.validate(&Value::from(false)).is_ok());
        assert!(validator.validate(&Value::from("x")).is_ok());
        assert!(validator.validate(&Value::from(f64::INFINITY)).is_ok());
        assert!(
            validator
                .validate(&Value::Files(vec![BlobRef::new("a.txt", 3)]))
                .is_ok()
        );
    }

    #[test]
    fn test_declares_required_attribute() {
        let attrs = required().attributes().cloned().unwrap();
        assert_eq!(attrs, NativeAttributes::new().with_required(true));
    }
}
