//! Numeric range validator

use crate::foundation::{FieldErrors, NativeAttributes, Validate, ValidationError};
use crate::value::Value;

/// Validates that a number lies within an inclusive range.
///
/// The value is coerced with [`Value::coerce_number`], so numeric text
/// is checked too. Nil values, values without a numeric reading and
/// non-finite numbers are skipped. Either bound may be open. Dates are
/// compared as milliseconds since the Unix epoch. Each violated bound
/// reports its own kind.
///
/// Declares the `min`/`max` native attributes.
///
/// # Examples
///
/// ```
/// use formtree_validator::validators::number_range;
/// use formtree_validator::foundation::{kinds, Validate};
/// use formtree_validator::value::Value;
///
/// let validator = number_range(Some(1.0), Some(10.0));
/// assert!(validator.validate(&Value::from(5)).is_ok());
/// assert!(validator.validate(&Value::from(" 12 ")).unwrap_err().contains(kinds::MAX));
/// assert!(validator.validate(&Value::Null).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NumberRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    attributes: NativeAttributes,
}

impl NumberRange {
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            attributes: NativeAttributes::new().with_range(min, max),
        }
    }
}

impl Validate for NumberRange {
    type Input = Value;

    fn validate(&self, input: &Value) -> Result<(), FieldErrors> {
        if input.is_nil() {
            return Ok(());
        }
        let Some(number) = input.coerce_number().filter(|n| n.is_finite()) else {
            return Ok(());
        };

        let mut errors = FieldErrors::new();
        if let Some(min) = self.min.filter(|&min| number < min) {
            errors.insert(ValidationError::min(min, number));
        }
        if let Some(max) = self.max.filter(|&max| number > max) {
            errors.insert(ValidationError::max(max, number));
        }

        errors.into_option().map_or(Ok(()), Err)
    }

    fn attributes(&self) -> Option<&NativeAttributes> {
        Some(&self.attributes)
    }
}

/// Creates a [`NumberRange`] validator.
#[must_use]
pub fn number_range(min: Option<f64>, max: Option<f64>) -> NumberRange {
    NumberRange::new(min, max)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::kinds;

    #[test]
    fn test_bounds_inclusive() {
        let validator = number_range(Some(5.0), Some(10.0));
        assert!(validator.validate(&Value::from(5)).is_ok());
        assert!(validator.validate(&Value::from(10)).is_ok());
        assert!(validator.validate(&Value::from(4.9)).unwrap_err().contains(kinds::MIN));
        assert!(validator.validate(&Value::from(10.1)).unwrap_err().contains(kinds::MAX));
    }

    #[test]
    fn test_open_bounds() {
        let at_least = number_range(Some(0.0), None);
        assert!(at_least.validate(&Value::from(1e12)).is_ok());
        assert!(at_least.validate(&Value::from(-1)).is_err());

        let at_most = number_range(None, Some(0.0));
        assert!(at_most.validate(&Value::from(-1e12)).is_ok());
        assert!(at_most.validate(&Value::from(1)).is_err());
    }

    #[test]
    fn test_coerces_text_and_flags() {
        let validator = number_range(Some(1.0), Some(3.0));
        assert!(validator.validate(&Value::from(" 2 ")).is_ok());
        // empty text reads as zero
        assert!(validator.validate(&Value::from("")).unwrap_err().contains(kinds::MIN));
        assert!(validator.validate(&Value::from(true)).is_ok());
        assert!(validator.validate(&Value::from(false)).is_err());
    }

    #[test]
    fn test_skips_non_numeric() {
        let validator = number_range(Some(1.0), Some(3.0));
        assert!(validator.validate(&Value::Undefined).is_ok());
        assert!(validator.validate(&Value::Null).is_ok());
        assert!(validator.validate(&Value::from("abc")).is_ok());
        assert!(validator.validate(&Value::Number(f64::NAN)).is_ok());
        assert!(validator.validate(&Value::Number(f64::INFINITY)).is_ok());
    }

    #[test]
    fn test_inverted_bounds_report_both_kinds() {
        let errors = number_range(Some(10.0), Some(5.0)).validate(&Value::from(7)).unwrap_err();
        assert_eq!(errors.kinds().collect::<Vec<_>>(), vec![kinds::MIN, kinds::MAX]);
    }

    #[test]
    fn test_dates_compare_as_epoch_millis() {
        let day = 86_400_000.0;
        let validator = number_range(Some(0.0), Some(day));
        assert!(validator.validate(&Value::parse_date("1970-01-02")).is_ok());
        assert!(validator.validate(&Value::parse_date("1970-01-03")).unwrap_err().contains(kinds::MAX));
        assert!(validator.validate(&Value::InvalidDate).is_ok());
    }

    #[test]
    fn test_reports_bounds_as_params() {
        let errors = number_range(Some(18.0), None).validate(&Value::from(16)).unwrap_err();
        let error = errors.get(kinds::MIN).unwrap();
        assert_eq!(error.param("min"), Some("18"));
        assert_eq!(error.param("actual"), Some("16"));
    }

    #[test]
    fn test_declares_range_attributes() {
        let attrs = number_range(Some(1.0), None).attributes().cloned().unwrap();
        assert_eq!(attrs.min, Some(1.0));
        assert_eq!(attrs.max, None);
        assert_eq!(attrs.required, None);
    }
}
