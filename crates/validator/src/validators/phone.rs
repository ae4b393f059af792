//! Phone number validator

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::ValidationError;
use crate::validators::is_blank;
use crate::value::Value;

static PHONE_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\+?\d+$").ok());

/// Whether `text` is an optional `+` followed by digits only.
#[must_use]
pub fn is_phone(text: &str) -> bool {
    PHONE_REGEX.as_ref().is_some_and(|re| re.is_match(text))
}

crate::validator! {
    /// Validates that text is a bare phone number.
    ///
    /// Separators are not accepted; only non-blank text is checked.
    pub Phone for Value;
    rule(input) { input.as_str().is_none_or(|s| is_blank(s) || is_phone(s)) }
    error(input) { ValidationError::phone() }
    fn phone();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;

    #[test]
    fn test_phone_numbers() {
        let validator = phone();
        assert!(validator.validate(&Value::from("+15551234567")).is_ok());
        assert!(validator.validate(&Value::from("5551234")).is_ok());
        assert!(validator.validate(&Value::from("555-1234")).is_err());
        assert!(validator.validate(&Value::from("++1")).is_err());
        assert!(validator.validate(&Value::from("+")).is_err());
    }

    #[test]
    fn test_skips_blank_and_non_text() {
        let validator = phone();
        assert!(validator.validate(&Value::from("")).is_ok());
        assert!(validator.validate(&Value::from(5_551_234)).is_ok());
    }
}
