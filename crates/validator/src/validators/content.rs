//! Email address validator

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::ValidationError;
use crate::validators::is_blank;
use crate::value::Value;

static EMAIL_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z.\-_\d]+@[a-zA-Z\d\-]+(\.[a-zA-Z\d]+)+$").ok());

/// Whether `text` looks like an email address.
#[must_use]
pub fn is_email(text: &str) -> bool {
    EMAIL_REGEX.as_ref().is_some_and(|re| re.is_match(text))
}

crate::validator! {
    /// Validates email format.
    ///
    /// Only non-blank text is checked. The accepted shape is deliberately
    /// narrow: a local part of letters, digits, `.`, `-` and `_`, then a
    /// domain with at least one dot.
    pub Email for Value;
    rule(input) { input.as_str().is_none_or(|s| is_blank(s) || is_email(s)) }
    error(input) { ValidationError::email() }
    fn email();
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;

    #[test]
    fn test_valid_addresses() {
        let validator = email();
        for address in ["user@example.com", "first.last@sub.example.org", "a_b-c@x1.io"] {
            assert!(validator.validate(&Value::from(address)).is_ok(), "{address}");
        }
    }

    #[test]
    fn test_invalid_addresses() {
        let validator = email();
        for address in ["user", "user@", "user@example", "us er@example.com", "user+tag@example.com"] {
            assert!(validator.validate(&Value::from(address)).is_err(), "{address}");
        }
    }

    #[test]
    fn test_skips_blank_and_non_text() {
        let validator = email();
        assert!(validator.validate(&Value::from("  ")).is_ok());
        assert!(validator.validate(&Value::Null).is_ok());
        assert!(validator.validate(&Value::from(42)).is_ok());
    }
}
