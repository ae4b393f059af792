//! Credit card number validator

use crate::foundation::ValidationError;
use crate::validators::is_blank;
use crate::value::Value;

/// Fewest digits a card number can have.
const MIN_DIGITS: usize = 7;

/// Luhn checksum over the digits of `number`.
///
/// Every non-digit character is ignored, so spaced or dashed numbers are
/// accepted. Fewer than seven digits never pass.
///
/// # Examples
///
/// ```
/// use formtree_validator::validators::is_luhn_valid;
///
/// assert!(is_luhn_valid("4111 1111 1111 1111"));
/// assert!(!is_luhn_valid("4111 1111 1111 1112"));
/// assert!(!is_luhn_valid("0"));
/// ```
#[must_use]
pub fn is_luhn_valid(number: &str) -> bool {
    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() < MIN_DIGITS {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

crate::validator! {
    /// Validates credit card numbers with the Luhn checksum.
    ///
    /// Only non-blank text is checked.
    pub CreditCard for Value;
    rule(input) { input.as_str().is_none_or(|s| is_blank(s) || is_luhn_valid(s)) }
    error(input) { ValidationError::credit_card() }
    fn credit_card();
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{Validate, kinds};

    #[test]
    fn test_known_numbers() {
        assert!(is_luhn_valid("4111111111111111"));
        assert!(is_luhn_valid("5500 0000 0000 0004"));
        assert!(is_luhn_valid("3400-0000-0000-009"));
        assert!(is_luhn_valid("79927398713"));
        assert!(!is_luhn_valid("79927398710"));
    }

    #[test]
    fn test_too_few_digits() {
        // 6 digits, checksum would pass
        assert!(!is_luhn_valid("000000"));
        assert!(is_luhn_valid("0000000"));
        assert!(!is_luhn_valid("abc"));
    }

    #[test]
    fn test_validator() {
        let validator = credit_card();
        assert!(validator.validate(&Value::from("4111111111111111")).is_ok());
        let errors = validator.validate(&Value::from("4111111111111112")).unwrap_err();
        assert!(errors.contains(kinds::CREDIT_CARD));
        assert!(validator.validate(&Value::from(" ")).is_ok());
        assert!(validator.validate(&Value::from(4_111_111_111_111_111_i64)).is_ok());
    }
}
