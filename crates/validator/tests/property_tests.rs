//! Property-based tests for formtree-validator.

use formtree_validator::prelude::*;
use proptest::prelude::*;

/// Straightforward Luhn: double every second digit from the right and sum
/// the decimal digits of each product.
fn reference_luhn(digits: &[u32]) -> bool {
    let mut sum = 0;
    for (i, &d) in digits.iter().rev().enumerate() {
        let mut v = if i % 2 == 1 { d * 2 } else { d };
        while v > 0 {
            sum += v % 10;
            v /= 10;
        }
    }
    sum % 10 == 0
}

// ============================================================================
// IDEMPOTENCY: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn email_idempotent(s in ".*") {
        let v = email();
        let value = Value::from(s);
        prop_assert_eq!(v.validate(&value), v.validate(&value));
    }

    #[test]
    fn number_range_idempotent(n in any::<f64>()) {
        let v = number_range(Some(-10.0), Some(10.0));
        let value = Value::from(n);
        prop_assert_eq!(v.validate(&value), v.validate(&value));
    }
}

// ============================================================================
// SKIP RULES: only `required` rejects blank values
// ============================================================================

proptest! {
    #[test]
    fn blank_text_passes_everything_but_required(s in "[ \t\n]*") {
        let value = Value::from(s);
        prop_assert!(email().validate(&value).is_ok());
        prop_assert!(phone().validate(&value).is_ok());
        prop_assert!(credit_card().validate(&value).is_ok());
        prop_assert!(pattern("^never$").unwrap().validate(&value).is_ok());
        prop_assert!(required().validate(&value).is_err());
    }

    #[test]
    fn length_range_agrees_with_char_count(s in "\\PC{0,12}") {
        let count = s.chars().count();
        let result = length_range(Some(3), Some(8)).validate(&Value::from(s));
        prop_assert_eq!(result.is_ok(), (3..=8).contains(&count));
    }
}

// ============================================================================
// LUHN: agrees with a reference computation
// ============================================================================

proptest! {
    #[test]
    fn luhn_matches_reference(digits in prop::collection::vec(0u32..10, 0..20)) {
        let number: String = digits.iter().map(ToString::to_string).collect();
        let expected = digits.len() >= 7 && reference_luhn(&digits);
        prop_assert_eq!(is_luhn_valid(&number), expected);
    }

    #[test]
    fn luhn_ignores_separators(digits in prop::collection::vec(0u32..10, 7..20)) {
        let plain: String = digits.iter().map(ToString::to_string).collect();
        let spaced: String = digits
            .chunks(4)
            .map(|chunk| chunk.iter().map(ToString::to_string).collect::<String>())
            .collect::<Vec<_>>()
            .join(" - ");
        prop_assert_eq!(is_luhn_valid(&plain), is_luhn_valid(&spaced));
    }
}
