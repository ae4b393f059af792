//! Prelude module for convenient imports.
//!
//! Provides a single `use formtree_validator::prelude::*;` import that
//! brings in the value type, the validator traits, error records and every
//! built-in validator.
//!
//! # Examples
//!
//! ```rust
//! use formtree_validator::prelude::*;
//!
//! let username = [required().shared(), length_range(Some(3), Some(20)).shared()];
//! assert!(run_all(&username, &Value::from("bob")).is_none());
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, attributes
// ============================================================================

pub use crate::foundation::{
    AsyncValidate, Attributed, FieldErrors, NativeAttributes, SharedValidator, Validate,
    ValidateExt, ValidationError, ValidationResult, attributes_of, from_async_fn, from_fn, kinds,
    run_all,
};

// ============================================================================
// VALIDATORS: All built-in validators
// ============================================================================

pub use crate::validators::{
    CreditCard, Email, LengthRange, NumberRange, Pattern, Phone, Required, credit_card, email,
    is_luhn_valid, length_range, number_range, pattern, phone, required,
};

// ============================================================================
// VALUES
// ============================================================================

pub use crate::value::{BlobRef, DATE_FORMAT, Value};
