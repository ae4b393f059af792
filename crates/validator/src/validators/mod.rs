//! Built-in validators
//!
//! Every built-in validates a [`Value`](crate::value::Value) and skips
//! values it does not apply to: only [`required`] ever rejects an empty
//! field, so the others compose freely with it.
//!
//! # Categories
//!
//! - **Attributed** (declare native constraint hints): [`required`],
//!   [`number_range`], [`length_range`], [`pattern`]
//! - **Plain**: [`email`], [`phone`], [`credit_card`]
//!
//! # Examples
//!
//! ```rust
//! use formtree_validator::prelude::*;
//!
//! let amount = number_range(Some(1.0), Some(100.0));
//! assert!(amount.validate(&Value::from("50")).is_ok());
//! assert!(amount.validate(&Value::from(0)).unwrap_err().contains(kinds::MIN));
//!
//! // nothing but `required` rejects an empty field
//! assert!(email().validate(&Value::from("")).is_ok());
//! ```

pub mod content;
pub mod credit_card;
pub mod length;
pub mod pattern;
pub mod phone;
pub mod range;
pub mod required;

pub use content::{Email, email};
pub use credit_card::{CreditCard, credit_card, is_luhn_valid};
pub use length::{LengthRange, length_range};
pub use pattern::{Pattern, pattern};
pub use phone::{Phone, phone};
pub use range::{NumberRange, number_range};
pub use required::{Required, required};

/// Whether text holds nothing but whitespace.
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
