//! # formtree-validator
//!
//! Field values, structured error records and the validators that produce
//! them for the `formtree` form state tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use formtree_validator::prelude::*;
//!
//! let validators = [required().shared(), length_range(Some(2), Some(20)).shared()];
//!
//! let errors = run_all(&validators, &Value::from("  "));
//! assert!(errors.is_some_and(|e| e.contains(kinds::REQUIRED)));
//!
//! let attrs = attributes_of(&validators);
//! assert_eq!(attrs.required, Some(true));
//! assert_eq!(attrs.max_length, Some(20));
//! ```
//!
//! ## Creating Validators
//!
//! Use the [`validator!`] macro for zero-boilerplate validators, wrap a
//! closure with [`from_fn`](foundation::from_fn), or implement
//! [`Validate`](foundation::Validate) manually for complex cases.
//!
//! ## Built-in Validators
//!
//! - **Attributed** (carry native presentation hints):
//!   [`Required`](validators::Required), [`NumberRange`](validators::NumberRange),
//!   [`LengthRange`](validators::LengthRange), [`Pattern`](validators::Pattern)
//! - **Plain**: [`Email`](validators::Email), [`Phone`](validators::Phone),
//!   [`CreditCard`](validators::CreditCard)

pub mod foundation;
mod macros;
pub mod prelude;
pub mod validators;
pub mod value;
