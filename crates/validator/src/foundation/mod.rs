//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the validation system:
//!
//! - **Traits**: [`Validate`], [`ValidateExt`], [`AsyncValidate`]
//! - **Errors**: [`ValidationError`], [`FieldErrors`]
//! - **Presentation**: [`NativeAttributes`]
//!
//! # Architecture
//!
//! A validator reads one input and returns a partial error record. Records
//! from several validators merge last-write-wins per kind, so a node's
//! errors are simply the fold of its validators' outcomes:
//!
//! ```rust
//! use formtree_validator::foundation::{from_fn, run_all, ValidateExt, ValidationError};
//! use formtree_validator::value::Value;
//!
//! let validators = [
//!     from_fn(|_: &Value| Err(ValidationError::new("taken", "first").into())).shared(),
//!     from_fn(|_: &Value| Err(ValidationError::new("taken", "second").into())).shared(),
//! ];
//!
//! let errors = run_all(&validators, &Value::from("bob")).unwrap();
//! assert_eq!(errors.get("taken").unwrap().message, "second");
//! ```
//!
//! Validators that also carry [`NativeAttributes`] feed the presentation
//! layer through [`attributes_of`]; validity never depends on them.

pub mod async_validate;
pub mod attributes;
pub mod error;
pub mod traits;

pub use async_validate::{AsyncFnValidator, AsyncValidate, from_async_fn};
pub use attributes::NativeAttributes;
pub use error::{FieldErrors, ValidationError, kinds};
pub use traits::{
    Attributed, FnValidator, SharedValidator, Validate, ValidateExt, attributes_of, from_fn,
    run_all,
};

/// A validation result carrying a field's error record.
pub type ValidationResult = Result<(), FieldErrors>;
