//! Configuration for validation passes and field construction.

use formtree_validator::foundation::{FieldErrors, SharedValidator};
use formtree_validator::value::Value;
use serde::{Deserialize, Serialize};

/// A validator over a single field's value.
pub type FieldValidator = SharedValidator<Value>;

/// Options for a [`validate_with`](crate::node::Node::validate_with) pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    /// Skip group and list validators while any child is invalid.
    ///
    /// Group-level rules usually relate several children, so they only
    /// mean something once every child is individually consistent.
    pub skip_if_children_invalid: bool,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            skip_if_children_invalid: true,
        }
    }
}

impl ValidateOptions {
    /// Run group validators even when a child is invalid.
    #[must_use]
    pub fn eager() -> Self {
        Self {
            skip_if_children_invalid: false,
        }
    }
}

/// Persisted state to restore a [`Field`](crate::node::Field) with.
///
/// A fresh field needs validation; a restored one is trusted as-is unless
/// [`with_needs_validation`](Self::with_needs_validation) says otherwise.
#[derive(Clone, Default)]
pub struct FieldConfig {
    pub(crate) validators: Vec<FieldValidator>,
    pub(crate) needs_validation: bool,
    pub(crate) errors: Option<FieldErrors>,
    pub(crate) dirty: bool,
    pub(crate) touched: bool,
}

impl FieldConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validator (builder-style).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_validator(mut self, validator: FieldValidator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Add several validators (builder-style).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_validators(mut self, validators: impl IntoIterator<Item = FieldValidator>) -> Self {
        self.validators.extend(validators);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_needs_validation(mut self, needs_validation: bool) -> Self {
        self.needs_validation = needs_validation;
        self
    }

    /// Restore previously computed errors. An empty record counts as none.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors.into_option();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_touched(mut self, touched: bool) -> Self {
        self.touched = touched;
        self
    }
}

impl std::fmt::Debug for FieldConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldConfig")
            .field("validators", &self.validators.len())
            .field("needs_validation", &self.needs_validation)
            .field("errors", &self.errors)
            .field("dirty", &self.dirty)
            .field("touched", &self.touched)
            .finish()
    }
}
