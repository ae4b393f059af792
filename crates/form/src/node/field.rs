//! Leaf nodes: a single value and its validators.

use std::fmt;
use std::sync::Arc;

use formtree_validator::foundation::{FieldErrors, NativeAttributes, attributes_of, run_all};
use formtree_validator::value::Value;

use crate::options::{FieldConfig, FieldValidator};
use crate::pending::{AsyncOutcome, AsyncTicket, Settled};

/// A single-value form field.
///
/// Cloning is cheap and shares state; every operation returns a new
/// `Field` and leaves `self` untouched.
#[derive(Clone)]
pub struct Field {
    state: Arc<FieldState>,
}

#[derive(Clone)]
struct FieldState {
    value: Value,
    validators: Arc<[FieldValidator]>,
    sync_errors: Option<FieldErrors>,
    remote_errors: Option<FieldErrors>,
    /// `sync_errors` with `remote_errors` merged over them.
    errors: Option<FieldErrors>,
    dirty: bool,
    touched: bool,
    needs_validation: bool,
    revision: u64,
    pending: bool,
}

fn combine(sync: Option<&FieldErrors>, remote: Option<&FieldErrors>) -> Option<FieldErrors> {
    match (sync, remote) {
        (None, None) => None,
        (Some(errors), None) | (None, Some(errors)) => Some(errors.clone()),
        (Some(sync), Some(remote)) => {
            let mut merged = sync.clone();
            merged.merge(remote.clone());
            Some(merged)
        }
    }
}

impl Field {
    /// A fresh field: needs validation, neither dirty nor touched.
    pub fn new(value: impl Into<Value>, validators: impl IntoIterator<Item = FieldValidator>) -> Self {
        Self::from_state(FieldState {
            value: value.into(),
            validators: validators.into_iter().collect(),
            sync_errors: None,
            remote_errors: None,
            errors: None,
            dirty: false,
            touched: false,
            needs_validation: true,
            revision: 0,
            pending: false,
        })
    }

    /// A field restored from persisted state.
    pub fn with_config(value: impl Into<Value>, config: FieldConfig) -> Self {
        Self::from_state(FieldState {
            value: value.into(),
            validators: config.validators.into(),
            errors: config.errors.clone(),
            sync_errors: config.errors,
            remote_errors: None,
            dirty: config.dirty,
            touched: config.touched,
            needs_validation: config.needs_validation,
            revision: 0,
            pending: false,
        })
    }

    fn from_state(state: FieldState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    fn rebuild(&self, f: impl FnOnce(&mut FieldState)) -> Self {
        let mut state = FieldState::clone(&self.state);
        f(&mut state);
        Self::from_state(state)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.state.value
    }

    #[must_use]
    pub fn validators(&self) -> &[FieldValidator] {
        &self.state.validators
    }

    /// The current errors: the last sync run with any remote errors merged
    /// over it.
    #[must_use]
    pub fn errors(&self) -> Option<&FieldErrors> {
        self.state.errors.as_ref()
    }

    /// Errors delivered by the last applied async outcome.
    #[must_use]
    pub fn remote_errors(&self) -> Option<&FieldErrors> {
        self.state.remote_errors.as_ref()
    }

    #[must_use]
    pub fn dirty(&self) -> bool {
        self.state.dirty
    }

    #[must_use]
    pub fn touched(&self) -> bool {
        self.state.touched
    }

    #[must_use]
    pub fn needs_validation(&self) -> bool {
        self.state.needs_validation
    }

    /// Validated and without errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.state.needs_validation && self.state.errors.is_none()
    }

    /// Validated and with errors. A field awaiting validation is neither
    /// valid nor invalid.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        !self.state.needs_validation && self.state.errors.is_some()
    }

    /// Whether an async check was started and has not been settled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.pending
    }

    /// Counter advanced by every value change and every async check.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.state.revision
    }

    /// Native-constraint hints of all attributed validators.
    #[must_use]
    pub fn attributes(&self) -> NativeAttributes {
        attributes_of(&self.state.validators)
    }

    /// Whether an attributed validator marks this field required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.attributes().is_required()
    }

    /// Whether both handles share the same state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Run the validators if the cached errors are stale.
    ///
    /// Returns a clone of the same handle when nothing needs validation.
    #[must_use]
    pub fn validate(&self) -> Self {
        if !self.state.needs_validation {
            return self.clone();
        }

        let sync_errors = run_all(&self.state.validators, &self.state.value);
        tracing::trace!(
            kind = "field",
            error_count = sync_errors.as_ref().map_or(0, FieldErrors::len),
            "validation ran"
        );

        self.rebuild(|s| {
            s.errors = combine(sync_errors.as_ref(), s.remote_errors.as_ref());
            s.sync_errors = sync_errors;
            s.needs_validation = false;
        })
    }

    /// Replace the validators; the field must be validated again and any
    /// outstanding async check is superseded.
    #[must_use]
    pub fn set_validators(&self, validators: impl IntoIterator<Item = FieldValidator>) -> Self {
        let validators: Arc<[FieldValidator]> = validators.into_iter().collect();
        self.rebuild(|s| {
            s.validators = validators;
            s.needs_validation = true;
            s.sync_errors = None;
            s.remote_errors = None;
            s.errors = None;
            s.revision = s.revision.wrapping_add(1);
            s.pending = false;
        })
    }

    // ------------------------------------------------------------------
    // Value changes
    // ------------------------------------------------------------------

    fn with_new_value(&self, value: Value, f: impl FnOnce(&mut FieldState)) -> Self {
        self.rebuild(|s| {
            s.value = value;
            s.needs_validation = true;
            s.sync_errors = None;
            s.remote_errors = None;
            s.errors = None;
            s.revision = s.revision.wrapping_add(1);
            s.pending = false;
            f(s);
        })
    }

    /// Replace the value programmatically. Dirty and touched are kept.
    #[must_use]
    pub fn patch_value(&self, value: impl Into<Value>) -> Self {
        self.with_new_value(value.into(), |_| {})
    }

    /// Replace the value as the user did: marks the field dirty and touched.
    #[must_use]
    pub fn change(&self, value: impl Into<Value>) -> Self {
        self.with_new_value(value.into(), |s| {
            s.dirty = true;
            s.touched = true;
        })
    }

    /// The user left the input, which showed `observed`.
    ///
    /// The field becomes touched, and dirty if `observed` differs from the
    /// stored value. The value itself is kept.
    #[must_use]
    pub fn blur(&self, observed: &Value) -> Self {
        let dirty = self.state.dirty || !observed.same_as(&self.state.value);
        self.rebuild(|s| {
            s.dirty = dirty;
            s.touched = true;
        })
    }

    /// The user entered the input, which showed `observed`.
    ///
    /// A differing value means the host filled the input in (autofill) and
    /// is taken as a [`change`](Self::change). Otherwise nothing happens.
    #[must_use]
    pub fn focus(&self, observed: &Value) -> Option<Self> {
        (!observed.same_as(&self.state.value)).then(|| self.change(observed.clone()))
    }

    #[must_use]
    pub fn set_dirty(&self, dirty: bool) -> Self {
        self.rebuild(|s| s.dirty = dirty)
    }

    #[must_use]
    pub fn set_touched(&self, touched: bool) -> Self {
        self.rebuild(|s| s.touched = touched)
    }

    // ------------------------------------------------------------------
    // Async validation
    // ------------------------------------------------------------------

    /// Start an async check at a new revision.
    ///
    /// Errors and validity are left as they are until the outcome is
    /// [settled](Self::settle); any earlier ticket is superseded.
    pub fn begin_async(&self) -> (Self, AsyncTicket) {
        let revision = self.state.revision.wrapping_add(1);
        let next = self.rebuild(|s| {
            s.revision = revision;
            s.pending = true;
        });
        (next, AsyncTicket::new(revision))
    }

    /// Apply an async outcome if it belongs to the current revision.
    ///
    /// Applied remote errors are merged over the sync errors and survive
    /// later [`validate`](Self::validate) runs until the value changes.
    pub fn settle(&self, outcome: AsyncOutcome) -> Settled {
        if outcome.revision() != self.state.revision {
            tracing::debug!(
                outcome_revision = outcome.revision(),
                current_revision = self.state.revision,
                "discarding superseded async outcome"
            );
            return Settled::Superseded;
        }

        let remote_errors = outcome.into_errors();
        Settled::Applied(self.rebuild(|s| {
            s.errors = combine(s.sync_errors.as_ref(), remote_errors.as_ref());
            s.remote_errors = remote_errors;
            s.pending = false;
        }))
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("value", &self.state.value)
            .field("validators", &self.state.validators.len())
            .field("errors", &self.state.errors)
            .field("dirty", &self.state.dirty)
            .field("touched", &self.state.touched)
            .field("needs_validation", &self.state.needs_validation)
            .field("revision", &self.state.revision)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
