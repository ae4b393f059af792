//! Asynchronous validation tickets.
//!
//! A remote check is started from a snapshot of a field and resolves later,
//! when the tree may already have moved on. Every field carries a revision
//! counter that advances on each value change and each new check. A
//! [`AsyncTicket`] remembers the revision it was issued at, and an outcome
//! only lands if the field is still at that revision: only the latest
//! requested check may update a field's errors.

use formtree_validator::foundation::{AsyncValidate, FieldErrors};
use formtree_validator::value::Value;
use futures::future::{BoxFuture, FutureExt};

use crate::node::Field;

/// Proof that an async check was requested at a given field revision.
///
/// Obtained from [`Field::begin_async`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "an async ticket does nothing unless it is run or resolved"]
pub struct AsyncTicket {
    revision: u64,
}

impl AsyncTicket {
    pub(crate) fn new(revision: u64) -> Self {
        Self { revision }
    }

    /// The field revision this ticket was issued at.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Start `validator` on `value` and tag its verdict with this ticket.
    ///
    /// The returned future owns everything it needs and can be spawned.
    pub fn run(self, value: &Value, validator: &dyn AsyncValidate) -> BoxFuture<'static, AsyncOutcome> {
        validator
            .validate(value)
            .map(move |result| self.resolve(result))
            .boxed()
    }

    /// Tag a verdict obtained elsewhere with this ticket.
    pub fn resolve(self, result: Result<(), FieldErrors>) -> AsyncOutcome {
        AsyncOutcome {
            revision: self.revision,
            errors: result.err().and_then(FieldErrors::into_option),
        }
    }
}

/// The verdict of an async check, ready to [`settle`](Field::settle).
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncOutcome {
    revision: u64,
    errors: Option<FieldErrors>,
}

impl AsyncOutcome {
    /// The field revision the check was issued at.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The remote errors, `None` when the check passed.
    #[must_use]
    pub fn errors(&self) -> Option<&FieldErrors> {
        self.errors.as_ref()
    }

    pub(crate) fn into_errors(self) -> Option<FieldErrors> {
        self.errors
    }
}

/// Result of [`Field::settle`].
#[derive(Debug, Clone)]
#[must_use]
pub enum Settled {
    /// The outcome was current; here is the updated field.
    Applied(Field),
    /// The field moved on since the ticket was issued; nothing changed.
    Superseded,
}

impl Settled {
    /// The updated field, if the outcome was applied.
    #[must_use]
    pub fn applied(self) -> Option<Field> {
        match self {
            Self::Applied(field) => Some(field),
            Self::Superseded => None,
        }
    }

    #[must_use]
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}
