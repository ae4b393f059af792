//! The form tree.
//!
//! A tree is made of three node kinds:
//!
//! * [`Field`]: a leaf holding one [`Value`] and its validators
//! * [`Group`]: named children plus validators over the whole group
//! * [`List`]: positional children plus validators over the whole list
//!
//! Every handle is a cheap clone of shared immutable state. Operations
//! return new handles that share every untouched subtree with the old one,
//! so `ptr_eq` tells whether anything changed.

mod field;
mod group;
mod list;

pub use field::Field;
pub use group::{Group, GroupValidator, ValidityOverride};
pub use list::{List, ListValidator};

use formtree_validator::foundation::FieldErrors;
use formtree_validator::value::Value;

use crate::error::FormError;
use crate::options::ValidateOptions;
use crate::path::{FieldPath, PathSegment};
use crate::pending::{AsyncOutcome, Settled};
use crate::value::FormValue;

/// Any node of a form tree.
#[derive(Debug, Clone)]
pub enum Node {
    Field(Field),
    Group(Group),
    List(List),
}

impl Node {
    /// Short name of the node kind, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Field(_) => "field",
            Self::Group(_) => "group",
            Self::List(_) => "list",
        }
    }

    #[must_use]
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Whether both handles share the same state.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field(a), Self::Field(b)) => a.ptr_eq(b),
            (Self::Group(a), Self::Group(b)) => a.ptr_eq(b),
            (Self::List(a), Self::List(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    // ========================================================================
    // Validation and status
    // ========================================================================

    /// Validate with the default options.
    #[must_use]
    pub fn validate(&self) -> Self {
        self.validate_with(ValidateOptions::default())
    }

    /// Validate every stale part of the tree, children before parents.
    #[must_use]
    pub fn validate_with(&self, options: ValidateOptions) -> Self {
        match self {
            Self::Field(field) => Self::Field(field.validate()),
            Self::Group(group) => Self::Group(group.validate_with(options)),
            Self::List(list) => Self::List(list.validate_with(options)),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Field(field) => field.is_valid(),
            Self::Group(group) => group.is_valid(),
            Self::List(list) => list.is_valid(),
        }
    }

    /// Validated and not valid. A node awaiting validation is neither.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        !self.needs_validation() && !self.is_valid()
    }

    #[must_use]
    pub fn needs_validation(&self) -> bool {
        match self {
            Self::Field(field) => field.needs_validation(),
            Self::Group(group) => group.needs_validation(),
            Self::List(list) => list.needs_validation(),
        }
    }

    #[must_use]
    pub fn dirty(&self) -> bool {
        match self {
            Self::Field(field) => field.dirty(),
            Self::Group(group) => group.dirty(),
            Self::List(list) => list.dirty(),
        }
    }

    #[must_use]
    pub fn touched(&self) -> bool {
        match self {
            Self::Field(field) => field.touched(),
            Self::Group(group) => group.touched(),
            Self::List(list) => list.touched(),
        }
    }

    /// The node's own errors; never those of its descendants.
    #[must_use]
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Field(field) => field.errors(),
            Self::Group(group) => group.errors(),
            Self::List(list) => list.errors(),
        }
    }

    // ========================================================================
    // Values
    // ========================================================================

    /// Project the tree to its plain value.
    #[must_use]
    pub fn value(&self) -> FormValue {
        match self {
            Self::Field(field) => FormValue::Field(field.value().clone()),
            Self::Group(group) => group.value(),
            Self::List(list) => list.value(),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        self.value().to_json()
    }

    /// Overwrite values from a partial nested record.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ShapeMismatch`] when `value` does not have the
    /// shape of the node it is applied to.
    pub fn patch_value(&self, value: &FormValue) -> Result<Self, FormError> {
        self.patch_value_at(value, &FieldPath::root())
    }

    pub(crate) fn patch_value_at(&self, value: &FormValue, path: &FieldPath) -> Result<Self, FormError> {
        match self {
            Self::Field(field) => match value {
                FormValue::Field(v) => Ok(Self::Field(field.patch_value(v.clone()))),
                // an empty JSON array cannot be told apart from an empty file list
                FormValue::List(items) if items.is_empty() => {
                    Ok(Self::Field(field.patch_value(Value::Files(Vec::new()))))
                }
                other => Err(FormError::ShapeMismatch {
                    path: path.to_string(),
                    expected: "field",
                    found: other.kind_name(),
                }),
            },
            Self::Group(group) => group.patch_value_at(value, path).map(Self::Group),
            Self::List(list) => list.patch_value_at(value, path).map(Self::List),
        }
    }

    /// Set the dirty flag of every field.
    #[must_use]
    pub fn set_dirty(&self, dirty: bool) -> Self {
        match self {
            Self::Field(field) => Self::Field(field.set_dirty(dirty)),
            Self::Group(group) => Self::Group(group.set_dirty(dirty)),
            Self::List(list) => Self::List(list.set_dirty(dirty)),
        }
    }

    /// Set the touched flag of every field.
    #[must_use]
    pub fn set_touched(&self, touched: bool) -> Self {
        match self {
            Self::Field(field) => Self::Field(field.set_touched(touched)),
            Self::Group(group) => Self::Group(group.set_touched(touched)),
            Self::List(list) => Self::List(list.set_touched(touched)),
        }
    }

    // ========================================================================
    // Addressing
    // ========================================================================

    /// The descendant at `path`, if there is one.
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&Node> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| match (node, segment) {
                (Self::Group(group), PathSegment::Key(key)) => group.get(key),
                (Self::List(list), PathSegment::Index(index)) => list.get(*index),
                _ => None,
            })
    }

    /// Replace the descendant at `path` with `f(descendant)`.
    ///
    /// Every ancestor on the way is rebuilt and marked as needing
    /// validation; all other subtrees are shared. When `f` returns the very
    /// same node the tree is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::FieldNotFound`], [`FormError::IndexOutOfBounds`]
    /// or [`FormError::ShapeMismatch`] when `path` does not lead to a node.
    pub fn update_at(&self, path: &FieldPath, f: impl FnOnce(&Node) -> Node) -> Result<Self, FormError> {
        self.try_update_at(path.segments(), &FieldPath::root(), |node| Ok(f(node)))
    }

    /// Settle an async outcome for the field at `path`.
    ///
    /// A superseded outcome returns the tree unchanged.
    ///
    /// # Errors
    ///
    /// Fails like [`update_at`](Self::update_at), and with
    /// [`FormError::ShapeMismatch`] when `path` does not lead to a field.
    pub fn settle_at(&self, path: &FieldPath, outcome: AsyncOutcome) -> Result<Self, FormError> {
        self.try_update_at(path.segments(), &FieldPath::root(), |node| match node {
            Self::Field(field) => Ok(match field.settle(outcome) {
                Settled::Applied(field) => Self::Field(field),
                Settled::Superseded => node.clone(),
            }),
            other => Err(FormError::ShapeMismatch {
                path: path.to_string(),
                expected: "field",
                found: other.kind_name(),
            }),
        })
    }

    fn try_update_at<F>(&self, segments: &[PathSegment], walked: &FieldPath, f: F) -> Result<Self, FormError>
    where
        F: FnOnce(&Node) -> Result<Node, FormError>,
    {
        let Some((segment, rest)) = segments.split_first() else {
            return f(self);
        };
        let here = walked.child(segment.clone());

        match (self, segment) {
            (Self::Group(group), PathSegment::Key(key)) => {
                let child = group.get(key).ok_or_else(|| FormError::FieldNotFound {
                    path: here.to_string(),
                })?;
                let updated = child.try_update_at(rest, &here, f)?;
                if updated.ptr_eq(child) {
                    return Ok(self.clone());
                }
                Ok(Self::Group(group.replace(key, updated)))
            }
            (Self::List(list), PathSegment::Index(index)) => {
                let child = list.get(*index).ok_or_else(|| FormError::IndexOutOfBounds {
                    path: walked.to_string(),
                    index: *index,
                    len: list.len(),
                })?;
                let updated = child.try_update_at(rest, &here, f)?;
                if updated.ptr_eq(child) {
                    return Ok(self.clone());
                }
                Ok(Self::List(list.replace(*index, updated)))
            }
            (node, PathSegment::Key(_)) => Err(FormError::ShapeMismatch {
                path: walked.to_string(),
                expected: "group",
                found: node.kind_name(),
            }),
            (node, PathSegment::Index(_)) => Err(FormError::ShapeMismatch {
                path: walked.to_string(),
                expected: "list",
                found: node.kind_name(),
            }),
        }
    }
}

impl From<Field> for Node {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl From<List> for Node {
    fn from(list: List) -> Self {
        Self::List(list)
    }
}
