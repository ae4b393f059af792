//! Prelude module for convenient imports.
//!
//! Brings in the node types, their options and bindings, and everything
//! from [`formtree_validator::prelude`].

pub use formtree_validator::prelude::*;

pub use crate::bind::{Binding, ChangeReason, FieldBinding, InputProps, OnChange, RadioProps};
pub use crate::element::{InputElement, InputKind};
pub use crate::error::FormError;
pub use crate::node::{
    Field, Group, GroupValidator, List, ListValidator, Node, ValidityOverride,
};
pub use crate::options::{FieldConfig, FieldValidator, ValidateOptions};
pub use crate::path::{FieldPath, PathSegment};
pub use crate::pending::{AsyncOutcome, AsyncTicket, Settled};
pub use crate::schema::{FieldRule, FieldType, NodeSchema};
pub use crate::value::FormValue;
