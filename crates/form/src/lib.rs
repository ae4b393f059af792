//! # formtree-form
//!
//! An immutable state tree for structured, user-editable forms.
//!
//! A tree of [`Field`](node::Field)s, [`Group`](node::Group)s and
//! [`List`](node::List)s tracks values, dirty/touched status and validation
//! outcomes. Every update returns a new tree sharing all untouched subtrees
//! with the old one, and [`validate`](node::Node::validate) only revisits
//! the parts that changed: children first, then the validators of their
//! parents.
//!
//! ## Quick Start
//!
//! ```rust
//! use formtree_form::prelude::*;
//! use serde_json::json;
//!
//! let form: Node = Group::new([
//!     ("name", Field::new("", [required().shared()])),
//!     ("age", Field::new(0, [number_range(Some(0.0), Some(120.0)).shared()])),
//! ])
//! .into();
//!
//! let form = form.validate();
//! assert!(form.is_invalid());
//!
//! let form = form
//!     .patch_value(&json!({ "name": "Ann" }).into())
//!     .unwrap()
//!     .validate();
//! assert!(form.is_valid());
//! assert_eq!(form.to_json(), json!({ "name": "Ann", "age": 0 }));
//! ```
//!
//! ## Driving a tree from inputs
//!
//! [`Node::bind`](node::Node::bind) produces a [`Binding`](bind::Binding)
//! per node, carrying input props and event hooks. Each hook hands the
//! callback a complete new tree. See [`bind`] for the naming rules.
//!
//! ## Async checks
//!
//! Remote checks are tagged with the field revision they were started at
//! and only land if the field has not changed since. See [`pending`].

pub mod bind;
pub mod element;
pub mod error;
pub mod node;
pub mod options;
pub mod path;
pub mod pending;
pub mod prelude;
pub mod schema;
pub mod value;

pub use error::FormError;
