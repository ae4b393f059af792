//! Declarative form schemas.
//!
//! A [`NodeSchema`] describes a tree as plain data (typically JSON) and
//! [`build`](NodeSchema::build)s it into a [`Node`]:
//!
//! ```rust
//! use formtree_form::schema::NodeSchema;
//!
//! let schema = NodeSchema::from_json_str(r#"{
//!     "kind": "group",
//!     "fields": {
//!         "email": { "kind": "field", "type": "text", "rules": [{ "rule": "required" }, { "rule": "email" }] },
//!         "age": { "kind": "field", "type": "number", "initial": 18, "rules": [{ "rule": "number_range", "min": 18 }] }
//!     }
//! }"#).unwrap();
//!
//! let form = schema.build().unwrap().validate();
//! assert!(form.is_invalid());
//! ```

use formtree_validator::foundation::ValidateExt;
use formtree_validator::validators::{
    LengthRange, NumberRange, Pattern, credit_card, email, phone, required,
};
use formtree_validator::value::{BlobRef, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::node::{Field, Group, List, Node};
use crate::options::FieldValidator;
use crate::path::{FieldPath, PathSegment};

/// A declarative validation rule for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FieldRule {
    /// The field must hold a non-empty value.
    Required,

    /// A number within inclusive bounds.
    NumberRange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },

    /// Text with a length within inclusive bounds.
    LengthRange {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },

    /// Text matching a regular expression.
    Pattern {
        pattern: String,
        #[serde(default = "default_true")]
        ignore_blank: bool,
    },

    Email,
    Phone,
    CreditCard,
}

fn default_true() -> bool {
    true
}

impl FieldRule {
    /// Build the validator this rule describes.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Schema`] for ranges without bounds or with
    /// crossed bounds, and [`FormError::Pattern`] for expressions that do not
    /// compile.
    pub fn to_validator(&self, path: &FieldPath) -> Result<FieldValidator, FormError> {
        let schema_error = |reason: &str| FormError::Schema {
            path: path.to_string(),
            reason: reason.to_owned(),
        };

        Ok(match self {
            Self::Required => required().shared(),
            Self::NumberRange { min, max } => {
                match (min, max) {
                    (None, None) => return Err(schema_error("number_range needs `min` or `max`")),
                    (Some(min), Some(max)) if min > max => {
                        return Err(schema_error("number_range has `min` above `max`"));
                    }
                    _ => {}
                }
                NumberRange::new(*min, *max).shared()
            }
            Self::LengthRange {
                min_length,
                max_length,
            } => {
                match (min_length, max_length) {
                    (None, None) => {
                        return Err(schema_error("length_range needs `min_length` or `max_length`"));
                    }
                    (Some(min), Some(max)) if min > max => {
                        return Err(schema_error("length_range has `min_length` above `max_length`"));
                    }
                    _ => {}
                }
                LengthRange::new(*min_length, *max_length).shared()
            }
            Self::Pattern {
                pattern,
                ignore_blank,
            } => Pattern::new(pattern)
                .map_err(|source| FormError::Pattern {
                    path: path.to_string(),
                    source,
                })?
                .with_blank_check(*ignore_blank)
                .shared(),
            Self::Email => email().shared(),
            Self::Phone => phone().shared(),
            Self::CreditCard => credit_card().shared(),
        })
    }
}

/// How a field's `initial` JSON value is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Text; `null` reads as empty text, numbers and flags as their display.
    Text,
    /// A number, or a numeric string; `null` stays null.
    Number,
    /// A flag; `null` reads as `false`.
    Bool,
    /// A `YYYY-MM-DD` string; `null` stays null.
    Date,
    /// A list of blob objects; `null` reads as no files.
    Files,
    /// Whatever primitive the JSON holds.
    #[default]
    Any,
}

impl FieldType {
    /// Convert an initial JSON value into a field value of this type.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Schema`] when `initial` cannot be read as this
    /// type.
    pub fn initial_value(self, initial: &serde_json::Value, path: &FieldPath) -> Result<Value, FormError> {
        use serde_json::Value as Json;

        let mismatch = || FormError::Schema {
            path: path.to_string(),
            reason: format!("initial value {initial} is not a valid {}", self.name()),
        };

        match (self, initial) {
            (Self::Text, Json::Null) => Ok(Value::Text(String::new())),
            (Self::Text, Json::String(s)) => Ok(Value::Text(s.clone())),
            (Self::Text, Json::Number(_) | Json::Bool(_)) => Ok(Value::Text(initial.to_string())),

            (_, Json::Null) if self != Self::Bool && self != Self::Files => Ok(Value::Null),

            (Self::Number, Json::Number(n)) => n.as_f64().map(Value::Number).ok_or_else(mismatch),
            (Self::Number, Json::String(s)) => {
                s.trim().parse().map(Value::Number).map_err(|_| mismatch())
            }

            (Self::Bool, Json::Null) => Ok(Value::Bool(false)),
            (Self::Bool, Json::Bool(b)) => Ok(Value::Bool(*b)),

            (Self::Date, Json::String(s)) => match Value::parse_date(s) {
                Value::InvalidDate => Err(mismatch()),
                date => Ok(date),
            },

            (Self::Files, Json::Null) => Ok(Value::Files(Vec::new())),
            (Self::Files, Json::Array(_)) => Vec::<BlobRef>::deserialize(initial)
                .map(Value::Files)
                .map_err(|_| mismatch()),

            (Self::Any, _) => Value::from_json(initial).ok_or_else(mismatch),

            _ => Err(mismatch()),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Files => "files",
            Self::Any => "primitive",
        }
    }
}

/// A declarative description of a form tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeSchema {
    /// A leaf field.
    Field {
        #[serde(default)]
        initial: serde_json::Value,
        #[serde(default, rename = "type")]
        field_type: FieldType,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        rules: Vec<FieldRule>,
    },

    /// Named children, in declaration order.
    Group {
        fields: IndexMap<String, NodeSchema>,
        /// Overrides the pass option for this group's own validators.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        skip_if_children_invalid: Option<bool>,
    },

    /// Positional children.
    List {
        #[serde(default)]
        items: Vec<NodeSchema>,
    },
}

impl NodeSchema {
    /// Parse a schema from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SchemaFormat`] when the text is not a schema.
    pub fn from_json_str(json: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a schema from a JSON value.
    ///
    /// Group fields come out in the key order of the value's objects, which
    /// `serde_json` keeps sorted unless its `preserve_order` feature is on.
    /// Use [`from_json_str`](Self::from_json_str) to keep document order.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SchemaFormat`] when the value is not a schema.
    pub fn from_json_value(json: serde_json::Value) -> Result<Self, FormError> {
        Ok(serde_json::from_value(json)?)
    }

    /// Build the described tree.
    ///
    /// Fields start out needing validation, like any freshly created field.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Schema`] or [`FormError::Pattern`] naming the
    /// path of the first inconsistent node.
    pub fn build(&self) -> Result<Node, FormError> {
        let node = self.build_at(&FieldPath::root())?;
        tracing::debug!(kind = node.kind_name(), "form schema built");
        Ok(node)
    }

    fn build_at(&self, path: &FieldPath) -> Result<Node, FormError> {
        match self {
            Self::Field {
                initial,
                field_type,
                rules,
            } => {
                let value = field_type.initial_value(initial, path)?;
                let validators = rules
                    .iter()
                    .map(|rule| rule.to_validator(path))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Field::new(value, validators).into())
            }
            Self::Group {
                fields,
                skip_if_children_invalid,
            } => {
                let children = fields
                    .iter()
                    .map(|(name, schema)| {
                        let child_path = path.child(PathSegment::Key(name.clone()));
                        schema.build_at(&child_path).map(|node| (name.clone(), node))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                let group = Group::new(children);
                Ok(match skip_if_children_invalid {
                    Some(skip) => group.with_skip_if_children_invalid(*skip),
                    None => group,
                }
                .into())
            }
            Self::List { items } => {
                let children = items
                    .iter()
                    .enumerate()
                    .map(|(index, schema)| schema.build_at(&path.child(PathSegment::Index(index))))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(List::new(children).into())
            }
        }
    }
}
