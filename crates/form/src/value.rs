//! The plain nested record a form tree projects to.

use formtree_validator::value::{BlobRef, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// The value of a whole tree: what a consumer submits.
///
/// Mirrors the node shape: a field becomes its [`Value`], a group an
/// ordered record and a list a sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Field(Value),
    Group(IndexMap<String, FormValue>),
    List(Vec<FormValue>),
}

impl FormValue {
    /// Short name of the shape, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Field(_) => "field",
            Self::Group(_) => "group",
            Self::List(_) => "list",
        }
    }

    /// Whether this is a nil field value.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Field(v) if v.is_nil())
    }

    /// The field value, if this is one.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Field(v) => Some(v),
            _ => None,
        }
    }

    /// Look up a group entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FormValue> {
        match self {
            Self::Group(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Convert JSON into a form value.
    ///
    /// Objects become groups and scalars become fields. A non-empty array
    /// whose every element is a blob object becomes a `Files` field; any
    /// other array becomes a list.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Object(entries) => Self::Group(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
            serde_json::Value::Array(items) => {
                let files: Option<Vec<BlobRef>> = items
                    .iter()
                    .map(|item| BlobRef::deserialize(item).ok())
                    .collect();
                match files {
                    Some(files) if !files.is_empty() => Self::Field(Value::Files(files)),
                    _ => Self::List(items.iter().map(Self::from_json).collect()),
                }
            }
            scalar => Self::Field(Value::from_json(scalar).unwrap_or(Value::Null)),
        }
    }

    /// Convert into JSON.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Field(v) => v.to_json(),
            Self::Group(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

impl Serialize for FormValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Field(v) => v.serialize(serializer),
            Self::Group(entries) => entries.serialize(serializer),
            Self::List(items) => items.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FormValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(|json| Self::from_json(&json))
    }
}

impl From<Value> for FormValue {
    fn from(value: Value) -> Self {
        Self::Field(value)
    }
}

impl From<serde_json::Value> for FormValue {
    fn from(json: serde_json::Value) -> Self {
        Self::from_json(&json)
    }
}

impl From<FormValue> for serde_json::Value {
    fn from(value: FormValue) -> Self {
        value.to_json()
    }
}

impl<K: Into<String>> FromIterator<(K, FormValue)> for FormValue {
    fn from_iter<I: IntoIterator<Item = (K, FormValue)>>(iter: I) -> Self {
        Self::Group(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
