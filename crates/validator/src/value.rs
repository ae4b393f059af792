//! Primitive field values.
//!
//! A [`Value`] is what a single form field holds: text, a number, a flag, a
//! calendar date or a list of opaque file references. Two nil states exist:
//! [`Value::Undefined`] for "never provided" and [`Value::Null`] for
//! "explicitly cleared".

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

/// Display and wire format for [`Value::Date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An opaque reference to a binary blob chosen by the user (a picked file).
///
/// The tree never reads blob contents; it only carries the reference so the
/// view adapter can upload it on submit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, Deserialize)]
pub struct BlobRef {
    /// File name as reported by the host.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type, when the host knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

impl BlobRef {
    /// Create a blob reference without a MIME type.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            mime: None,
        }
    }

    /// Attach a MIME type.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// A primitive value held by a single field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value was ever provided.
    #[default]
    Undefined,
    /// The value was explicitly cleared.
    Null,
    /// Free text (text inputs, text areas, selects, radios).
    Text(String),
    /// A number. NaN is how a cleared numeric input shows up.
    Number(f64),
    /// A flag (checkboxes).
    Bool(bool),
    /// A calendar date.
    Date(NaiveDate),
    /// A date input whose content could not be parsed.
    InvalidDate,
    /// Files picked by the user.
    Files(Vec<BlobRef>),
}

impl Value {
    /// Returns `true` for [`Value::Undefined`] and [`Value::Null`].
    #[must_use]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Returns the text content, if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is a numeric value.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the flag, if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the date, if this is a valid date value.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Compares the way an input sees its content: two NaN numbers (an
    /// empty numeric input) are the same value.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => self == other,
        }
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Date(_) => "date",
            Self::InvalidDate => "invalid date",
            Self::Files(_) => "files",
        }
    }

    /// Parse a `YYYY-MM-DD` string into a date value.
    ///
    /// Unparseable input yields [`Value::InvalidDate`], mirroring a date
    /// input whose content is not a valid date.
    #[must_use]
    pub fn parse_date(raw: &str) -> Self {
        match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => Self::Date(date),
            Err(_) => Self::InvalidDate,
        }
    }

    /// Coerce to a number the way a loosely typed host would.
    ///
    /// Text is trimmed and parsed (empty text is `0`), flags become `0`/`1`
    /// and dates become milliseconds since the Unix epoch. Everything else
    /// has no numeric reading and yields `None`. The result may be
    /// non-finite.
    #[must_use]
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Date(d) => Some(d.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64),
            Self::Undefined | Self::Null | Self::InvalidDate | Self::Files(_) => None,
        }
    }

    /// The value formatted for display in an input.
    ///
    /// Dates render as `YYYY-MM-DD`; nil, NaN, invalid dates and file lists
    /// render empty (an input cannot show them).
    #[must_use]
    pub fn to_display(&self) -> String {
        match self {
            Self::Undefined | Self::Null | Self::InvalidDate | Self::Files(_) => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) if n.is_nan() => String::new(),
            Self::Number(n) if n.is_infinite() => {
                if n.is_sign_positive() { "Infinity" } else { "-Infinity" }.to_owned()
            }
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Date(d) => d.format(DATE_FORMAT).to_string(),
        }
    }

    /// Convert a JSON scalar into a value.
    ///
    /// Arrays convert only when every element is a blob object; other
    /// arrays and objects have no primitive form and yield `None`.
    #[must_use]
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Null => Some(Self::Null),
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(Self::Number),
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(|item| BlobRef::deserialize(item).ok())
                .collect::<Option<Vec<_>>>()
                .map(Self::Files),
            serde_json::Value::Object(_) => None,
        }
    }

    /// Convert into JSON using the same encoding as [`Serialize`].
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Undefined | Self::Null | Self::InvalidDate => serde_json::Value::Null,
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Number(n) => integral(*n).map_or_else(
                || {
                    serde_json::Number::from_f64(*n)
                        .map_or(serde_json::Value::Null, serde_json::Value::Number)
                },
                serde_json::Value::from,
            ),
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Date(d) => serde_json::Value::String(d.format(DATE_FORMAT).to_string()),
            Self::Files(files) => serde_json::Value::Array(
                files
                    .iter()
                    .map(|f| serde_json::to_value(f).unwrap_or(serde_json::Value::Null))
                    .collect(),
            ),
        }
    }
}

/// Largest magnitude below which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// The number as an integer, when it is one, so it encodes without `.0`.
#[allow(clippy::cast_possible_truncation)]
fn integral(n: f64) -> Option<i64> {
    (n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER).then_some(n as i64)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Undefined | Self::Null | Self::InvalidDate => serializer.serialize_none(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) => match integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None if n.is_finite() => serializer.serialize_f64(*n),
                None => serializer.serialize_none(),
            },
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Date(d) => serializer.collect_str(&d.format(DATE_FORMAT)),
            Self::Files(files) => files.serialize(serializer),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::InvalidDate => f.write_str("Invalid Date"),
            Self::Files(files) => write!(f, "[{} file(s)]", files.len()),
            other => f.write_str(&other.to_display()),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<Vec<BlobRef>> for Value {
    fn from(value: Vec<BlobRef>) -> Self {
        Self::Files(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
