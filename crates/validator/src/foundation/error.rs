//! Error records for validation failures
//!
//! A field's validation outcome is a [`FieldErrors`] record: an ordered
//! mapping from error kind (`"required"`, `"min"`, ...) to the
//! [`ValidationError`] describing it. Presence of a kind is what the view
//! layer cares about; the error itself carries a message and parameters for
//! rendering and i18n.
//!
//! All string fields use `Cow<'static, str>` for zero-allocation in the
//! common case of static error codes and messages.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Error kinds reported by the built-in validators.
pub mod kinds {
    /// Value is nil, blank, NaN, an empty file list or an invalid date.
    pub const REQUIRED: &str = "required";
    /// Number is below the configured minimum.
    pub const MIN: &str = "min";
    /// Number is above the configured maximum.
    pub const MAX: &str = "max";
    /// Text is shorter than the configured minimum length.
    pub const MIN_LENGTH: &str = "minLength";
    /// Text is longer than the configured maximum length.
    pub const MAX_LENGTH: &str = "maxLength";
    /// Value does not match the configured pattern.
    pub const PATTERN: &str = "pattern";
    /// Text is not an email address.
    pub const EMAIL: &str = "email";
    /// Text is not a phone number.
    pub const PHONE: &str = "phone";
    /// Text fails the Luhn credit-card checksum.
    pub const CREDIT_CARD: &str = "creditCard";
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single structured validation failure.
///
/// # Examples
///
/// ```rust
/// use formtree_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("min", "Value is too small")
///     .with_param("min", "5")
///     .with_param("actual", "3");
/// assert_eq!(error.param("min"), Some("5"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error kind, used as the key in [`FieldErrors`].
    ///
    /// Examples: "required", "minLength", "creditCard"
    pub code: Cow<'static, str>,

    /// Human-readable error message in English.
    pub message: Cow<'static, str>,

    /// Parameters for the error message template.
    ///
    /// Stored as ordered key-value pairs (typically 0-3 params).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: Vec::new(),
        }
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates a "required" error.
    #[must_use]
    pub fn required() -> Self {
        Self::new(kinds::REQUIRED, "This field is required")
    }

    /// Creates a "min" error.
    #[must_use]
    pub fn min(min: f64, actual: f64) -> Self {
        Self::new(kinds::MIN, format!("Value must be at least {min}"))
            .with_param("min", min.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "max" error.
    #[must_use]
    pub fn max(max: f64, actual: f64) -> Self {
        Self::new(kinds::MAX, format!("Value must be at most {max}"))
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "minLength" error.
    #[must_use]
    pub fn min_length(min: usize, actual: usize) -> Self {
        Self::new(kinds::MIN_LENGTH, format!("Must be at least {min} characters"))
            .with_param("min", min.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "maxLength" error.
    #[must_use]
    pub fn max_length(max: usize, actual: usize) -> Self {
        Self::new(kinds::MAX_LENGTH, format!("Must be at most {max} characters"))
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "pattern" error.
    pub fn pattern(pattern: impl Into<Cow<'static, str>>) -> Self {
        Self::new(kinds::PATTERN, "Value does not match the expected format")
            .with_param("pattern", pattern)
    }

    /// Creates an "email" error.
    #[must_use]
    pub fn email() -> Self {
        Self::new(kinds::EMAIL, "Invalid email address")
    }

    /// Creates a "phone" error.
    #[must_use]
    pub fn phone() -> Self {
        Self::new(kinds::PHONE, "Invalid phone number")
    }

    /// Creates a "creditCard" error.
    #[must_use]
    pub fn credit_card() -> Self {
        Self::new(kinds::CREDIT_CARD, "Invalid credit card number")
    }
}

// ============================================================================
// ERROR RECORD
// ============================================================================

/// The errors of one node, keyed by error kind.
///
/// Inserting an error whose kind is already present replaces the earlier
/// one in place, so merging records is last-write-wins per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: IndexMap<Cow<'static, str>, ValidationError>,
}

impl FieldErrors {
    /// Creates a new empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error, replacing any earlier error of the same kind.
    pub fn insert(&mut self, error: ValidationError) {
        self.errors.insert(error.code.clone(), error);
    }

    /// Adds an error (builder-style, consuming).
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, error: ValidationError) -> Self {
        self.insert(error);
        self
    }

    /// Merges `other` into `self`; `other` wins on shared kinds.
    pub fn merge(&mut self, other: Self) {
        for (code, error) in other.errors {
            self.errors.insert(code, error);
        }
    }

    /// Returns true if an error of the given kind is present.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.errors.contains_key(kind)
    }

    /// Returns the error of the given kind.
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&ValidationError> {
        self.errors.get(kind)
    }

    /// Iterate over the present kinds in insertion order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(AsRef::as_ref)
    }

    /// Iterate over the errors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.values()
    }

    /// Returns the number of kinds present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `None` when empty, so an empty record never reads as "has errors".
    #[must_use]
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(error: ValidationError) -> Self {
        Self::new().with(error)
    }
}

impl FromIterator<ValidationError> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        let mut errors = Self::new();
        for error in iter {
            errors.insert(error);
        }
        errors
    }
}

impl IntoIterator for FieldErrors {
    type Item = ValidationError;
    type IntoIter = indexmap::map::IntoValues<Cow<'static, str>, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_values()
    }
}

/// Serializes as `{ "<kind>": true, ... }`.
impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for kind in self.errors.keys() {
            map.serialize_entry(kind.as_ref(), &true)?;
        }
        map.end()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.values().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_with_params() {
        let error = ValidationError::min(5.0, 3.0);
        assert_eq!(error.code, kinds::MIN);
        assert_eq!(error.param("min"), Some("5"));
        assert_eq!(error.param("actual"), Some("3"));
        assert_eq!(error.param("missing"), None);
    }

    #[test]
    fn test_merge_is_last_write_wins() {
        let mut first = FieldErrors::from(ValidationError::new("pattern", "first"))
            .with(ValidationError::required());
        let second = FieldErrors::from(ValidationError::new("pattern", "second"));

        first.merge(second);

        assert_eq!(first.len(), 2);
        assert_eq!(first.get("pattern").unwrap().message, "second");
        // position of the overwritten kind is kept
        assert_eq!(first.kinds().collect::<Vec<_>>(), vec!["pattern", "required"]);
    }

    #[test]
    fn test_empty_record_is_none() {
        assert!(FieldErrors::new().into_option().is_none());
        assert!(FieldErrors::from(ValidationError::email()).into_option().is_some());
    }

    #[test]
    fn test_serializes_as_kind_flags() {
        let errors: FieldErrors = [ValidationError::required(), ValidationError::min(1.0, 0.0)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "required": true, "min": true }));
    }

    #[test]
    fn test_zero_alloc_static_strings() {
        let error = ValidationError::required();
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }
}
