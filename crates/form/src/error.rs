/// Error type for structural and integration misuse of a form tree.
///
/// Validation failures are never reported here: they are data, stored as
/// [`FieldErrors`](formtree_validator::foundation::FieldErrors) on the node.
/// A `FormError` means the caller addressed the tree wrongly (an unknown
/// key, a value of the wrong shape) or fed it inconsistent input elements.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// A value or node does not have the shape expected at `path`.
    #[error("shape mismatch at `{path}`: expected {expected}, found {found}")]
    ShapeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// No child with the given name exists.
    #[error("field not found: `{path}`")]
    FieldNotFound { path: String },

    /// A list index is past the end.
    #[error("index {index} out of bounds at `{path}` (len {len})")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },

    /// A path string could not be parsed.
    #[error("invalid path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A non-radio element appeared where only radios are accepted.
    #[error("unexpected element `{name}`: only radio inputs may share a name")]
    UnexpectedElement { name: String },

    /// More than one radio of a single-selection set is checked.
    #[error("{count} radios named `{name}` are checked, expected at most one")]
    MultipleRadiosChecked { name: String, count: usize },

    /// A declarative schema is inconsistent.
    #[error("invalid schema at `{path}`: {reason}")]
    Schema { path: String, reason: String },

    /// A schema document is not valid JSON for a schema.
    #[error("cannot read schema: {0}")]
    SchemaFormat(#[from] serde_json::Error),

    /// A schema pattern rule does not compile.
    #[error("invalid pattern at `{path}`: {source}")]
    Pattern {
        path: String,
        #[source]
        source: regex::Error,
    },
}

impl FormError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::ShapeMismatch { .. } => "shape",
            Self::FieldNotFound { .. } | Self::IndexOutOfBounds { .. } => "lookup",
            Self::InvalidPath { .. } => "path",
            Self::UnexpectedElement { .. } | Self::MultipleRadiosChecked { .. } => "element",
            Self::Schema { .. } | Self::SchemaFormat(_) | Self::Pattern { .. } => "schema",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::ShapeMismatch { .. } => "FORM_SHAPE_MISMATCH",
            Self::FieldNotFound { .. } => "FORM_FIELD_NOT_FOUND",
            Self::IndexOutOfBounds { .. } => "FORM_INDEX_OUT_OF_BOUNDS",
            Self::InvalidPath { .. } => "FORM_INVALID_PATH",
            Self::UnexpectedElement { .. } => "FORM_UNEXPECTED_ELEMENT",
            Self::MultipleRadiosChecked { .. } => "FORM_MULTIPLE_RADIOS",
            Self::Schema { .. } => "FORM_SCHEMA",
            Self::SchemaFormat(_) => "FORM_SCHEMA_FORMAT",
            Self::Pattern { .. } => "FORM_PATTERN",
        }
    }
}
