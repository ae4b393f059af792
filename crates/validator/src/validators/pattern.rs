//! Regular-expression validator

use regex::Regex;

use crate::foundation::{NativeAttributes, ValidationError};
use crate::validators::is_blank;
use crate::value::Value;

crate::validator! {
    /// Validates that the value's text form matches a regular expression.
    ///
    /// The value is stringified with [`Value::to_display`] (nil reads as
    /// empty text). Blank text is skipped unless
    /// [`with_blank_check`](Pattern::with_blank_check) turns that off.
    ///
    /// The expression is searched, not anchored: anchor it with `^...$`
    /// to match the whole value.
    ///
    /// Declares the `pattern` native attribute with the expression source.
    ///
    /// # Examples
    ///
    /// ```
    /// use formtree_validator::validators::pattern;
    /// use formtree_validator::foundation::Validate;
    /// use formtree_validator::value::Value;
    ///
    /// let zip = pattern(r"^\d{5}$").unwrap();
    /// assert!(zip.validate(&Value::from("12345")).is_ok());
    /// assert!(zip.validate(&Value::from("1234")).is_err());
    /// assert!(zip.validate(&Value::from("  ")).is_ok());
    /// ```
    pub Pattern { regex: Regex, ignore_blank: bool, attributes: NativeAttributes } for Value;
    rule(self, input) {
        let text = input.to_display();
        (self.ignore_blank && is_blank(&text)) || self.regex.is_match(&text)
    }
    error(self, input) { ValidationError::pattern(self.regex.as_str().to_owned()) }
    attributes(self) { Some(&self.attributes) }
    new(source: &str) -> regex::Error {
        Ok(Self {
            regex: Regex::new(source)?,
            ignore_blank: true,
            attributes: NativeAttributes::new().with_pattern(source),
        })
    }
    fn pattern(source: &str) -> regex::Error;
}

impl Pattern {
    /// Whether blank values are skipped (the default) or matched too.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_blank_check(mut self, ignore_blank: bool) -> Self {
        self.ignore_blank = ignore_blank;
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================
