//! Addresses of nodes inside a form tree.
//!
//! The textual form is the one bindings use for input names: group keys
//! separated by dots, list positions in brackets (`address.lines[2].text`).

use std::fmt;
use std::str::FromStr;

use crate::error::FormError;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named child of a group.
    Key(String),
    /// A position in a list.
    Index(usize),
}

/// A path from a root node to one of its descendants.
///
/// The empty path addresses the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The path of the root node.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse `a.b[2].c` syntax.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPath`] for empty keys, unclosed or empty
    /// brackets and non-numeric indices.
    pub fn parse(path: &str) -> Result<Self, FormError> {
        let invalid = |reason: &str| FormError::InvalidPath {
            path: path.to_owned(),
            reason: reason.to_owned(),
        };

        let mut segments = Vec::new();
        let mut rest = path;
        let mut expect_key = !path.starts_with('[');

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('[') {
                let close = after.find(']').ok_or_else(|| invalid("unclosed `[`"))?;
                let index = after[..close]
                    .parse::<usize>()
                    .map_err(|_| invalid("index must be a non-negative integer"))?;
                segments.push(PathSegment::Index(index));
                rest = &after[close + 1..];
                expect_key = false;

                if let Some(after_dot) = rest.strip_prefix('.') {
                    if after_dot.is_empty() {
                        return Err(invalid("trailing `.`"));
                    }
                    rest = after_dot;
                    expect_key = true;
                } else if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(invalid("expected `.` or `[` after `]`"));
                }
            } else {
                if !expect_key {
                    return Err(invalid("expected `.` or `[`"));
                }
                let end = rest.find(['.', '[']).unwrap_or(rest.len());
                let key = &rest[..end];
                if key.is_empty() {
                    return Err(invalid("empty key"));
                }
                if key.contains(']') {
                    return Err(invalid("unexpected `]`"));
                }
                segments.push(PathSegment::Key(key.to_owned()));
                rest = &rest[end..];
                expect_key = false;

                if let Some(after_dot) = rest.strip_prefix('.') {
                    if after_dot.is_empty() {
                        return Err(invalid("trailing `.`"));
                    }
                    rest = after_dot;
                    expect_key = true;
                }
            }
        }

        Ok(Self { segments })
    }

    /// Extend the path with a group key (builder-style).
    #[must_use = "builder methods must be chained or built"]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Extend the path with a list index (builder-style).
    #[must_use = "builder methods must be chained or built"]
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    /// A copy of this path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut next = self.clone();
        next.segments.push(segment);
        next
    }

    /// The segments from the root down.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The first segment and the remaining path.
    #[must_use]
    pub fn split_first(&self) -> Option<(&PathSegment, FieldPath)> {
        self.segments.split_first().map(|(first, rest)| {
            (
                first,
                FieldPath {
                    segments: rest.to_vec(),
                },
            )
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<PathSegment> for FieldPath {
    fn from(segment: PathSegment) -> Self {
        Self {
            segments: vec![segment],
        }
    }
}
