use std::fmt;
use std::sync::Arc;

use formtree_validator::foundation::{FieldErrors, SharedValidator, run_all};
use indexmap::IndexMap;

use super::Node;
use crate::error::FormError;
use crate::options::ValidateOptions;
use crate::path::{FieldPath, PathSegment};
use crate::value::FormValue;

/// A validator over a whole group.
pub type GroupValidator = SharedValidator<Group>;

/// A custom validity rule replacing the "all children valid" check.
pub type ValidityOverride = Arc<dyn Fn(&Group) -> bool + Send + Sync>;

/// Named children validated together.
///
/// Children keep their insertion order, which is also the order of
/// [`value`](Self::value) and of the bindings.
#[derive(Clone)]
pub struct Group {
    state: Arc<GroupState>,
}

#[derive(Clone)]
struct GroupState {
    children: IndexMap<String, Node>,
    validators: Arc<[GroupValidator]>,
    validity: Option<ValidityOverride>,
    skip_if_children_invalid: Option<bool>,
    errors: Option<FieldErrors>,
    needs_validation: bool,
}

impl Group {
    /// A group without group-level validators.
    pub fn new<K, N>(children: impl IntoIterator<Item = (K, N)>) -> Self
    where
        K: Into<String>,
        N: Into<Node>,
    {
        Self {
            state: Arc::new(GroupState {
                children: children
                    .into_iter()
                    .map(|(name, node)| (name.into(), node.into()))
                    .collect(),
                validators: Arc::from([]),
                validity: None,
                skip_if_children_invalid: None,
                errors: None,
                needs_validation: false,
            }),
        }
    }

    /// Attach group-level validators (builder-style).
    ///
    /// A group with validators starts out needing validation.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_validators(mut self, validators: impl IntoIterator<Item = GroupValidator>) -> Self {
        let state = Arc::make_mut(&mut self.state);
        state.validators = validators.into_iter().collect();
        state.needs_validation = !state.validators.is_empty();
        self
    }

    /// Replace the "all children valid" part of [`is_valid`](Self::is_valid)
    /// (builder-style).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_validity<F>(mut self, validity: F) -> Self
    where
        F: Fn(&Group) -> bool + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.state).validity = Some(Arc::new(validity));
        self
    }

    /// Fix [`ValidateOptions::skip_if_children_invalid`] for this group's own
    /// validators, whatever the options of the pass (builder-style).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_skip_if_children_invalid(mut self, skip: bool) -> Self {
        Arc::make_mut(&mut self.state).skip_if_children_invalid = Some(skip);
        self
    }

    fn rebuild(&self, f: impl FnOnce(&mut GroupState)) -> Self {
        let mut state = GroupState::clone(&self.state);
        f(&mut state);
        Self {
            state: Arc::new(state),
        }
    }

    fn map_children(&self, f: impl Fn(&Node) -> Node) -> IndexMap<String, Node> {
        self.state
            .children
            .iter()
            .map(|(name, child)| (name.clone(), f(child)))
            .collect()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.state.children.get(name)
    }

    /// The children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.state
            .children
            .iter()
            .map(|(name, child)| (name.as_str(), child))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.children.is_empty()
    }

    #[must_use]
    pub fn validators(&self) -> &[GroupValidator] {
        &self.state.validators
    }

    /// Errors of the group validators only.
    #[must_use]
    pub fn errors(&self) -> Option<&FieldErrors> {
        self.state.errors.as_ref()
    }

    /// Whether the group itself or any descendant needs validation.
    #[must_use]
    pub fn needs_validation(&self) -> bool {
        self.state.needs_validation || self.state.children.values().any(Node::needs_validation)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.state.needs_validation || self.state.errors.is_some() {
            return false;
        }
        match &self.state.validity {
            Some(validity) => validity(self),
            None => self.state.children.values().all(Node::is_valid),
        }
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        !self.needs_validation() && !self.is_valid()
    }

    /// Whether any descendant field is dirty.
    #[must_use]
    pub fn dirty(&self) -> bool {
        self.state.children.values().any(Node::dirty)
    }

    /// Whether any descendant field is touched.
    #[must_use]
    pub fn touched(&self) -> bool {
        self.state.children.values().any(Node::touched)
    }

    #[must_use]
    pub fn value(&self) -> FormValue {
        FormValue::Group(self.map_children_value())
    }

    fn map_children_value(&self) -> IndexMap<String, FormValue> {
        self.state
            .children
            .iter()
            .map(|(name, child)| (name.clone(), child.value()))
            .collect()
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    #[must_use]
    pub fn validate(&self) -> Self {
        self.validate_with(ValidateOptions::default())
    }

    /// Validate the children, then the group validators.
    ///
    /// Group validators see the group with its children already validated.
    /// With [`ValidateOptions::skip_if_children_invalid`] set, they do not
    /// run while any child is invalid, and the previous group errors stay.
    /// Children are validated with `options` unchanged even when this group
    /// overrides the skip setting.
    #[must_use]
    pub fn validate_with(&self, options: ValidateOptions) -> Self {
        if !self.needs_validation() {
            return self.clone();
        }

        let children = self.map_children(|child| child.validate_with(options));
        let skip_enabled = self
            .state
            .skip_if_children_invalid
            .unwrap_or(options.skip_if_children_invalid);
        let skip = skip_enabled && !children.values().all(Node::is_valid);

        let validated = self.rebuild(|s| {
            s.children = children;
            s.needs_validation = false;
        });
        if skip {
            tracing::trace!(kind = "group", skipped = true, "validation ran");
            return validated;
        }

        let errors = run_all(&self.state.validators, &validated);
        tracing::trace!(
            kind = "group",
            skipped = false,
            error_count = errors.as_ref().map_or(0, FieldErrors::len),
            "validation ran"
        );
        validated.rebuild(|s| s.errors = errors)
    }

    /// Replace the group validators; the group must be validated again.
    #[must_use]
    pub fn set_validators(&self, validators: impl IntoIterator<Item = GroupValidator>) -> Self {
        let validators: Arc<[GroupValidator]> = validators.into_iter().collect();
        self.rebuild(|s| {
            s.validators = validators;
            s.needs_validation = true;
            s.errors = None;
        })
    }

    // ------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------

    /// Replace named children with the given nodes.
    ///
    /// The group is marked as needing validation.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::FieldNotFound`] for a name the group does not
    /// have; the tree never grows through `patch`.
    pub fn patch<K, N>(&self, overrides: impl IntoIterator<Item = (K, N)>) -> Result<Self, FormError>
    where
        K: Into<String>,
        N: Into<Node>,
    {
        let mut children = self.state.children.clone();
        for (name, node) in overrides {
            let name = name.into();
            match children.get_mut(&name) {
                Some(slot) => *slot = node.into(),
                None => return Err(FormError::FieldNotFound { path: name }),
            }
        }
        Ok(self.rebuild(|s| {
            s.children = children;
            s.needs_validation = true;
        }))
    }

    /// Replace an existing child; used where the name is known to exist.
    pub(crate) fn replace(&self, name: &str, node: Node) -> Self {
        self.rebuild(|s| {
            if let Some(slot) = s.children.get_mut(name) {
                *slot = node;
            }
            s.needs_validation = true;
        })
    }

    /// Overwrite values from a partial record.
    ///
    /// Entries that are absent or nil leave their child alone; unknown keys
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ShapeMismatch`] when `value` is not a group or an
    /// entry does not fit its child.
    pub fn patch_value(&self, value: &FormValue) -> Result<Self, FormError> {
        self.patch_value_at(value, &FieldPath::root())
    }

    pub(crate) fn patch_value_at(&self, value: &FormValue, path: &FieldPath) -> Result<Self, FormError> {
        let FormValue::Group(entries) = value else {
            return Err(FormError::ShapeMismatch {
                path: path.to_string(),
                expected: "group",
                found: value.kind_name(),
            });
        };

        let mut children = self.state.children.clone();
        for (name, slot) in &mut children {
            let Some(entry) = entries.get(name).filter(|entry| !entry.is_nil()) else {
                continue;
            };
            let child_path = path.child(PathSegment::Key(name.clone()));
            *slot = slot.patch_value_at(entry, &child_path)?;
        }

        Ok(self.rebuild(|s| {
            s.children = children;
            s.needs_validation = true;
        }))
    }

    /// Set the dirty flag of every descendant field.
    #[must_use]
    pub fn set_dirty(&self, dirty: bool) -> Self {
        let children = self.map_children(|child| child.set_dirty(dirty));
        self.rebuild(|s| s.children = children)
    }

    /// Set the touched flag of every descendant field.
    #[must_use]
    pub fn set_touched(&self, touched: bool) -> Self {
        let children = self.map_children(|child| child.set_touched(touched));
        self.rebuild(|s| s.children = children)
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("children", &self.state.children)
            .field("validators", &self.state.validators.len())
            .field("errors", &self.state.errors)
            .field("needs_validation", &self.state.needs_validation)
            .finish_non_exhaustive()
    }
}
