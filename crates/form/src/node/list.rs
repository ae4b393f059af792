use std::fmt;
use std::sync::Arc;

use formtree_validator::foundation::{FieldErrors, SharedValidator, run_all};

use super::Node;
use crate::error::FormError;
use crate::options::ValidateOptions;
use crate::path::{FieldPath, PathSegment};
use crate::value::FormValue;

/// A validator over a whole list.
pub type ListValidator = SharedValidator<List>;

/// Positional children validated together.
#[derive(Clone)]
pub struct List {
    state: Arc<ListState>,
}

#[derive(Clone)]
struct ListState {
    children: Vec<Node>,
    validators: Arc<[ListValidator]>,
    errors: Option<FieldErrors>,
    needs_validation: bool,
}

fn out_of_bounds(index: usize, len: usize) -> FormError {
    FormError::IndexOutOfBounds {
        path: format!("[{index}]"),
        index,
        len,
    }
}

impl List {
    /// A list without list-level validators.
    pub fn new<N: Into<Node>>(children: impl IntoIterator<Item = N>) -> Self {
        Self {
            state: Arc::new(ListState {
                children: children.into_iter().map(Into::into).collect(),
                validators: Arc::from([]),
                errors: None,
                needs_validation: false,
            }),
        }
    }

    /// Attach list-level validators (builder-style).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_validators(mut self, validators: impl IntoIterator<Item = ListValidator>) -> Self {
        let state = Arc::make_mut(&mut self.state);
        state.validators = validators.into_iter().collect();
        state.needs_validation = !state.validators.is_empty();
        self
    }

    fn rebuild(&self, f: impl FnOnce(&mut ListState)) -> Self {
        let mut state = ListState::clone(&self.state);
        f(&mut state);
        Self {
            state: Arc::new(state),
        }
    }

    fn with_children(&self, children: Vec<Node>) -> Self {
        self.rebuild(|s| {
            s.children = children;
            s.needs_validation = true;
        })
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.state.children.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.state.children.iter()
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
    pub fn validators(&self) -> &[ListValidator] {
        &self.state.validators
    }

    /// Errors of the list validators only.
    #[must_use]
    pub fn errors(&self) -> Option<&FieldErrors> {
        self.state.errors.as_ref()
    }

    #[must_use]
    pub fn needs_validation(&self) -> bool {
        self.state.needs_validation || self.state.children.iter().any(Node::needs_validation)
    }

    /// Validated, without list errors and with every entry valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.state.needs_validation
            && self.state.errors.is_none()
            && self.state.children.iter().all(Node::is_valid)
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        !self.needs_validation() && !self.is_valid()
    }

    #[must_use]
    pub fn dirty(&self) -> bool {
        self.state.children.iter().any(Node::dirty)
    }

    #[must_use]
    pub fn touched(&self) -> bool {
        self.state.children.iter().any(Node::touched)
    }

    #[must_use]
    pub fn value(&self) -> FormValue {
        FormValue::List(self.state.children.iter().map(Node::value).collect())
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    #[must_use]
    pub fn validate(&self) -> Self {
        self.validate_with(ValidateOptions::default())
    }

    /// Validate the entries, then the list validators.
    #[must_use]
    pub fn validate_with(&self, options: ValidateOptions) -> Self {
        if !self.needs_validation() {
            return self.clone();
        }

        let children: Vec<Node> = self
            .state
            .children
            .iter()
            .map(|child| child.validate_with(options))
            .collect();
        let skip = options.skip_if_children_invalid && !children.iter().all(Node::is_valid);

        let validated = self.rebuild(|s| {
            s.children = children;
            s.needs_validation = false;
        });
        if skip {
            tracing::trace!(kind = "list", skipped = true, "validation ran");
            return validated;
        }

        let errors = run_all(&self.state.validators, &validated);
        tracing::trace!(
            kind = "list",
            skipped = false,
            error_count = errors.as_ref().map_or(0, FieldErrors::len),
            "validation ran"
        );
        validated.rebuild(|s| s.errors = errors)
    }

    #[must_use]
    pub fn set_validators(&self, validators: impl IntoIterator<Item = ListValidator>) -> Self {
        let validators: Arc<[ListValidator]> = validators.into_iter().collect();
        self.rebuild(|s| {
            s.validators = validators;
            s.needs_validation = true;
            s.errors = None;
        })
    }

    // ------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------

    /// Replace entries by position.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::IndexOutOfBounds`] for a position past the end.
    pub fn patch<N: Into<Node>>(&self, overrides: impl IntoIterator<Item = (usize, N)>) -> Result<Self, FormError> {
        let mut children = self.state.children.clone();
        let len = children.len();
        for (index, node) in overrides {
            let slot = children.get_mut(index).ok_or_else(|| out_of_bounds(index, len))?;
            *slot = node.into();
        }
        Ok(self.with_children(children))
    }

    pub(crate) fn replace(&self, index: usize, node: Node) -> Self {
        let mut children = self.state.children.clone();
        if let Some(slot) = children.get_mut(index) {
            *slot = node;
        }
        self.with_children(children)
    }

    /// Overwrite values by position. Nil and extra entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ShapeMismatch`] when `value` is not a list or an
    /// entry does not fit its node.
    pub fn patch_value(&self, value: &FormValue) -> Result<Self, FormError> {
        self.patch_value_at(value, &FieldPath::root())
    }

    pub(crate) fn patch_value_at(&self, value: &FormValue, path: &FieldPath) -> Result<Self, FormError> {
        let FormValue::List(items) = value else {
            return Err(FormError::ShapeMismatch {
                path: path.to_string(),
                expected: "list",
                found: value.kind_name(),
            });
        };

        let children = self
            .state
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| match items.get(index) {
                Some(item) if !item.is_nil() => {
                    child.patch_value_at(item, &path.child(PathSegment::Index(index)))
                }
                _ => Ok(child.clone()),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.with_children(children))
    }

    /// Append an entry.
    #[must_use]
    pub fn push(&self, node: impl Into<Node>) -> Self {
        let mut children = self.state.children.clone();
        children.push(node.into());
        self.with_children(children)
    }

    /// Insert an entry at `index`, shifting later entries.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::IndexOutOfBounds`] when `index > len`.
    pub fn insert(&self, index: usize, node: impl Into<Node>) -> Result<Self, FormError> {
        let mut children = self.state.children.clone();
        if index > children.len() {
            return Err(out_of_bounds(index, children.len()));
        }
        children.insert(index, node.into());
        Ok(self.with_children(children))
    }

    /// Remove the entry at `index`, returning the new list and the entry.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::IndexOutOfBounds`] when `index >= len`.
    pub fn remove(&self, index: usize) -> Result<(Self, Node), FormError> {
        let mut children = self.state.children.clone();
        if index >= children.len() {
            return Err(out_of_bounds(index, children.len()));
        }
        let removed = children.remove(index);
        Ok((self.with_children(children), removed))
    }

    /// Exchange two entries.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::IndexOutOfBounds`] when either index is past the
    /// end.
    pub fn swap(&self, a: usize, b: usize) -> Result<Self, FormError> {
        let len = self.len();
        if let Some(index) = [a, b].into_iter().find(|&index| index >= len) {
            return Err(out_of_bounds(index, len));
        }
        let mut children = self.state.children.clone();
        children.swap(a, b);
        Ok(self.with_children(children))
    }

    #[must_use]
    pub fn set_dirty(&self, dirty: bool) -> Self {
        let children = self.state.children.iter().map(|c| c.set_dirty(dirty)).collect();
        self.rebuild(|s| s.children = children)
    }

    #[must_use]
    pub fn set_touched(&self, touched: bool) -> Self {
        let children = self.state.children.iter().map(|c| c.set_touched(touched)).collect();
        self.rebuild(|s| s.children = children)
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("children", &self.state.children)
            .field("validators", &self.state.validators.len())
            .field("errors", &self.state.errors)
            .field("needs_validation", &self.state.needs_validation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Field;
    use formtree_validator::foundation::{ValidateExt, ValidationError, from_fn};
    use formtree_validator::validators::required;
    use formtree_validator::value::Value;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn at_most_two() -> ListValidator {
        from_fn(|list: &List| {
            if list.len() <= 2 {
                Ok(())
            } else {
                Err(ValidationError::new("tooMany", "at most two entries").into())
            }
        })
        .shared()
    }

    fn tags() -> List {
        List::new([Field::new("a", []), Field::new("b", [])]).with_validators([at_most_two()])
    }

    #[test]
    fn validity_includes_entries() {
        let list = List::new([Field::new("", [required().shared()])]).validate_with(ValidateOptions::eager());
        assert!(list.errors().is_none());
        assert!(!list.is_valid());
        assert!(list.is_invalid());
    }

    #[test]
    fn push_reruns_list_validators() {
        let list = tags().validate();
        assert!(list.is_valid());

        let grown = list.push(Field::new("c", []));
        assert!(grown.needs_validation());
        let grown = grown.validate();
        assert!(grown.errors().unwrap().contains("tooMany"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn insert_remove_swap() {
        let list = tags();
        let list = list.insert(0, Field::new("z", [])).unwrap();
        assert_eq!(list.value().to_json(), json!(["z", "a", "b"]));

        let (list, removed) = list.remove(1).unwrap();
        assert_eq!(removed.value(), FormValue::Field(Value::from("a")));

        let list = list.swap(0, 1).unwrap();
        assert_eq!(list.value().to_json(), json!(["b", "z"]));

        assert!(list.insert(3, Field::new("x", [])).is_err());
        assert!(list.insert(2, Field::new("x", [])).is_ok());
        assert!(list.remove(2).is_err());
        assert!(matches!(
            list.swap(0, 7),
            Err(FormError::IndexOutOfBounds { index: 7, len: 2, .. })
        ));
    }

    #[test]
    fn patch_by_index() {
        let list = tags();
        let patched = list.patch([(1, Field::new("y", []))]).unwrap();
        assert!(patched.get(0).unwrap().ptr_eq(list.get(0).unwrap()));
        assert_eq!(patched.value().to_json(), json!(["a", "y"]));

        assert!(matches!(
            list.patch([(2, Field::new("y", []))]),
            Err(FormError::IndexOutOfBounds { index: 2, len: 2, .. })
        ));
    }

    #[test]
    fn patch_value_skips_nil_and_extra() {
        let list = tags();
        let patched = list.patch_value(&json!([null, "q", "extra"]).into()).unwrap();
        assert_eq!(patched.value().to_json(), json!(["a", "q"]));

        assert!(matches!(
            list.patch_value(&json!({ "a": 1 }).into()),
            Err(FormError::ShapeMismatch { expected: "list", found: "group", .. })
        ));
    }
}
