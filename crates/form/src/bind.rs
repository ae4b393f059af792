//! Change propagation from inputs back to the root of the tree.
//!
//! [`Node::bind`] walks a tree and produces a [`Binding`] mirroring it. Each
//! field binding carries what an input needs to render (its name, display
//! value and native attributes) plus hooks for user events. A hook builds
//! the updated field, and every ancestor binding folds that into an updated
//! copy of itself, so the callback given at the root always receives a whole
//! new tree.
//!
//! Hooks close over the tree as it was when bound. The adapter is expected
//! to bind again after every update.

use std::fmt;
use std::sync::Arc;

use formtree_validator::foundation::NativeAttributes;
use formtree_validator::value::Value;
use indexmap::IndexMap;
use serde::Serialize;

use crate::element::{InputElement, InputKind};
use crate::node::{Field, Group, List, Node};

/// Why a tree update was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeReason {
    /// The user edited the value.
    Change,
    /// The user left the input.
    Blur,
    /// The host filled the input in while it gained focus.
    Focus,
}

/// Receives every updated tree.
pub type OnChange = Arc<dyn Fn(Node, ChangeReason) + Send + Sync>;

/// What an input needs to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputProps {
    pub name: String,
    /// The display form of the value.
    pub value: String,
    /// Whether the value is `true` (checkboxes).
    pub checked: bool,
    /// Native attributes, without `required`: a required input the host
    /// refuses to submit would hide the tree's own messages.
    #[serde(flatten)]
    pub attributes: NativeAttributes,
}

/// What a single radio of a set needs to render.
#[derive(Clone)]
pub struct RadioProps {
    pub name: String,
    pub value: String,
    /// Whether the field currently holds this radio's value.
    pub checked: bool,
    pub attributes: NativeAttributes,
    select: Arc<dyn Fn() + Send + Sync>,
}

impl RadioProps {
    /// Choose this radio.
    pub fn select(&self) {
        (self.select)();
    }
}

impl fmt::Debug for RadioProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioProps")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("checked", &self.checked)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// FIELD BINDING
// ============================================================================

/// Props and event hooks of one field.
#[derive(Clone)]
pub struct FieldBinding {
    props: InputProps,
    field: Field,
    on_change: OnChange,
}

impl FieldBinding {
    fn new(field: &Field, name: String, on_change: OnChange) -> Self {
        let value = field.value();
        Self {
            props: InputProps {
                name,
                value: value.to_display(),
                checked: matches!(value, Value::Bool(true)),
                attributes: native_attributes(field, false),
            },
            field: field.clone(),
            on_change,
        }
    }

    #[must_use]
    pub fn props(&self) -> &InputProps {
        &self.props
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.props.name
    }

    /// The field as it was when bound.
    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// The field's native attributes, `required` included only on request.
    #[must_use]
    pub fn native_attributes(&self, required_enabled: bool) -> NativeAttributes {
        native_attributes(&self.field, required_enabled)
    }

    fn emit(&self, field: Field, reason: ChangeReason) {
        (self.on_change)(Node::Field(field), reason);
    }

    /// The user changed the value.
    pub fn on_change(&self, value: impl Into<Value>) {
        self.emit(self.field.change(value), ChangeReason::Change);
    }

    /// The user left the input, which showed `observed`.
    pub fn on_blur(&self, observed: &Value) {
        self.emit(self.field.blur(observed), ChangeReason::Blur);
    }

    /// The input gained focus showing `observed`; emits only on autofill.
    pub fn on_focus(&self, observed: &Value) {
        if let Some(filled) = self.field.focus(observed) {
            self.emit(filled, ChangeReason::Focus);
        }
    }

    /// [`on_change`](Self::on_change) with the value read from `element`.
    ///
    /// A radio reports the value currently held by the field.
    pub fn on_element_change(&self, element: &InputElement) {
        self.on_change(element.change_value(self.field.value()));
    }

    /// [`on_blur`](Self::on_blur) with the value read from `element`.
    ///
    /// Leaving an unchecked radio or checkbox says nothing about the field
    /// and is ignored.
    pub fn on_element_blur(&self, element: &InputElement) {
        if matches!(element.kind, InputKind::Radio | InputKind::Checkbox) && !element.checked {
            return;
        }
        self.on_blur(&element.change_value(self.field.value()));
    }

    /// [`on_focus`](Self::on_focus) with the value read from `element`.
    pub fn on_element_focus(&self, element: &InputElement) {
        self.on_focus(&element.change_value(self.field.value()));
    }

    /// Props for the radio standing for `value`.
    #[must_use]
    pub fn to_radio(&self, value: impl Into<Value>) -> RadioProps {
        let value = value.into();
        let binding = self.clone();
        RadioProps {
            name: self.props.name.clone(),
            value: value.to_display(),
            checked: self.field.value().same_as(&value),
            attributes: self.props.attributes.clone(),
            select: Arc::new(move || binding.on_change(value.clone())),
        }
    }
}

fn native_attributes(field: &Field, required_enabled: bool) -> NativeAttributes {
    let mut attributes = field.attributes();
    if !required_enabled {
        attributes.required = None;
    }
    attributes
}

impl fmt::Debug for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinding")
            .field("props", &self.props)
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// COMPOSITE BINDINGS
// ============================================================================

/// Bindings of a group's children, by name.
#[derive(Debug, Clone)]
pub struct GroupBinding {
    children: IndexMap<String, Binding>,
}

impl GroupBinding {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.children.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.children.iter().map(|(name, binding)| (name.as_str(), binding))
    }
}

/// Bindings of a list's entries, by position.
#[derive(Debug, Clone)]
pub struct ListBinding {
    entries: Vec<Binding>,
}

impl ListBinding {
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Binding> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The binding of any node, shaped like the tree.
#[derive(Debug, Clone)]
pub enum Binding {
    Field(FieldBinding),
    Group(GroupBinding),
    List(ListBinding),
}

impl Binding {
    #[must_use]
    pub fn as_field(&self) -> Option<&FieldBinding> {
        match self {
            Self::Field(binding) => Some(binding),
            _ => None,
        }
    }

    /// The binding of the field child `name` of a group binding.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldBinding> {
        self.child(name).and_then(Self::as_field)
    }

    /// The binding of the child `name` of a group binding.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Binding> {
        match self {
            Self::Group(group) => group.get(name),
            _ => None,
        }
    }

    /// The binding of the group child `name` of a group binding.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Binding> {
        self.child(name).filter(|child| matches!(child, Self::Group(_)))
    }

    /// The binding of entry `index` of a list binding.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Binding> {
        match self {
            Self::List(list) => list.get(index),
            _ => None,
        }
    }
}

// ============================================================================
// BINDING A TREE
// ============================================================================

/// Input names below a child: a group gets a `.` appended so its own
/// children read `parent.child`.
fn child_prefix(base: String, child: &Node) -> String {
    match child {
        Node::Group(_) => base + ".",
        Node::Field(_) | Node::List(_) => base,
    }
}

fn bind_group(group: &Group, on_change: &OnChange, prefix: &str) -> GroupBinding {
    let children = group
        .children()
        .map(|(name, child)| {
            let snapshot = group.clone();
            let parent = Arc::clone(on_change);
            let key = name.to_owned();
            let fold: OnChange = Arc::new(move |updated: Node, reason: ChangeReason| {
                parent(Node::Group(snapshot.replace(&key, updated)), reason);
            });
            let child_prefix = child_prefix(format!("{prefix}{name}"), child);
            (name.to_owned(), child.bind(fold, &child_prefix))
        })
        .collect();
    GroupBinding { children }
}

fn bind_list(list: &List, on_change: &OnChange, prefix: &str) -> ListBinding {
    let entries = list
        .iter()
        .enumerate()
        .map(|(index, child)| {
            let snapshot = list.clone();
            let parent = Arc::clone(on_change);
            let fold: OnChange = Arc::new(move |updated: Node, reason: ChangeReason| {
                parent(Node::List(snapshot.replace(index, updated)), reason);
            });
            let child_prefix = child_prefix(format!("{prefix}[{index}]"), child);
            child.bind(fold, &child_prefix)
        })
        .collect();
    ListBinding { entries }
}

impl Node {
    /// Bind the tree to `on_change`, naming inputs below `prefix`.
    ///
    /// A field bound directly is named `prefix`. Group children are named
    /// `prefix` + key, list entries `prefix[index]`, and nested groups add a
    /// `.` before their own children.
    #[must_use]
    pub fn bind(&self, on_change: OnChange, prefix: &str) -> Binding {
        match self {
            Self::Field(field) => Binding::Field(FieldBinding::new(field, prefix.to_owned(), on_change)),
            Self::Group(group) => Binding::Group(bind_group(group, &on_change, prefix)),
            Self::List(list) => Binding::List(bind_list(list, &on_change, prefix)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formtree_validator::foundation::ValidateExt;
    use formtree_validator::validators::{length_range, required};
    use std::sync::Mutex;

    fn recorder() -> (OnChange, Arc<Mutex<Vec<(Node, ChangeReason)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let on_change: OnChange = Arc::new(move |node: Node, reason: ChangeReason| sink.lock().unwrap().push((node, reason)));
        (on_change, seen)
    }

    #[test]
    fn props_render_display_values() {
        let field = Field::new(3.0, [required().shared(), length_range(Some(1), Some(4)).shared()]);
        let (on_change, _) = recorder();
        let binding = Node::from(field).bind(on_change, "qty");
        let binding = binding.as_field().unwrap();

        assert_eq!(binding.props().value, "3");
        assert_eq!(binding.props().attributes.required, None);
        assert_eq!(binding.props().attributes.max_length, Some(4));
        assert_eq!(binding.native_attributes(true).required, Some(true));
    }

    #[test]
    fn checked_follows_true() {
        let (on_change, _) = recorder();
        let binding = Node::from(Field::new(true, [])).bind(on_change, "ok");
        assert!(binding.as_field().unwrap().props().checked);
    }

    #[test]
    fn radio_select_changes_value() {
        let (on_change, seen) = recorder();
        let binding = Node::from(Field::new("red", [])).bind(on_change, "color");
        let binding = binding.as_field().unwrap();

        let red = binding.to_radio("red");
        let blue = binding.to_radio("blue");
        assert!(red.checked);
        assert!(!blue.checked);

        blue.select();
        let seen = seen.lock().unwrap();
        let (node, reason) = &seen[0];
        assert_eq!(*reason, ChangeReason::Change);
        assert_eq!(node.as_field().unwrap().value(), &Value::from("blue"));
    }

    #[test]
    fn unchecked_radio_blur_is_ignored() {
        let (on_change, seen) = recorder();
        let binding = Node::from(Field::new("red", [])).bind(on_change, "color");
        let binding = binding.as_field().unwrap();

        binding.on_element_blur(&InputElement::radio("color", "blue", false));
        assert!(seen.lock().unwrap().is_empty());

        binding.on_element_blur(&InputElement::text("color", "red"));
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
