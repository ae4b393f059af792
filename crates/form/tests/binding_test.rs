use std::sync::{Arc, Mutex};

use formtree_form::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

type Seen = Arc<Mutex<Vec<(Node, ChangeReason)>>>;

fn recorder() -> (OnChange, Seen) {
    let seen: Seen = Arc::default();
    let sink = Arc::clone(&seen);
    let on_change: OnChange = Arc::new(move |node: Node, reason: ChangeReason| {
        sink.lock().unwrap().push((node, reason));
    });
    (on_change, seen)
}

fn last(seen: &Seen) -> (Node, ChangeReason) {
    seen.lock().unwrap().last().cloned().expect("no update emitted")
}

fn profile() -> Node {
    Group::new([
        ("name", Node::from(Field::new("", [required().shared()]))),
        (
            "address",
            Group::new([("city", Field::new("Oslo", []))]).into(),
        ),
        (
            "phones",
            List::new([
                Node::from(Field::new("+47", [phone().shared()])),
                Group::new([("number", Field::new("", []))]).into(),
            ])
            .into(),
        ),
    ])
    .into()
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

#[test]
fn input_names_follow_the_tree() {
    let (on_change, _) = recorder();
    let binding = profile().bind(on_change, "");

    assert_eq!(binding.field("name").unwrap().name(), "name");

    let address = binding.group("address").unwrap();
    assert_eq!(address.field("city").unwrap().name(), "address.city");

    let phones = binding.child("phones").unwrap();
    assert_eq!(phones.at(0).unwrap().as_field().unwrap().name(), "phones[0]");
    assert_eq!(
        phones.at(1).unwrap().field("number").unwrap().name(),
        "phones[1].number"
    );
}

#[test]
fn prefix_is_prepended() {
    let (on_change, _) = recorder();
    let binding = profile().bind(on_change, "user.");
    let city = binding.group("address").unwrap().field("city").unwrap();
    assert_eq!(city.name(), "user.address.city");
}

#[test]
fn navigation_rejects_wrong_kinds() {
    let (on_change, _) = recorder();
    let binding = profile().bind(on_change, "");
    assert!(binding.group("name").is_none());
    assert!(binding.field("address").is_none());
    assert!(binding.at(0).is_none());
}

// ---------------------------------------------------------------------------
// Hooks
// ---------------------------------------------------------------------------

#[test]
fn change_folds_into_a_new_root() {
    let (on_change, seen) = recorder();
    let tree = profile();
    let binding = tree.bind(on_change, "");

    binding.field("name").unwrap().on_change("Ann");
    let (root, reason) = last(&seen);
    assert_eq!(reason, ChangeReason::Change);
    assert_eq!(root.to_json()["name"], json!("Ann"));

    let name = root.get(&"name".parse().unwrap()).unwrap();
    assert!(name.dirty() && name.touched() && name.needs_validation());

    // siblings are shared with the bound tree
    let address = FieldPath::root().key("address");
    assert!(root.get(&address).unwrap().ptr_eq(tree.get(&address).unwrap()));
    assert!(root.needs_validation());
}

#[test]
fn change_deep_in_a_list() {
    let (on_change, seen) = recorder();
    let binding = profile().bind(on_change, "");

    binding
        .child("phones")
        .and_then(|phones| phones.at(1))
        .and_then(|entry| entry.field("number"))
        .unwrap()
        .on_change("555");

    let (root, _) = last(&seen);
    assert_eq!(root.to_json()["phones"], json!(["+47", { "number": "555" }]));
}

#[test]
fn blur_touches_without_changing_the_value() {
    let (on_change, seen) = recorder();
    let binding = profile().bind(on_change, "");
    let city = binding.group("address").unwrap().field("city").unwrap();

    city.on_blur(&Value::from("Oslo"));
    let (root, reason) = last(&seen);
    assert_eq!(reason, ChangeReason::Blur);
    let field = root.get(&"address.city".parse().unwrap()).unwrap();
    assert!(field.touched());
    assert!(!field.dirty());

    city.on_blur(&Value::from("Bergen"));
    let (root, _) = last(&seen);
    let field = root.get(&"address.city".parse().unwrap()).unwrap();
    assert!(field.dirty());
    assert_eq!(field.to_json(), json!("Oslo"));
}

#[test]
fn focus_only_reports_autofill() {
    let (on_change, seen) = recorder();
    let binding = profile().bind(on_change, "");
    let name = binding.field("name").unwrap();

    name.on_focus(&Value::from(""));
    assert!(seen.lock().unwrap().is_empty());

    name.on_focus(&Value::from("Ann"));
    let (root, reason) = last(&seen);
    assert_eq!(reason, ChangeReason::Focus);
    assert_eq!(root.to_json()["name"], json!("Ann"));
}

#[test]
fn element_hooks_read_values() {
    let (on_change, seen) = recorder();
    let tree: Node = Group::new([("age", Field::new(30, []))]).into();
    let binding = tree.bind(on_change, "");
    let age = binding.field("age").unwrap();

    age.on_element_change(&InputElement::number("age", ""));
    let (root, _) = last(&seen);
    let value = root.value();
    let age_value = value.get("age").and_then(FormValue::as_value).unwrap();
    assert!(age_value.as_f64().unwrap().is_nan());
}

#[test]
fn cleared_number_input_is_not_autofill() {
    let (on_change, seen) = recorder();
    let tree: Node = Group::new([("qty", Field::new(f64::NAN, []))]).into();
    let binding = tree.bind(on_change, "");
    let qty = binding.field("qty").unwrap();

    qty.on_element_focus(&InputElement::number("qty", ""));
    assert!(seen.lock().unwrap().is_empty());

    qty.on_element_blur(&InputElement::number("qty", ""));
    let (root, reason) = last(&seen);
    assert_eq!(reason, ChangeReason::Blur);
    let field = root.get(&"qty".parse().unwrap()).unwrap();
    assert!(field.touched());
    assert!(!field.dirty());
}

// ---------------------------------------------------------------------------
// Props
// ---------------------------------------------------------------------------

#[test]
fn props_carry_display_value_and_attributes() {
    let (on_change, _) = recorder();
    let tree: Node = Group::new([
        (
            "born",
            Field::new(Value::parse_date("1990-04-02"), [required().shared()]),
        ),
        (
            "score",
            Field::new(f64::NAN, [number_range(Some(1.0), Some(10.0)).shared()]),
        ),
    ])
    .into();
    let binding = tree.bind(on_change, "");

    let born = binding.field("born").unwrap().props();
    assert_eq!(born.value, "1990-04-02");
    assert_eq!(born.attributes.required, None);

    let score = binding.field("score").unwrap();
    assert_eq!(score.props().value, "");
    assert_eq!(
        serde_json::to_value(score.props()).unwrap(),
        json!({ "name": "score", "value": "", "checked": false, "min": 1.0, "max": 10.0 })
    );
}
