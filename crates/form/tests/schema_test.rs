use formtree_form::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

const CHECKOUT: &str = r#"{
    "kind": "group",
    "fields": {
        "email": {
            "kind": "field",
            "type": "text",
            "rules": [{ "rule": "required" }, { "rule": "email" }]
        },
        "card": {
            "kind": "field",
            "type": "text",
            "rules": [{ "rule": "required" }, { "rule": "credit_card" }]
        },
        "zip": {
            "kind": "field",
            "type": "text",
            "initial": "0150",
            "rules": [{ "rule": "pattern", "pattern": "^\\d{4}$" }]
        },
        "items": {
            "kind": "list",
            "items": [
                { "kind": "field", "type": "number", "initial": 1, "rules": [{ "rule": "number_range", "min": 1, "max": 9 }] }
            ]
        },
        "gift": {
            "kind": "group",
            "skip_if_children_invalid": false,
            "fields": {
                "wrap": { "kind": "field", "type": "bool" }
            }
        }
    }
}"#;

#[test]
fn schema_builds_a_working_form() {
    let form = NodeSchema::from_json_str(CHECKOUT).unwrap().build().unwrap();
    assert_eq!(
        form.to_json(),
        json!({ "email": "", "card": "", "zip": "0150", "items": [1], "gift": { "wrap": false } })
    );

    let form = form.validate();
    assert!(form.is_invalid());

    let form = form
        .patch_value(&json!({ "email": "ann@example.com", "card": "4111 1111 1111 1111" }).into())
        .unwrap()
        .validate();
    assert!(form.is_valid());
}

#[test]
fn schema_rules_become_attributes() {
    let form = NodeSchema::from_json_str(CHECKOUT).unwrap().build().unwrap();
    let binding = form.bind(std::sync::Arc::new(|_: Node, _: ChangeReason| {}), "");

    let zip = binding.field("zip").unwrap();
    assert_eq!(zip.props().attributes.pattern.as_deref(), Some(r"^\d{4}$"));
    assert_eq!(zip.native_attributes(true).required, None);

    let quantity = binding.child("items").and_then(|items| items.at(0)).and_then(Binding::as_field).unwrap();
    assert_eq!(quantity.name(), "items[0]");
    assert_eq!(quantity.props().attributes.max, Some(9.0));
}

#[test]
fn schema_round_trips_through_serde() {
    let schema = NodeSchema::from_json_str(CHECKOUT).unwrap();
    let text = serde_json::to_string(&schema).unwrap();
    assert_eq!(NodeSchema::from_json_str(&text).unwrap(), schema);
}
