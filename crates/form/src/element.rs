//! Input elements as the view adapter reports them.
//!
//! The tree never sees host events. An adapter describes the element that
//! changed with an [`InputElement`], and the helpers here turn it into the
//! primitive [`Value`] the tree stores.

use formtree_validator::value::{BlobRef, Value};
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::node::Field;

/// The kind of an input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
    TextArea,
    Select,
    Number,
    Checkbox,
    Radio,
    Date,
    File,
}

/// A snapshot of one input element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputElement {
    pub name: String,
    pub kind: InputKind,
    /// The raw text content (`value` attribute for radios).
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub files: Vec<BlobRef>,
}

impl InputElement {
    /// An element of `kind` with the given raw content.
    pub fn new(name: impl Into<String>, kind: InputKind, raw: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            raw: raw.into(),
            checked: false,
            files: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::new(name, InputKind::Text, raw)
    }

    pub fn number(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::new(name, InputKind::Number, raw)
    }

    pub fn date(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::new(name, InputKind::Date, raw)
    }

    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, InputKind::Checkbox, "")
        }
    }

    pub fn radio(name: impl Into<String>, raw: impl Into<String>, checked: bool) -> Self {
        Self {
            checked,
            ..Self::new(name, InputKind::Radio, raw)
        }
    }

    pub fn file(name: impl Into<String>, files: Vec<BlobRef>) -> Self {
        Self {
            files,
            ..Self::new(name, InputKind::File, "")
        }
    }

    #[must_use]
    pub fn is_radio(&self) -> bool {
        self.kind == InputKind::Radio
    }

    /// The value this element reports for a change.
    ///
    /// `radio_value` is what a radio stands for; other kinds ignore it.
    /// Numbers that are empty or unparseable come out as NaN, dates that do
    /// not parse as [`Value::InvalidDate`].
    #[must_use]
    pub fn change_value(&self, radio_value: &Value) -> Value {
        match self.kind {
            InputKind::Number => {
                let trimmed = self.raw.trim();
                Value::Number(trimmed.parse().unwrap_or(f64::NAN))
            }
            InputKind::Radio => radio_value.clone(),
            InputKind::Date => Value::parse_date(&self.raw),
            InputKind::Checkbox => Value::Bool(self.checked),
            InputKind::File => Value::Files(self.files.clone()),
            InputKind::Text | InputKind::TextArea | InputKind::Select => Value::Text(self.raw.clone()),
        }
    }
}

impl Field {
    /// Read the value back from the elements bound to this field.
    ///
    /// With no element nothing changes. A single element is read through
    /// [`InputElement::change_value`]. Several elements must all be radios of
    /// which at most one is checked; its raw value is taken, or `""` when
    /// none is.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnexpectedElement`] when several elements
    /// include a non-radio, and [`FormError::MultipleRadiosChecked`] when
    /// more than one radio is checked.
    pub fn patch_from_elements(&self, elements: &[InputElement]) -> Result<Self, FormError> {
        match elements {
            [] => Ok(self.clone()),
            [element] => Ok(self.patch_value(element.change_value(&Value::Undefined))),
            radios => {
                if let Some(stray) = radios.iter().find(|element| !element.is_radio()) {
                    let err = FormError::UnexpectedElement {
                        name: stray.name.clone(),
                    };
                    tracing::warn!(name = %stray.name, code = err.code(), "cannot patch field from elements");
                    return Err(err);
                }

                let mut checked = radios.iter().filter(|radio| radio.checked);
                let selected = checked.next();
                let extra = checked.count();
                if extra > 0 {
                    let name = radios[0].name.clone();
                    tracing::warn!(name = %name, count = extra + 1, "cannot patch field from elements");
                    return Err(FormError::MultipleRadiosChecked {
                        name,
                        count: extra + 1,
                    });
                }

                let raw = selected.map_or_else(String::new, |radio| radio.raw.clone());
                Ok(self.patch_value(Value::Text(raw)))
            }
        }
    }

    /// Take the value of the first checked radio, or `None` when none is
    /// checked.
    #[must_use]
    pub fn patch_from_radio(&self, radios: &[InputElement]) -> Option<Self> {
        radios
            .iter()
            .find(|radio| radio.checked)
            .map(|radio| self.patch_value(Value::Text(radio.raw.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::text(InputElement::text("a", "hi"), Value::from("hi"))]
    #[case::number(InputElement::number("a", " 12.5 "), Value::from(12.5))]
    #[case::checkbox(InputElement::checkbox("a", true), Value::from(true))]
    #[case::date(InputElement::date("a", "2024-02-29"), Value::parse_date("2024-02-29"))]
    #[case::bad_date(InputElement::date("a", "2023-02-29"), Value::InvalidDate)]
    #[case::radio(InputElement::radio("a", "red", true), Value::from("blue"))]
    fn change_values(#[case] element: InputElement, #[case] expected: Value) {
        assert_eq!(element.change_value(&Value::from("blue")), expected);
    }

    #[test]
    fn empty_number_is_nan() {
        let value = InputElement::number("n", "").change_value(&Value::Undefined);
        assert!(value.as_f64().unwrap().is_nan());
    }

    #[test]
    fn single_element_patches() {
        let field = Field::new("", []);
        let patched = field.patch_from_elements(&[InputElement::text("a", "x")]).unwrap();
        assert_eq!(patched.value(), &Value::from("x"));
        assert!(field.patch_from_elements(&[]).unwrap().ptr_eq(&field));
    }

    #[test]
    fn radios_pick_the_checked_one() {
        let field = Field::new("", []);
        let radios = [
            InputElement::radio("color", "red", false),
            InputElement::radio("color", "blue", true),
        ];
        assert_eq!(field.patch_from_elements(&radios).unwrap().value(), &Value::from("blue"));
        assert_eq!(field.patch_from_radio(&radios).unwrap().value(), &Value::from("blue"));

        let none = [
            InputElement::radio("color", "red", false),
            InputElement::radio("color", "blue", false),
        ];
        assert_eq!(field.patch_from_elements(&none).unwrap().value(), &Value::from(""));
        assert!(field.patch_from_radio(&none).is_none());
    }

    #[test]
    fn mixed_elements_are_rejected() {
        let field = Field::new("", []);
        let err = field
            .patch_from_elements(&[
                InputElement::radio("color", "red", false),
                InputElement::text("color", "x"),
            ])
            .unwrap_err();
        assert!(matches!(err, FormError::UnexpectedElement { name } if name == "color"));
    }

    #[test]
    fn two_checked_radios_are_rejected() {
        let field = Field::new("", []);
        let err = field
            .patch_from_elements(&[
                InputElement::radio("color", "red", true),
                InputElement::radio("color", "blue", true),
                InputElement::radio("color", "green", true),
            ])
            .unwrap_err();
        assert!(matches!(err, FormError::MultipleRadiosChecked { count: 3, .. }));
    }
}
