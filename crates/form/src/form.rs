//! Whole-form snapshots and value-hash extraction.

use crate::control::{Control, ControlKind};
use crate::element::Element;
use crate::error::FormResult;
use formulary_value::ValueHash;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Snapshot of a form: its listed elements in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Form {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    pub elements: Vec<Element>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON snapshot.
    pub fn from_json(json: &str) -> FormResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Elements carrying `name`, in document order.
    pub fn named(&self, name: &str) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|el| el.field_name() == Some(name))
            .collect()
    }

    /// The control registered under `name`, if any element carries it.
    pub fn control(&self, name: &str) -> Option<Control<'_>> {
        let members = self.named(name);
        if members.is_empty() {
            None
        } else {
            Some(Control::classify_group(members))
        }
    }

    /// Every named control, keyed by name in order of first appearance.
    /// Unnamed elements are skipped.
    pub fn controls(&self) -> IndexMap<&str, Control<'_>> {
        let mut groups: IndexMap<&str, Vec<&Element>> = IndexMap::new();
        for element in &self.elements {
            if let Some(name) = element.field_name() {
                groups.entry(name).or_default().push(element);
            }
        }

        groups
            .into_iter()
            .map(|(name, members)| (name, Control::classify_group(members)))
            .collect()
    }

    /// Flat field name -> value map; see [`extract_value_hash`].
    pub fn value_hash(&self) -> ValueHash {
        extract_value_hash(self)
    }
}

/// Extracts one value per named control.
///
/// Controls that carry no value (buttons and other unsupported elements)
/// are left out of the hash.
///
/// ```rust
/// use formulary_form::{Element, Form, extract_value_hash};
/// use formulary_value::FieldValue;
///
/// let form = Form::new()
///     .with_element(Element::input("text").with_name("user.name").with_value("Bob"))
///     .with_element(Element::input("number").with_name("user.age").with_value("x"))
///     .with_element(Element::input("submit").with_name("go"));
///
/// let hash = extract_value_hash(&form);
/// assert_eq!(hash["user.name"], FieldValue::from("Bob"));
/// assert_eq!(hash["user.age"], FieldValue::Null);
/// assert!(!hash.contains_key("go"));
/// ```
pub fn extract_value_hash(form: &Form) -> ValueHash {
    form.controls()
        .into_iter()
        .filter(|(_, control)| control.kind() != ControlKind::Unsupported)
        .map(|(name, control)| {
            let value = control.value();
            tracing::trace!(field = name, kind = ?control.kind(), "extracted control value");
            (name.to_owned(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulary_value::FieldValue;

    fn sample() -> Form {
        Form::new()
            .with_element(Element::input("text").with_name("a").with_value("1"))
            .with_element(Element::input("radio").with_name("r").with_value("x"))
            .with_element(Element::input("text").with_value("no name"))
            .with_element(Element::input("radio").with_name("r").with_value("y").with_checked(true))
            .with_element(Element::input("text").with_name("").with_value("empty name"))
    }

    #[test]
    fn groups_by_name_in_first_seen_order() {
        let form = sample();
        let controls = form.controls();
        let names: Vec<_> = controls.keys().copied().collect();
        assert_eq!(names, ["a", "r"]);
        assert_eq!(controls["r"].kind(), ControlKind::RadioGroup);
        assert_eq!(controls["r"].elements().len(), 2);
    }

    #[test]
    fn value_hash_has_one_entry_per_control() {
        let hash = sample().value_hash();
        assert_eq!(hash.len(), 2);
        assert_eq!(hash["a"], FieldValue::from("1"));
        assert_eq!(hash["r"], FieldValue::from("y"));
    }

    #[test]
    fn control_lookup() {
        let form = sample();
        assert_eq!(form.control("a").map(|c| c.kind()), Some(ControlKind::Text));
        assert!(form.control("missing").is_none());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(Form::from_json("{ not json").is_err());
    }
}
