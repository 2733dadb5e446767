//! Snapshot of one listed form element.

use formulary_value::FileHandle;
use serde::{Deserialize, Serialize};

/// Value a checkbox or radio reports when it has no `value` attribute.
const DEFAULT_CHECKABLE_VALUE: &str = "on";

/// Read-only snapshot of an `input`, `textarea`, `select`, `option` or other
/// listed element, taken at extraction time.
///
/// Field names mirror the DOM properties so snapshots serialised by a
/// browser host deserialize directly:
///
/// ```rust
/// use formulary_form::Element;
///
/// let el: Element = serde_json::from_str(
///     r#"{ "tag": "input", "type": "number", "name": "age", "value": "42" }"#,
/// ).unwrap();
/// assert_eq!(el.input_type(), "number");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Element {
    /// Tag name, compared case-insensitively.
    pub tag: String,

    /// The `type` attribute of an input.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The `value` attribute, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Text content (used by options without a `value`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    pub checked: bool,
    pub selected: bool,
    pub disabled: bool,

    /// Presence of the `multiple` attribute.
    pub multiple: bool,

    /// File list of a file input; `None` when the host exposes none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileHandle>>,

    /// Options of a select, in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<Element>,
}

impl Element {
    /// Creates an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// `<input type="...">`.
    pub fn input(input_type: impl Into<String>) -> Self {
        Self {
            input_type: Some(input_type.into()),
            ..Self::new("input")
        }
    }

    pub fn textarea() -> Self {
        Self::new("textarea")
    }

    pub fn select() -> Self {
        Self::new("select")
    }

    /// `<option value="...">`.
    pub fn option(value: impl Into<String>) -> Self {
        Self::new("option").with_value(value)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_files(mut self, files: Vec<FileHandle>) -> Self {
        self.files = Some(files);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_option(mut self, option: Element) -> Self {
        self.options.push(option);
        self
    }

    /// True if the tag matches, ignoring ASCII case.
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Lower-cased input type; inputs without one are `text`.
    pub fn input_type(&self) -> String {
        self.input_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map_or_else(|| "text".to_owned(), str::to_ascii_lowercase)
    }

    /// Name, with the empty name treated as absent.
    pub fn field_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// True for radio and checkbox inputs.
    pub fn is_checkable(&self) -> bool {
        self.is("input") && matches!(self.input_type().as_str(), "radio" | "checkbox")
    }

    /// The value the DOM would report for this element.
    ///
    /// Options fall back to their whitespace-collapsed text, checkables to
    /// `"on"`, everything else to the empty string.
    pub fn resolved_value(&self) -> String {
        if let Some(value) = &self.value {
            return value.clone();
        }
        if self.is("option") {
            return self
                .text
                .as_deref()
                .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
        }
        if self.is_checkable() {
            return DEFAULT_CHECKABLE_VALUE.to_owned();
        }
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_type_defaults_to_text() {
        assert_eq!(Element::new("input").input_type(), "text");
        assert_eq!(Element::input(" NUMBER ").input_type(), "number");
        assert_eq!(Element::input("").input_type(), "text");
    }

    #[test]
    fn option_value_falls_back_to_text() {
        let opt = Element::new("option").with_text("  New \n York ");
        assert_eq!(opt.resolved_value(), "New York");
        assert_eq!(Element::option("ny").with_text("New York").resolved_value(), "ny");
    }

    #[test]
    fn checkable_value_defaults_to_on() {
        assert_eq!(Element::input("checkbox").resolved_value(), "on");
        assert_eq!(Element::input("radio").with_value("a").resolved_value(), "a");
        assert_eq!(Element::input("text").resolved_value(), "");
    }

    #[test]
    fn empty_name_is_absent() {
        assert_eq!(Element::input("text").with_name("").field_name(), None);
        assert_eq!(Element::input("text").with_name("a").field_name(), Some("a"));
    }

    #[test]
    fn tag_comparison_ignores_case() {
        assert!(Element::new("SELECT").is("select"));
    }
}
