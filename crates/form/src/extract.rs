//! Value extraction.
//!
//! Extraction never fails. Missing or unusable input resolves to
//! [`FieldValue::Null`] or an empty sequence; rejecting such values is the
//! job of validation rules.

use crate::control::Control;
use crate::element::Element;
use formulary_value::FieldValue;

/// Extracts the semantic value of a classified control.
///
/// A disabled single control yields `Null`; disabled members are left out of
/// group results.
///
/// ```rust
/// use formulary_form::{Control, Element, extract};
/// use formulary_value::FieldValue;
///
/// let age = Element::input("number").with_value("42");
/// assert_eq!(extract(&Control::classify(&age)), FieldValue::from(42.0));
///
/// let bad = Element::input("number").with_value("abc");
/// assert_eq!(extract(&Control::classify(&bad)), FieldValue::Null);
/// ```
pub fn extract(control: &Control<'_>) -> FieldValue {
    match control {
        Control::Text(el) | Control::Option(el) => {
            if el.disabled {
                FieldValue::Null
            } else {
                FieldValue::Text(el.resolved_value())
            }
        }
        Control::Number(el) => {
            if el.disabled {
                FieldValue::Null
            } else {
                parse_number(&el.resolved_value()).map_or(FieldValue::Null, FieldValue::Number)
            }
        }
        Control::File(el) => match (&el.files, el.disabled) {
            (Some(files), false) => files
                .first()
                .cloned()
                .map_or(FieldValue::Null, FieldValue::File),
            _ => FieldValue::Null,
        },
        Control::FileMultiple(el) => match (&el.files, el.disabled) {
            (Some(files), false) => {
                FieldValue::Array(files.iter().cloned().map(FieldValue::File).collect())
            }
            _ => FieldValue::Null,
        },
        Control::SelectSingle(el) => {
            if el.disabled {
                return FieldValue::Null;
            }
            select_value(el).map_or(FieldValue::Null, FieldValue::Text)
        }
        Control::SelectMultiple(el) => {
            if el.disabled {
                return FieldValue::Null;
            }
            FieldValue::Array(
                el.options
                    .iter()
                    .filter(|opt| opt.selected && !opt.disabled)
                    .map(|opt| extract(&Control::Option(opt)))
                    .collect(),
            )
        }
        Control::RadioGroup(members) => members
            .iter()
            .find(|m| m.checked && !m.disabled)
            .map_or(FieldValue::Null, |m| extract(&Control::Text(*m))),
        Control::CheckboxGroup(members) => FieldValue::Array(
            members
                .iter()
                .filter(|m| m.checked && !m.disabled)
                .map(|m| extract(&Control::Text(*m)))
                .collect(),
        ),
        Control::Group(members) if members.is_empty() => FieldValue::Null,
        Control::Group(members) => FieldValue::Array(
            members
                .iter()
                .filter(|m| !m.disabled)
                .map(|m| extract(&member_control(m)))
                .collect(),
        ),
        Control::Unsupported(_) => FieldValue::Null,
    }
}

impl Control<'_> {
    /// Shorthand for [`extract`].
    pub fn value(&self) -> FieldValue {
        extract(self)
    }
}

/// A member of a mixed group extracts on its own; checkables contribute
/// their own value rather than a group of one.
fn member_control<'a>(member: &'a Element) -> Control<'a> {
    match Control::classify(member) {
        Control::RadioGroup(_) | Control::CheckboxGroup(_) => Control::Text(member),
        other => other,
    }
}

/// Parses a numeric input value. Blank, non-numeric and non-finite input
/// yields `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Value of a single select: the first selected option, else the first
/// enabled option (default selectedness). Empty values count as none.
fn select_value(select: &Element) -> Option<String> {
    select
        .options
        .iter()
        .find(|opt| opt.selected)
        .or_else(|| select.options.iter().find(|opt| !opt.disabled))
        .map(Element::resolved_value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulary_value::FileHandle;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> FieldValue {
        FieldValue::from(s)
    }

    fn value_of(el: &Element) -> FieldValue {
        extract(&Control::classify(el))
    }

    #[test]
    fn text_inputs() {
        assert_eq!(value_of(&Element::input("text").with_value("hi")), text("hi"));
        assert_eq!(value_of(&Element::input("text")), text(""));
        assert_eq!(
            value_of(&Element::input("text").with_value("hi").with_disabled(true)),
            FieldValue::Null
        );
        assert_eq!(value_of(&Element::textarea().with_value("a\nb")), text("a\nb"));
    }

    #[rstest]
    #[case("42", Some(42.0))]
    #[case(" 3.5 ", Some(3.5))]
    #[case("-7", Some(-7.0))]
    #[case("1e3", Some(1000.0))]
    #[case("abc", None)]
    #[case("", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    fn number_parsing(#[case] raw: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_number(raw), expected);
    }

    #[test]
    fn number_inputs() {
        assert_eq!(
            value_of(&Element::input("number").with_value("42")),
            FieldValue::from(42.0)
        );
        assert_eq!(value_of(&Element::input("number").with_value("abc")), FieldValue::Null);
        assert_eq!(
            value_of(&Element::input("number").with_value("1").with_disabled(true)),
            FieldValue::Null
        );
    }

    #[test]
    fn single_file_input() {
        let a = FileHandle::new("a.txt");
        let b = FileHandle::new("b.txt");

        assert_eq!(value_of(&Element::input("file")), FieldValue::Null);
        assert_eq!(
            value_of(&Element::input("file").with_files(vec![])),
            FieldValue::Null
        );
        assert_eq!(
            value_of(&Element::input("file").with_files(vec![a.clone(), b])),
            FieldValue::File(a)
        );
    }

    #[test]
    fn multiple_file_input() {
        let a = FileHandle::new("a.txt");
        let input = Element::input("file").with_multiple(true);

        assert_eq!(value_of(&input), FieldValue::Null);
        assert_eq!(
            value_of(&input.clone().with_files(vec![])),
            FieldValue::Array(vec![])
        );
        assert_eq!(
            value_of(&input.with_files(vec![a.clone()])),
            FieldValue::Array(vec![FieldValue::File(a)])
        );
    }

    #[test]
    fn single_select() {
        let select = Element::select()
            .with_option(Element::option("").with_disabled(true).with_selected(true))
            .with_option(Element::option("ny"))
            .with_option(Element::option("la"));
        assert_eq!(value_of(&select), FieldValue::Null);

        let chosen = Element::select()
            .with_option(Element::option("ny"))
            .with_option(Element::option("la").with_selected(true));
        assert_eq!(value_of(&chosen), text("la"));

        let defaulted = Element::select()
            .with_option(Element::option("x").with_disabled(true))
            .with_option(Element::option("y"));
        assert_eq!(value_of(&defaulted), text("y"));

        assert_eq!(value_of(&Element::select()), FieldValue::Null);
    }

    #[test]
    fn multiple_select() {
        let select = Element::select()
            .with_multiple(true)
            .with_option(Element::option("a").with_selected(true))
            .with_option(Element::option("b"))
            .with_option(Element::option("c").with_selected(true).with_disabled(true))
            .with_option(Element::new("option").with_text(" D ").with_selected(true));

        assert_eq!(
            value_of(&select),
            FieldValue::Array(vec![text("a"), text("D")])
        );
    }

    #[test]
    fn radio_group() {
        let a = Element::input("radio").with_value("a");
        let b = Element::input("radio").with_value("b").with_checked(true);
        let c = Element::input("radio")
            .with_value("c")
            .with_checked(true)
            .with_disabled(true);

        assert_eq!(extract(&Control::RadioGroup(vec![&a, &b])), text("b"));
        assert_eq!(extract(&Control::RadioGroup(vec![&a, &c])), FieldValue::Null);
        assert_eq!(extract(&Control::RadioGroup(vec![&a])), FieldValue::Null);
    }

    #[test]
    fn checkbox_group_skips_disabled() {
        let enabled = Element::input("checkbox").with_value("x").with_checked(true);
        let disabled = Element::input("checkbox")
            .with_value("y")
            .with_checked(true)
            .with_disabled(true);
        let unchecked = Element::input("checkbox").with_value("z");

        assert_eq!(
            extract(&Control::CheckboxGroup(vec![&disabled, &enabled, &unchecked])),
            FieldValue::Array(vec![text("x")])
        );
    }

    #[test]
    fn lone_checkbox_extracts_as_sequence() {
        assert_eq!(
            value_of(&Element::input("checkbox").with_checked(true)),
            FieldValue::Array(vec![text("on")])
        );
        assert_eq!(
            value_of(&Element::input("checkbox")),
            FieldValue::Array(vec![])
        );
    }

    #[test]
    fn generic_group() {
        let a = Element::input("text").with_value("a");
        let b = Element::input("number").with_value("2");
        let off = Element::input("text").with_value("off").with_disabled(true);

        assert_eq!(
            extract(&Control::Group(vec![&a, &off, &b])),
            FieldValue::Array(vec![text("a"), FieldValue::from(2.0)])
        );
        assert_eq!(extract(&Control::Group(vec![])), FieldValue::Null);
    }

    #[test]
    fn mixed_group_is_flat() {
        let t = Element::input("text").with_value("t");
        let c = Element::input("checkbox").with_value("c");
        let r = Element::input("radio").with_value("r");

        assert_eq!(
            extract(&Control::classify_group(vec![&t, &c, &r])),
            FieldValue::Array(vec![text("t"), text("c"), text("r")])
        );
    }

    #[test]
    fn unsupported_is_null() {
        assert_eq!(
            value_of(&Element::input("submit").with_value("Go")),
            FieldValue::Null
        );
    }
}
