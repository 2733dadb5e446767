//! Control classification.
//!
//! Each named control is inspected once and tagged with a [`Control`]
//! variant; extraction then matches on the tag.

use crate::element::Element;
use serde::{Deserialize, Serialize};

/// Kind of a classified control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    Text,
    Number,
    File,
    FileMultiple,
    SelectSingle,
    SelectMultiple,
    Option,
    RadioGroup,
    CheckboxGroup,
    /// Several same-named members that are not all radios or all checkboxes.
    Group,
    Unsupported,
}

/// A classified control borrowing its element snapshot(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control<'a> {
    /// Text-like inputs, textareas, and single checkable members whose value
    /// is their raw value string.
    Text(&'a Element),
    Number(&'a Element),
    File(&'a Element),
    FileMultiple(&'a Element),
    SelectSingle(&'a Element),
    SelectMultiple(&'a Element),
    Option(&'a Element),
    RadioGroup(Vec<&'a Element>),
    CheckboxGroup(Vec<&'a Element>),
    Group(Vec<&'a Element>),
    Unsupported(&'a Element),
}

impl<'a> Control<'a> {
    /// Classifies a single element.
    ///
    /// A lone radio or checkbox becomes a group of one so it extracts like
    /// its multi-member siblings.
    pub fn classify(element: &'a Element) -> Self {
        if element.is("option") {
            return Self::Option(element);
        }
        if element.is("textarea") {
            return Self::Text(element);
        }
        if element.is("select") {
            return if element.multiple {
                Self::SelectMultiple(element)
            } else {
                Self::SelectSingle(element)
            };
        }
        if !element.is("input") {
            return Self::Unsupported(element);
        }

        match element.input_type().as_str() {
            "number" | "range" => Self::Number(element),
            "file" if element.multiple => Self::FileMultiple(element),
            "file" => Self::File(element),
            "radio" => Self::RadioGroup(vec![element]),
            "checkbox" => Self::CheckboxGroup(vec![element]),
            "button" | "submit" | "reset" | "image" => Self::Unsupported(element),
            _ => Self::Text(element),
        }
    }

    /// Classifies the members sharing one name.
    pub fn classify_group(members: Vec<&'a Element>) -> Self {
        match members.len() {
            0 => Self::Group(members),
            1 => Self::classify(members[0]),
            _ => {
                let all = |wanted: &str| {
                    members
                        .iter()
                        .all(|m| m.is("input") && m.input_type() == wanted)
                };
                let (radios, checkboxes) = (all("radio"), all("checkbox"));
                if radios {
                    Self::RadioGroup(members)
                } else if checkboxes {
                    Self::CheckboxGroup(members)
                } else {
                    Self::Group(members)
                }
            }
        }
    }

    pub fn kind(&self) -> ControlKind {
        match self {
            Self::Text(_) => ControlKind::Text,
            Self::Number(_) => ControlKind::Number,
            Self::File(_) => ControlKind::File,
            Self::FileMultiple(_) => ControlKind::FileMultiple,
            Self::SelectSingle(_) => ControlKind::SelectSingle,
            Self::SelectMultiple(_) => ControlKind::SelectMultiple,
            Self::Option(_) => ControlKind::Option,
            Self::RadioGroup(_) => ControlKind::RadioGroup,
            Self::CheckboxGroup(_) => ControlKind::CheckboxGroup,
            Self::Group(_) => ControlKind::Group,
            Self::Unsupported(_) => ControlKind::Unsupported,
        }
    }

    /// The elements behind this control, in document order.
    pub fn elements(&self) -> Vec<&'a Element> {
        match self {
            Self::Text(el)
            | Self::Number(el)
            | Self::File(el)
            | Self::FileMultiple(el)
            | Self::SelectSingle(el)
            | Self::SelectMultiple(el)
            | Self::Option(el)
            | Self::Unsupported(el) => vec![*el],
            Self::RadioGroup(members) | Self::CheckboxGroup(members) | Self::Group(members) => {
                members.clone()
            }
        }
    }

    /// A single control is disabled when its element is; a group when every
    /// member is (an empty group is not).
    pub fn is_disabled(&self) -> bool {
        match self {
            Self::RadioGroup(members) | Self::CheckboxGroup(members) | Self::Group(members) => {
                !members.is_empty() && members.iter().all(|m| m.disabled)
            }
            _ => self.elements().iter().all(|el| el.disabled),
        }
    }
}
