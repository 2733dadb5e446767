//! # formulary-form
//!
//! Form snapshots and control value extraction.
//!
//! A [`Form`] is a read-only snapshot of a form's listed elements. Named
//! elements are grouped and classified once into a [`Control`]; [`extract`]
//! then pattern-matches on that tag to produce a
//! [`FieldValue`](formulary_value::FieldValue):
//!
//! | control | value |
//! |---------|-------|
//! | text, textarea, option | raw string, `Null` when disabled |
//! | number, range | parsed number, `Null` when unparseable |
//! | file | first file or `Null` |
//! | file with `multiple` | every file, possibly none |
//! | select | selected value, `Null` when empty |
//! | select with `multiple` | selected, enabled option values |
//! | radio group | checked, enabled member's value or `Null` |
//! | checkbox group | checked, enabled members' values |
//! | other same-named group | every enabled member's value |
//!
//! ```rust
//! use formulary_form::{Element, Form};
//! use formulary_value::FieldValue;
//!
//! let form = Form::new()
//!     .with_element(Element::input("checkbox").with_name("tags").with_value("a").with_checked(true))
//!     .with_element(Element::input("checkbox").with_name("tags").with_value("b"));
//!
//! assert_eq!(
//!     form.value_hash()["tags"],
//!     FieldValue::Array(vec![FieldValue::from("a")])
//! );
//! ```

mod control;
mod element;
mod error;
mod extract;
mod form;

pub use control::{Control, ControlKind};
pub use element::Element;
pub use error::{FormError, FormResult};
pub use extract::{extract, parse_number};
pub use form::{Form, extract_value_hash};
