//! # formulary-value
//!
//! Values pulled out of form controls and fed into validation and payload
//! assembly.
//!
//! ## Core types
//!
//! - [`FieldValue`] - the semantic value of one control (text, number, file,
//!   sequence) plus the object/array containers produced by nested payloads
//! - [`FileHandle`] - metadata of a selected file
//! - [`ValueHash`] - flat, ordered field name -> value map
//!
//! ```rust
//! use formulary_value::{FieldValue, ValueHash};
//!
//! let mut hash = ValueHash::new();
//! hash.insert("age".into(), FieldValue::from(42.0));
//! hash.insert("name".into(), FieldValue::from("Bob"));
//!
//! assert_eq!(hash["age"].as_f64(), Some(42.0));
//! assert!(hash["name"].is_truthy());
//! ```

mod file;
mod value;

pub use file::FileHandle;
pub use value::FieldValue;

/// Flat mapping from field name to its extracted value, in document order.
pub type ValueHash = indexmap::IndexMap<String, FieldValue>;
