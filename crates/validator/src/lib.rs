//! # formulary-validator
//!
//! Field-level validation rules and aggregate results for extracted form
//! values.
//!
//! ## Quick Start
//!
//! ```rust
//! use formulary_validator::prelude::*;
//! use formulary_value::{FieldValue, ValueHash};
//!
//! let validator = Validator::new()
//!     .with_rule(FieldRule::with_check("email", checks::required()).with_message("required"))
//!     .with_rule(FieldRule::with_check("email", checks::email()).with_message("not an email"))
//!     .with_rule(FieldRule::new("confirm", |value, ctx| ctx.get("password") == Some(value)));
//!
//! let mut values = ValueHash::new();
//! values.insert("email".into(), FieldValue::from("ann"));
//! values.insert("password".into(), FieldValue::from("p1"));
//! values.insert("confirm".into(), FieldValue::from("p1"));
//!
//! let result = validator.generate_validation_hash(&values)?;
//! assert!(result.is_invalid());
//! assert_eq!(result.messages("email"), ["not an email"]);
//! assert_eq!(result.is_field_valid("confirm"), Some(true));
//! # Ok::<(), RuleError>(())
//! ```
//!
//! ## Rules
//!
//! A [`FieldRule`] pairs a field name with a [`Check`] and an optional
//! message. Checks are closures over `(candidate, all values)` or one of the
//! built-ins in [`checks`]. Rules can also be read from configuration as
//! [`RuleConfig`].
//!
//! ## Aggregation
//!
//! [`Validator::generate_validation_hash`] runs every rule for every field
//! named in the rule list and reports per-field validity and messages as a
//! [`ValidationResult`]. A failed field is data, not an error; [`RuleError`]
//! is reserved for rules that cannot be evaluated.

mod aggregate;
pub mod checks;
mod config;
mod error;
pub mod prelude;
mod result;
mod rule;

pub use aggregate::Validator;
pub use config::{CheckConfig, RuleConfig};
pub use error::{RuleError, RuleResult};
pub use result::ValidationResult;
pub use rule::{Check, FieldRule, Predicate};
