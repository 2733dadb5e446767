//! Prelude module for convenient imports.
//!
//! ```rust
//! use formulary_validator::prelude::*;
//!
//! let rule = FieldRule::with_check("age", checks::in_range(18.0, 130.0)?);
//! assert_eq!(rule.code(), "in_range");
//! # Ok::<(), RuleError>(())
//! ```

pub use crate::checks;
pub use crate::{
    Check, CheckConfig, FieldRule, RuleConfig, RuleError, RuleResult, ValidationResult, Validator,
};
