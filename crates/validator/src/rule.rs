//! [`FieldRule`]: one named check against one field.

use crate::error::RuleResult;
use formulary_value::{FieldValue, ValueHash};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Predicate signature: `(candidate, every value) -> valid?`.
///
/// `Err` means the predicate could not judge its input at all.
pub type Predicate = dyn Fn(&FieldValue, &ValueHash) -> RuleResult<bool> + Send + Sync;

// ============================================================================
// CHECK
// ============================================================================

/// A reusable predicate with a short code identifying what it checks.
///
/// Built-in checks live in [`checks`](crate::checks); custom ones come from
/// [`Check::new`] or [`Check::fallible`].
#[derive(Clone)]
pub struct Check {
    code: Cow<'static, str>,
    predicate: Arc<Predicate>,
}

impl Check {
    /// Wraps an infallible predicate.
    pub fn new<F>(code: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&FieldValue, &ValueHash) -> bool + Send + Sync + 'static,
    {
        Self::fallible(code, move |value, values| Ok(predicate(value, values)))
    }

    /// Wraps a predicate that may fail to evaluate.
    pub fn fallible<F>(code: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&FieldValue, &ValueHash) -> RuleResult<bool> + Send + Sync + 'static,
    {
        Self {
            code: code.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Runs the predicate.
    pub fn evaluate(&self, value: &FieldValue, values: &ValueHash) -> RuleResult<bool> {
        (self.predicate)(value, values)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("code", &self.code)
            .field("predicate", &"<function>")
            .finish()
    }
}

// ============================================================================
// FIELD RULE
// ============================================================================

/// A single validation rule: field name, check, optional failure message.
///
/// Rules are stateless after construction. Several rules may target the
/// same field; each is evaluated on its own.
///
/// # Examples
///
/// ```rust
/// use formulary_validator::FieldRule;
/// use formulary_value::{FieldValue, ValueHash};
///
/// let rule = FieldRule::new("a", |value, _| value.is_truthy()).with_message("required");
///
/// assert!(rule.accepts("a"));
/// assert!(rule.rejects("b"));
/// assert!(!rule.is_valid(&FieldValue::from(""), &ValueHash::new())?);
/// assert_eq!(rule.message(), Some("required"));
/// # Ok::<(), formulary_validator::RuleError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FieldRule {
    field: String,
    check: Check,
    message: Option<String>,
}

impl FieldRule {
    /// Creates a rule from an infallible predicate.
    pub fn new<F>(field: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FieldValue, &ValueHash) -> bool + Send + Sync + 'static,
    {
        Self::with_check(field, Check::new("custom", predicate))
    }

    /// Creates a rule from a predicate that may fail to evaluate.
    pub fn fallible<F>(field: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&FieldValue, &ValueHash) -> RuleResult<bool> + Send + Sync + 'static,
    {
        Self::with_check(field, Check::fallible("custom", predicate))
    }

    /// Creates a rule from a prepared [`Check`].
    pub fn with_check(field: impl Into<String>, check: Check) -> Self {
        Self {
            field: field.into(),
            check,
            message: None,
        }
    }

    /// Sets the message reported when the rule fails.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Code of the underlying check (`"custom"` for closures).
    pub fn code(&self) -> &str {
        self.check.code()
    }

    /// True iff this rule targets `field`.
    pub fn accepts(&self, field: &str) -> bool {
        self.field == field
    }

    pub fn rejects(&self, field: &str) -> bool {
        !self.accepts(field)
    }

    /// Runs the check on `target` with every value as context.
    pub fn is_valid(&self, target: &FieldValue, variables: &ValueHash) -> RuleResult<bool> {
        self.check
            .evaluate(target, variables)
            .map_err(|err| err.with_field(&self.field))
    }

    pub fn is_invalid(&self, target: &FieldValue, variables: &ValueHash) -> RuleResult<bool> {
        self.is_valid(target, variables).map(|valid| !valid)
    }

    /// The failure message, if one was configured.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
