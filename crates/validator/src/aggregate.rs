//! [`Validator`]: runs an ordered rule list against a value hash.

use crate::error::RuleResult;
use crate::result::ValidationResult;
use crate::rule::FieldRule;
use formulary_value::{FieldValue, ValueHash};
use indexmap::IndexSet;
use tracing::{debug, trace};

/// Ordered collection of [`FieldRule`]s.
///
/// ```rust
/// use formulary_validator::{FieldRule, Validator};
/// use formulary_value::{FieldValue, ValueHash};
///
/// let validator = Validator::new()
///     .with_rule(FieldRule::new("a", |v, _| v.is_truthy()).with_message("required"));
///
/// let mut values = ValueHash::new();
/// values.insert("a".into(), FieldValue::from("x"));
/// assert!(validator.is_valid(&values)?);
/// # Ok::<(), formulary_validator::RuleError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: Vec<FieldRule>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn push(&mut self, rule: FieldRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Distinct field names across all rules, in first-seen order.
    pub fn fields(&self) -> IndexSet<&str> {
        self.rules.iter().map(FieldRule::field).collect()
    }

    /// Validates a value hash, using it both as candidates and as context.
    ///
    /// # Errors
    ///
    /// The first predicate error aborts the pass.
    pub fn generate_validation_hash(&self, values: &ValueHash) -> RuleResult<ValidationResult> {
        self.validate_with_context(values, values)
    }

    /// Validates `candidates`, passing `context` to every predicate.
    ///
    /// A field missing from `candidates` is judged as `Null`.
    ///
    /// # Errors
    ///
    /// The first predicate error aborts the pass.
    pub fn validate_with_context(
        &self,
        candidates: &ValueHash,
        context: &ValueHash,
    ) -> RuleResult<ValidationResult> {
        let mut result = ValidationResult::new();

        for field in self.fields() {
            let target = candidates.get(field).unwrap_or(&FieldValue::Null);
            let mut valid = true;
            let mut messages = Vec::new();

            for rule in self.rules.iter().filter(|rule| rule.accepts(field)) {
                if rule.is_invalid(target, context)? {
                    trace!(field, code = rule.code(), "rule failed");
                    valid = false;
                    if let Some(message) = rule.message() {
                        messages.push(message.to_owned());
                    }
                }
            }

            result.record(field, valid, messages);
        }

        debug!(
            fields = result.len(),
            invalid = result.invalid_fields().count(),
            "validation pass complete"
        );
        Ok(result)
    }

    /// Overall validity of `values`.
    ///
    /// # Errors
    ///
    /// Propagates predicate errors.
    pub fn is_valid(&self, values: &ValueHash) -> RuleResult<bool> {
        self.generate_validation_hash(values)
            .map(|result| result.is_valid())
    }

    /// # Errors
    ///
    /// Propagates predicate errors.
    pub fn is_invalid(&self, values: &ValueHash) -> RuleResult<bool> {
        self.is_valid(values).map(|valid| !valid)
    }
}

impl FromIterator<FieldRule> for Validator {
    fn from_iter<I: IntoIterator<Item = FieldRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl Extend<FieldRule> for Validator {
    fn extend<I: IntoIterator<Item = FieldRule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}
