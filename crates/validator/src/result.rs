//! Aggregate outcome of one validation pass.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-field validity and messages for every field named by a rule.
///
/// The four maps share one key set, in the order fields were first
/// referenced by the rule list. A field with no rules never appears.
///
/// Serialises with the camelCase keys UI layers expect:
///
/// ```rust
/// use formulary_validator::{FieldRule, Validator};
/// use formulary_value::{FieldValue, ValueHash};
///
/// let validator = Validator::new()
///     .with_rule(FieldRule::new("a", |v, _| v.is_truthy()).with_message("required"));
/// let mut values = ValueHash::new();
/// values.insert("a".into(), FieldValue::from(""));
///
/// let result = validator.generate_validation_hash(&values)?;
/// let json = serde_json::to_value(&result).unwrap();
/// assert_eq!(json["invalidByField"]["a"], true);
/// assert_eq!(json["firstMessageByField"]["a"], "required");
/// # Ok::<(), formulary_validator::RuleError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    valid_by_field: IndexMap<String, bool>,
    invalid_by_field: IndexMap<String, bool>,
    messages_by_field: IndexMap<String, Vec<String>>,
    first_message_by_field: IndexMap<String, String>,
}

impl ValidationResult {
    /// Sentinel reported by [`first_message`](Self::first_message) when a
    /// field has no messages.
    pub const BLANK: &'static str = "";

    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for one field. Re-recording a field replaces it.
    pub(crate) fn record(&mut self, field: &str, valid: bool, messages: Vec<String>) {
        let first = messages.first().cloned().unwrap_or_default();
        self.valid_by_field.insert(field.to_owned(), valid);
        self.invalid_by_field.insert(field.to_owned(), !valid);
        self.messages_by_field.insert(field.to_owned(), messages);
        self.first_message_by_field.insert(field.to_owned(), first);
    }

    /// Overall validity: AND over every field, true when there are none.
    pub fn is_valid(&self) -> bool {
        self.valid_by_field.values().all(|valid| *valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// `None` for fields no rule references.
    pub fn is_field_valid(&self, field: &str) -> Option<bool> {
        self.valid_by_field.get(field).copied()
    }

    pub fn is_field_invalid(&self, field: &str) -> Option<bool> {
        self.invalid_by_field.get(field).copied()
    }

    /// Failure messages for `field` in rule order. Empty for valid or
    /// unknown fields.
    pub fn messages(&self, field: &str) -> &[String] {
        self.messages_by_field.get(field).map_or(&[], Vec::as_slice)
    }

    /// First failure message, or [`BLANK`](Self::BLANK).
    pub fn first_message(&self, field: &str) -> &str {
        self.first_message_by_field
            .get(field)
            .map_or(Self::BLANK, String::as_str)
    }

    /// Every field with a recorded outcome, in first-seen order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.valid_by_field.keys().map(String::as_str)
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = &str> {
        self.invalid_by_field
            .iter()
            .filter(|(_, invalid)| **invalid)
            .map(|(field, _)| field.as_str())
    }

    pub fn valid_by_field(&self) -> &IndexMap<String, bool> {
        &self.valid_by_field
    }

    pub fn invalid_by_field(&self) -> &IndexMap<String, bool> {
        &self.invalid_by_field
    }

    pub fn messages_by_field(&self) -> &IndexMap<String, Vec<String>> {
        &self.messages_by_field
    }

    pub fn first_message_by_field(&self) -> &IndexMap<String, String> {
        &self.first_message_by_field
    }

    pub fn len(&self) -> usize {
        self.valid_by_field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_by_field.is_empty()
    }
}
