//! End-to-end behaviour of rule aggregation.

use formulary_validator::prelude::*;
use formulary_value::{FieldValue, ValueHash};
use pretty_assertions::assert_eq;

fn hash(pairs: &[(&str, &str)]) -> ValueHash {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), FieldValue::from(*v)))
        .collect()
}

fn required_a() -> Validator {
    Validator::new().with_rule(FieldRule::new("a", |v, _| v.is_truthy()).with_message("required"))
}

#[test]
fn blank_required_field_is_reported() {
    let result = required_a()
        .generate_validation_hash(&hash(&[("a", "")]))
        .unwrap();

    assert_eq!(result.is_field_invalid("a"), Some(true));
    assert_eq!(result.messages("a"), ["required"]);
    assert_eq!(result.first_message("a"), "required");
    assert!(result.is_invalid());
}

#[test]
fn filled_required_field_passes() {
    let result = required_a()
        .generate_validation_hash(&hash(&[("a", "x")]))
        .unwrap();

    assert_eq!(result.is_field_invalid("a"), Some(false));
    assert!(result.messages("a").is_empty());
    assert_eq!(result.first_message("a"), "");
    assert!(result.is_valid());
}

#[test]
fn password_confirmation() {
    let validator = Validator::new().with_rule(
        FieldRule::new("password-confirmation", |v, ctx| ctx.get("password") == Some(v))
            .with_message("passwords differ"),
    );

    let same = hash(&[("password", "p1"), ("password-confirmation", "p1")]);
    let different = hash(&[("password", "p1"), ("password-confirmation", "p2")]);

    assert!(validator.is_valid(&same).unwrap());
    let result = validator.generate_validation_hash(&different).unwrap();
    assert_eq!(result.first_message("password-confirmation"), "passwords differ");
}

#[test]
fn fields_without_rules_never_appear() {
    let result = required_a()
        .generate_validation_hash(&hash(&[("a", "x"), ("b", "")]))
        .unwrap();

    assert_eq!(result.fields().collect::<Vec<_>>(), ["a"]);
    assert_eq!(result.is_field_valid("b"), None);
    assert!(!result.valid_by_field().contains_key("b"));
    assert!(!result.messages_by_field().contains_key("b"));
}

#[test]
fn rules_from_toml() {
    #[derive(serde::Deserialize)]
    struct File {
        rules: Vec<RuleConfig>,
    }

    let file: File = toml::from_str(
        r#"
        [[rules]]
        field = "email"
        check = "required"
        message = "Email is required"

        [[rules]]
        field = "email"
        check = "email"
        message = "Email looks wrong"

        [[rules]]
        field = "age"
        check = "in_range"
        min = 18
        max = 130
        message = "Adults only"
        "#,
    )
    .unwrap();

    let validator: Validator = file
        .rules
        .iter()
        .map(RuleConfig::to_rule)
        .collect::<RuleResult<_>>()
        .unwrap();

    let mut values = ValueHash::new();
    values.insert("email".into(), FieldValue::from(""));
    values.insert("age".into(), FieldValue::from(12.0));

    let result = validator.generate_validation_hash(&values).unwrap();
    assert_eq!(result.messages("email"), ["Email is required"]);
    assert_eq!(result.messages("age"), ["Adults only"]);
    assert_eq!(result.invalid_fields().collect::<Vec<_>>(), ["email", "age"]);
}
