//! Built-in checks.
//!
//! Each function returns a [`Check`] to pair with a field via
//! [`FieldRule::with_check`](crate::FieldRule::with_check).
//!
//! Except for [`required`] and [`truthy`], checks judge what is present:
//! a blank value (null, `""`, empty sequence) passes them, so optional
//! fields can carry format rules without also being mandatory.
//!
//! ```rust
//! use formulary_validator::{FieldRule, checks};
//! use formulary_value::{FieldValue, ValueHash};
//!
//! let rule = FieldRule::with_check("name", checks::min_length(3)).with_message("too short");
//! let values = ValueHash::new();
//! assert!(!rule.is_valid(&FieldValue::from("ab"), &values)?);
//! assert!(rule.is_valid(&FieldValue::from(""), &values)?);
//! # Ok::<(), formulary_validator::RuleError>(())
//! ```

use crate::error::{RuleError, RuleResult};
use crate::rule::Check;
use formulary_value::FieldValue;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap_or_else(|_| unreachable!("static pattern"))
});

// ============================================================================
// PRESENCE
// ============================================================================

/// Value must not be null, `""` or an empty sequence.
pub fn required() -> Check {
    Check::new("required", |value, _| !value.is_blank())
}

/// Value must be truthy (`!!value` in script terms).
pub fn truthy() -> Check {
    Check::new("truthy", |value, _| value.is_truthy())
}

// ============================================================================
// LENGTH
// ============================================================================

/// Length in chars for text and numbers, items for sequences.
fn measure(value: &FieldValue) -> usize {
    value
        .len()
        .or_else(|| value.to_scalar_string().map(|s| s.chars().count()))
        .unwrap_or(0)
}

pub fn min_length(min: usize) -> Check {
    Check::new("min_length", move |value, _| {
        value.is_blank() || measure(value) >= min
    })
}

pub fn max_length(max: usize) -> Check {
    Check::new("max_length", move |value, _| {
        value.is_blank() || measure(value) <= max
    })
}

// ============================================================================
// FORMAT
// ============================================================================

/// Scalar value must match `pattern`. Sequences must match item by item.
pub fn pattern(pattern: &str) -> RuleResult<Check> {
    let regex = Regex::new(pattern).map_err(|err| RuleError::InvalidPattern {
        pattern: pattern.to_owned(),
        reason: err.to_string(),
    })?;
    Ok(matching("pattern", regex))
}

/// Text must look like an e-mail address.
pub fn email() -> Check {
    matching("email", EMAIL.clone())
}

fn matching(code: &'static str, regex: Regex) -> Check {
    Check::new(code, move |value, _| {
        all_scalars(value, |s| regex.is_match(s))
    })
}

/// Applies `test` to a scalar value or to every item of a sequence.
/// Blank values pass; files and objects fail.
fn all_scalars(value: &FieldValue, test: impl Fn(&str) -> bool + Copy) -> bool {
    if value.is_blank() {
        return true;
    }
    match value {
        FieldValue::Array(items) => items.iter().all(|item| all_scalars(item, test)),
        other => other.to_scalar_string().is_some_and(|s| test(&s)),
    }
}

// ============================================================================
// NUMERIC
// ============================================================================

/// Number (or numeric text) must lie within `min..=max`.
pub fn in_range(min: f64, max: f64) -> RuleResult<Check> {
    if min > max {
        return Err(RuleError::InvalidRange { min, max });
    }
    Ok(Check::new("in_range", move |value, _| {
        if value.is_blank() {
            return true;
        }
        let number = match value {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        number.is_some_and(|n| (min..=max).contains(&n))
    }))
}

// ============================================================================
// MEMBERSHIP AND CROSS-FIELD
// ============================================================================

/// Scalar value (or every item) must be one of `allowed`.
pub fn one_of<I, S>(allowed: I) -> Check
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: HashSet<String> = allowed.into_iter().map(Into::into).collect();
    Check::new("one_of", move |value, _| {
        all_scalars(value, |s| allowed.contains(s))
    })
}

/// Value must equal the value of `other` (missing counts as null).
pub fn same_as(other: impl Into<String>) -> Check {
    let other = other.into();
    Check::new("same_as", move |value, values| {
        values.get(&other).unwrap_or(&FieldValue::Null) == value
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use formulary_value::ValueHash;
    use rstest::rstest;

    fn passes(check: &Check, value: impl Into<FieldValue>) -> bool {
        check.evaluate(&value.into(), &ValueHash::new()).unwrap()
    }

    fn list(items: &[&str]) -> FieldValue {
        FieldValue::Array(items.iter().map(|s| FieldValue::from(*s)).collect())
    }

    #[rstest]
    #[case(FieldValue::Null, false)]
    #[case(FieldValue::from(""), false)]
    #[case(FieldValue::Array(vec![]), false)]
    #[case(FieldValue::from("x"), true)]
    #[case(FieldValue::from(0.0), true)]
    fn required_cases(#[case] value: FieldValue, #[case] expected: bool) {
        assert_eq!(passes(&required(), value), expected);
    }

    #[test]
    fn truthy_rejects_zero() {
        assert!(!passes(&truthy(), 0.0));
        assert!(passes(&truthy(), "x"));
    }

    #[test]
    fn length_counts_chars_and_items() {
        assert!(passes(&min_length(3), "abc"));
        assert!(!passes(&min_length(3), "ab"));
        assert!(passes(&min_length(2), "\u{e9}\u{e9}"));
        assert!(!passes(&max_length(1), list(&["a", "b"])));
        assert!(passes(&max_length(3), 123.0));
        assert!(passes(&min_length(3), FieldValue::Null));
    }

    #[test]
    fn pattern_matching() {
        let digits = pattern(r"^\d+$").unwrap();
        assert!(passes(&digits, "123"));
        assert!(!passes(&digits, "12a"));
        assert!(passes(&digits, 42.0));
        assert!(passes(&digits, list(&["1", "2"])));
        assert!(!passes(&digits, list(&["1", "x"])));
        assert!(passes(&digits, ""));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(matches!(
            pattern("("),
            Err(RuleError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn email_format() {
        assert!(passes(&email(), "ann@example.com"));
        assert!(!passes(&email(), "ann@"));
        assert!(!passes(&email(), "a b@example.com"));
    }

    #[test]
    fn numeric_range() {
        let adult = in_range(18.0, 130.0).unwrap();
        assert!(passes(&adult, 18.0));
        assert!(passes(&adult, "42"));
        assert!(!passes(&adult, 17.5));
        assert!(!passes(&adult, "old"));
        assert!(passes(&adult, FieldValue::Null));
        assert!(in_range(2.0, 1.0).is_err());
    }

    #[test]
    fn membership() {
        let plans = one_of(["free", "pro"]);
        assert!(passes(&plans, "pro"));
        assert!(!passes(&plans, "gold"));
        assert!(passes(&plans, list(&["free", "pro"])));
    }

    #[test]
    fn same_as_compares_with_sibling() {
        let check = same_as("password");
        let mut values = ValueHash::new();
        values.insert("password".into(), FieldValue::from("p1"));

        assert!(check.evaluate(&FieldValue::from("p1"), &values).unwrap());
        assert!(!check.evaluate(&FieldValue::from("p2"), &values).unwrap());
        assert!(check.evaluate(&FieldValue::Null, &ValueHash::new()).unwrap());
    }
}
