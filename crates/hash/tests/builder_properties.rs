//! Property-based tests for the path hash builder.

use formulary_hash::{GapPolicy, PathHashBuilder};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Value, json};

fn key() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

// ============================================================================
// IDEMPOTENCY: build() == build()
// ============================================================================

proptest! {
    #[test]
    fn build_is_idempotent(paths in prop::collection::vec((key(), key()), 0..12)) {
        let mut builder: PathHashBuilder = PathHashBuilder::new();
        for (i, (outer, inner)) in paths.iter().enumerate() {
            builder.set_value(&format!("{outer}.{inner}"), i as u64).unwrap();
        }
        prop_assert_eq!(builder.build(), builder.build());
    }
}

// ============================================================================
// LAST WRITE WINS
// ============================================================================

proptest! {
    #[test]
    fn last_write_wins(first in any::<i64>(), second in any::<i64>(), k in key()) {
        let mut builder: PathHashBuilder = PathHashBuilder::new();
        let path = format!("root.{k}");
        builder.set_value(&path, first).unwrap();
        builder.set_value(&path, second).unwrap();
        prop_assert_eq!(builder.get(&path).unwrap(), Some(json!(second)));
    }
}

// ============================================================================
// CONTIGUOUS INDICES PRODUCE A DENSE ARRAY IN ORDER
// ============================================================================

proptest! {
    #[test]
    fn contiguous_indices_build_dense_array(items in prop::collection::vec(any::<i32>(), 0..20)) {
        let mut builder: PathHashBuilder =
            PathHashBuilder::new().with_gap_policy(GapPolicy::Reject);
        for (i, item) in items.iter().enumerate() {
            builder.set_value(&format!("list[].{i}"), *item).unwrap();
        }

        let expected: Value = if items.is_empty() {
            json!({})
        } else {
            json!({ "list": items })
        };
        prop_assert_eq!(builder.build(), expected);
    }
}

// ============================================================================
// SIBLINGS ACCUMULATE UNDER ONE PREFIX
// ============================================================================

proptest! {
    #[test]
    fn siblings_share_prefix(keys in prop::collection::btree_set(key(), 1..8)) {
        let mut builder: PathHashBuilder = PathHashBuilder::new();
        for k in &keys {
            builder.set_value(&format!("a.b.{k}"), k.as_str()).unwrap();
        }

        let built = builder.build();
        let inner = built["a"]["b"].as_object().unwrap();
        prop_assert_eq!(inner.len(), keys.len());
        for k in &keys {
            prop_assert_eq!(&inner[k], &json!(k));
        }
    }
}

#[test]
fn spec_style_example() {
    let mut builder: PathHashBuilder = PathHashBuilder::new();
    builder
        .set_values([
            ("alpha.user.id", json!("1")),
            ("alpha.user.name", json!("Bob")),
            ("alpha.tag[].0", json!("red")),
            ("alpha.tag[].1", json!("blue")),
        ])
        .unwrap();

    assert_eq!(
        builder.build(),
        json!({
            "alpha": {
                "user": { "id": "1", "name": "Bob" },
                "tag": ["red", "blue"],
            }
        })
    );
}
