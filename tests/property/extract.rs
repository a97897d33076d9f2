use autocheck::extract::{CANDIDATE_KEYS, extract};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

/// Strategy for scalar values.
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z ]{0,12}".prop_map(Value::String),
    ]
}

/// Strategy for a mapping that holds at least one candidate key.
fn arb_candidate() -> impl Strategy<Value = Value> {
    (
        prop::sample::subsequence(CANDIDATE_KEYS.to_vec(), 1..=4),
        prop::collection::vec(("[a-z_]{1,8}", arb_scalar()), 0..4),
    )
        .prop_map(|(keys, extra)| {
            let mut map = Map::new();
            for (k, v) in extra {
                map.insert(k, v);
            }
            for k in keys {
                map.insert(k.to_string(), json!("x"));
            }
            Value::Object(map)
        })
}

/// Strategy for a mapping with none of the candidate keys.
fn arb_non_candidate() -> impl Strategy<Value = Value> {
    prop::collection::vec(("[a-z_]{1,8}", arb_scalar()), 0..4).prop_map(|entries| {
        let map: Map<String, Value> = entries
            .into_iter()
            .filter(|(k, _)| !CANDIDATE_KEYS.contains(&k.as_str()) && k != "automation")
            .collect();
        Value::Object(map)
    })
}

proptest! {
    #[test]
    fn scalar_roots_yield_nothing(root in arb_scalar()) {
        prop_assert!(extract(&root).is_empty());
    }

    #[test]
    fn all_candidate_sequence_is_returned_unchanged(items in prop::collection::vec(arb_candidate(), 0..6)) {
        let root = Value::Array(items.clone());
        let records: Vec<Value> = extract(&root).into_iter().cloned().collect();
        prop_assert_eq!(records, items);
    }

    #[test]
    fn automation_field_uses_same_filter(
        items in prop::collection::vec(prop_oneof![arb_candidate(), arb_non_candidate(), arb_scalar()], 0..8)
    ) {
        let wrapped = json!({"automation": items.clone()});
        let bare = Value::Array(items);
        prop_assert_eq!(extract(&wrapped), extract(&bare));
    }

    #[test]
    fn non_candidate_mapping_without_wrapper_yields_nothing(root in arb_non_candidate()) {
        prop_assert!(extract(&root).is_empty());
    }
}
