use autocheck::parse::{parse_documents, select_root};
use autocheck::serialize::to_yaml;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

/// Plain strings that cannot be mistaken for other YAML scalars.
fn arb_text() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,10}".prop_filter("reserved scalar", |s| {
        !matches!(s.as_str(), "null" | "true" | "false" | "y" | "n" | "yes" | "no" | "on" | "off")
    })
}

/// Strategy for document roots: mappings of nested values.
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        arb_text().prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Value::Array),
            prop::collection::vec((arb_text(), inner), 1..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    #[test]
    fn yaml_roundtrip_preserves_structure(
        entries in prop::collection::vec((arb_text(), arb_value()), 1..5)
    ) {
        let root = Value::Object(entries.into_iter().collect());
        let yaml = to_yaml(&root).expect("serialize");
        let docs = parse_documents(&yaml).expect("re-parse");
        prop_assert_eq!(select_root(docs), Some(root));
    }
}
