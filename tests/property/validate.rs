use autocheck::error::Severity;
use autocheck::validate::validate_record;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

/// Strategy for arbitrary shallow values usable as field contents.
fn arb_field() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-5i64..5).prop_map(|n| json!(n)),
        prop_oneof![Just("state"), Just("light.turn_on"), Just("")].prop_map(|s| json!(s)),
    ];
    leaf.prop_recursive(2, 12, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
            prop::collection::vec(
                (
                    prop_oneof![
                        Just("platform"),
                        Just("entity_id"),
                        Just("service"),
                        Just("data"),
                        Just("delay"),
                        Just("to"),
                    ],
                    inner
                ),
                0..3
            )
            .prop_map(|entries| {
                Value::Object(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
            }),
        ]
    })
}

/// Strategy for a record with any subset of the checked fields.
fn arb_record() -> impl Strategy<Value = Value> {
    (
        prop::option::of(arb_field()),
        prop::option::of(arb_field()),
        prop::option::of(arb_field()),
        prop::option::of("[A-Za-z ]{1,10}"),
    )
        .prop_map(|(trigger, condition, action, alias)| {
            let mut map = Map::new();
            if let Some(alias) = alias {
                map.insert("alias".into(), json!(alias));
            }
            if let Some(v) = trigger {
                map.insert("trigger".into(), v);
            }
            if let Some(v) = condition {
                map.insert("condition".into(), v);
            }
            if let Some(v) = action {
                map.insert("action".into(), v);
            }
            Value::Object(map)
        })
}

proptest! {
    #[test]
    fn validation_is_idempotent(record in arb_record(), index in 0usize..10) {
        prop_assert_eq!(validate_record(&record, index), validate_record(&record, index));
    }

    #[test]
    fn success_iff_no_errors_or_warnings(record in arb_record()) {
        let report = validate_record(&record, 0);
        let clean = report.count(Severity::Error) == 0 && report.count(Severity::Warning) == 0;
        prop_assert_eq!(report.count(Severity::Success) == 1, clean);
        prop_assert!(report.count(Severity::Success) <= 1);
    }

    #[test]
    fn diagnostics_are_severity_ordered(record in arb_record()) {
        let report = validate_record(&record, 0);
        let severities: Vec<Severity> = report.diagnostics.iter().map(|d| d.severity).collect();
        prop_assert!(severities.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn success_is_last_when_present(record in arb_record()) {
        let report = validate_record(&record, 0);
        if let Some(pos) = report.diagnostics.iter().position(|d| d.severity == Severity::Success) {
            prop_assert_eq!(pos, report.diagnostics.len() - 1);
        }
    }
}
