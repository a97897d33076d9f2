//! Discovery of candidate automation records in a parsed root.
//!
//! The membership test is a deliberately loose key intersection; nothing here
//! validates a record, it only decides which mappings are worth validating.

use crate::value::{Shape, has_any_key};
use serde_json::Value;

/// Keys whose presence makes a mapping look like an automation.
pub const CANDIDATE_KEYS: [&str; 4] = ["alias", "id", "trigger", "action"];

/// Field of a wrapper mapping that may hold a list of automations.
pub const AUTOMATION_FIELD: &str = "automation";

/// `true` when `value` is a mapping holding at least one of [`CANDIDATE_KEYS`].
pub fn is_candidate(value: &Value) -> bool {
    match Shape::of(value) {
        Shape::Mapping(map) => has_any_key(map, &CANDIDATE_KEYS),
        Shape::Sequence(_) | Shape::Scalar(_) => false,
    }
}

/// Select candidate records from `root`, first matching rule wins:
///
/// 1. a sequence root yields its candidate elements;
/// 2. a candidate root yields itself;
/// 3. a mapping with a sequence-typed `automation` field yields that
///    field's candidate elements;
/// 4. anything else yields nothing.
///
/// Search never goes deeper than one level.
pub fn extract(root: &Value) -> Vec<&Value> {
    let records: Vec<&Value> = match Shape::of(root) {
        Shape::Sequence(items) => filter_candidates(items),
        Shape::Mapping(_) if is_candidate(root) => vec![root],
        Shape::Mapping(map) => match map.get(AUTOMATION_FIELD).map(Shape::of) {
            Some(Shape::Sequence(items)) => filter_candidates(items),
            _ => Vec::new(),
        },
        Shape::Scalar(_) => Vec::new(),
    };
    tracing::debug!(candidates = records.len(), "extracted automation candidates");
    records
}

fn filter_candidates(items: &[Value]) -> Vec<&Value> {
    items.iter().filter(|item| is_candidate(item)).collect()
}
