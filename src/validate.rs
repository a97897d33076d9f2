//! Structural checks for a single automation record.
//!
//! Every check is non-fatal: findings are appended to a per-record
//! [`Collector`] and validation always runs to completion. The collector is
//! append-only and reads out in fixed severity order regardless of the order
//! in which checks ran.

use crate::error::{Diagnostic, Severity};
use crate::value::{Scalar, Shape, has_any_key};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys that make a trigger item recognisable.
pub const TRIGGER_KEYS: [&str; 5] = ["platform", "event_type", "entity_id", "device_id", "time"];

/// Keys of which an action item is expected to carry at least one.
pub const ACTION_KEYS: [&str; 8] = [
    "service",
    "device_id",
    "scene",
    "choose",
    "delay",
    "wait_template",
    "wait_for_trigger",
    "repeat",
];

// ─── Collector ──────────────────────────────────────────────────────────────

/// Per-record accumulator of diagnostics, one bucket per severity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collector {
    error: Vec<Diagnostic>,
    warn: Vec<Diagnostic>,
    info: Vec<Diagnostic>,
    success: Vec<Diagnostic>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.bucket_mut(diagnostic.severity).push(diagnostic);
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.bucket(severity).len()
    }

    /// All diagnostics, errors first and successes last.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        Severity::ALL.into_iter().flat_map(|s| self.bucket(s).iter())
    }

    pub fn into_ordered(self) -> Vec<Diagnostic> {
        let Collector {
            error,
            warn,
            info,
            success,
        } = self;
        [error, warn, info, success].into_iter().flatten().collect()
    }

    fn bucket(&self, severity: Severity) -> &Vec<Diagnostic> {
        match severity {
            Severity::Error => &self.error,
            Severity::Warning => &self.warn,
            Severity::Info => &self.info,
            Severity::Success => &self.success,
        }
    }

    fn bucket_mut(&mut self, severity: Severity) -> &mut Vec<Diagnostic> {
        match severity {
            Severity::Error => &mut self.error,
            Severity::Warning => &mut self.warn,
            Severity::Info => &mut self.info,
            Severity::Success => &mut self.success,
        }
    }

    fn warn(&mut self, code: &str, path: &str, message: String) {
        self.push(Diagnostic::new(Severity::Warning, code, message).with_path(path));
    }

    fn info(&mut self, code: &str, path: &str, message: String) {
        self.push(Diagnostic::new(Severity::Info, code, message).with_path(path));
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Outcome of validating one candidate record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Zero-based position of the record among the extracted candidates.
    pub index: usize,
    pub label: String,
    /// Diagnostics in severity order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.count(Severity::Error) == 0 && self.count(Severity::Warning) == 0
    }

    pub fn messages(&self, severity: Severity) -> impl Iterator<Item = &str> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
            .map(|d| d.message.as_str())
    }
}

// ─── Record level ───────────────────────────────────────────────────────────

/// Validate one candidate record found at `index` among the candidates.
pub fn validate_record(record: &Value, index: usize) -> Report {
    let label = record_label(record, index);
    let mut collector = Collector::new();

    let trigger = field(record, "trigger");
    let action = field(record, "action");

    if trigger.is_none() {
        collector.warn("missing_trigger", "trigger", format!("missing trigger in {}", label));
    }
    if action.is_none() {
        collector.warn("missing_action", "action", format!("missing action in {}", label));
    }
    if field(record, "condition").is_none() {
        collector.info(
            "no_condition",
            "condition",
            format!("no condition in {} (runs on every trigger)", label),
        );
    }

    if let Some(trigger) = trigger {
        check_list_field(trigger, ItemKind::Trigger, &mut collector);
    }
    if let Some(action) = action {
        check_list_field(action, ItemKind::Action, &mut collector);
    }

    // Must run last: inspects what the checks above accumulated.
    if collector.count(Severity::Error) == 0 && collector.count(Severity::Warning) == 0 {
        collector.push(Diagnostic::new(
            Severity::Success,
            "structure_ok",
            format!("basic structure OK ({})", label),
        ));
    }

    tracing::trace!(
        label = %label,
        warnings = collector.count(Severity::Warning),
        infos = collector.count(Severity::Info),
        "validated automation record"
    );

    Report {
        index,
        label,
        diagnostics: collector.into_ordered(),
    }
}

/// Look up `name` on a mapping record. A non-mapping record has no fields.
fn field<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    Shape::of(record).as_mapping().and_then(|m| m.get(name))
}

/// Resolve the display label: `alias`, else `id`, else `Automation <n>`.
pub fn record_label(record: &Value, index: usize) -> String {
    ["alias", "id"]
        .iter()
        .filter_map(|key| field(record, key))
        .find(|v| Shape::of(v).is_truthy())
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| format!("Automation {}", index + 1))
}

#[derive(Clone, Copy)]
enum ItemKind {
    Trigger,
    Action,
}

impl ItemKind {
    fn name(self) -> &'static str {
        match self {
            ItemKind::Trigger => "trigger",
            ItemKind::Action => "action",
        }
    }

    fn check(self, item: &Value, index: usize, path: &str, collector: &mut Collector) {
        match self {
            ItemKind::Trigger => check_trigger_item(item, index, path, collector),
            ItemKind::Action => check_action_item(item, index, path, collector),
        }
    }
}

/// Shared shape rules for `trigger` and `action`: a list of items, a single
/// item, or a warning for any other scalar.
///
/// Null is not "any other scalar": an empty `trigger:` is handed to the item
/// check as item #1 and reported as "trigger #1 is not an object", not as
/// "trigger is not an object/array".
fn check_list_field(value: &Value, kind: ItemKind, collector: &mut Collector) {
    let name = kind.name();
    match Shape::of(value) {
        Shape::Sequence(items) => {
            if items.is_empty() {
                collector.warn(
                    &format!("{}_list_empty", name),
                    name,
                    format!("{} list is empty", name),
                );
            }
            for (i, item) in items.iter().enumerate() {
                kind.check(item, i, &format!("{}[{}]", name, i), collector);
            }
        }
        Shape::Mapping(_) | Shape::Scalar(Scalar::Null) => {
            kind.check(value, 0, name, collector);
        }
        Shape::Scalar(_) => {
            collector.warn(
                &format!("{}_wrong_type", name),
                name,
                format!("{} is not an object/array", name),
            );
        }
    }
}

// ─── Trigger items ──────────────────────────────────────────────────────────

/// Check one trigger item at `index` within the trigger list.
pub fn validate_trigger(item: &Value, index: usize, collector: &mut Collector) {
    check_trigger_item(item, index, &format!("trigger[{}]", index), collector);
}

fn check_trigger_item(item: &Value, index: usize, path: &str, collector: &mut Collector) {
    let n = index + 1;
    let Some(map) = Shape::of(item).as_mapping() else {
        collector.warn(
            "trigger_not_object",
            path,
            format!("trigger #{} is not an object", n),
        );
        return;
    };

    if !has_any_key(map, &TRIGGER_KEYS) {
        collector.info(
            "trigger_no_obvious_key",
            path,
            format!(
                "trigger #{} has no obvious key ({})",
                n,
                TRIGGER_KEYS.join("/")
            ),
        );
    }

    if let Some(platform) = map.get("platform")
        && !Shape::of(platform).is_string()
    {
        collector.warn(
            "platform_not_string",
            &format!("{}.platform", path),
            format!("trigger #{}: 'platform' should be a string", n),
        );
    }
}

// ─── Action items ───────────────────────────────────────────────────────────

/// Check one action item at `index` within the action list.
pub fn validate_action(item: &Value, index: usize, collector: &mut Collector) {
    check_action_item(item, index, &format!("action[{}]", index), collector);
}

fn check_action_item(item: &Value, index: usize, path: &str, collector: &mut Collector) {
    let n = index + 1;
    let Some(map) = Shape::of(item).as_mapping() else {
        collector.warn(
            "action_not_object",
            path,
            format!("action #{} is not an object", n),
        );
        return;
    };

    if !has_any_key(map, &ACTION_KEYS) {
        collector.warn(
            "action_no_expected_key",
            path,
            format!(
                "action #{} has no expected key ({})",
                n,
                ACTION_KEYS.join("/")
            ),
        );
    }

    if let Some(service) = map.get("service")
        && !Shape::of(service).is_string()
    {
        collector.warn(
            "service_not_string",
            &format!("{}.service", path),
            format!("action #{}: 'service' should be a string", n),
        );
    }

    // `data: null` is accepted.
    if let Some(data) = map.get("data") {
        let ok = match Shape::of(data) {
            Shape::Mapping(_) | Shape::Scalar(Scalar::Null) => true,
            Shape::Sequence(_) | Shape::Scalar(_) => false,
        };
        if !ok {
            collector.info(
                "data_not_object",
                &format!("{}.data", path),
                format!("action #{}: 'data' should be an object", n),
            );
        }
    }
}
