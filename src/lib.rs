//! Heuristic structural checks for home-automation YAML documents.
//!
//! The crate recognises automation records inside an arbitrarily shaped YAML
//! document and checks their `trigger`, `condition` and `action` parts,
//! reporting categorized diagnostics without modifying the input:
//!
//! ```text
//! check(text) → parse → select root → extract → validate_record (per record) → Report
//!                                  └→ serialize (preview / round-trip)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! let yaml = r#"
//! - alias: Hallway light
//!   trigger:
//!     - platform: state
//!       entity_id: binary_sensor.motion
//!   action:
//!     - service: light.turn_on
//! "#;
//!
//! let result = autocheck::check(yaml).expect("parses");
//! assert_eq!(result.reports.len(), 1);
//! assert!(result.reports[0].is_clean());
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | yes     | Builds the `autocheck` command-line binary. |

pub mod error;
pub mod extract;
pub mod parse;
pub mod render;
pub mod serialize;
pub mod validate;
pub mod value;

pub use error::*;

// Re-export entry-point functions at the crate root for convenience.
pub use extract::{extract, is_candidate};
pub use parse::{DocumentParser, YamlParser, parse_documents, select_root};
pub use validate::{Collector, Report, validate_action, validate_record, validate_trigger};

use serde_json::Value;

/// Two example automations, both structurally sound.
pub const SAMPLE: &str = r#"# Two example automations
- alias: Light on when motion
  trigger:
    - platform: state
      entity_id: binary_sensor.motion
      to: 'on'
  condition:
    - condition: time
      after: '06:00:00'
      before: '23:00:00'
  action:
    - service: light.turn_on
      target:
        entity_id: light.hallway

- alias: Window warning
  trigger:
    - platform: state
      entity_id: binary_sensor.window
      to: 'on'
  action:
    - service: notify.mobile_app_phone
      data:
        message: The window was opened!
"#;

/// Result of the [`check`] entry point.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckResult {
    /// Number of documents in the input stream.
    pub document_count: usize,
    /// The inspected root, if the stream held any document.
    pub root: Option<Value>,
    /// One report per candidate record, in record order.
    pub reports: Vec<Report>,
}

impl CheckResult {
    /// Top-level diagnostics for the run, independent of any record.
    pub fn notices(&self) -> Vec<Diagnostic> {
        let mut notices = vec![Diagnostic::new(
            Severity::Success,
            "documents_loaded",
            format!("{} document(s) loaded", self.document_count),
        )];
        if self.reports.is_empty() {
            notices.push(Diagnostic::new(
                Severity::Info,
                "no_automation",
                "no automation detected: no obvious automation objects were found, check structure or keys",
            ));
        }
        notices
    }

    /// Count of a severity across every report.
    pub fn count(&self, severity: Severity) -> usize {
        self.reports.iter().map(|r| r.count(severity)).sum()
    }
}

/// Convenience entry point composing parse → select root → extract → validate,
/// using the default [`YamlParser`].
///
/// # Errors
///
/// Returns [`CheckError::EmptyInput`] for blank input (the parser is not
/// called) and [`CheckError::Parse`] when the text is not valid YAML. No
/// reports are produced in either case.
pub fn check(input: &str) -> Result<CheckResult, CheckError> {
    check_with(&YamlParser, input)
}

/// [`check`] with a caller-supplied parser.
pub fn check_with<P: DocumentParser + ?Sized>(
    parser: &P,
    input: &str,
) -> Result<CheckResult, CheckError> {
    if input.trim().is_empty() {
        return Err(CheckError::EmptyInput);
    }

    // The untrimmed text is parsed so reported locations match the source.
    let docs = parser.parse_all(input).inspect_err(|e| {
        tracing::debug!(error = %e, "document parse failed");
    })?;
    let document_count = docs.len();
    tracing::debug!(documents = document_count, "parsed input");

    let root = parse::select_root(docs);
    let reports = match &root {
        Some(root) => extract::extract(root)
            .into_iter()
            .enumerate()
            .map(|(i, record)| validate::validate_record(record, i))
            .collect(),
        None => Vec::new(),
    };

    Ok(CheckResult {
        document_count,
        root,
        reports,
    })
}
