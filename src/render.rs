//! Projection of reports into display form.
//!
//! Nothing here validates; it only orders and labels what [`validate`]
//! produced.
//!
//! [`validate`]: crate::validate

use crate::error::{Diagnostic, Severity};
use crate::validate::Report;
use serde::Serialize;

/// One rendered message, tagged with the title of the record it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedMessage {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub message: String,
}

impl RenderedMessage {
    fn notice(d: &Diagnostic) -> Self {
        RenderedMessage {
            severity: d.severity,
            title: None,
            message: d.message.clone(),
        }
    }
}

/// `Automation <n>: <label>`, with `n` 1-based.
pub fn display_title(report: &Report) -> String {
    format!("Automation {}: {}", report.index + 1, report.label)
}

/// Flatten reports into messages: record order first, then severity order
/// within each record.
pub fn render_reports(reports: &[Report]) -> Vec<RenderedMessage> {
    let mut out = Vec::new();
    for report in reports {
        let title = display_title(report);
        for severity in Severity::ALL {
            out.extend(
                report
                    .diagnostics
                    .iter()
                    .filter(|d| d.severity == severity)
                    .map(|d| RenderedMessage {
                        severity,
                        title: Some(title.clone()),
                        message: d.message.clone(),
                    }),
            );
        }
    }
    out
}

/// Plain-text rendering: top-level notices, then every record's messages.
pub fn render_text(notices: &[Diagnostic], reports: &[Report]) -> String {
    notices
        .iter()
        .map(RenderedMessage::notice)
        .chain(render_reports(reports))
        .map(|line| match &line.title {
            Some(title) => format!("[{}] {}: {}\n", line.severity, title, line.message),
            None => format!("[{}] {}\n", line.severity, line.message),
        })
        .collect()
}

/// Machine-readable form of a whole run.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary<'a> {
    pub documents: usize,
    pub notices: &'a [Diagnostic],
    pub reports: Vec<ReportView<'a>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReportView<'a> {
    pub title: String,
    pub label: &'a str,
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> RunSummary<'a> {
    pub fn new(documents: usize, notices: &'a [Diagnostic], reports: &'a [Report]) -> Self {
        RunSummary {
            documents,
            notices,
            reports: reports
                .iter()
                .map(|r| ReportView {
                    title: display_title(r),
                    label: &r.label,
                    diagnostics: &r.diagnostics,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(index: usize, label: &str, diagnostics: Vec<Diagnostic>) -> Report {
        Report {
            index,
            label: label.to_string(),
            diagnostics,
        }
    }

    #[test]
    fn title_is_one_based() {
        assert_eq!(display_title(&report(0, "Hall", vec![])), "Automation 1: Hall");
    }

    #[test]
    fn messages_are_sorted_by_severity_within_a_record() {
        // Deliberately out of order: rendering must not trust input order.
        let r = report(
            1,
            "X",
            vec![
                Diagnostic::new(Severity::Info, "i", "note"),
                Diagnostic::new(Severity::Warning, "w", "careful"),
            ],
        );
        let lines = render_reports(&[r]);
        assert_eq!(lines[0].severity, Severity::Warning);
        assert_eq!(lines[1].severity, Severity::Info);
        assert_eq!(lines[0].title.as_deref(), Some("Automation 2: X"));
    }

    #[test]
    fn text_puts_notices_first() {
        let notices = [Diagnostic::new(Severity::Success, "loaded", "1 document(s) loaded")];
        let r = report(0, "A", vec![Diagnostic::new(Severity::Warning, "w", "missing action in A")]);
        let text = render_text(&notices, &[r]);
        assert_eq!(
            text,
            "[success] 1 document(s) loaded\n[warn] Automation 1: A: missing action in A\n"
        );
    }

    #[test]
    fn json_summary_shape() {
        let notices = [Diagnostic::new(Severity::Success, "documents_loaded", "1 document(s) loaded")];
        let reports = [report(
            0,
            "Hall",
            vec![Diagnostic::new(Severity::Warning, "missing_action", "missing action in Hall").with_path("action")],
        )];
        let value = serde_json::to_value(RunSummary::new(1, &notices, &reports)).unwrap();

        assert_eq!(value["documents"], 1);
        assert_eq!(value["notices"][0]["severity"], "success");
        assert_eq!(value["notices"][0]["message"], "1 document(s) loaded");
        assert!(value["notices"][0].get("path").is_none());

        let first = &value["reports"][0];
        assert_eq!(first["title"], "Automation 1: Hall");
        assert_eq!(first["label"], "Hall");
        assert_eq!(first["diagnostics"][0]["severity"], "warning");
        assert_eq!(first["diagnostics"][0]["code"], "missing_action");
        assert_eq!(first["diagnostics"][0]["path"], "action");
    }
}
