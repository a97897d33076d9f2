//! YAML text → parsed documents.
//!
//! Parsing is a collaborator behind the [`DocumentParser`] trait; the rest of
//! the crate only ever sees the resulting [`serde_json::Value`] trees.

use crate::error::{Mark, ParseError};
use serde_json::Value;

/// Extension point for turning raw text into documents.
pub trait DocumentParser {
    /// Parse every document in `input`, in source order.
    fn parse_all(&self, input: &str) -> Result<Vec<Value>, ParseError>;
}

/// Default parser backed by `serde-saphyr`. Supports multi-document streams
/// separated by `---`; empty and null documents are kept as [`Value::Null`].
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlParser;

impl DocumentParser for YamlParser {
    fn parse_all(&self, input: &str) -> Result<Vec<Value>, ParseError> {
        split_documents(input)
            .into_iter()
            .filter(|section| section.is_document())
            .map(|section| section.parse())
            .collect()
    }
}

/// Parse `input` with the default [`YamlParser`].
pub fn parse_documents(input: &str) -> Result<Vec<Value>, ParseError> {
    YamlParser.parse_all(input)
}

/// Pick the root value to inspect: the single document itself, or the
/// ordered sequence of all documents when there are several.
pub fn select_root(mut docs: Vec<Value>) -> Option<Value> {
    match docs.len() {
        0 => None,
        1 => docs.pop(),
        _ => Some(Value::Array(docs)),
    }
}

// ─── Stream splitting ───────────────────────────────────────────────────────

/// One slice of the stream between document markers.
struct Section {
    /// Zero-based line of the section's first line in the whole input.
    first_line: usize,
    /// Opened by an explicit `---` marker.
    explicit: bool,
    text: String,
}

impl Section {
    fn new(first_line: usize, explicit: bool) -> Self {
        Section {
            first_line,
            explicit,
            text: String::new(),
        }
    }

    /// Any line besides blanks, comments and directives.
    fn has_content(&self) -> bool {
        self.text.lines().any(|line| {
            let trimmed = line.trim();
            !(trimmed.is_empty() || trimmed.starts_with('#') || line.starts_with('%'))
        })
    }

    /// An explicit `---` always opens a document, even an empty one.
    fn is_document(&self) -> bool {
        self.explicit || self.has_content()
    }

    fn parse(&self) -> Result<Value, ParseError> {
        if !self.has_content() {
            return Ok(Value::Null);
        }
        let body: String = self
            .text
            .lines()
            .map(|line| if line.starts_with('%') { "" } else { line })
            .collect::<Vec<_>>()
            .join("\n");
        serde_saphyr::from_str::<Option<Value>>(&body)
            .map(|value| value.unwrap_or(Value::Null))
            .map_err(|e| self.parse_error(&e))
    }

    fn parse_error(&self, e: &serde_saphyr::Error) -> ParseError {
        let error = ParseError::new(headline(&e.to_string()));
        let mark = e.location().and_then(|loc| {
            let line = usize::try_from(loc.line()).ok()?;
            let column = usize::try_from(loc.column()).ok()?;
            Some(Mark {
                line: line.saturating_sub(1) + self.first_line,
                column: column.saturating_sub(1),
            })
        });
        match mark {
            Some(mark) => error.at(mark),
            None => error,
        }
    }
}

/// `true` when `line` starts with `marker` followed by whitespace or nothing.
fn is_marker(line: &str, marker: &str) -> bool {
    line.strip_prefix(marker)
        .is_some_and(|rest| rest.chars().next().is_none_or(char::is_whitespace))
}

/// Split the stream at column-0 `---` and `...` markers. Markers cannot occur
/// inside a document, so no YAML-level scanning is needed. Marker text is
/// blanked so columns of content sharing the marker line stay put.
fn split_documents(input: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::new(0, false);
    for (i, line) in input.lines().enumerate() {
        if is_marker(line, "---") {
            sections.push(std::mem::replace(&mut current, Section::new(i, true)));
            current.text.push_str("   ");
            current.text.push_str(&line[3..]);
            current.text.push('\n');
        } else if is_marker(line, "...") {
            sections.push(std::mem::replace(&mut current, Section::new(i + 1, false)));
        } else {
            current.text.push_str(line);
            current.text.push('\n');
        }
    }
    sections.push(current);
    sections
}

/// First line of a parser message with the `error:` and location prefixes
/// removed; the location travels separately as a [`Mark`].
fn headline(message: &str) -> String {
    let first = message.lines().next().unwrap_or_default().trim();
    let first = first.strip_prefix("error:").map_or(first, str::trim_start);
    match first.split_once(": ") {
        Some((prefix, rest)) if prefix.starts_with("line ") => rest.to_string(),
        _ => first.to_string(),
    }
}
