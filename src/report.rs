//! Output collection and formatting
//!
//! The checker never writes to stdout directly; every trace line,
//! diagnostic, and the final verdict are collected here so callers (the
//! binary, tests) decide where they go. Line formats are fixed: downstream
//! tooling matches them byte for byte.

use serde::Serialize;

/// Column the parse stack is aligned to in trace lines, counted in matched
/// tokens rather than characters
pub const TRACE_COLUMN: usize = 40;

/// Final verdict of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Accepted,
    Rejected,
}

/// One trace line: matched output so far, padding, then the parse stack
/// bottom-to-top
pub fn trace_line(matched: &[String], stack: &[&str]) -> String {
    let pad = " ".repeat(TRACE_COLUMN.saturating_sub(matched.len()));
    format!("{} {} {}", matched.join(" "), pad, stack.join(" "))
}

/// The final verdict line
pub fn verdict_line(errors: usize) -> String {
    if errors > 0 {
        format!("Rejected - ({} Errors Found)", errors)
    } else {
        "Accepted".to_string()
    }
}

/// Ordered collection of the lines a run produced
#[derive(Debug, Clone, Default)]
pub struct Report {
    lines: Vec<String>,
}

impl Report {
    pub fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Machine-readable summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub verdict: Verdict,
    pub errors: usize,
    pub matched: Vec<String>,
    pub lines: Vec<String>,
}
