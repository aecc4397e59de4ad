//! Findings extracted from log lines and the result set that collects them.

use serde::Serialize;

/// Format the `"<line_number>: <raw_text>"` reference carried by every finding.
pub fn line_ref(line_number: u64, raw: &str) -> String {
    format!("{line_number}: {raw}")
}

/// HTTP-style error status (400-599).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCodeFinding {
    pub line_ref: String,
    pub code: u16,
}

/// Exception or error line, with any indented stack-trace lines that followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionFinding {
    pub line_ref: String,
    pub message: String,
    /// Raw continuation lines, indentation preserved.
    pub stack_trace: Vec<String>,
}

/// Gap between two consecutive timestamps that exceeded the threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalFinding {
    pub line_ref: String,
    pub interval_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderIdFinding {
    pub line_ref: String,
    pub render_id: String,
}

/// A single finding, tagged by category.
#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    StatusCode(StatusCodeFinding),
    Exception(ExceptionFinding),
    Interval(IntervalFinding),
    RenderId(RenderIdFinding),
}

/// Per-category findings, each in scan order.
///
/// Append-only: the only mutation after a push is extending the stack trace
/// of the last exception while its group is open.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    pub status_codes: Vec<StatusCodeFinding>,
    pub exceptions: Vec<ExceptionFinding>,
    pub intervals: Vec<IntervalFinding>,
    pub render_ids: Vec<RenderIdFinding>,
}

impl ResultSet {
    pub fn push(&mut self, finding: Finding) {
        match finding {
            Finding::StatusCode(f) => self.status_codes.push(f),
            Finding::Exception(f) => self.exceptions.push(f),
            Finding::Interval(f) => self.intervals.push(f),
            Finding::RenderId(f) => self.render_ids.push(f),
        }
    }

    /// Append `other` after `self`, preserving each category's order.
    ///
    /// `carried_stack` holds continuation lines from the head of `other` that
    /// belong to the exception left open at the end of `self`.
    pub fn extend(&mut self, other: ResultSet, carried_stack: Vec<String>) {
        if !carried_stack.is_empty() {
            match self.exceptions.last_mut() {
                Some(open) => open.stack_trace.extend(carried_stack),
                None => log::warn!(
                    "dropping {} continuation lines with no exception to attach to",
                    carried_stack.len()
                ),
            }
        }
        self.status_codes.extend(other.status_codes);
        self.exceptions.extend(other.exceptions);
        self.intervals.extend(other.intervals);
        self.render_ids.extend(other.render_ids);
    }

    pub fn counts(&self) -> Counts {
        Counts {
            status_codes: self.status_codes.len(),
            exceptions: self.exceptions.len(),
            intervals: self.intervals.len(),
            render_ids: self.render_ids.len(),
        }
    }
}

/// Number of findings per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub status_codes: usize,
    pub exceptions: usize,
    pub intervals: usize,
    pub render_ids: usize,
}
