//! Grouping of exception lines with their stack traces.
//!
//! ```text
//!            exception                continuation
//!   Idle ─────────────────▶ Open ◀──────────────────┐
//!    ▲                      │  │                    │
//!    └──── other line ──────┘  └────────────────────┘
//! ```
//!
//! A new exception always opens a new group, closing the current one.
//! Indented lines seen while Idle are ignored.

use super::finding::{ExceptionFinding, line_ref};
use super::patterns::is_continuation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupState {
    Idle,
    /// The open group is the last element of the exception list.
    Open,
    /// The open group started before this scanner's first line; its
    /// continuation lines are collected separately.
    Carried,
}

/// State machine attaching continuation lines to the most recent exception.
#[derive(Debug, Clone)]
pub struct ExceptionGrouper {
    state: GroupState,
    carried_stack: Vec<String>,
}

impl Default for ExceptionGrouper {
    fn default() -> Self {
        Self::new()
    }
}

impl ExceptionGrouper {
    pub fn new() -> Self {
        Self {
            state: GroupState::Idle,
            carried_stack: Vec::new(),
        }
    }

    /// Start inside a group opened by an earlier scanner when `open` is set.
    pub fn seeded(open: bool) -> Self {
        Self {
            state: if open {
                GroupState::Carried
            } else {
                GroupState::Idle
            },
            carried_stack: Vec::new(),
        }
    }

    /// Advance by one line.
    ///
    /// `exception` is the exception matcher's result for `raw`. New findings
    /// are appended to `exceptions`; continuation lines extend its last entry.
    pub fn observe(
        &mut self,
        line_number: u64,
        raw: &str,
        exception: Option<&str>,
        exceptions: &mut Vec<ExceptionFinding>,
    ) {
        if let Some(message) = exception {
            exceptions.push(ExceptionFinding {
                line_ref: line_ref(line_number, raw),
                message: message.to_string(),
                stack_trace: Vec::new(),
            });
            self.state = GroupState::Open;
            return;
        }

        if !is_continuation(raw) {
            self.state = GroupState::Idle;
            return;
        }

        match self.state {
            GroupState::Idle => {}
            GroupState::Open => match exceptions.last_mut() {
                Some(open) => open.stack_trace.push(raw.to_string()),
                None => self.state = GroupState::Idle,
            },
            GroupState::Carried => self.carried_stack.push(raw.to_string()),
        }
    }

    /// Whether the next continuation line would be attached.
    pub fn is_open(&self) -> bool {
        self.state != GroupState::Idle
    }

    /// Continuation lines that belong to a group opened before this scanner.
    pub fn into_carried_stack(self) -> Vec<String> {
        self.carried_stack
    }
}
