//! Terminal message styling.
//!
//! Use `cformat!` with HTML-like tags for user-facing messages:
//! errors `<red>`, hints `<dim>`, success `<green>`, secondary `<bright-black>`.
//! Printing goes through anstream, which strips styles when output is not a
//! terminal or `NO_COLOR` is set.

use color_print::cformat;

use crate::scan::Counts;

/// Auto-detecting println that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::println;

/// Auto-detecting eprintln that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::eprintln;

pub const ERROR_EMOJI: &str = "❌";
pub const SUCCESS_EMOJI: &str = "✅";
pub const HINT_EMOJI: &str = "💡";

pub fn error_message(message: impl AsRef<str>) -> String {
    cformat!("{ERROR_EMOJI} <red>{}</>", message.as_ref())
}

pub fn success_message(message: impl AsRef<str>) -> String {
    cformat!("{SUCCESS_EMOJI} <green>{}</>", message.as_ref())
}

pub fn hint_message(message: impl AsRef<str>) -> String {
    cformat!("{HINT_EMOJI} <dim>{}</>", message.as_ref())
}

/// One line per finding category, counts right-aligned.
pub fn format_counts(counts: &Counts) -> String {
    let rows = [
        ("Error status codes", counts.status_codes),
        ("Exceptions", counts.exceptions),
        ("Long intervals", counts.intervals),
        ("Render ids", counts.render_ids),
    ];
    rows.iter()
        .map(|(label, count)| {
            let label = format!("{label:<20}");
            let count = format!("{count:>6}");
            cformat!("  <bright-black>{label}</>{count}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
