//! Tabbed HTML report.

use askama::Template;

use crate::scan::{ExceptionFinding, RenderIdFinding, ResultSet, StatusCodeFinding};

/// Interval with its seconds already formatted to two decimals.
struct IntervalRow<'a> {
    line_ref: &'a str,
    seconds: String,
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    source: &'a str,
    threshold: String,
    status_codes: &'a [StatusCodeFinding],
    exceptions: &'a [ExceptionFinding],
    intervals: Vec<IntervalRow<'a>>,
    render_ids: &'a [RenderIdFinding],
}

/// Render `results` as a self-contained HTML document.
///
/// `source` names the scanned input; `threshold_secs` labels the interval tab.
/// All log text is HTML-escaped.
pub fn render(
    results: &ResultSet,
    source: &str,
    threshold_secs: f64,
) -> Result<String, askama::Error> {
    let intervals = results
        .intervals
        .iter()
        .map(|f| IntervalRow {
            line_ref: &f.line_ref,
            seconds: format!("{:.2}", f.interval_seconds),
        })
        .collect();

    ReportTemplate {
        source,
        threshold: format_threshold(threshold_secs),
        status_codes: &results.status_codes,
        exceptions: &results.exceptions,
        intervals,
        render_ids: &results.render_ids,
    }
    .render()
}

/// `10.0` → `10`, `2.5` → `2.5`
fn format_threshold(secs: f64) -> String {
    if secs.fract() == 0.0 {
        format!("{secs:.0}")
    } else {
        secs.to_string()
    }
}
