//! Report output for a finished scan.
//!
//! The report is the only artifact a run produces. HTML is the default; JSON
//! is the serde serialisation of the [`ResultSet`], for feeding other tools.

pub mod html;

use std::io;
use std::path::{Path, PathBuf};

use crate::scan::ResultSet;
use crate::scan::error::{Result, ScanError};

/// Default report name, written to the working directory.
pub const DEFAULT_HTML_REPORT: &str = "log_analysis_report.html";
pub const DEFAULT_JSON_REPORT: &str = "log_analysis_report.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[strum(serialize_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Html,
    Json,
}

impl ReportFormat {
    pub fn default_path(self) -> PathBuf {
        PathBuf::from(match self {
            Self::Html => DEFAULT_HTML_REPORT,
            Self::Json => DEFAULT_JSON_REPORT,
        })
    }
}

/// What to write and where.
#[derive(Debug, Clone)]
pub struct ReportSpec<'a> {
    pub format: ReportFormat,
    pub path: &'a Path,
    /// Name of the scanned input, shown in the HTML header.
    pub source: &'a str,
    pub gap_threshold_secs: f64,
}

/// Render `results` in the requested format.
pub fn render(results: &ResultSet, spec: &ReportSpec<'_>) -> Result<String> {
    let rendered = match spec.format {
        ReportFormat::Html => html::render(results, spec.source, spec.gap_threshold_secs)
            .map_err(io::Error::other),
        ReportFormat::Json => serde_json::to_string_pretty(results).map_err(io::Error::other),
    };
    rendered.map_err(|e| ScanError::output(spec.path, e))
}

/// Render and write the report to `spec.path`.
///
/// A failure leaves `results` untouched, so the caller can still report
/// counts or retry elsewhere.
pub fn write_report(results: &ResultSet, spec: &ReportSpec<'_>) -> Result<()> {
    let content = render(results, spec)?;
    std::fs::write(spec.path, content).map_err(|e| ScanError::output(spec.path, e))?;
    log::debug!("Wrote {} report to {}", spec.format, spec.path.display());
    Ok(())
}
