//! Log scanning and reporting.
//!
//! [`scan`] extracts findings from a log file; [`report`] renders them.

pub mod report;
pub mod scan;
pub mod styling;

pub use report::{ReportFormat, ReportSpec, write_report};
pub use scan::{ResultSet, ScanError, ScanOptions, scan_path};
