//! Streaming log analysis.
//!
//! Each line of a log is run through four matchers ([`patterns`]). Timestamps
//! feed a gap detector ([`interval`]), exception lines and their indented
//! stack traces feed a grouper ([`exception`]), and status codes and render
//! ids are recorded directly. Findings land in a [`ResultSet`], one ordered
//! list per category.
//!
//! Lines are read one at a time, so inputs of any size can be scanned. With
//! `jobs > 1` the input is split into chunks scanned in parallel
//! ([`chunked`]); the result is the same as a sequential scan.
//!
//! # Usage
//!
//! ```ignore
//! use logscan::scan::{ScanOptions, scan_path};
//!
//! let results = scan_path(Path::new("app.log"), &ScanOptions::default())?;
//! println!("{} exceptions", results.exceptions.len());
//! ```

pub mod chunked;
pub mod error;
pub mod exception;
pub mod finding;
pub mod interval;
pub mod patterns;
pub mod scanner;

// Re-export main types for convenience
pub use error::ScanError;
pub use finding::{
    Counts, ExceptionFinding, Finding, IntervalFinding, RenderIdFinding, ResultSet,
    StatusCodeFinding,
};
pub use scanner::{ScanOptions, ScanState, Scanner, scan_path, scan_reader, scan_str};
