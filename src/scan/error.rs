//! Scan error types
//!
//! Only the I/O boundaries can fail. Matching never produces an error: a line
//! that fails every matcher simply contributes no findings, and a timestamp
//! that matches lexically but is not a real calendar time is treated as if
//! the line had no timestamp.
//!
//! # Usage
//!
//! ```ignore
//! // Pattern match on errors after converting to anyhow
//! if let Some(ScanError::InputUnavailable { path, .. }) = err.downcast_ref() {
//!     eprintln!("cannot read {}", path.display());
//! }
//! ```

use std::io;
use std::path::PathBuf;

/// Failures at the I/O boundary of a scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Input could not be opened, or a read failed mid-scan.
    ///
    /// Fatal: the scan is aborted and no partial result is returned.
    #[error("cannot read input {}", path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Report artifact could not be written.
    ///
    /// The in-memory result set is untouched; callers may retry elsewhere.
    #[error("cannot write report {}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    pub fn input(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::InputUnavailable {
            path: path.into(),
            source,
        }
    }

    pub fn output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::OutputWriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Path of the file the failing operation was touching.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::InputUnavailable { path, .. } | Self::OutputWriteFailure { path, .. } => path,
        }
    }
}

pub type Result<T, E = ScanError> = std::result::Result<T, E>;
