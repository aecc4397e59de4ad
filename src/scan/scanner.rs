//! Sequential line-by-line scanner.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, Utc};

use super::chunked;
use super::error::{Result, ScanError};
use super::exception::ExceptionGrouper;
use super::finding::{
    Finding, IntervalFinding, RenderIdFinding, ResultSet, StatusCodeFinding, line_ref,
};
use super::interval::{DEFAULT_GAP_THRESHOLD_SECS, GapDetector};
use super::patterns::LineMatches;

/// Default number of lines per chunk in partitioned mode.
pub const DEFAULT_CHUNK_LINES: usize = 10_000;

/// Run-time knobs. Patterns are fixed and not part of this.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub gap_threshold_secs: f64,
    /// Parallel workers; 1 scans sequentially.
    pub jobs: usize,
    pub chunk_lines: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            gap_threshold_secs: DEFAULT_GAP_THRESHOLD_SECS,
            jobs: 1,
            chunk_lines: DEFAULT_CHUNK_LINES,
        }
    }
}

/// Cross-line state carried from one line (or chunk) to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub previous_timestamp: Option<DateTime<Utc>>,
    /// Whether an exception group is open and would take a continuation line.
    pub open_exception: bool,
}

/// What a scanner produced over its lines.
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub results: ResultSet,
    /// Continuation lines for a group opened before the first line scanned.
    /// Always empty for a scanner that was not seeded with an open group.
    pub carried_stack: Vec<String>,
    /// State after the last line, for seeding whatever comes next.
    pub state: ScanState,
}

/// Drives the matchers and the two state machines over lines in order.
#[derive(Debug)]
pub struct Scanner {
    next_line: u64,
    gaps: GapDetector,
    grouper: ExceptionGrouper,
    results: ResultSet,
}

impl Scanner {
    pub fn new(options: &ScanOptions) -> Self {
        Self::seeded(options, ScanState::default(), 1)
    }

    /// Resume from `seed`, numbering lines from `first_line`.
    pub fn seeded(options: &ScanOptions, seed: ScanState, first_line: u64) -> Self {
        Self {
            next_line: first_line,
            gaps: GapDetector::seeded(options.gap_threshold_secs, seed.previous_timestamp),
            grouper: ExceptionGrouper::seeded(seed.open_exception),
            results: ResultSet::default(),
        }
    }

    pub fn scan_line(&mut self, raw: &str) {
        let line_number = self.next_line;
        self.next_line += 1;

        let matches = LineMatches::classify(raw);

        if let Some(ts) = matches.timestamp
            && let Some(interval_seconds) = self.gaps.observe(ts)
        {
            self.results.push(Finding::Interval(IntervalFinding {
                line_ref: line_ref(line_number, raw),
                interval_seconds,
            }));
        }

        if let Some(code) = matches.status_code {
            self.results.push(Finding::StatusCode(StatusCodeFinding {
                line_ref: line_ref(line_number, raw),
                code,
            }));
        }

        self.grouper.observe(
            line_number,
            raw,
            matches.exception,
            &mut self.results.exceptions,
        );

        if let Some(render_id) = matches.render_id {
            self.results.push(Finding::RenderId(RenderIdFinding {
                line_ref: line_ref(line_number, raw),
                render_id: render_id.to_string(),
            }));
        }
    }

    pub fn state(&self) -> ScanState {
        ScanState {
            previous_timestamp: self.gaps.previous(),
            open_exception: self.grouper.is_open(),
        }
    }

    pub fn finish(self) -> ScanOutput {
        let state = self.state();
        ScanOutput {
            results: self.results,
            carried_stack: self.grouper.into_carried_stack(),
            state,
        }
    }
}

/// Scan every line of `reader`.
///
/// `source` names the input in errors. Any read failure aborts the scan and
/// discards what was found so far.
pub fn scan_reader<R: BufRead>(
    reader: R,
    source: &Path,
    options: &ScanOptions,
) -> Result<ResultSet> {
    if options.jobs > 1 {
        return chunked::scan_reader(reader, source, options);
    }

    let mut scanner = Scanner::new(options);
    for line in reader.lines() {
        let line = line.map_err(|e| ScanError::input(source, e))?;
        scanner.scan_line(&line);
    }
    Ok(scanner.finish().results)
}

/// Scan the file at `path`; `-` reads standard input.
pub fn scan_path(path: &Path, options: &ScanOptions) -> Result<ResultSet> {
    let results = if path == Path::new("-") {
        scan_reader(io::stdin().lock(), path, options)?
    } else {
        let file = File::open(path).map_err(|e| ScanError::input(path, e))?;
        scan_reader(BufReader::new(file), path, options)?
    };

    let counts = results.counts();
    log::info!(
        "Scanned {}: {} status codes, {} exceptions, {} long intervals, {} render ids",
        path.display(),
        counts.status_codes,
        counts.exceptions,
        counts.intervals,
        counts.render_ids
    );
    Ok(results)
}

/// Scan an in-memory string. Convenient for tests and small inputs.
pub fn scan_str(input: &str, options: &ScanOptions) -> ResultSet {
    // Reading from a byte slice of valid UTF-8 cannot fail
    scan_reader(input.as_bytes(), Path::new("<memory>"), options).unwrap_or_default()
}
