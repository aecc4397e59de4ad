//! Partitioned scanning across parallel workers.
//!
//! Input is still read as a stream, one window of `jobs` chunks at a time, so
//! memory stays bounded by `jobs * chunk_lines` lines.
//!
//! Gap detection and exception grouping both depend on earlier lines, so each
//! chunk is seeded with the [`ScanState`] at the end of the previous chunk.
//! Seeds are computed up front with a cheap backward walk over each chunk
//! ([`boundary_state`]), after which chunks are scanned independently. A
//! chunk that starts inside an open exception group hands back the leading
//! continuation lines, and the coordinator attaches them to the last
//! exception of the results merged so far.
//!
//! The merged result is identical to a sequential scan.

use std::io::BufRead;
use std::path::Path;

use rayon::prelude::*;

use super::error::{Result, ScanError};
use super::finding::ResultSet;
use super::patterns::{is_continuation, match_exception, try_match_timestamp};
use super::scanner::{ScanOptions, ScanOutput, ScanState, Scanner};

/// A contiguous slice of input lines assigned to one worker.
#[derive(Debug)]
struct Chunk {
    first_line: u64,
    seed: ScanState,
    lines: Vec<String>,
}

impl Chunk {
    fn scan(&self, options: &ScanOptions) -> ScanOutput {
        let mut scanner = Scanner::seeded(options, self.seed, self.first_line);
        for line in &self.lines {
            scanner.scan_line(line);
        }
        scanner.finish()
    }
}

/// State after scanning `lines` from `seed`, without scanning them.
///
/// The last valid timestamp wins; malformed ones are skipped silently, since
/// the scan itself reports them. For grouping, trailing continuation lines
/// don't change whether a group is open, so only the last line before them
/// matters: an exception leaves a group open, anything else closes it.
pub fn boundary_state(lines: &[String], seed: ScanState) -> ScanState {
    let previous_timestamp = lines
        .iter()
        .rev()
        .find_map(|line| try_match_timestamp(line).and_then(|parsed| parsed.ok()))
        .or(seed.previous_timestamp);

    let open_exception = lines
        .iter()
        .rev()
        .find_map(|line| {
            let is_exception = match_exception(line).is_some();
            (is_exception || !is_continuation(line)).then_some(is_exception)
        })
        .unwrap_or(seed.open_exception);

    ScanState {
        previous_timestamp,
        open_exception,
    }
}

/// Scan `reader` in parallel chunks of `options.chunk_lines` lines.
pub fn scan_reader<R: BufRead>(
    reader: R,
    source: &Path,
    options: &ScanOptions,
) -> Result<ResultSet> {
    let jobs = options.jobs.max(1);
    let chunk_lines = options.chunk_lines.max(1);

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => Some(pool),
        Err(e) => {
            log::warn!("Falling back to the global thread pool: {e}");
            None
        }
    };

    let mut lines = reader.lines();
    let mut results = ResultSet::default();
    let mut state = ScanState::default();
    let mut next_line: u64 = 1;

    loop {
        let mut chunks = Vec::with_capacity(jobs);
        let mut seed = state;
        for _ in 0..jobs {
            let mut chunk = Vec::with_capacity(chunk_lines);
            for line in lines.by_ref().take(chunk_lines) {
                chunk.push(line.map_err(|e| ScanError::input(source, e))?);
            }
            if chunk.is_empty() {
                break;
            }
            let first_line = next_line;
            next_line += chunk.len() as u64;
            let next_seed = boundary_state(&chunk, seed);
            chunks.push(Chunk {
                first_line,
                seed,
                lines: chunk,
            });
            seed = next_seed;
        }

        if chunks.is_empty() {
            break;
        }

        log::debug!(
            "Scanning {} chunks from line {}",
            chunks.len(),
            chunks[0].first_line
        );

        let scan_window = || -> Vec<ScanOutput> {
            chunks.par_iter().map(|chunk| chunk.scan(options)).collect()
        };
        let outputs = match &pool {
            Some(pool) => pool.install(scan_window),
            None => scan_window(),
        };

        for output in outputs {
            results.extend(output.results, output.carried_stack);
            state = output.state;
        }
    }

    Ok(results)
}
