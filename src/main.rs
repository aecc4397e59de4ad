//! Scan a log file and write a tabbed report of what stands out.
//!
//! # Usage
//!
//! ```bash
//! # HTML report in ./log_analysis_report.html
//! logscan /var/log/app.log
//!
//! # JSON, from stdin, four workers
//! cat app.log | logscan - --format json -j 4
//!
//! # See per-line decisions (malformed timestamps, chunk scheduling)
//! logscan -v app.log
//! ```

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use color_print::cformat;
use logscan::report::{ReportFormat, ReportSpec, write_report};
use logscan::scan::scanner::DEFAULT_CHUNK_LINES;
use logscan::scan::{ScanError, ScanOptions, scan_path};
use logscan::styling::{
    eprintln, error_message, format_counts, hint_message, println, success_message,
};

#[derive(Parser)]
#[command(name = "logscan")]
#[command(about = "Find error status codes, exceptions, long gaps and render ids in a log file")]
#[command(version)]
struct Cli {
    /// Log file to scan (`-` reads stdin)
    file: PathBuf,

    /// Where to write the report [default: log_analysis_report.<format>]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Html)]
    format: ReportFormat,

    /// Scan in parallel chunks with this many workers
    #[arg(short, long, default_value = "1")]
    jobs: NonZeroUsize,

    /// Lines per chunk when scanning in parallel
    #[arg(long, default_value_t = NonZeroUsize::new(DEFAULT_CHUNK_LINES).unwrap_or(NonZeroUsize::MIN))]
    chunk_lines: NonZeroUsize,

    /// Show debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_message(format!("{e:#}")));
            if let Some(err @ ScanError::OutputWriteFailure { .. }) = e.downcast_ref() {
                eprintln!(
                    "{}",
                    hint_message(format!(
                        "Pass --output to write somewhere other than {}",
                        err.path().display()
                    ))
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = ScanOptions {
        jobs: cli.jobs.get(),
        chunk_lines: cli.chunk_lines.get(),
        ..ScanOptions::default()
    };

    let results = scan_path(&cli.file, &options)?;

    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.format.default_path());
    let source = cli.file.display().to_string();
    let spec = ReportSpec {
        format: cli.format,
        path: &path,
        source: &source,
        gap_threshold_secs: options.gap_threshold_secs,
    };

    // Counts first: they are still useful if the write fails
    println!("{}", format_counts(&results.counts()));
    write_report(&results, &spec).with_context(|| format!("{} report not saved", cli.format))?;

    println!(
        "{}",
        success_message(cformat!("Report saved as <bold>{}</>", path.display()))
    );
    Ok(())
}
