//! Per-line classifiers.
//!
//! Four independent, stateless matchers. Each is applied to every line and a
//! line may trigger any combination of them. The regexes are compiled once.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

/// `YYYY-MM-DDTHH:MM:SS.mmmZ`, matched lexically.
static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}Z").unwrap()
});

/// Loose lexical scan; the numeric range is checked after extraction.
static STATUS_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"status code (4[0-9]{2}|5[0-9]{2})").unwrap());

/// `ERROR` must not follow an underscore, so `MY_ERROR: x` is not an exception.
static EXCEPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:(?:^|[^_])error|exception|failed): (.*)").unwrap());

static RENDER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"renderId":"([A-Za-z0-9_-]+)""#).unwrap());

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Leading spaces that mark a stack-trace continuation line.
pub const CONTINUATION_INDENT: usize = 4;

/// Everything the matchers found on one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMatches<'a> {
    pub timestamp: Option<DateTime<Utc>>,
    pub status_code: Option<u16>,
    pub exception: Option<&'a str>,
    pub render_id: Option<&'a str>,
}

impl<'a> LineMatches<'a> {
    /// Run all four matchers over `line`.
    pub fn classify(line: &'a str) -> Self {
        Self {
            timestamp: match_timestamp(line),
            status_code: match_status_code(line),
            exception: match_exception(line),
            render_id: match_render_id(line),
        }
    }
}

/// Why a timestamp-shaped substring is not a usable time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTimestamp {
    #[error(transparent)]
    Calendar(#[from] chrono::ParseError),

    /// `:60` seconds; not a valid time for the log's own clock.
    #[error("leap second")]
    LeapSecond,
}

/// First timestamp-shaped substring on the line, parsed.
///
/// `None` when nothing has the shape; `Some(Err(_))` when the first match is
/// not a real calendar time. Does not log.
pub fn try_match_timestamp(line: &str) -> Option<Result<DateTime<Utc>, MalformedTimestamp>> {
    let raw = TIMESTAMP.find(line)?.as_str();
    let parsed = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map_err(MalformedTimestamp::from)
        .and_then(|naive| {
            // chrono keeps a leap second as nanoseconds past 1e9
            if naive.and_utc().timestamp_subsec_nanos() >= 1_000_000_000 {
                Err(MalformedTimestamp::LeapSecond)
            } else {
                Ok(naive.and_utc())
            }
        });
    Some(parsed)
}

/// First timestamp on the line.
///
/// A substring that has the right shape but is not a real calendar time
/// (month 13, February 30, hour 25, second 60) counts as no timestamp at all.
pub fn match_timestamp(line: &str) -> Option<DateTime<Utc>> {
    match try_match_timestamp(line)? {
        Ok(ts) => Some(ts),
        Err(e) => {
            log::debug!("Ignoring malformed timestamp in {line:?}: {e}");
            None
        }
    }
}

/// Error status code following `status code `, in 400..=599.
///
/// When a line mentions several, the last one wins.
pub fn match_status_code(line: &str) -> Option<u16> {
    let caps = STATUS_CODE.captures_iter(line).last()?;
    let code: u16 = caps[1].parse().ok()?;
    (400..600).contains(&code).then_some(code)
}

/// Message of an `ERROR: `, `...Exception: ` or `Failed: ` line.
///
/// Everything after the leftmost keyword's `: ` is the message, including
/// any further colons.
pub fn match_exception(line: &str) -> Option<&str> {
    EXCEPTION
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Value of a `renderId":"..."` field.
pub fn match_render_id(line: &str) -> Option<&str> {
    RENDER_ID
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether `line` is indented enough to continue a stack trace.
pub fn is_continuation(line: &str) -> bool {
    line.len() >= CONTINUATION_INDENT && line.bytes().take(CONTINUATION_INDENT).all(|b| b == b' ')
}
