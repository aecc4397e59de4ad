//! Integration tests for the logscan binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

const SAMPLE_LOG: &str = "\
2024-01-01T00:00:00.000Z INFO boot
2024-01-01T00:00:15.000Z ERROR: disk full
    at module.go:12
    at main.go:3
2024-01-01T00:00:16.000Z returned status code 503 from upstream
{\"renderId\":\"abc-123\"}
";

fn logscan(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_logscan"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run logscan")
}

fn write_log(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

/// Default run writes the HTML report to the working directory.
#[test]
fn test_html_report_in_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "app.log", SAMPLE_LOG);

    let output = logscan(dir.path(), &[&log]);
    assert!(output.status.success(), "logscan should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Report saved as log_analysis_report.html"),
        "Should name the report: {stdout}"
    );

    let html = std::fs::read_to_string(dir.path().join("log_analysis_report.html")).unwrap();
    assert!(html.contains("<pre>Line 5: 2024-01-01T00:00:16.000Z returned status code 503 from upstream: 503</pre>"));
    assert!(html.contains("disk full\n    at module.go:12\n    at main.go:3</pre>"));
    assert!(html.contains("<pre>15.00 seconds</pre>"));
    assert!(html.contains("<pre>abc-123</pre>"));
}

#[test]
fn test_counts_summary_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "app.log", SAMPLE_LOG);

    let output = logscan(dir.path(), &[&log]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("Error status codes       1"), "{stdout}");
    assert!(stdout.contains("Exceptions               1"), "{stdout}");
    assert!(stdout.contains("Long intervals           1"), "{stdout}");
    assert!(stdout.contains("Render ids               1"), "{stdout}");
}

#[test]
fn test_empty_file_still_produces_report() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "empty.log", "");

    let output = logscan(dir.path(), &[&log]);
    assert!(output.status.success());

    let html = std::fs::read_to_string(dir.path().join("log_analysis_report.html")).unwrap();
    assert!(html.contains(r#"<div id="renderIds" class="tab">"#));
    assert!(!html.contains("<pre>"));
}

#[test]
fn test_json_report_to_custom_path() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "app.log", SAMPLE_LOG);

    let output = logscan(dir.path(), &[&log, "--format", "json", "-o", "out.json"]);
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("out.json")).unwrap())
            .unwrap();
    assert_eq!(json["status_codes"][0]["code"], 503);
    assert_eq!(json["exceptions"][0]["message"], "disk full");
    assert_eq!(
        json["exceptions"][0]["stack_trace"],
        serde_json::json!(["    at module.go:12", "    at main.go:3"])
    );
    assert_eq!(json["intervals"][0]["interval_seconds"], 15.0);
    assert_eq!(json["render_ids"][0]["render_id"], "abc-123");
}

/// Parallel chunked scanning writes the same report as a sequential scan.
#[test]
fn test_parallel_scan_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "app.log", &SAMPLE_LOG.repeat(50));

    let sequential = logscan(dir.path(), &[&log, "--format", "json", "-o", "seq.json"]);
    let parallel = logscan(
        dir.path(),
        &[
            &log,
            "--format",
            "json",
            "-o",
            "par.json",
            "--jobs",
            "4",
            "--chunk-lines",
            "3",
        ],
    );
    assert!(sequential.status.success());
    assert!(parallel.status.success());

    assert_eq!(
        std::fs::read_to_string(dir.path().join("seq.json")).unwrap(),
        std::fs::read_to_string(dir.path().join("par.json")).unwrap()
    );
}

#[test]
fn test_reads_stdin() {
    let dir = tempfile::tempdir().unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_logscan"))
        .args(["-", "--format", "json"])
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn logscan");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"GET / status code 404\n")
        .expect("Failed to write to stdin");

    let output = child.wait_with_output().expect("Failed to read output");
    assert!(output.status.success());

    let json = std::fs::read_to_string(dir.path().join("log_analysis_report.json")).unwrap();
    assert!(json.contains("\"code\": 404"));
}

#[test]
fn test_missing_argument_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = logscan(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Should show usage: {stderr}");
}

#[test]
fn test_nonexistent_file_fails_without_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = logscan(dir.path(), &["/nonexistent/path/to/file.log"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("cannot read input /nonexistent/path/to/file.log"),
        "Should show error message: {stderr}"
    );
    assert!(!dir.path().join("log_analysis_report.html").exists());
}

#[test]
fn test_unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "app.log", SAMPLE_LOG);

    let output = logscan(dir.path(), &[&log, "-o", "no/such/dir/report.html"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot write report"), "{stderr}");
    assert!(stderr.contains("--output"), "Should hint at --output: {stderr}");
    assert!(
        stderr.contains("other than no/such/dir/report.html"),
        "Hint should name the failed path: {stderr}"
    );
}
