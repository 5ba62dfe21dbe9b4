//! End-to-end CLI tests against the on-disk report sets in `tests/fixtures/`.
//!
//! Each fixture is an output root holding one `weekly/2026-02-17` report directory, so the CLI
//! is always pointed at the fixture with `--output-root`.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;
use trendguard_test_util::normalize_nondeterministic;

const PERIOD: &str = "weekly";
const DATE: &str = "2026-02-17";

/// Helper to get a Command for the trendguard binary.
#[allow(deprecated)]
fn trendguard_cmd() -> Command {
    Command::cargo_bin("trendguard").expect("trendguard binary not found - run `cargo build` first")
}

/// Get the path to the test fixtures directory
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("trendguard-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

fn report_dir(fixture: &str) -> PathBuf {
    fixtures_dir().join(fixture).join(PERIOD).join(DATE)
}

/// `validate` invocation for a fixture with an isolated, nonexistent config path.
fn validate_cmd(fixture: &str, tmp: &TempDir) -> Command {
    let mut cmd = trendguard_cmd();
    cmd.arg("--config")
        .arg(tmp.path().join("trendguard.toml"))
        .arg("--output-root")
        .arg(fixtures_dir().join(fixture))
        .arg("validate")
        .arg("--report-dir")
        .arg(report_dir(fixture))
        .args(["--period", PERIOD, "--date", DATE]);
    cmd
}

/// Run `validate --format json` and return the exit code and parsed report.
fn run_json(fixture: &str) -> (i32, Value) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let output = validate_cmd(fixture, &tmp)
        .args(["--format", "json"])
        .output()
        .expect("Failed to run command");
    let exit_code = output.status.code().unwrap_or(-1);
    let report: Value = serde_json::from_slice(&output.stdout).expect("stdout is a JSON report");
    (exit_code, report)
}

fn errors(report: &Value) -> Vec<String> {
    report["findings"]
        .as_array()
        .expect("findings array")
        .iter()
        .filter(|f| f["severity"] == "error")
        .map(|f| f["message"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn fixture_pass_matches_golden_report() {
    let (exit_code, report) = run_json("pass");
    assert_eq!(exit_code, 0, "pass fixture should exit with 0");

    let expected_path = fixtures_dir().join("pass").join("expected.report.json");
    let expected: Value = serde_json::from_str(
        &std::fs::read_to_string(&expected_path).expect("Failed to read expected report"),
    )
    .expect("Failed to parse expected report");

    let actual = normalize_nondeterministic(report);
    let expected = normalize_nondeterministic(expected);
    assert_eq!(
        actual,
        expected,
        "Report mismatch.\n\nActual:\n{}",
        serde_json::to_string_pretty(&actual).unwrap()
    );
}

#[test]
fn fixture_pass_text_output() {
    let tmp = TempDir::new().expect("tempdir");
    validate_cmd("pass", &tmp)
        .assert()
        .success()
        .stdout("VALIDATION PASSED\n");
}

#[test]
fn fixture_source_fallback_passes_with_warning() {
    let tmp = TempDir::new().expect("tempdir");
    validate_cmd("warn/source_fallback", &tmp)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("VALIDATION PASSED\nWARNINGS\n1. "))
        .stdout(predicate::str::contains("heading anchors"));

    let (exit_code, report) = run_json("warn/source_fallback");
    assert_eq!(exit_code, 0);
    assert_eq!(report["verdict"]["status"], "warn");
    assert_eq!(report["data"]["source_strategy"], "heading_anchors");
}

#[test]
fn fixture_count_mismatch_fails() {
    let (exit_code, report) = run_json("fail/count_mismatch");
    assert_eq!(exit_code, 2);
    assert_eq!(
        errors(&report),
        vec![
            "Manifest reported_item_count (4) does not match repos length (3).",
            "Cross-file count mismatch: source=3, markdown=2, html=3, manifest_reported=4, manifest_repos=3.",
            "Manifest reported_item_count mismatch with repos length: reported=4, repos=3.",
            "Markdown repo order/content does not match manifest repos.",
            "Source vs Markdown repo mismatch: first_mismatch_at=3 expected=microsoft/markitdown actual=<none>; missing=[microsoft/markitdown]",
        ]
    );
    assert_eq!(report["data"]["passed"], false);
}

#[test]
fn fixture_html_structure_fails() {
    let (exit_code, report) = run_json("fail/html_structure");
    assert_eq!(exit_code, 2);
    assert_eq!(
        errors(&report),
        vec![
            "HTML contains invalid nested structure: <p><ul>/<ol>.",
            "HTML body contains Markdown backticks (`), which is disallowed.",
            "HTML repo-card #2 is missing labels: 效果.",
            "HTML repo-card #3 is missing .suggestion-box.",
        ]
    );
}

#[test]
fn fixture_source_repo_mismatch_itemizes_each_artifact() {
    let tmp = TempDir::new().expect("tempdir");
    let diff = "first_mismatch_at=2 expected=astral-sh/uv actual=ollama/ollama; missing=[astral-sh/uv]; extra=[ollama/ollama]";
    validate_cmd("fail/source_repo_mismatch", &tmp)
        .assert()
        .code(2)
        .stdout(format!(
            "VALIDATION FAILED\n\
1. Source vs Markdown repo mismatch: {diff}\n\
2. Source vs HTML repo mismatch: {diff}\n\
3. Source vs Manifest repo mismatch: {diff}\n"
        ));
}

#[test]
fn report_out_feeds_md_and_annotations() {
    let tmp = TempDir::new().expect("tempdir");
    let report_path = tmp.path().join("out").join("report.json");
    let md_path = tmp.path().join("out").join("report.md");

    validate_cmd("fail/html_structure", &tmp)
        .arg("--report-out")
        .arg(&report_path)
        .arg("--markdown-out")
        .arg(&md_path)
        .assert()
        .code(2);

    let md = std::fs::read_to_string(&md_path).expect("markdown written");
    assert!(md.contains("Verdict: **FAIL**"));

    trendguard_cmd()
        .arg("md")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(md);

    trendguard_cmd()
        .arg("annotations")
        .arg("--report")
        .arg(&report_path)
        .args(["--max", "2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "::error file=report_2026-02-17.html,line=",
        ))
        .stdout(predicate::function(|s: &str| s.lines().count() == 2));
}

#[test]
fn report_dir_outside_output_root_is_rejected() {
    let tmp = TempDir::new().expect("tempdir");
    trendguard_cmd()
        .arg("--config")
        .arg(tmp.path().join("trendguard.toml"))
        .arg("--output-root")
        .arg(tmp.path())
        .arg("validate")
        .arg("--report-dir")
        .arg(report_dir("pass"))
        .args(["--period", PERIOD, "--date", DATE])
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "1. Report directory must be exactly under the configured output root",
        ));
}

#[test]
fn unreadable_config_is_a_runtime_error() {
    let tmp = TempDir::new().expect("tempdir");
    let cfg = tmp.path().join("trendguard.toml");
    std::fs::write(&cfg, "output_root = [").expect("write config");
    let report_path = tmp.path().join("report.json");

    trendguard_cmd()
        .arg("--config")
        .arg(&cfg)
        .arg("validate")
        .arg("--report-dir")
        .arg(report_dir("pass"))
        .args(["--period", PERIOD, "--date", DATE])
        .arg("--report-out")
        .arg(&report_path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("trendguard error: parse config"));

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("report written"))
            .expect("json");
    assert_eq!(report["findings"][0]["code"], "runtime_error");
}
