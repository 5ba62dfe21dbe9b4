use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the trendguard binary.
#[allow(deprecated)]
fn trendguard_cmd() -> Command {
    Command::cargo_bin("trendguard").unwrap()
}

#[test]
fn help_works() {
    trendguard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("existing"));
}

#[test]
fn validate_requires_period_and_date() {
    trendguard_cmd()
        .args(["validate", "--report-dir", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--period"));
}

#[test]
fn explain_known_code_prints_remediation() {
    trendguard_cmd()
        .args(["explain", "html_list_inside_paragraph"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation"))
        .stdout(predicate::str::contains("Emitted by `html.structure`."));
}

#[test]
fn explain_unknown_lists_available_ids() {
    trendguard_cmd()
        .args(["explain", "no_such_thing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown check_id or code: no_such_thing"))
        .stderr(predicate::str::contains("consistency.order"));
}
