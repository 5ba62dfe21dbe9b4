use std::process::Command;

fn xtask(arg: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_xtask"))
        .arg(arg)
        .output()
        .expect("run xtask")
}

#[test]
fn xtask_help_runs() {
    let output = xtask("help");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
}

#[test]
fn schema_ids_are_listed() {
    let output = xtask("print-schema-ids");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["trendguard.report.v1", "trendguard.config.v1"]
    );
}

#[test]
fn explain_coverage_passes() {
    assert!(xtask("explain-coverage").status.success());
}

#[test]
fn golden_reports_conform() {
    let output = xtask("conform");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}
