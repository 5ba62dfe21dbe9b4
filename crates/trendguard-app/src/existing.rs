//! The `existing` use case: decide whether a report set must be generated, regenerated, or can
//! be reused as is.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use trendguard_artifacts::ReportLayout;
use trendguard_domain::ValidationResult;
use trendguard_domain::invocation::check_invocation;
use trendguard_settings::Overrides;
use trendguard_types::{TrendguardData, TrendguardReport};

use crate::config::load_config;
use crate::report::build_report;
use crate::validate::validate_report_dir;

pub const EXIT_EXISTING_VALID: i32 = 0;
pub const EXIT_REPORT_MISSING: i32 = 10;
pub const EXIT_EXISTING_INVALID: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingStatus {
    Missing,
    ExistingInvalid,
    ExistingValid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingAction {
    Generate,
    Regenerate,
    ReuseAndSend,
}

/// JSON payload printed by `trendguard existing`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingPayload {
    pub period: String,
    pub date: String,
    pub base_dir: String,
    pub report_dir: String,
    pub source_file: String,
    pub md_file: String,
    pub html_file: String,
    pub manifest_file: String,
    pub status: ExistingStatus,
    pub action: ExistingAction,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ExistingInput<'a> {
    pub period: &'a str,
    pub date: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    pub overrides: Overrides,
    pub home: Option<&'a Utf8Path>,
}

#[derive(Clone, Debug)]
pub struct ExistingOutput {
    pub exit_code: i32,
    pub payload: ExistingPayload,
    /// Full validation report, absent when the HTML report does not exist yet.
    pub report: Option<TrendguardReport>,
}

/// The HTML report is the marker of a generated set: without it the set is treated as missing
/// regardless of the other files.
pub fn run_existing(input: ExistingInput<'_>) -> anyhow::Result<ExistingOutput> {
    let started_at = OffsetDateTime::now_utc();
    let resolved = load_config(input.config_text, input.overrides.clone(), input.home)?;

    let mut invocation = ValidationResult::new();
    if !check_invocation(input.period, input.date, &resolved.periods, &mut invocation) {
        anyhow::bail!(
            "invalid existing-report invocation: {}",
            invocation.error_messages().join(" ")
        );
    }

    let layout = ReportLayout::under_root(&resolved.output_root, input.period, input.date);
    let mut payload = ExistingPayload {
        period: input.period.to_string(),
        date: input.date.to_string(),
        base_dir: resolved.output_root.to_string(),
        report_dir: layout.report_dir.to_string(),
        source_file: layout.source_file().to_string(),
        md_file: layout.markdown_file().to_string(),
        html_file: layout.html_file().to_string(),
        manifest_file: layout.manifest_file().to_string(),
        status: ExistingStatus::Missing,
        action: ExistingAction::Generate,
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    if !layout.html_file().exists() {
        tracing::info!(html_file = %payload.html_file, "report missing; generation required");
        return Ok(ExistingOutput {
            exit_code: EXIT_REPORT_MISSING,
            payload,
            report: None,
        });
    }

    let domain = validate_report_dir(
        &layout.report_dir,
        &layout.report_dir,
        input.period,
        input.date,
        &resolved,
    )?;
    let data = TrendguardData {
        period: input.period.to_string(),
        date: input.date.to_string(),
        report_dir: layout.report_dir.to_string(),
        expected_report_dir: layout.report_dir.to_string(),
        passed: domain.passed(),
        counts: domain.items.clone(),
        source_strategy: domain.source_strategy.map(|s| s.as_str().to_string()),
    };
    let report = build_report(started_at, domain, data);

    payload.errors = report.errors().into_iter().map(String::from).collect();
    payload.warnings = report.warnings().into_iter().map(String::from).collect();
    let exit_code = if payload.errors.is_empty() {
        payload.status = ExistingStatus::ExistingValid;
        payload.action = ExistingAction::ReuseAndSend;
        EXIT_EXISTING_VALID
    } else {
        payload.status = ExistingStatus::ExistingInvalid;
        payload.action = ExistingAction::Regenerate;
        EXIT_EXISTING_INVALID
    };
    tracing::info!(status = ?payload.status, errors = payload.errors.len(), "existing report checked");

    Ok(ExistingOutput {
        exit_code,
        payload,
        report: Some(report),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use trendguard_test_util::ReportSetBuilder;

    const DATE: &str = "2026-02-17";

    fn root(tmp: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn run(root: &Utf8Path, period: &str) -> anyhow::Result<ExistingOutput> {
        run_existing(ExistingInput {
            period,
            date: DATE,
            config_text: "",
            overrides: Overrides {
                output_root: Some(root.to_string()),
            },
            home: None,
        })
    }

    #[test]
    fn missing_html_requests_generation() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let out = run(&root(&tmp), "daily").expect("run");
        assert_eq!(out.exit_code, EXIT_REPORT_MISSING);
        assert_eq!(out.payload.status, ExistingStatus::Missing);
        assert_eq!(out.payload.action, ExistingAction::Generate);
        assert!(out.payload.html_file.ends_with("daily/2026-02-17/report_2026-02-17.html"));
        assert!(out.report.is_none());

        let json = serde_json::to_value(&out.payload).expect("json");
        assert_eq!(json["status"], "missing");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn valid_set_is_reused() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = root(&tmp);
        ReportSetBuilder::new("weekly", DATE, &["alpha/one", "beta/two"])
            .write_to(root.join("weekly").join(DATE).as_std_path())
            .expect("write");
        let out = run(&root, "weekly").expect("run");
        assert_eq!(out.exit_code, EXIT_EXISTING_VALID, "{:?}", out.payload.errors);
        assert_eq!(out.payload.action, ExistingAction::ReuseAndSend);
        let json = serde_json::to_value(&out.payload).expect("json");
        assert_eq!(json["action"], "reuse_and_send");
    }

    #[test]
    fn broken_set_must_be_regenerated() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = root(&tmp);
        let dir = root.join("weekly").join(DATE);
        ReportSetBuilder::new("weekly", DATE, &["alpha/one"])
            .write_to(dir.as_std_path())
            .expect("write");
        std::fs::remove_file(dir.join("report_manifest.json")).expect("rm");

        let out = run(&root, "weekly").expect("run");
        assert_eq!(out.exit_code, EXIT_EXISTING_INVALID);
        assert_eq!(out.payload.status, ExistingStatus::ExistingInvalid);
        assert_eq!(out.payload.errors.len(), 1);
        assert!(out.payload.errors[0].starts_with("Missing required file: "));
    }

    #[test]
    fn unknown_period_is_a_runtime_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = run(&root(&tmp), "hourly").expect_err("rejected");
        assert!(err.to_string().contains("Invalid period: hourly."));
    }
}
