//! The `validate` use case: check one report directory and produce a report.

use camino::Utf8Path;
use time::OffsetDateTime;
use trendguard_artifacts::{ReportLayout, check_location, check_presence, expected_report_dir};
use trendguard_domain::invocation::check_invocation;
use trendguard_domain::{DomainReport, Expectation, ValidationResult};
use trendguard_settings::{Overrides, ResolvedConfig};
use trendguard_types::{TrendguardData, TrendguardReport, Verdict};

use crate::config::load_config;
use crate::report::build_report;

/// Input for the validate use case.
#[derive(Clone, Debug)]
pub struct ValidateInput<'a> {
    /// Report directory as given by the caller.
    pub report_dir: &'a Utf8Path,
    pub period: &'a str,
    pub date: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Home directory used for `~/` expansion and the default output root.
    pub home: Option<&'a Utf8Path>,
}

/// Output from the validate use case.
#[derive(Clone, Debug)]
pub struct ValidateOutput {
    pub report: TrendguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the validate use case: resolve config, check the location and presence of the report
/// set, then analyse its content.
pub fn run_validate(input: ValidateInput<'_>) -> anyhow::Result<ValidateOutput> {
    let started_at = OffsetDateTime::now_utc();
    let resolved = load_config(input.config_text, input.overrides.clone(), input.home)?;

    let expected = expected_report_dir(&resolved.output_root, input.period, input.date);
    let domain = validate_report_dir(input.report_dir, &expected, input.period, input.date, &resolved)?;

    let data = TrendguardData {
        period: input.period.to_string(),
        date: input.date.to_string(),
        report_dir: input.report_dir.to_string(),
        expected_report_dir: expected.to_string(),
        passed: domain.passed(),
        counts: domain.items.clone(),
        source_strategy: domain.source_strategy.map(|s| s.as_str().to_string()),
    };
    let report = build_report(started_at, domain, data);

    tracing::info!(
        verdict = ?report.verdict.status,
        errors = report.verdict.counts.error,
        warnings = report.verdict.counts.warn,
        "validation finished"
    );

    Ok(ValidateOutput {
        report,
        resolved_config: resolved,
    })
}

/// Preflight (invocation, location, presence) then content analysis.
pub(crate) fn validate_report_dir(
    report_dir: &Utf8Path,
    expected: &Utf8Path,
    period: &str,
    date: &str,
    resolved: &ResolvedConfig,
) -> anyhow::Result<DomainReport> {
    let mut result = ValidationResult::new();

    if !check_invocation(period, date, &resolved.periods, &mut result) {
        tracing::debug!(period, date, "invalid invocation; halting");
        return Ok(DomainReport::halted(result));
    }

    if !check_location(report_dir, expected, &mut result).matches() {
        tracing::debug!("report directory rejected; halting");
        return Ok(DomainReport::halted(result));
    }

    let layout = ReportLayout::new(report_dir, date);
    if !check_presence(&layout, &mut result) {
        tracing::debug!("report set incomplete; halting");
        return Ok(DomainReport::halted(result));
    }

    let artifacts = trendguard_artifacts::read_artifacts(&layout)?;
    let expect = Expectation {
        period: period.to_string(),
        date: date.to_string(),
    };
    let domain = trendguard_domain::evaluate(&artifacts, &expect, result);
    tracing::debug!(items = ?domain.items, findings = domain.findings.len(), "content analysed");
    Ok(domain)
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use trendguard_test_util::ReportSetBuilder;
    use trendguard_types::SCHEMA_REPORT_V1;

    const DATE: &str = "2026-02-17";

    struct Fixture {
        _tmp: tempfile::TempDir,
        root: Utf8PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = tempfile::tempdir().expect("create temp dir");
            let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path");
            Self { _tmp: tmp, root }
        }

        fn output_root(&self) -> Utf8PathBuf {
            self.root.join("trending")
        }

        fn write_set(&self, repos: &[&str]) -> Utf8PathBuf {
            let dir = expected_report_dir(&self.output_root(), "weekly", DATE);
            std::fs::create_dir_all(&dir).expect("mkdir");
            ReportSetBuilder::new("weekly", DATE, repos)
                .write_to(dir.as_std_path())
                .expect("write set");
            dir
        }

        fn run(&self, report_dir: &Utf8Path, period: &str, date: &str) -> ValidateOutput {
            run_validate(ValidateInput {
                report_dir,
                period,
                date,
                config_text: "",
                overrides: Overrides {
                    output_root: Some(self.output_root().to_string()),
                },
                home: None,
            })
            .expect("run_validate")
        }
    }

    #[test]
    fn valid_set_passes() {
        let fx = Fixture::new();
        let dir = fx.write_set(&["alpha/one", "beta/two"]);
        let out = fx.run(&dir, "weekly", DATE);
        let report = out.report;
        assert_eq!(report.schema, SCHEMA_REPORT_V1);
        assert_eq!(report.verdict.status, Verdict::Pass, "{:?}", report.errors());
        assert!(report.data.passed);
        assert_eq!(report.data.counts.as_ref().map(|c| c.html), Some(2));
        assert_eq!(report.data.source_strategy.as_deref(), Some("entry_containers"));
        assert_eq!(verdict_exit_code(report.verdict.status), 0);
    }

    #[test]
    fn invalid_invocation_halts_before_location() {
        let fx = Fixture::new();
        let dir = fx.write_set(&["alpha/one"]);
        let report = fx.run(&dir, "yearly", "2026-02-30").report;
        assert_eq!(
            report.errors(),
            vec![
                "Invalid period: yearly. Expected one of [daily, monthly, weekly].",
                "Invalid date: 2026-02-30. Expected YYYY-MM-DD.",
            ]
        );
        assert!(report.data.counts.is_none());
        assert_eq!(verdict_exit_code(report.verdict.status), 2);
    }

    #[test]
    fn directory_outside_root_skips_content_checks() {
        let fx = Fixture::new();
        let elsewhere = fx.root.join("other").join("weekly").join(DATE);
        std::fs::create_dir_all(&elsewhere).expect("mkdir");
        let report = fx.run(&elsewhere, "weekly", DATE).report;
        let errors = report.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Report directory must be exactly under"));
    }

    #[test]
    fn missing_files_are_all_listed() {
        let fx = Fixture::new();
        let dir = fx.write_set(&["alpha/one"]);
        std::fs::remove_file(dir.join("report_manifest.json")).expect("rm");
        std::fs::remove_file(dir.join(format!("report_{DATE}.md"))).expect("rm");
        let report = fx.run(&dir, "weekly", DATE).report;
        let errors = report.errors();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.starts_with("Missing required file: ")));
    }

    #[test]
    fn content_errors_fail_with_fingerprints() {
        let fx = Fixture::new();
        let dir = fx.write_set(&["alpha/one", "beta/two"]);
        let html = dir.join(format!("report_{DATE}.html"));
        let text = std::fs::read_to_string(&html).expect("read");
        std::fs::write(&html, text.replace("</body>", "<p>`x`</p></body>")).expect("write");
        let report = fx.run(&dir, "weekly", DATE).report;
        assert_eq!(report.verdict.status, Verdict::Fail);
        assert!(report.findings.iter().all(|f| f.fingerprint.is_some()));
        assert!(report.errors().iter().any(|e| e.contains("backtick")));
    }
}
