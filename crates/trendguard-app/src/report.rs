use anyhow::Context;
use time::OffsetDateTime;
use trendguard_domain::DomainReport;
use trendguard_render::{
    RenderableCounts, RenderableData, RenderableFinding, RenderableLocation, RenderableReport,
    RenderableSeverity, RenderableVerdictStatus,
};
use trendguard_types::{
    Finding, RunMeta, SCHEMA_REPORT_V1, Severity, ToolMeta, TrendguardData, TrendguardReport,
    Verdict, VerdictCounts, VerdictSummary, ids,
};

fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "trendguard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

pub(crate) fn build_report(
    started_at: OffsetDateTime,
    domain: DomainReport,
    data: TrendguardData,
) -> TrendguardReport {
    let ended_at = OffsetDateTime::now_utc();
    let duration_ms = (ended_at - started_at).whole_milliseconds().max(0) as u64;

    TrendguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        run: RunMeta {
            started_at,
            ended_at: Some(ended_at),
            duration_ms: Some(duration_ms),
        },
        verdict: VerdictSummary {
            status: domain.verdict,
            counts: domain.counts,
        },
        findings: domain.findings,
        data,
    }
}

pub fn parse_report_json(text: &str) -> anyhow::Result<TrendguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse trendguard report")
}

pub fn serialize_report(report: &TrendguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &TrendguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict.status {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            period: report.data.period.clone(),
            date: report.data.date.clone(),
            report_dir: report.data.report_dir.clone(),
            counts: report.data.counts.as_ref().map(|c| RenderableCounts {
                source: c.source,
                markdown: c.markdown,
                html: c.html,
                manifest_repos: c.manifest_repos,
                manifest_reported: c.manifest_reported,
            }),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: f.check_id.clone(),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.clone(),
            line: loc.line,
        }),
        help: f.help.clone(),
    }
}

/// Report describing a tool failure rather than a property of the report set.
pub fn runtime_error_report(message: &str, period: &str, date: &str) -> TrendguardReport {
    let now = OffsetDateTime::now_utc();
    let mut finding = Finding::new(
        Severity::Error,
        ids::CHECK_TOOL_RUNTIME,
        ids::CODE_RUNTIME_ERROR,
        message,
    );
    finding.with_help("Fix the tool error and re-run trendguard.");

    TrendguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        run: RunMeta {
            started_at: now,
            ended_at: Some(now),
            duration_ms: Some(0),
        },
        verdict: VerdictSummary {
            status: Verdict::Fail,
            counts: VerdictCounts {
                warn: 0,
                error: 1,
            },
        },
        findings: vec![finding],
        data: TrendguardData {
            period: period.to_string(),
            date: date.to_string(),
            ..TrendguardData::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_report_round_trips_through_json() {
        let report = runtime_error_report("read original_trending.html", "weekly", "2026-02-17");
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        let parsed = parse_report_json(&text).expect("parse");
        assert_eq!(parsed.verdict.status, Verdict::Fail);
        assert_eq!(parsed.findings[0].code, ids::CODE_RUNTIME_ERROR);
        assert!(!parsed.data.passed);
    }

    #[test]
    fn rejects_foreign_schema() {
        let err = parse_report_json(r#"{"schema":"other.report.v1"}"#).expect_err("rejected");
        assert!(err.to_string().contains("unknown report schema"));
        assert!(parse_report_json("not json").is_err());
    }

    #[test]
    fn renderable_keeps_order_and_location() {
        let mut report = runtime_error_report("boom", "daily", "2026-02-17");
        let mut warn = Finding::new(Severity::Warning, ids::CHECK_SOURCE_EXTRACT, ids::CODE_SOURCE_FALLBACK_USED, "fallback");
        warn.at("original_trending.html", Some(4));
        report.findings.insert(0, warn);

        let r = to_renderable(&report);
        assert_eq!(r.verdict, RenderableVerdictStatus::Fail);
        assert_eq!(r.findings[0].severity, RenderableSeverity::Warning);
        assert_eq!(r.findings[0].location.as_ref().and_then(|l| l.line), Some(4));
        assert_eq!(r.findings[1].message, "boom");
        assert!(r.data.counts.is_none());
    }
}
