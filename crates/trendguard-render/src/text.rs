use crate::{RenderableFinding, RenderableReport, RenderableVerdictStatus};

/// Itemized terminal report: a status line, numbered errors, then numbered warnings.
///
/// `passed` follows the verdict, so a report with warnings only still reads `VALIDATION PASSED`.
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::new();

    if report.verdict == RenderableVerdictStatus::Fail {
        out.push_str("VALIDATION FAILED\n");
        push_numbered(&mut out, report.errors());
    } else {
        out.push_str("VALIDATION PASSED\n");
    }

    let mut warnings = report.warnings().peekable();
    if warnings.peek().is_some() {
        out.push_str("WARNINGS\n");
        push_numbered(&mut out, warnings);
    }

    out
}

fn push_numbered<'a>(out: &mut String, findings: impl Iterator<Item = &'a RenderableFinding>) {
    for (idx, f) in findings.enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, f.message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderableData, RenderableSeverity};

    fn finding(severity: RenderableSeverity, message: &str) -> RenderableFinding {
        RenderableFinding {
            severity,
            check_id: "manifest.schema".to_string(),
            code: "manifest_date_mismatch".to_string(),
            message: message.to_string(),
            location: None,
            help: None,
        }
    }

    fn report(verdict: RenderableVerdictStatus, findings: Vec<RenderableFinding>) -> RenderableReport {
        RenderableReport {
            verdict,
            findings,
            data: RenderableData {
                period: "weekly".to_string(),
                date: "2026-02-17".to_string(),
                report_dir: "/r/weekly/2026-02-17".to_string(),
                counts: None,
            },
        }
    }

    #[test]
    fn clean_pass() {
        let text = render_text(&report(RenderableVerdictStatus::Pass, Vec::new()));
        assert_eq!(text, "VALIDATION PASSED\n");
    }

    #[test]
    fn failure_lists_errors_then_warnings_in_recorded_order() {
        let text = render_text(&report(
            RenderableVerdictStatus::Fail,
            vec![
                finding(RenderableSeverity::Error, "Second problem."),
                finding(RenderableSeverity::Warning, "Heads up."),
                finding(RenderableSeverity::Error, "Another problem."),
            ],
        ));
        insta::assert_snapshot!(text, @r"
        VALIDATION FAILED
        1. Second problem.
        2. Another problem.
        WARNINGS
        1. Heads up.
        ");
    }

    #[test]
    fn warnings_do_not_fail() {
        let text = render_text(&report(
            RenderableVerdictStatus::Warn,
            vec![finding(RenderableSeverity::Warning, "Collapsed 1 duplicate repo entries.")],
        ));
        assert_eq!(
            text,
            "VALIDATION PASSED\nWARNINGS\n1. Collapsed 1 duplicate repo entries.\n"
        );
    }
}
