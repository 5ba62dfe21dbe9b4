use crate::{RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Trendguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
    };
    let d = &report.data;
    out.push_str(&format!(
        "- Verdict: **{}**\n- Report: `{}` ({} {})\n- Findings: {}\n",
        verdict,
        d.report_dir,
        d.period,
        d.date,
        report.findings.len()
    ));

    if let Some(c) = &d.counts {
        let reported = c
            .manifest_reported
            .map(|n| n.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        out.push_str(&format!(
            "- Items: source {}, markdown {}, html {}, manifest {} (reported {})\n",
            c.source, c.markdown, c.html, c.manifest_repos, reported
        ));
    }
    out.push('\n');

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };

        out.push_str(&format!(
            "- [{}] `{}` / `{}`: {}",
            sev, f.check_id, f.code, f.message
        ));
        if let Some(loc) = &f.location {
            match loc.line {
                Some(line) => out.push_str(&format!(" (`{}`:{})", loc.path, line)),
                None => out.push_str(&format!(" (`{}`)", loc.path)),
            }
        }
        out.push('\n');

        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {}\n", help));
        }
    }

    out
}
