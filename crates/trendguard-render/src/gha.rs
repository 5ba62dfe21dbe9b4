use crate::{RenderableReport, RenderableSeverity};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path},line={line}::{message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for f in &report.findings {
        let level = match f.severity {
            RenderableSeverity::Error => "error",
            RenderableSeverity::Warning => "warning",
        };

        let mut meta = String::new();
        if let Some(loc) = &f.location {
            meta.push_str(&format!("file={}", escape_property(&loc.path)));
            if let Some(line) = loc.line {
                meta.push_str(&format!(",line={}", line));
            }
        }

        let message = escape_data(&format!("[{}:{}] {}", f.check_id, f.code, f.message));

        if meta.is_empty() {
            out.push(format!("::{}::{}", level, message));
        } else {
            out.push(format!("::{} {}::{}", level, meta, message));
        }
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderableData, RenderableFinding, RenderableLocation, RenderableVerdictStatus};

    fn report(findings: Vec<RenderableFinding>) -> RenderableReport {
        RenderableReport {
            verdict: RenderableVerdictStatus::Fail,
            findings,
            data: RenderableData {
                period: "daily".to_string(),
                date: "2026-02-17".to_string(),
                report_dir: "/r".to_string(),
                counts: None,
            },
        }
    }

    #[test]
    fn annotations_carry_location_and_escape_message() {
        let lines = render_github_annotations(&report(vec![
            RenderableFinding {
                severity: RenderableSeverity::Error,
                check_id: "manifest.schema".to_string(),
                code: "manifest_invalid_json".to_string(),
                message: "Manifest JSON parse error: 100% bad\nline two.".to_string(),
                location: Some(RenderableLocation {
                    path: "report_manifest.json".to_string(),
                    line: Some(3),
                }),
                help: None,
            },
            RenderableFinding {
                severity: RenderableSeverity::Warning,
                check_id: "consistency.counts".to_string(),
                code: "cross_file_count_mismatch".to_string(),
                message: "note".to_string(),
                location: None,
                help: None,
            },
        ]));
        assert_eq!(lines.len(), 2);
        insta::assert_snapshot!(lines[0], @"::error file=report_manifest.json,line=3::[manifest.schema:manifest_invalid_json] Manifest JSON parse error: 100%25 bad%0Aline two.");
        assert_eq!(lines[1], "::warning::[consistency.counts:cross_file_count_mismatch] note");
    }

    #[test]
    fn property_values_escape_separators() {
        assert_eq!(escape_property("a,b:c"), "a%2Cb%3Ac");
    }
}
