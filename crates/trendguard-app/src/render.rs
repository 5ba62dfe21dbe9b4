//! Render use cases: text, markdown, and GitHub annotations from in-memory reports.

use trendguard_render::RenderableReport;

pub fn render_text(report: &RenderableReport) -> String {
    trendguard_render::render_text(report)
}

pub fn render_markdown(report: &RenderableReport) -> String {
    trendguard_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    trendguard_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendguard_render::{
        RenderableData, RenderableFinding, RenderableLocation, RenderableSeverity,
        RenderableVerdictStatus,
    };

    fn sample_report() -> RenderableReport {
        RenderableReport {
            verdict: RenderableVerdictStatus::Warn,
            findings: vec![
                RenderableFinding {
                    severity: RenderableSeverity::Warning,
                    check_id: "source.extract".to_string(),
                    code: "source_duplicates_collapsed".to_string(),
                    message: "Collapsed 1 duplicate repo entries in original_trending.html.".to_string(),
                    location: Some(RenderableLocation {
                        path: "original_trending.html".to_string(),
                        line: None,
                    }),
                    help: None,
                },
                RenderableFinding {
                    severity: RenderableSeverity::Warning,
                    check_id: "markdown.structure".to_string(),
                    code: "markdown_link_mismatch".to_string(),
                    message: "second".to_string(),
                    location: None,
                    help: None,
                },
            ],
            data: RenderableData {
                period: "weekly".to_string(),
                date: "2026-02-17".to_string(),
                report_dir: "/r/weekly/2026-02-17".to_string(),
                counts: None,
            },
        }
    }

    #[test]
    fn render_annotations_respects_max() {
        let report = sample_report();
        let annotations = render_annotations(&report, 1);
        assert_eq!(annotations.len(), 1);
    }

    #[test]
    fn render_text_passes_with_warnings() {
        let text = render_text(&sample_report());
        assert!(text.starts_with("VALIDATION PASSED\nWARNINGS\n1. Collapsed"));
        assert!(text.ends_with("2. second\n"));
    }

    #[test]
    fn render_markdown_smoke() {
        let markdown = render_markdown(&sample_report());
        assert!(markdown.contains("Verdict: **WARN**"));
    }
}
