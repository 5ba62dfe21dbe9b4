use super::parser::{HtmlReport, SECTION_MARKER};
use crate::markdown::join_display;
use crate::result::ValidationResult;
use regex::Regex;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use trendguard_types::ids;

/// Classes that must each be used somewhere in the document.
pub const REQUIRED_CLASSES: [&str; 4] = ["overview-section", "repo-card", "tag", "suggestion-box"];

/// Label categories every card carries.
pub const REQUIRED_LABELS: [&str; 4] = ["是什么", "作用", "效果", "项目分析"];

pub fn check_html_report(html: &str, report: &HtmlReport, path: &str, result: &mut ValidationResult) {
    let required: BTreeSet<&str> = REQUIRED_CLASSES.into_iter().collect();
    for class in required {
        if !report.classes_seen.contains(class) {
            result
                .error(
                    ids::CHECK_HTML_STRUCTURE,
                    ids::CODE_HTML_MISSING_CLASS,
                    format!("HTML missing required class usage: .{class}"),
                )
                .at(path, None);
        }
    }

    if !report.section_heading_found {
        result
            .error(
                ids::CHECK_HTML_STRUCTURE,
                ids::CODE_HTML_MISSING_SECTION,
                format!("HTML missing section heading: {SECTION_MARKER}"),
            )
            .at(path, None);
    }

    if let Some(first) = report.nested_list_lines.first() {
        result
            .error(
                ids::CHECK_HTML_STRUCTURE,
                ids::CODE_HTML_LIST_INSIDE_PARAGRAPH,
                "HTML contains invalid nested structure: <p><ul>/<ol>.",
            )
            .at(path, Some(*first))
            .with_data(json!({ "lines": report.nested_list_lines }));
    }

    if body_text(html).contains('`') {
        result
            .error(
                ids::CHECK_HTML_STRUCTURE,
                ids::CODE_HTML_BACKTICK_IN_BODY,
                "HTML body contains Markdown backticks (`), which is disallowed.",
            )
            .at(path, None);
    }

    let ranks: Vec<Option<u64>> = report.cards.iter().map(|c| c.rank).collect();
    let sequential = ranks.iter().zip(1u64..).all(|(r, want)| *r == Some(want));
    if !sequential {
        let shown: Vec<String> = ranks
            .iter()
            .map(|r| r.map(|n| n.to_string()).unwrap_or_else(|| "<none>".to_string()))
            .collect();
        result
            .error(
                ids::CHECK_HTML_STRUCTURE,
                ids::CODE_HTML_RANK_SEQUENCE,
                format!(
                    "HTML card ranking must be sequential 1..N, got: [{}].",
                    join_display(&shown)
                ),
            )
            .at(path, None)
            .with_data(json!({ "ranks": ranks }));
    }

    for (idx, card) in report.cards.iter().enumerate() {
        let idx = idx + 1;
        let line = Some(card.line);

        if card.repo_url.as_deref().is_none_or(str::is_empty) {
            result
                .error(
                    ids::CHECK_HTML_STRUCTURE,
                    ids::CODE_HTML_CARD_MISSING_LINK,
                    format!("HTML repo-card #{idx} is missing valid GitHub repo link."),
                )
                .at(path, line);
        }
        if card.tag_count < 1 {
            result
                .error(
                    ids::CHECK_HTML_STRUCTURE,
                    ids::CODE_HTML_CARD_MISSING_TAG,
                    format!("HTML repo-card #{idx} must include at least one .tag badge."),
                )
                .at(path, line);
        }
        let missing: BTreeSet<&str> = REQUIRED_LABELS
            .into_iter()
            .filter(|l| !card.labels.contains(*l))
            .collect();
        if !missing.is_empty() {
            let missing: Vec<&str> = missing.into_iter().collect();
            result
                .error(
                    ids::CHECK_HTML_STRUCTURE,
                    ids::CODE_HTML_CARD_MISSING_LABELS,
                    format!("HTML repo-card #{idx} is missing labels: {}.", missing.join(", ")),
                )
                .at(path, line)
                .with_data(json!({ "card": idx, "missing": missing }));
        }
        if !card.has_suggestion {
            result
                .error(
                    ids::CHECK_HTML_STRUCTURE,
                    ids::CODE_HTML_CARD_MISSING_SUGGESTION,
                    format!("HTML repo-card #{idx} is missing .suggestion-box."),
                )
                .at(path, line);
        }
    }
}

/// Text between `<body ...>` and the last `</body>`, or the whole document.
fn body_text(html: &str) -> &str {
    body_re()
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(html)
}

fn body_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<body[^>]*>(.*)</body>").expect("body regex is valid"))
}
