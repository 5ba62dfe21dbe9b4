//! Cross-artifact count and identity-sequence reconciliation.

use crate::result::ValidationResult;
use serde_json::json;
use std::collections::HashSet;
use trendguard_types::ids;

/// Identity sequences and counts extracted from the four artifacts.
#[derive(Clone, Debug, Default)]
pub struct ReconcileInput<'a> {
    pub source: Vec<&'a str>,
    pub markdown: Vec<&'a str>,
    /// One slot per card; `None` when the card has no usable repo link.
    pub html: Vec<Option<&'a str>>,
    /// Repo strings of manifest entries that carry one.
    pub manifest: Vec<&'a str>,
    /// Number of manifest entries that were objects.
    pub manifest_entries: usize,
    pub declared_source_count: Option<i64>,
    pub declared_reported_count: Option<i64>,
}

/// Run every reconciliation step in order. No step short-circuits another.
pub fn reconcile(input: &ReconcileInput<'_>, result: &mut ValidationResult) {
    check_counts(input, result);
    check_against_manifest(input, result);
    check_against_source(input, result);
}

fn check_counts(input: &ReconcileInput<'_>, result: &mut ValidationResult) {
    let source = input.source.len();
    let markdown = input.markdown.len();
    let html = input.html.len();
    let manifest = input.manifest_entries;

    if let Some(declared) = input.declared_source_count
        && source > 0
        && declared != source as i64
    {
        result.error(
            ids::CHECK_CONSISTENCY_COUNTS,
            ids::CODE_SOURCE_COUNT_MISMATCH,
            format!(
                "Manifest source_item_count mismatch: manifest={declared}, extracted={source}."
            ),
        );
    }

    let distinct: HashSet<usize> = [source, markdown, html, manifest].into_iter().collect();
    if distinct.len() > 1 {
        let reported = input
            .declared_reported_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "null".to_string());
        result
            .error(
                ids::CHECK_CONSISTENCY_COUNTS,
                ids::CODE_CROSS_FILE_COUNT_MISMATCH,
                format!(
                    "Cross-file count mismatch: source={source}, markdown={markdown}, html={html}, manifest_reported={reported}, manifest_repos={manifest}."
                ),
            )
            .with_data(json!({
                "source": source,
                "markdown": markdown,
                "html": html,
                "manifest_reported": input.declared_reported_count,
                "manifest_repos": manifest,
            }));
    }

    if let Some(reported) = input.declared_reported_count
        && reported != manifest as i64
    {
        result.error(
            ids::CHECK_CONSISTENCY_COUNTS,
            ids::CODE_REPORTED_COUNT_MISMATCH,
            format!(
                "Manifest reported_item_count mismatch with repos length: reported={reported}, repos={manifest}."
            ),
        );
    }
}

fn check_against_manifest(input: &ReconcileInput<'_>, result: &mut ValidationResult) {
    if input.manifest_entries == 0 {
        return;
    }

    if !input.markdown.is_empty() && input.markdown != input.manifest {
        result.error(
            ids::CHECK_CONSISTENCY_ORDER,
            ids::CODE_MARKDOWN_MANIFEST_MISMATCH,
            "Markdown repo order/content does not match manifest repos.",
        );
    }

    // Cards without a link never equal a manifest repo.
    let html_matches = input.html.len() == input.manifest.len()
        && input
            .html
            .iter()
            .zip(&input.manifest)
            .all(|(h, m)| *h == Some(*m));
    if !input.html.is_empty() && !html_matches {
        result.error(
            ids::CHECK_CONSISTENCY_ORDER,
            ids::CODE_HTML_MANIFEST_MISMATCH,
            "HTML repo order/content does not match manifest repos.",
        );
    }
}

fn check_against_source(input: &ReconcileInput<'_>, result: &mut ValidationResult) {
    if input.source.is_empty() {
        return;
    }

    let html: Vec<&str> = input.html.iter().flatten().copied().collect();
    let pairs = [
        (
            "Markdown",
            ids::CODE_SOURCE_MARKDOWN_MISMATCH,
            !input.markdown.is_empty(),
            &input.markdown,
        ),
        (
            "HTML",
            ids::CODE_SOURCE_HTML_MISMATCH,
            !input.html.is_empty(),
            &html,
        ),
        (
            "Manifest",
            ids::CODE_SOURCE_MANIFEST_MISMATCH,
            input.manifest_entries > 0,
            &input.manifest,
        ),
    ];

    for (artifact, code, present, actual) in pairs {
        if !present || *actual == input.source {
            continue;
        }
        let diff = RepoDiff::compute(&input.source, actual);
        result
            .error(
                ids::CHECK_CONSISTENCY_ORDER,
                code,
                format!("Source vs {artifact} repo mismatch: {diff}"),
            )
            .with_data(diff.to_json());
    }
}

/// Positional and set difference between an expected and an actual sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoDiff {
    /// 1-based index, expected value, actual value. `<none>` past either end.
    pub first_mismatch: Option<(usize, String, String)>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

const NONE_MARKER: &str = "<none>";

impl RepoDiff {
    pub fn compute(expected: &[&str], actual: &[&str]) -> Self {
        let expected_set: HashSet<&str> = expected.iter().copied().collect();
        let actual_set: HashSet<&str> = actual.iter().copied().collect();

        let missing = expected
            .iter()
            .filter(|r| !actual_set.contains(*r))
            .map(|r| r.to_string())
            .collect();
        let extra = actual
            .iter()
            .filter(|r| !expected_set.contains(*r))
            .map(|r| r.to_string())
            .collect();

        let mut first_mismatch = expected
            .iter()
            .zip(actual)
            .enumerate()
            .find(|(_, (e, a))| e != a)
            .map(|(i, (e, a))| (i + 1, e.to_string(), a.to_string()));
        if first_mismatch.is_none() && expected.len() != actual.len() {
            let idx = expected.len().min(actual.len());
            let at = |seq: &[&str]| seq.get(idx).copied().unwrap_or(NONE_MARKER).to_string();
            first_mismatch = Some((idx + 1, at(expected), at(actual)));
        }

        Self {
            first_mismatch,
            missing,
            extra,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "first_mismatch_at": self.first_mismatch.as_ref().map(|(i, _, _)| *i),
            "missing": self.missing,
            "extra": self.extra,
        })
    }
}

impl std::fmt::Display for RepoDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();
        if let Some((idx, expected, actual)) = &self.first_mismatch {
            parts.push(format!(
                "first_mismatch_at={idx} expected={expected} actual={actual}"
            ));
        }
        if !self.missing.is_empty() {
            parts.push(format!("missing=[{}]", self.missing.join(", ")));
        }
        if !self.extra.is_empty() {
            parts.push(format!("extra=[{}]", self.extra.join(", ")));
        }
        if parts.is_empty() {
            return f.write_str("unknown difference");
        }
        f.write_str(&parts.join("; "))
    }
}

/// Render the difference between two identity sequences.
pub fn describe_repo_diff(expected: &[&str], actual: &[&str]) -> String {
    RepoDiff::compute(expected, actual).to_string()
}
