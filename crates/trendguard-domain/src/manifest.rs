//! `report_manifest.json` schema and per-entry coherence.

use crate::result::ValidationResult;
use serde_json::{Map, Value, json};
use trendguard_types::{RepoIdentity, ids, is_repo_url};

pub const REQUIRED_FIELDS: [&str; 5] = [
    "date",
    "period",
    "source_item_count",
    "reported_item_count",
    "repos",
];

/// One `repos[]` element with whatever fields were usable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManifestEntry {
    pub rank: Option<i64>,
    /// Present whenever `repo` is a string, valid or not.
    pub repo: Option<String>,
    /// Trailing `/` removed.
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManifestSummary {
    pub entries: Vec<ManifestEntry>,
    pub source_item_count: Option<i64>,
    pub reported_item_count: Option<i64>,
}

impl ManifestSummary {
    /// Repo strings in entry order, skipping entries without one.
    pub fn repo_sequence(&self) -> Vec<&str> {
        self.entries.iter().filter_map(|e| e.repo.as_deref()).collect()
    }
}

/// Parse the manifest text. Returns `None` when the document cannot be validated at all.
pub fn parse_manifest(
    text: &str,
    path: &str,
    result: &mut ValidationResult,
) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        Ok(other) => {
            result
                .error(
                    ids::CHECK_MANIFEST_SCHEMA,
                    ids::CODE_MANIFEST_NOT_OBJECT,
                    format!(
                        "Manifest root must be a JSON object, got {}.",
                        json_kind(&other)
                    ),
                )
                .at(path, None);
            None
        }
        Err(err) => {
            result
                .error(
                    ids::CHECK_MANIFEST_SCHEMA,
                    ids::CODE_MANIFEST_INVALID_JSON,
                    format!("Manifest JSON parse error: {err}."),
                )
                .at(path, u32::try_from(err.line()).ok().filter(|l| *l > 0));
            None
        }
    }
}

pub fn validate_manifest(
    manifest: &Map<String, Value>,
    period: &str,
    date: &str,
    path: &str,
    result: &mut ValidationResult,
) -> ManifestSummary {
    for field in REQUIRED_FIELDS {
        if !manifest.contains_key(field) {
            result
                .error(
                    ids::CHECK_MANIFEST_SCHEMA,
                    ids::CODE_MANIFEST_MISSING_FIELD,
                    format!("Manifest missing required field: {field}."),
                )
                .at(path, None);
        }
    }

    let got_date = manifest.get("date");
    if got_date.and_then(Value::as_str) != Some(date) {
        result
            .error(
                ids::CHECK_MANIFEST_SCHEMA,
                ids::CODE_MANIFEST_DATE_MISMATCH,
                format!(
                    "Manifest date mismatch: expected {date}, got {}.",
                    show(got_date)
                ),
            )
            .at(path, None);
    }

    let got_period = manifest.get("period");
    if got_period.and_then(Value::as_str) != Some(period) {
        result
            .error(
                ids::CHECK_MANIFEST_SCHEMA,
                ids::CODE_MANIFEST_PERIOD_MISMATCH,
                format!(
                    "Manifest period mismatch: expected {period}, got {}.",
                    show(got_period)
                ),
            )
            .at(path, None);
    }

    let source_item_count = manifest.get("source_item_count").and_then(Value::as_i64);
    let reported_item_count = manifest.get("reported_item_count").and_then(Value::as_i64);
    for (field, value) in [
        ("source_item_count", source_item_count),
        ("reported_item_count", reported_item_count),
    ] {
        if value.is_none() {
            result
                .error(
                    ids::CHECK_MANIFEST_SCHEMA,
                    ids::CODE_MANIFEST_COUNT_NOT_INTEGER,
                    format!("Manifest {field} must be integer."),
                )
                .at(path, None);
        }
    }

    let mut summary = ManifestSummary {
        entries: Vec::new(),
        source_item_count,
        reported_item_count,
    };

    let Some(repos) = manifest.get("repos").and_then(Value::as_array) else {
        result
            .error(
                ids::CHECK_MANIFEST_SCHEMA,
                ids::CODE_MANIFEST_REPOS_NOT_LIST,
                "Manifest repos must be a list.",
            )
            .at(path, None);
        return summary;
    };

    for (idx, item) in repos.iter().enumerate() {
        let index = idx as i64 + 1;
        let Some(item) = item.as_object() else {
            result
                .error(
                    ids::CHECK_MANIFEST_SCHEMA,
                    ids::CODE_MANIFEST_ENTRY_NOT_OBJECT,
                    format!("Manifest repos[{index}] must be object."),
                )
                .at(path, None);
            continue;
        };
        summary.entries.push(check_entry(item, index, path, result));
    }

    if let Some(reported) = reported_item_count
        && reported != repos.len() as i64
    {
        result
            .error(
                ids::CHECK_MANIFEST_SCHEMA,
                ids::CODE_MANIFEST_REPORTED_COUNT,
                format!(
                    "Manifest reported_item_count ({reported}) does not match repos length ({}).",
                    repos.len()
                ),
            )
            .at(path, None)
            .with_data(json!({ "reported": reported, "repos": repos.len() }));
    }

    summary
}

fn check_entry(
    item: &Map<String, Value>,
    index: i64,
    path: &str,
    result: &mut ValidationResult,
) -> ManifestEntry {
    let rank = item.get("rank");
    let repo = item.get("repo");
    let url = item.get("url");

    let rank_value = rank.and_then(Value::as_i64);
    if rank_value != Some(index) {
        result
            .error(
                ids::CHECK_MANIFEST_SCHEMA,
                ids::CODE_MANIFEST_RANK_MISMATCH,
                format!("Manifest repos[{index}] rank must be {index}, got {}.", show(rank)),
            )
            .at(path, None);
    }

    let repo_str = repo.and_then(Value::as_str);
    if repo_str.and_then(RepoIdentity::parse).is_none() {
        result
            .error(
                ids::CHECK_MANIFEST_SCHEMA,
                ids::CODE_MANIFEST_INVALID_REPO,
                format!("Manifest repos[{index}] repo is invalid: {}.", show(repo)),
            )
            .at(path, None);
    }

    let url_str = url.and_then(Value::as_str);
    if !url_str.is_some_and(is_repo_url) {
        result
            .error(
                ids::CHECK_MANIFEST_SCHEMA,
                ids::CODE_MANIFEST_INVALID_URL,
                format!("Manifest repos[{index}] url is invalid: {}.", show(url)),
            )
            .at(path, None);
    }

    if let (Some(repo), Some(url)) = (repo_str, url_str)
        && let Some(from_url) = RepoIdentity::from_url(url)
        && from_url.as_str() != repo
    {
        result
            .error(
                ids::CHECK_MANIFEST_SCHEMA,
                ids::CODE_MANIFEST_REPO_URL_MISMATCH,
                format!("Manifest repos[{index}] repo/url mismatch: repo={repo}, url={url}."),
            )
            .at(path, None);
    }

    ManifestEntry {
        rank: rank_value,
        repo: repo_str.map(str::to_string),
        url: url_str.map(|u| u.trim_end_matches('/').to_string()),
    }
}

/// Render a JSON value the way it appears in messages: strings bare, absent as `null`.
fn show(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "report_manifest.json";

    fn run(value: Value) -> (ManifestSummary, Vec<String>) {
        let Value::Object(map) = value else {
            panic!("test manifest must be an object");
        };
        let mut r = ValidationResult::new();
        let summary = validate_manifest(&map, "weekly", "2026-02-17", PATH, &mut r);
        let errors = r.error_messages().into_iter().map(String::from).collect();
        (summary, errors)
    }

    fn valid() -> Value {
        json!({
            "date": "2026-02-17",
            "period": "weekly",
            "source_item_count": 2,
            "reported_item_count": 2,
            "repos": [
                {"rank": 1, "repo": "a/b", "url": "https://github.com/a/b"},
                {"rank": 2, "repo": "c/d", "url": "https://github.com/c/d/"},
            ],
        })
    }

    #[test]
    fn valid_manifest_has_no_errors() {
        let (summary, errors) = run(valid());
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(summary.repo_sequence(), vec!["a/b", "c/d"]);
        assert_eq!(summary.entries[1].url.as_deref(), Some("https://github.com/c/d"));
        assert_eq!(summary.source_item_count, Some(2));
    }

    #[test]
    fn reported_count_mismatch_names_both_numbers() {
        let mut m = valid();
        m["reported_item_count"] = json!(3);
        let (_, errors) = run(m);
        assert_eq!(
            errors,
            vec!["Manifest reported_item_count (3) does not match repos length (2)."]
        );
    }

    #[test]
    fn header_errors() {
        let (summary, errors) = run(json!({
            "date": "2026-02-18",
            "period": 7,
            "source_item_count": "2",
            "repos": {},
        }));
        assert_eq!(
            errors,
            vec![
                "Manifest missing required field: reported_item_count.",
                "Manifest date mismatch: expected 2026-02-17, got 2026-02-18.",
                "Manifest period mismatch: expected weekly, got 7.",
                "Manifest source_item_count must be integer.",
                "Manifest reported_item_count must be integer.",
                "Manifest repos must be a list.",
            ]
        );
        assert!(summary.entries.is_empty());
    }

    #[test]
    fn entry_errors_keep_entries() {
        let mut m = valid();
        m["repos"] = json!([
            "not-an-object",
            {"rank": 1, "repo": "a/b/c", "url": "http://github.com/a/b"},
            {"rank": 3, "repo": "x/y", "url": "https://github.com/x/z"},
        ]);
        m["reported_item_count"] = json!(3);
        let (summary, errors) = run(m);
        assert_eq!(
            errors,
            vec![
                "Manifest repos[1] must be object.",
                "Manifest repos[2] rank must be 2, got 1.",
                "Manifest repos[2] repo is invalid: a/b/c.",
                "Manifest repos[2] url is invalid: http://github.com/a/b.",
                "Manifest repos[3] repo/url mismatch: repo=x/y, url=https://github.com/x/z.",
            ]
        );
        assert_eq!(summary.entries.len(), 2);
        assert_eq!(summary.repo_sequence(), vec!["a/b/c", "x/y"]);
    }

    #[test]
    fn parse_failures_are_reported() {
        let mut r = ValidationResult::new();
        assert!(parse_manifest("{not json", PATH, &mut r).is_none());
        assert!(r.error_messages()[0].starts_with("Manifest JSON parse error: "));

        let mut r = ValidationResult::new();
        assert!(parse_manifest("[1, 2]", PATH, &mut r).is_none());
        assert_eq!(
            r.error_messages(),
            vec!["Manifest root must be a JSON object, got an array."]
        );
    }
}
