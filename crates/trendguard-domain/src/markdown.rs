//! Markdown report entries and structural checks.

use crate::result::ValidationResult;
use regex::Regex;
use serde_json::json;
use std::sync::OnceLock;
use trendguard_types::{RepoIdentity, ids};

/// Per-entry fields, in canonical order.
pub const REQUIRED_FIELDS: [&str; 5] = ["是什么", "作用", "效果", "项目分析", "建议"];

/// Level-2 section headings every Markdown report carries.
pub const SECTION_HEADINGS: [&str; 2] = ["## 📊 概述与趋势分析", "## 🚀 热门项目详细分析"];

/// Lines (heading included) searched for the tags line.
const TAG_REGION_LINES: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkdownEntry {
    pub rank: u64,
    pub repo: RepoIdentity,
    /// Heading link with any trailing `/` removed.
    pub url: String,
    /// 1-based line of the heading.
    pub line: u32,
}

/// Parse `### N. [owner/name](url)` entries, recording structural errors as they are found.
pub fn parse_markdown_entries(
    text: &str,
    path: &str,
    result: &mut ValidationResult,
) -> Vec<MarkdownEntry> {
    let lines: Vec<&str> = text.lines().collect();
    let headings: Vec<(usize, MarkdownEntry)> = lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| parse_heading(line, idx).map(|e| (idx, e)))
        .collect();

    if headings.is_empty() {
        result
            .error(
                ids::CHECK_MARKDOWN_STRUCTURE,
                ids::CODE_MARKDOWN_NO_HEADINGS,
                "Markdown report has no valid repo headings: '### N. [owner/repo](https://github.com/owner/repo)'.",
            )
            .at(path, None);
        return Vec::new();
    }

    let mut entries = Vec::with_capacity(headings.len());
    for (i, (start, entry)) in headings.iter().enumerate() {
        let end = headings.get(i + 1).map(|(next, _)| *next).unwrap_or(lines.len());
        let block = &lines[*start..end];
        check_entry(entry, block, path, result);
        entries.push(entry.clone());
    }

    let actual: Vec<u64> = entries.iter().map(|e| e.rank).collect();
    if !is_sequential(&actual) {
        result
            .error(
                ids::CHECK_MARKDOWN_STRUCTURE,
                ids::CODE_MARKDOWN_RANK_SEQUENCE,
                format!(
                    "Markdown ranking must be sequential 1..N, got: [{}].",
                    join_display(&actual)
                ),
            )
            .at(path, None)
            .with_data(json!({ "ranks": actual }));
    }

    entries
}

/// Both section headings must appear as their own level-2 heading lines.
pub fn check_section_headings(text: &str, path: &str, result: &mut ValidationResult) {
    for heading in SECTION_HEADINGS {
        let found = text.lines().any(|l| l.trim_start().starts_with(heading));
        if !found {
            result
                .error(
                    ids::CHECK_MARKDOWN_STRUCTURE,
                    ids::CODE_MARKDOWN_MISSING_SECTION,
                    format!("Markdown missing section heading: {heading}"),
                )
                .at(path, None);
        }
    }
}

fn parse_heading(line: &str, idx: usize) -> Option<MarkdownEntry> {
    let caps = heading_re().captures(line.trim())?;
    // Out-of-range ranks saturate so the entry survives and the sequence check fires.
    let rank = caps[1].parse::<u64>().unwrap_or(u64::MAX);
    let repo = RepoIdentity::parse(&caps[2])?;
    let url = caps[3].trim_end_matches('/').to_string();
    Some(MarkdownEntry {
        rank,
        repo,
        url,
        line: idx as u32 + 1,
    })
}

fn check_entry(entry: &MarkdownEntry, block: &[&str], path: &str, result: &mut ValidationResult) {
    let rank = entry.rank;
    let repo = &entry.repo;

    if RepoIdentity::from_url(&entry.url).as_ref() != Some(repo) {
        result
            .warn(
                ids::CHECK_MARKDOWN_STRUCTURE,
                ids::CODE_MARKDOWN_LINK_MISMATCH,
                format!(
                    "Markdown repo #{rank} ({repo}) heading links to a different repo: {}.",
                    entry.url
                ),
            )
            .at(path, Some(entry.line));
    }

    let tag_region = block[..block.len().min(TAG_REGION_LINES)].join("\n");
    if !tags_re().is_match(&tag_region) {
        result
            .error(
                ids::CHECK_MARKDOWN_STRUCTURE,
                ids::CODE_MARKDOWN_MISSING_TAGS,
                format!("Markdown repo #{rank} ({repo}) is missing tags line."),
            )
            .at(path, Some(entry.line));
    }

    let mut positions: Vec<(usize, &str)> = Vec::with_capacity(REQUIRED_FIELDS.len());
    for field in REQUIRED_FIELDS {
        match block.iter().position(|l| field_label(l) == Some(field)) {
            Some(pos) => positions.push((pos, field)),
            None => {
                result
                    .error(
                        ids::CHECK_MARKDOWN_STRUCTURE,
                        ids::CODE_MARKDOWN_MISSING_FIELD,
                        format!("Markdown repo #{rank} ({repo}) is missing required field: {field}."),
                    )
                    .at(path, Some(entry.line))
                    .with_data(json!({ "repo": repo.as_str(), "field": field }));
            }
        }
    }

    if positions.len() == REQUIRED_FIELDS.len() {
        positions.sort_by_key(|(pos, _)| *pos);
        let ordered: Vec<&str> = positions.iter().map(|(_, f)| *f).collect();
        if ordered != REQUIRED_FIELDS {
            result
                .error(
                    ids::CHECK_MARKDOWN_STRUCTURE,
                    ids::CODE_MARKDOWN_FIELD_ORDER,
                    format!(
                        "Markdown repo #{rank} ({repo}) fields are out of order. Expected: {}.",
                        REQUIRED_FIELDS.join(" -> ")
                    ),
                )
                .at(path, Some(entry.line))
                .with_data(json!({ "repo": repo.as_str(), "actual": ordered }));
        }
    }
}

/// Label of a `* **label**: text` line with non-blank text.
fn field_label(line: &str) -> Option<&str> {
    field_re().captures(line).and_then(|c| c.get(1)).map(|m| m.as_str())
}

pub(crate) fn is_sequential(ranks: &[u64]) -> bool {
    ranks.iter().zip(1u64..).all(|(r, want)| *r == want)
}

pub(crate) fn join_display<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^###\s+(\d+)\.\s+\[([A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+)\]\((https://github\.com/[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+/?)\)$",
        )
        .expect("heading regex is valid")
    })
}

fn tags_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`[^`]+`").expect("tags regex is valid"))
}

fn field_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\*[^\S\n]+\*\*([^*]+)\*\*:[^\S\n]+\S").expect("field regex is valid")
    })
}
