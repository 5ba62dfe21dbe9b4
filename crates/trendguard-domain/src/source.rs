//! Ground-truth repository sequence from the raw trending page.

use crate::markup::{NestingScope, Token, Tokenizer};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use trendguard_types::RepoIdentity;

/// Class marking one trending entry container.
pub const ENTRY_CLASS: &str = "Box-row";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceStrategy {
    /// One repository per `<article class="Box-row">` entry.
    EntryContainers,
    /// `<h2><a href="/owner/name">` headings anywhere in the page.
    HeadingAnchors,
    /// Nothing could be extracted.
    None,
}

impl SourceStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceStrategy::EntryContainers => "entry_containers",
            SourceStrategy::HeadingAnchors => "heading_anchors",
            SourceStrategy::None => "none",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceExtraction {
    /// Ordered, de-duplicated identities.
    pub repos: Vec<RepoIdentity>,
    pub strategy: SourceStrategy,
    /// Captures dropped because an earlier entry had the same identity.
    pub duplicates: usize,
}

pub fn extract_source_repos(html: &str) -> SourceExtraction {
    let captured = scan_entry_containers(html);
    if !captured.is_empty() {
        let (repos, duplicates) = dedupe_in_order(captured);
        return SourceExtraction {
            repos,
            strategy: SourceStrategy::EntryContainers,
            duplicates,
        };
    }

    // Only heading anchors are trusted as a fallback; arbitrary page links are not.
    let captured: Vec<RepoIdentity> = heading_anchor_re()
        .captures_iter(html)
        .filter_map(|c| RepoIdentity::parse(&c[1]))
        .collect();
    if !captured.is_empty() {
        let (repos, duplicates) = dedupe_in_order(captured);
        return SourceExtraction {
            repos,
            strategy: SourceStrategy::HeadingAnchors,
            duplicates,
        };
    }

    SourceExtraction {
        repos: Vec::new(),
        strategy: SourceStrategy::None,
        duplicates: 0,
    }
}

fn scan_entry_containers(html: &str) -> Vec<RepoIdentity> {
    let mut entries = NestingScope::default();
    let mut captured_in_entry = false;
    let mut out = Vec::new();

    for token in Tokenizer::new(html) {
        match token {
            Token::Start(tag) if tag.name == "article" => {
                if !entries.is_open() {
                    if !tag.has_class(ENTRY_CLASS) {
                        continue;
                    }
                    captured_in_entry = false;
                }
                entries.open();
            }
            Token::Start(tag) if tag.name == "a" && entries.is_open() && !captured_in_entry => {
                let href = tag.attr("href").unwrap_or_default();
                if href.contains("/sponsors/") {
                    continue;
                }
                if let Some(repo) = RepoIdentity::from_link(href) {
                    out.push(repo);
                    captured_in_entry = true;
                }
            }
            Token::End { name, .. } if name == "article" => {
                if entries.close() && !entries.is_open() {
                    captured_in_entry = false;
                }
            }
            _ => {}
        }
    }
    out
}

fn dedupe_in_order(values: Vec<RepoIdentity>) -> (Vec<RepoIdentity>, usize) {
    let total = values.len();
    let mut seen = HashSet::new();
    let repos: Vec<RepoIdentity> = values
        .into_iter()
        .filter(|r| seen.insert(r.clone()))
        .collect();
    let duplicates = total - repos.len();
    (repos, duplicates)
}

fn heading_anchor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<h2[^>]*>\s*<a[^>]*href="/([A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+)""#)
            .expect("heading anchor regex is valid")
    })
}
