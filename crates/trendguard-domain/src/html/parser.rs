use crate::markup::{NestingScope, Tag, TextCapture, Token, Tokenizer};
use std::collections::BTreeSet;
use trendguard_types::is_repo_url;

/// Phrase the analysis section `<h2>` must contain.
pub const SECTION_MARKER: &str = "🚀 热门项目详细分析";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlCard {
    /// Leading `N.` of the card's `.repo-title` text.
    pub rank: Option<u64>,
    /// First canonical repository link inside the card, as written.
    pub repo_url: Option<String>,
    pub labels: BTreeSet<String>,
    pub tag_count: u32,
    pub has_suggestion: bool,
    /// 1-based line of the opening `<div class="repo-card">`.
    pub line: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HtmlReport {
    pub cards: Vec<HtmlCard>,
    pub classes_seen: BTreeSet<String>,
    pub section_heading_found: bool,
    /// Lines of `<ul>`/`<ol>` opened inside a `<p>`.
    pub nested_list_lines: Vec<u32>,
}

/// Scanner state: one tracker per concern.
#[derive(Default)]
struct HtmlScanner {
    report: HtmlReport,
    card_scope: NestingScope,
    current: Option<HtmlCard>,
    paragraphs: NestingScope,
    heading: TextCapture,
    title: TextCapture,
    label: TextCapture,
}

pub fn parse_html_report(html: &str) -> HtmlReport {
    let mut scanner = HtmlScanner::default();
    for token in Tokenizer::new(html) {
        match token {
            Token::Start(tag) => scanner.start(&tag),
            Token::Text(text) => scanner.text(&text),
            Token::End { name, .. } => scanner.end(&name),
        }
    }
    scanner.report
}

impl HtmlScanner {
    fn start(&mut self, tag: &Tag) {
        let name = tag.name.as_str();
        self.report
            .classes_seen
            .extend(tag.classes().map(str::to_string));

        self.heading.on_start(name);
        self.title.on_start(name);
        self.label.on_start(name);

        match name {
            "h2" => self.heading.restart(name),
            "p" => self.paragraphs.open(),
            "ul" | "ol" if self.paragraphs.is_open() => self.report.nested_list_lines.push(tag.line),
            _ => {}
        }

        if name == "div" {
            if tag.has_class("repo-card") {
                if !self.card_scope.is_open() {
                    self.current = Some(HtmlCard {
                        line: tag.line,
                        ..HtmlCard::default()
                    });
                }
                self.card_scope.open();
            } else if self.card_scope.is_open() {
                self.card_scope.open();
            }
        }

        if !self.card_scope.is_open() {
            return;
        }
        let Some(card) = self.current.as_mut() else {
            return;
        };

        if tag.has_class("repo-title") {
            self.title.begin(name);
        }
        if name == "div" && tag.has_class("suggestion-box") {
            card.has_suggestion = true;
        }
        if name == "span" {
            if tag.has_class("tag") {
                card.tag_count += 1;
            }
            if tag.has_class("label") {
                self.label.begin(name);
            }
        }
        if name == "a" && card.repo_url.is_none() {
            let href = tag.attr("href").unwrap_or_default();
            if is_repo_url(href) {
                card.repo_url = Some(href.to_string());
            }
        }
    }

    fn text(&mut self, text: &str) {
        self.heading.on_text(text);
        self.title.on_text(text);
        self.label.on_text(text);
    }

    fn end(&mut self, name: &str) {
        if let Some(heading) = self.heading.on_end(name)
            && heading.contains(SECTION_MARKER)
        {
            self.report.section_heading_found = true;
        }

        if name == "p" {
            self.paragraphs.close();
        }

        if let Some(label) = self.label.on_end(name)
            && let Some(card) = self.current.as_mut()
        {
            let label = normalize_label(&label);
            if !label.is_empty() {
                card.labels.insert(label.to_string());
            }
        }

        if let Some(title) = self.title.on_end(name)
            && let Some(card) = self.current.as_mut()
        {
            if let Some(rank) = leading_rank(title.trim()) {
                card.rank = Some(rank);
            }
        }

        if name == "div" && self.card_scope.close() && !self.card_scope.is_open() {
            if let Some(card) = self.current.take() {
                self.report.cards.push(card);
            }
        }
    }
}

/// Trim whitespace and ASCII or full-width colons.
pub fn normalize_label(label: &str) -> &str {
    label.trim().trim_matches([':', '：']).trim()
}

/// `12. title` -> 12.
fn leading_rank(title: &str) -> Option<u64> {
    let digits = title.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || title.as_bytes().get(digits) != Some(&b'.') {
        return None;
    }
    title[..digits].parse().ok()
}
