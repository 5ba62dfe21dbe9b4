//! Lenient HTML tokenizer.
//!
//! Produces start tags (lowercased names, decoded attribute values), end tags and
//! decoded text. Comments, doctypes and processing instructions are skipped;
//! `<script>` and `<style>` bodies are raw text. Malformed input never fails:
//! an unterminated tag at end of input becomes text.

use std::borrow::Cow;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub attrs: Vec<(String, Option<String>)>,
    pub self_closing: bool,
    /// 1-based line of the `<`.
    pub line: u32,
}

impl Tag {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Start(Tag),
    End { name: String, line: u32 },
    Text(Cow<'a, str>),
}

pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    line: u32,
    raw_text: Option<String>,
    pending: Option<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            raw_text: None,
            pending: None,
        }
    }

    fn advance(&mut self, to: usize) -> &'a str {
        let consumed = &self.input[self.pos..to];
        self.line += consumed.bytes().filter(|b| *b == b'\n').count() as u32;
        self.pos = to;
        consumed
    }

    fn text_to_end(&mut self) -> Token<'a> {
        let end = self.input.len();
        let text = self.advance(end);
        Token::Text(decode_entities(text))
    }

    /// Skip up to and including the next `>` after `from`. Returns false at end of input.
    fn skip_past_gt(&mut self, from: usize) -> bool {
        match self.input[from..].find('>') {
            Some(i) => {
                self.advance(from + i + 1);
                true
            }
            None => false,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(tok) = self.pending.take() {
            return Some(tok);
        }

        loop {
            if self.pos >= self.input.len() {
                return None;
            }

            if let Some(element) = self.raw_text.take() {
                let close = format!("</{element}");
                let end = find_ascii_ci(&self.input[self.pos..], &close)
                    .map(|i| self.pos + i)
                    .unwrap_or(self.input.len());
                if end == self.pos {
                    continue;
                }
                let text = self.advance(end);
                return Some(Token::Text(Cow::Borrowed(text)));
            }

            let rest = &self.input[self.pos..];
            if !rest.starts_with('<') {
                let end = rest.find('<').map(|i| self.pos + i).unwrap_or(self.input.len());
                let text = self.advance(end);
                return Some(Token::Text(decode_entities(text)));
            }

            if rest.starts_with("<!--") {
                match rest[4..].find("-->") {
                    Some(i) => {
                        self.advance(self.pos + 4 + i + 3);
                    }
                    None => {
                        self.advance(self.input.len());
                    }
                }
                continue;
            }

            if rest.starts_with("<!") || rest.starts_with("<?") {
                if !self.skip_past_gt(self.pos) {
                    return Some(self.text_to_end());
                }
                continue;
            }

            if let Some(after) = rest.strip_prefix("</") {
                let name_len = tag_name_len(after);
                if name_len == 0 {
                    // `</>` and `</ ...>` carry no element.
                    if !self.skip_past_gt(self.pos) {
                        return Some(self.text_to_end());
                    }
                    continue;
                }
                let line = self.line;
                let name = after[..name_len].to_ascii_lowercase();
                if !self.skip_past_gt(self.pos + 2 + name_len) {
                    return Some(self.text_to_end());
                }
                return Some(Token::End { name, line });
            }

            let starts_tag = rest
                .as_bytes()
                .get(1)
                .is_some_and(|b| b.is_ascii_alphabetic());
            if !starts_tag {
                let text = self.advance(self.pos + 1);
                return Some(Token::Text(Cow::Borrowed(text)));
            }

            let line = self.line;
            let Some((mut tag, consumed)) = parse_start_tag(rest) else {
                return Some(self.text_to_end());
            };
            tag.line = line;
            self.advance(self.pos + consumed);

            if tag.self_closing {
                self.pending = Some(Token::End {
                    name: tag.name.clone(),
                    line,
                });
            } else if matches!(tag.name.as_str(), "script" | "style") {
                self.raw_text = Some(tag.name.clone());
            }
            return Some(Token::Start(tag));
        }
    }
}

fn tag_name_len(s: &str) -> usize {
    s.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'_'))
        .count()
}

/// Parse `<name attr=value ...>` at the start of `s`. Returns the tag and the bytes consumed.
fn parse_start_tag(s: &str) -> Option<(Tag, usize)> {
    let bytes = s.as_bytes();
    let name_len = tag_name_len(&s[1..]);
    let name = s[1..1 + name_len].to_ascii_lowercase();
    let mut i = 1 + name_len;
    let mut attrs = Vec::new();
    let mut self_closing = false;

    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let b = *bytes.get(i)?;
        if b == b'>' {
            i += 1;
            break;
        }
        if b == b'/' {
            if bytes.get(i + 1) == Some(&b'>') {
                self_closing = true;
                i += 2;
                break;
            }
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len()
            && !bytes[i].is_ascii_whitespace()
            && !matches!(bytes[i], b'=' | b'>')
            && !(bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'>'))
        {
            i += 1;
        }
        if i == start {
            // Stray `=`.
            i += 1;
            continue;
        }
        let attr_name = s[start..i].to_ascii_lowercase();

        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if bytes.get(j) != Some(&b'=') {
            attrs.push((attr_name, None));
            continue;
        }
        j += 1;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        let quote = *bytes.get(j)?;
        let value = if quote == b'"' || quote == b'\'' {
            let close = s[j + 1..].find(quote as char)? + j + 1;
            let value = &s[j + 1..close];
            i = close + 1;
            value
        } else {
            let vstart = j;
            while j < bytes.len() && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
                j += 1;
            }
            i = j;
            &s[vstart..j]
        };
        attrs.push((attr_name, Some(decode_entities(value).into_owned())));
    }

    Some((
        Tag {
            name,
            attrs,
            self_closing,
            line: 0,
        },
        i,
    ))
}

fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let n = needle.as_bytes();
    haystack
        .as_bytes()
        .windows(n.len())
        .position(|w| w.eq_ignore_ascii_case(n))
}

/// Decode named and numeric character references. Unknown references are kept verbatim.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .bytes()
            .take(12)
            .position(|b| b == b';')
            .and_then(|semi| decode_reference(&rest[1..semi]).map(|c| (c, semi + 1)));
        match decoded {
            Some((c, len)) => {
                out.push(c);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<Token<'_>> {
        Tokenizer::new(input).collect()
    }

    fn start<'a>(tok: &'a Token<'a>) -> &'a Tag {
        match tok {
            Token::Start(tag) => tag,
            other => panic!("expected start tag, got {other:?}"),
        }
    }

    #[test]
    fn start_end_and_text() {
        let toks = collect(r#"<DIV Class="a  b">hi</div>"#);
        assert_eq!(toks.len(), 3);
        let tag = start(&toks[0]);
        assert_eq!(tag.name, "div");
        assert!(tag.has_class("a"));
        assert!(tag.has_class("b"));
        assert!(!tag.has_class("a  b"));
        assert_eq!(toks[1], Token::Text(Cow::Borrowed("hi")));
        assert_eq!(
            toks[2],
            Token::End {
                name: "div".into(),
                line: 1
            }
        );
    }

    #[test]
    fn attribute_forms() {
        let toks = collect(r#"<a href='/x/y' data-k=v disabled title="&amp;&lt;">"#);
        let tag = start(&toks[0]);
        assert_eq!(tag.attr("href"), Some("/x/y"));
        assert_eq!(tag.attr("data-k"), Some("v"));
        assert_eq!(tag.attr("disabled"), None);
        assert!(tag.attrs.iter().any(|(k, _)| k == "disabled"));
        assert_eq!(tag.attr("title"), Some("&<"));
    }

    #[test]
    fn self_closing_emits_end() {
        let toks = collect("<br/>x");
        assert!(start(&toks[0]).self_closing);
        assert_eq!(
            toks[1],
            Token::End {
                name: "br".into(),
                line: 1
            }
        );
    }

    #[test]
    fn comments_and_doctype_are_skipped() {
        let toks = collect("<!DOCTYPE html><!-- <p> --><p>a</p>");
        assert_eq!(toks.len(), 3);
        assert_eq!(start(&toks[0]).name, "p");
    }

    #[test]
    fn script_body_is_raw_text() {
        let toks = collect("<script>if (a<b) { x = '<ul>'; }</SCRIPT><p>");
        assert_eq!(start(&toks[0]).name, "script");
        assert_eq!(
            toks[1],
            Token::Text(Cow::Borrowed("if (a<b) { x = '<ul>'; }"))
        );
        assert!(matches!(&toks[2], Token::End { name, .. } if name == "script"));
        assert_eq!(start(&toks[3]).name, "p");
    }

    #[test]
    fn bare_lt_and_unterminated_tag_become_text() {
        let toks = collect("a < b");
        let text: String = toks
            .iter()
            .map(|t| match t {
                Token::Text(s) => s.as_ref(),
                _ => "",
            })
            .collect();
        assert_eq!(text, "a < b");

        let toks = collect("x<div class=\"open");
        assert_eq!(toks.last(), Some(&Token::Text(Cow::Borrowed("<div class=\"open"))));
    }

    #[test]
    fn tracks_lines() {
        let toks = collect("<p>\n\n<ul>\n</ul>");
        let ul = toks
            .iter()
            .find_map(|t| match t {
                Token::Start(tag) if tag.name == "ul" => Some(tag.line),
                _ => None,
            })
            .expect("ul");
        assert_eq!(ul, 3);
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(decode_entities("&#96;&#x60;&unknown;&"), "``&unknown;&");
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{a0}b");
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        let toks = collect("<span class=\"label\">是什么：</span>");
        assert_eq!(toks[1], Token::Text(Cow::Borrowed("是什么：")));
    }
}
