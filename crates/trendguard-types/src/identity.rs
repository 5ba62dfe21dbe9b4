use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of every canonical repository URL.
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// Repository identity of the form `owner/name`.
///
/// Normalization rules are intentionally narrow and case-sensitive:
/// - an optional `https://github.com/` prefix is removed
/// - leading and trailing `/` are trimmed
/// - both segments must be non-empty and use only ASCII letters, digits, `.`, `_`, `-`
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct RepoIdentity(String);

impl RepoIdentity {
    /// Strict parse of an already-normalized `owner/name` string.
    pub fn parse(s: &str) -> Option<Self> {
        is_identity(s).then(|| Self(s.to_string()))
    }

    /// Normalize a link target: an absolute GitHub URL or a root-relative `/owner/name` path.
    pub fn from_link(href: &str) -> Option<Self> {
        let clean = href.trim();
        if clean.is_empty() {
            return None;
        }
        let clean = clean.strip_prefix(GITHUB_URL_PREFIX).unwrap_or(clean);
        Self::parse(clean.trim_matches('/'))
    }

    /// Identity from a canonical repository URL (`https://github.com/owner/name[/]`).
    pub fn from_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix(GITHUB_URL_PREFIX)?;
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        Self::parse(rest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RepoIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// True when `url` is a canonical repository URL.
pub fn is_repo_url(url: &str) -> bool {
    RepoIdentity::from_url(url).is_some()
}

fn is_identity(s: &str) -> bool {
    let Some((owner, name)) = s.split_once('/') else {
        return false;
    };
    is_segment(owner) && is_segment(name)
}

fn is_segment(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}
