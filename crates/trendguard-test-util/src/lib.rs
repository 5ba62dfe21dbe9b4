//! Shared test utilities for the trendguard workspace.
//!
//! This crate exists because several crates' tests need the same
//! report-set builder and JSON normalization, and a `#[cfg(test)]` module
//! inside one crate would not be reachable from the others.

use serde_json::{Value, json};
use std::fs;
use std::io;
use std::path::Path;

/// Builds the four artifacts of a valid report set for a list of repositories.
///
/// Every artifact agrees on the same ordered identities, so the set passes
/// validation as built. Tests break one artifact at a time.
#[derive(Clone, Debug)]
pub struct ReportSetBuilder {
    period: String,
    date: String,
    repos: Vec<String>,
}

impl ReportSetBuilder {
    pub fn new(period: &str, date: &str, repos: &[&str]) -> Self {
        Self {
            period: period.to_string(),
            date: date.to_string(),
            repos: repos.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn source_file_name(&self) -> &'static str {
        "original_trending.html"
    }

    pub fn markdown_file_name(&self) -> String {
        format!("report_{}.md", self.date)
    }

    pub fn html_file_name(&self) -> String {
        format!("report_{}.html", self.date)
    }

    pub fn manifest_file_name(&self) -> &'static str {
        "report_manifest.json"
    }

    /// Trending page with one `Box-row` entry per repository, each preceded by a sponsor link.
    pub fn source_html(&self) -> String {
        let mut out = String::from(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><title>Trending repositories on GitHub</title></head>\n<body>\n\
<header><a href=\"/login?return_to=%2Ftrending\">Sign in</a> <a href=\"/features/copilot\">Copilot</a></header>\n\
<div class=\"Box\">\n",
        );
        for repo in &self.repos {
            let (owner, name) = repo.split_once('/').unwrap_or((repo.as_str(), ""));
            out.push_str(&format!(
                "  <article class=\"Box-row\">\n\
    <div class=\"float-right\"><a href=\"/sponsors/{owner}\">Sponsor</a></div>\n\
    <h2 class=\"h3 lh-condensed\">\n      <a href=\"/{repo}\" class=\"Link\">{owner} / {name}</a>\n    </h2>\n\
    <p class=\"col-9\">A project &amp; its description.</p>\n\
    <a href=\"/{repo}/stargazers\">1,024</a>\n\
  </article>\n"
            ));
        }
        out.push_str("</div>\n<footer><a href=\"/about/careers\">Careers</a></footer>\n</body>\n</html>\n");
        out
    }

    pub fn markdown(&self) -> String {
        let mut out = format!(
            "# GitHub Trending {} Report {}\n\n## 📊 概述与趋势分析\n\n本期共收录 {} 个项目。\n\n## 🚀 热门项目详细分析\n\n",
            self.period,
            self.date,
            self.repos.len()
        );
        for (idx, repo) in self.repos.iter().enumerate() {
            out.push_str(&format!(
                "### {rank}. [{repo}](https://github.com/{repo})\n\
`Rust` `CLI`\n\n\
* **是什么**: {repo} 是一个开源项目。\n\
* **作用**: 解决开发中的常见问题。\n\
* **效果**: 提升效率。\n\
* **项目分析**: 社区活跃，文档完善。\n\
* **建议**: 值得关注。\n\n",
                rank = idx + 1
            ));
        }
        out
    }

    pub fn html(&self) -> String {
        let mut out = format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{date}</title></head>\n<body>\n\
<div class=\"overview-section\">\n<h2>📊 概述与趋势分析</h2>\n<p>本期共收录 {n} 个项目。</p>\n<ul><li>趋势</li></ul>\n</div>\n\
<h2>🚀 热门项目详细分析</h2>\n",
            date = self.date,
            n = self.repos.len()
        );
        for (idx, repo) in self.repos.iter().enumerate() {
            out.push_str(&format!(
                "<div class=\"repo-card\">\n\
  <div class=\"repo-header\"><div class=\"repo-title\">{rank}. <a href=\"https://github.com/{repo}\">{repo}</a></div></div>\n\
  <div class=\"tags\"><span class=\"tag\">Rust</span><span class=\"tag\">CLI</span></div>\n\
  <p><span class=\"label\">是什么：</span>{repo} 是一个开源项目。</p>\n\
  <p><span class=\"label\">作用：</span>解决开发中的常见问题。</p>\n\
  <p><span class=\"label\">效果：</span>提升效率。</p>\n\
  <p><span class=\"label\">项目分析：</span>社区活跃，文档完善。</p>\n\
  <div class=\"suggestion-box\">值得关注。</div>\n\
</div>\n",
                rank = idx + 1
            ));
        }
        out.push_str("</body>\n</html>\n");
        out
    }

    pub fn manifest_value(&self) -> Value {
        let repos: Vec<Value> = self
            .repos
            .iter()
            .enumerate()
            .map(|(idx, repo)| {
                json!({
                    "rank": idx + 1,
                    "repo": repo,
                    "url": format!("https://github.com/{repo}"),
                })
            })
            .collect();
        json!({
            "date": self.date,
            "period": self.period,
            "source_item_count": self.repos.len(),
            "reported_item_count": self.repos.len(),
            "repos": repos,
        })
    }

    pub fn manifest_json(&self) -> String {
        let mut s = serde_json::to_string_pretty(&self.manifest_value())
            .unwrap_or_else(|_| String::from("{}"));
        s.push('\n');
        s
    }

    /// Write all four artifacts into `dir` (created if needed).
    pub fn write_to(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join(self.source_file_name()), self.source_html())?;
        fs::write(dir.join(self.markdown_file_name()), self.markdown())?;
        fs::write(dir.join(self.html_file_name()), self.html())?;
        fs::write(dir.join(self.manifest_file_name()), self.manifest_json())?;
        Ok(())
    }
}

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// Two concerns are handled separately:
///
/// 1. **Root-only**: when the root object looks like a report envelope (has
///    `schema`, `tool`, `run`, `verdict`, `findings`), `tool.version` becomes
///    `"__VERSION__"` and the machine-specific `data.report_dir` /
///    `data.expected_report_dir` become `"__DIR__"`.
///
/// 2. **Recursive**: timestamp keys (`started_at`, `ended_at`) and
///    `duration_ms` are normalized at any depth because their placeholder
///    values are fixed and cannot collide with real data.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "run", "verdict", "findings"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope {
            if let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
                && tool.contains_key("name")
                && tool.contains_key("version")
            {
                tool.insert("version".to_string(), Value::String("__VERSION__".to_string()));
            }
            if let Some(data) = obj.get_mut("data").and_then(Value::as_object_mut) {
                for key in ["report_dir", "expected_report_dir"] {
                    if data.contains_key(key) {
                        data.insert(key.to_string(), Value::String("__DIR__".to_string()));
                    }
                }
            }
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "ended_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            if map.contains_key("duration_ms") {
                map.insert("duration_ms".to_string(), Value::Number(0.into()));
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}
