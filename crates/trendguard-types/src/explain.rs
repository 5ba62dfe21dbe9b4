//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after artifact excerpts.
    pub examples: ExamplePair,
}

/// Before and after artifact excerpts.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Fence language used when rendering the excerpts.
    pub lang: &'static str,
    /// Content that would trigger a finding.
    pub before: &'static str,
    /// Content that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    if let Some(exp) = explain_check(identifier) {
        return Some(exp);
    }
    let (check_id, title) = code_entry(identifier)?;
    let mut exp = explain_check(check_id)?;
    exp.title = title;
    Some(exp)
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_REPORT_INVOCATION,
        ids::CHECK_REPORT_LOCATION,
        ids::CHECK_REPORT_PRESENCE,
        ids::CHECK_SOURCE_EXTRACT,
        ids::CHECK_MARKDOWN_STRUCTURE,
        ids::CHECK_HTML_STRUCTURE,
        ids::CHECK_MANIFEST_SCHEMA,
        ids::CHECK_CONSISTENCY_COUNTS,
        ids::CHECK_CONSISTENCY_ORDER,
        ids::CHECK_TOOL_RUNTIME,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_INVALID_PERIOD,
        ids::CODE_INVALID_DATE,
        ids::CODE_OUTSIDE_EXPECTED_ROOT,
        ids::CODE_MISSING_FILE,
        ids::CODE_EMPTY_SOURCE,
        ids::CODE_NO_SOURCE_REPOS,
        ids::CODE_SOURCE_FALLBACK_USED,
        ids::CODE_SOURCE_DUPLICATES_COLLAPSED,
        ids::CODE_MARKDOWN_NO_HEADINGS,
        ids::CODE_MARKDOWN_MISSING_TAGS,
        ids::CODE_MARKDOWN_MISSING_FIELD,
        ids::CODE_MARKDOWN_FIELD_ORDER,
        ids::CODE_MARKDOWN_RANK_SEQUENCE,
        ids::CODE_MARKDOWN_MISSING_SECTION,
        ids::CODE_MARKDOWN_LINK_MISMATCH,
        ids::CODE_HTML_MISSING_CLASS,
        ids::CODE_HTML_MISSING_SECTION,
        ids::CODE_HTML_LIST_INSIDE_PARAGRAPH,
        ids::CODE_HTML_BACKTICK_IN_BODY,
        ids::CODE_HTML_RANK_SEQUENCE,
        ids::CODE_HTML_CARD_MISSING_LINK,
        ids::CODE_HTML_CARD_MISSING_TAG,
        ids::CODE_HTML_CARD_MISSING_LABELS,
        ids::CODE_HTML_CARD_MISSING_SUGGESTION,
        ids::CODE_MANIFEST_INVALID_JSON,
        ids::CODE_MANIFEST_NOT_OBJECT,
        ids::CODE_MANIFEST_MISSING_FIELD,
        ids::CODE_MANIFEST_DATE_MISMATCH,
        ids::CODE_MANIFEST_PERIOD_MISMATCH,
        ids::CODE_MANIFEST_COUNT_NOT_INTEGER,
        ids::CODE_MANIFEST_REPOS_NOT_LIST,
        ids::CODE_MANIFEST_ENTRY_NOT_OBJECT,
        ids::CODE_MANIFEST_RANK_MISMATCH,
        ids::CODE_MANIFEST_INVALID_REPO,
        ids::CODE_MANIFEST_INVALID_URL,
        ids::CODE_MANIFEST_REPO_URL_MISMATCH,
        ids::CODE_MANIFEST_REPORTED_COUNT,
        ids::CODE_SOURCE_COUNT_MISMATCH,
        ids::CODE_CROSS_FILE_COUNT_MISMATCH,
        ids::CODE_REPORTED_COUNT_MISMATCH,
        ids::CODE_MARKDOWN_MANIFEST_MISMATCH,
        ids::CODE_HTML_MANIFEST_MISMATCH,
        ids::CODE_SOURCE_MARKDOWN_MISMATCH,
        ids::CODE_SOURCE_HTML_MISMATCH,
        ids::CODE_SOURCE_MANIFEST_MISMATCH,
        ids::CODE_RUNTIME_ERROR,
    ]
}

/// Owning check and title for a code.
pub fn code_entry(code: &str) -> Option<(&'static str, &'static str)> {
    let entry = match code {
        ids::CODE_INVALID_PERIOD => (ids::CHECK_REPORT_INVOCATION, "Invalid Period"),
        ids::CODE_INVALID_DATE => (ids::CHECK_REPORT_INVOCATION, "Invalid Date"),
        ids::CODE_OUTSIDE_EXPECTED_ROOT => {
            (ids::CHECK_REPORT_LOCATION, "Report Directory Outside Expected Root")
        }
        ids::CODE_MISSING_FILE => (ids::CHECK_REPORT_PRESENCE, "Missing Required File"),
        ids::CODE_EMPTY_SOURCE => (ids::CHECK_REPORT_PRESENCE, "Empty Source Page"),
        ids::CODE_NO_SOURCE_REPOS => (ids::CHECK_SOURCE_EXTRACT, "No Source Repositories"),
        ids::CODE_SOURCE_FALLBACK_USED => {
            (ids::CHECK_SOURCE_EXTRACT, "Source Heading-Anchor Fallback Used")
        }
        ids::CODE_SOURCE_DUPLICATES_COLLAPSED => {
            (ids::CHECK_SOURCE_EXTRACT, "Duplicate Source Entries Collapsed")
        }
        ids::CODE_MARKDOWN_NO_HEADINGS => (ids::CHECK_MARKDOWN_STRUCTURE, "No Repo Headings"),
        ids::CODE_MARKDOWN_MISSING_TAGS => (ids::CHECK_MARKDOWN_STRUCTURE, "Missing Tags Line"),
        ids::CODE_MARKDOWN_MISSING_FIELD => {
            (ids::CHECK_MARKDOWN_STRUCTURE, "Missing Required Field")
        }
        ids::CODE_MARKDOWN_FIELD_ORDER => (ids::CHECK_MARKDOWN_STRUCTURE, "Fields Out Of Order"),
        ids::CODE_MARKDOWN_RANK_SEQUENCE => {
            (ids::CHECK_MARKDOWN_STRUCTURE, "Non-Sequential Markdown Ranks")
        }
        ids::CODE_MARKDOWN_MISSING_SECTION => {
            (ids::CHECK_MARKDOWN_STRUCTURE, "Missing Markdown Section")
        }
        ids::CODE_MARKDOWN_LINK_MISMATCH => {
            (ids::CHECK_MARKDOWN_STRUCTURE, "Heading Link Differs From Label")
        }
        ids::CODE_HTML_MISSING_CLASS => (ids::CHECK_HTML_STRUCTURE, "Missing Required Class"),
        ids::CODE_HTML_MISSING_SECTION => (ids::CHECK_HTML_STRUCTURE, "Missing HTML Section"),
        ids::CODE_HTML_LIST_INSIDE_PARAGRAPH => {
            (ids::CHECK_HTML_STRUCTURE, "List Nested Inside Paragraph")
        }
        ids::CODE_HTML_BACKTICK_IN_BODY => (ids::CHECK_HTML_STRUCTURE, "Backtick In HTML Body"),
        ids::CODE_HTML_RANK_SEQUENCE => (ids::CHECK_HTML_STRUCTURE, "Non-Sequential Card Ranks"),
        ids::CODE_HTML_CARD_MISSING_LINK => (ids::CHECK_HTML_STRUCTURE, "Card Missing Repo Link"),
        ids::CODE_HTML_CARD_MISSING_TAG => (ids::CHECK_HTML_STRUCTURE, "Card Missing Tag Badge"),
        ids::CODE_HTML_CARD_MISSING_LABELS => (ids::CHECK_HTML_STRUCTURE, "Card Missing Labels"),
        ids::CODE_HTML_CARD_MISSING_SUGGESTION => {
            (ids::CHECK_HTML_STRUCTURE, "Card Missing Suggestion Box")
        }
        ids::CODE_MANIFEST_INVALID_JSON => (ids::CHECK_MANIFEST_SCHEMA, "Manifest Is Not JSON"),
        ids::CODE_MANIFEST_NOT_OBJECT => {
            (ids::CHECK_MANIFEST_SCHEMA, "Manifest Root Is Not An Object")
        }
        ids::CODE_MANIFEST_MISSING_FIELD => (ids::CHECK_MANIFEST_SCHEMA, "Missing Manifest Field"),
        ids::CODE_MANIFEST_DATE_MISMATCH => (ids::CHECK_MANIFEST_SCHEMA, "Manifest Date Mismatch"),
        ids::CODE_MANIFEST_PERIOD_MISMATCH => {
            (ids::CHECK_MANIFEST_SCHEMA, "Manifest Period Mismatch")
        }
        ids::CODE_MANIFEST_COUNT_NOT_INTEGER => {
            (ids::CHECK_MANIFEST_SCHEMA, "Manifest Count Not Integer")
        }
        ids::CODE_MANIFEST_REPOS_NOT_LIST => (ids::CHECK_MANIFEST_SCHEMA, "Manifest Repos Not A List"),
        ids::CODE_MANIFEST_ENTRY_NOT_OBJECT => {
            (ids::CHECK_MANIFEST_SCHEMA, "Manifest Entry Not An Object")
        }
        ids::CODE_MANIFEST_RANK_MISMATCH => (ids::CHECK_MANIFEST_SCHEMA, "Manifest Rank Mismatch"),
        ids::CODE_MANIFEST_INVALID_REPO => (ids::CHECK_MANIFEST_SCHEMA, "Invalid Repo Identity"),
        ids::CODE_MANIFEST_INVALID_URL => (ids::CHECK_MANIFEST_SCHEMA, "Invalid Repo URL"),
        ids::CODE_MANIFEST_REPO_URL_MISMATCH => {
            (ids::CHECK_MANIFEST_SCHEMA, "Repo And URL Disagree")
        }
        ids::CODE_MANIFEST_REPORTED_COUNT => {
            (ids::CHECK_MANIFEST_SCHEMA, "Reported Count Differs From Repos")
        }
        ids::CODE_SOURCE_COUNT_MISMATCH => {
            (ids::CHECK_CONSISTENCY_COUNTS, "Source Item Count Mismatch")
        }
        ids::CODE_CROSS_FILE_COUNT_MISMATCH => {
            (ids::CHECK_CONSISTENCY_COUNTS, "Cross-File Count Mismatch")
        }
        ids::CODE_REPORTED_COUNT_MISMATCH => {
            (ids::CHECK_CONSISTENCY_COUNTS, "Reported Count Mismatch")
        }
        ids::CODE_MARKDOWN_MANIFEST_MISMATCH => {
            (ids::CHECK_CONSISTENCY_ORDER, "Markdown Differs From Manifest")
        }
        ids::CODE_HTML_MANIFEST_MISMATCH => {
            (ids::CHECK_CONSISTENCY_ORDER, "HTML Differs From Manifest")
        }
        ids::CODE_SOURCE_MARKDOWN_MISMATCH => {
            (ids::CHECK_CONSISTENCY_ORDER, "Markdown Differs From Source")
        }
        ids::CODE_SOURCE_HTML_MISMATCH => (ids::CHECK_CONSISTENCY_ORDER, "HTML Differs From Source"),
        ids::CODE_SOURCE_MANIFEST_MISMATCH => {
            (ids::CHECK_CONSISTENCY_ORDER, "Manifest Differs From Source")
        }
        ids::CODE_RUNTIME_ERROR => (ids::CHECK_TOOL_RUNTIME, "Runtime Error"),
        _ => return None,
    };
    Some(entry)
}

fn explain_check(check_id: &str) -> Option<Explanation> {
    match check_id {
        ids::CHECK_REPORT_INVOCATION => Some(explain_invocation()),
        ids::CHECK_REPORT_LOCATION => Some(explain_location()),
        ids::CHECK_REPORT_PRESENCE => Some(explain_presence()),
        ids::CHECK_SOURCE_EXTRACT => Some(explain_source_extract()),
        ids::CHECK_MARKDOWN_STRUCTURE => Some(explain_markdown_structure()),
        ids::CHECK_HTML_STRUCTURE => Some(explain_html_structure()),
        ids::CHECK_MANIFEST_SCHEMA => Some(explain_manifest_schema()),
        ids::CHECK_CONSISTENCY_COUNTS => Some(explain_consistency_counts()),
        ids::CHECK_CONSISTENCY_ORDER => Some(explain_consistency_order()),
        ids::CHECK_TOOL_RUNTIME => Some(explain_tool_runtime()),
        _ => None,
    }
}

fn explain_invocation() -> Explanation {
    Explanation {
        title: "Invocation Parameters",
        description: "\
Validates the period and date the report set was requested for.

The period must be one of the configured cycle names (daily, weekly, monthly by
default) and the date must be a real calendar date written as YYYY-MM-DD. Both
values are used to build the only legal report location, so an invalid value
halts analysis before any file is read.",
        remediation: "\
Pass a configured period and a calendar date:

    trendguard validate --period weekly --date 2026-02-17 --report-dir ...",
        examples: ExamplePair {
            lang: "text",
            before: "--period fortnightly --date 2026-2-30",
            after: "--period weekly --date 2026-02-17",
        },
    }
}

fn explain_location() -> Explanation {
    Explanation {
        title: "Report Directory Location",
        description: "\
The report directory must resolve to exactly <output_root>/<period>/<date>.

Reports written anywhere else (a sibling root, a non-hidden copy, a different
period) are not the reports the delivery pipeline will pick up, so validating
them would prove nothing. Analysis halts on this error.",
        remediation: "\
Write the report set to the configured output root, or point trendguard at the
root the reports were written to with --output-root or `output_root` in
trendguard.toml.",
        examples: ExamplePair {
            lang: "text",
            before: "/tmp/github_trending/weekly/2026-02-17",
            after: "~/.github_trending/weekly/2026-02-17",
        },
    }
}

fn explain_presence() -> Explanation {
    Explanation {
        title: "Required Artifacts Present",
        description: "\
A report set is exactly four files in one directory:

- original_trending.html (the raw source page)
- report_<date>.md
- report_<date>.html
- report_manifest.json

Missing files halt analysis; an empty source page is reported but the remaining
artifacts are still checked.",
        remediation: "\
Regenerate the report set so that all four files are written, and keep the raw
source page that the report was generated from.",
        examples: ExamplePair {
            lang: "text",
            before: "report_2026-02-17.md\nreport_manifest.json",
            after: "original_trending.html\nreport_2026-02-17.md\nreport_2026-02-17.html\nreport_manifest.json",
        },
    }
}

fn explain_source_extract() -> Explanation {
    Explanation {
        title: "Source Repository Extraction",
        description: "\
Extracts the ground-truth ordered list of repositories from the raw trending page.

Each `<article class=\"Box-row\">` entry contributes the first repository link it
contains (sponsor links are skipped). If no entry containers are found, headings
of the form `<h2><a href=\"/owner/name\">` are used instead and a warning is
emitted. Arbitrary links elsewhere on the page are never used.",
        remediation: "\
Make sure original_trending.html is the unmodified trending page. If the page
layout changed upstream, the extractor needs to learn the new entry marker.",
        examples: ExamplePair {
            lang: "html",
            before: r#"<div class="list"><a href="/owner/name">owner/name</a></div>"#,
            after: r#"<article class="Box-row"><h2><a href="/owner/name">owner/name</a></h2></article>"#,
        },
    }
}

fn explain_markdown_structure() -> Explanation {
    Explanation {
        title: "Markdown Report Structure",
        description: "\
Checks the Markdown report against its contract:

- one heading per repository: `### <rank>. [owner/name](https://github.com/owner/name)`
- ranks are exactly 1..N in document order
- a tags line with at least one inline code span right below each heading
- five fields per entry, in order: 是什么, 作用, 效果, 项目分析, 建议
- the sections `## 📊 概述与趋势分析` and `## 🚀 热门项目详细分析`",
        remediation: "\
Regenerate the entry with every field on its own `* **<field>**: <text>` line in
the canonical order, and renumber headings sequentially from 1.",
        examples: ExamplePair {
            lang: "markdown",
            before: "### 2. [owner/name](https://github.com/owner/name)\n* **作用**: ...\n* **是什么**: ...",
            after: "### 1. [owner/name](https://github.com/owner/name)\n`Rust` `CLI`\n* **是什么**: ...\n* **作用**: ...\n* **效果**: ...\n* **项目分析**: ...\n* **建议**: ...",
        },
    }
}

fn explain_html_structure() -> Explanation {
    Explanation {
        title: "HTML Report Structure",
        description: "\
Checks the rendered HTML report against its contract:

- classes overview-section, repo-card, tag and suggestion-box are all used
- an <h2> containing 🚀 热门项目详细分析
- every repo-card has a GitHub repo link, at least one .tag badge, the labels
  是什么, 作用, 效果, 项目分析 and a .suggestion-box
- card ranks (the `N.` prefix of .repo-title) are exactly 1..N
- no <ul>/<ol> inside a <p>, and no Markdown backticks inside <body>",
        remediation: "\
Render Markdown constructs to real HTML elements (lists as sibling blocks, code
spans as <code>), and emit one complete repo-card per repository.",
        examples: ExamplePair {
            lang: "html",
            before: "<p>Highlights:<ul><li>`fast`</li></ul></p>",
            after: "<p>Highlights:</p>\n<ul><li><code>fast</code></li></ul>",
        },
    }
}

fn explain_manifest_schema() -> Explanation {
    Explanation {
        title: "Manifest Schema",
        description: "\
Validates report_manifest.json:

- top-level fields date, period, source_item_count, reported_item_count, repos
- date and period equal the requested values; both counts are integers
- repos[i].rank == i (1-based), repo is owner/name, url is the canonical
  https://github.com/owner/name and names the same repository
- reported_item_count equals the number of repos entries

A manifest that is not valid JSON halts analysis.",
        remediation: "\
Regenerate the manifest from the same ordered repository list used for the
Markdown and HTML reports.",
        examples: ExamplePair {
            lang: "json",
            before: r#"{"repos": [{"rank": 2, "repo": "a/b", "url": "https://github.com/a/c"}]}"#,
            after: r#"{"repos": [{"rank": 1, "repo": "a/b", "url": "https://github.com/a/b"}]}"#,
        },
    }
}

fn explain_consistency_counts() -> Explanation {
    Explanation {
        title: "Cross-File Counts",
        description: "\
Compares item counts across the report set: the repositories extracted from the
source page, Markdown entries, HTML cards and manifest entries must all agree,
and the manifest's declared counts must match what was actually found.",
        remediation: "\
Report every repository from the source page exactly once in every artifact.",
        examples: ExamplePair {
            lang: "text",
            before: "source=25, markdown=24, html=25, manifest_repos=25",
            after: "source=25, markdown=25, html=25, manifest_repos=25",
        },
    }
}

fn explain_consistency_order() -> Explanation {
    Explanation {
        title: "Cross-File Repository Order",
        description: "\
Compares the ordered repository identity sequences of all artifacts.

Against the source page the diff is itemized: the first mismatching position,
repositories missing from the report and repositories the report added. Between
report artifacts and the manifest a single aggregate error is emitted.",
        remediation: "\
Keep the source page order. Do not drop, reorder, or invent repositories.",
        examples: ExamplePair {
            lang: "text",
            before: "source=[a/x, b/y, c/z] markdown=[a/x, d/w, c/z]",
            after: "source=[a/x, b/y, c/z] markdown=[a/x, b/y, c/z]",
        },
    }
}

fn explain_tool_runtime() -> Explanation {
    Explanation {
        title: "Tool Runtime Error",
        description: "\
trendguard itself failed before it could judge the report set, for example
because the config file does not parse or an artifact cannot be read. The report
carries this single finding and the process exits with 1.",
        remediation: "\
Read the error message, fix the environment (file permissions, config syntax,
HOME or --output-root) and re-run trendguard.",
        examples: ExamplePair {
            lang: "toml",
            before: "output_root = [",
            after: "output_root = \"~/.github_trending\"",
        },
    }
}
