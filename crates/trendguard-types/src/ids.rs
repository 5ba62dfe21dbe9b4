//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator,
//! unique across all checks so that `trendguard explain <code>` is unambiguous.

// Checks
pub const CHECK_REPORT_INVOCATION: &str = "report.invocation";
pub const CHECK_REPORT_LOCATION: &str = "report.location";
pub const CHECK_REPORT_PRESENCE: &str = "report.presence";
pub const CHECK_SOURCE_EXTRACT: &str = "source.extract";
pub const CHECK_MARKDOWN_STRUCTURE: &str = "markdown.structure";
pub const CHECK_HTML_STRUCTURE: &str = "html.structure";
pub const CHECK_MANIFEST_SCHEMA: &str = "manifest.schema";
pub const CHECK_CONSISTENCY_COUNTS: &str = "consistency.counts";
pub const CHECK_CONSISTENCY_ORDER: &str = "consistency.order";

// Codes: report.invocation
pub const CODE_INVALID_PERIOD: &str = "invalid_period";
pub const CODE_INVALID_DATE: &str = "invalid_date";

// Codes: report.location
pub const CODE_OUTSIDE_EXPECTED_ROOT: &str = "outside_expected_root";

// Codes: report.presence
pub const CODE_MISSING_FILE: &str = "missing_file";
pub const CODE_EMPTY_SOURCE: &str = "empty_source";

// Codes: source.extract
pub const CODE_NO_SOURCE_REPOS: &str = "no_source_repos";
pub const CODE_SOURCE_FALLBACK_USED: &str = "source_fallback_used";
pub const CODE_SOURCE_DUPLICATES_COLLAPSED: &str = "source_duplicates_collapsed";

// Codes: markdown.structure
pub const CODE_MARKDOWN_NO_HEADINGS: &str = "markdown_no_headings";
pub const CODE_MARKDOWN_MISSING_TAGS: &str = "markdown_missing_tags";
pub const CODE_MARKDOWN_MISSING_FIELD: &str = "markdown_missing_field";
pub const CODE_MARKDOWN_FIELD_ORDER: &str = "markdown_field_order";
pub const CODE_MARKDOWN_RANK_SEQUENCE: &str = "markdown_rank_sequence";
pub const CODE_MARKDOWN_MISSING_SECTION: &str = "markdown_missing_section";
pub const CODE_MARKDOWN_LINK_MISMATCH: &str = "markdown_link_mismatch";

// Codes: html.structure
pub const CODE_HTML_MISSING_CLASS: &str = "html_missing_class";
pub const CODE_HTML_MISSING_SECTION: &str = "html_missing_section";
pub const CODE_HTML_LIST_INSIDE_PARAGRAPH: &str = "html_list_inside_paragraph";
pub const CODE_HTML_BACKTICK_IN_BODY: &str = "html_backtick_in_body";
pub const CODE_HTML_RANK_SEQUENCE: &str = "html_rank_sequence";
pub const CODE_HTML_CARD_MISSING_LINK: &str = "html_card_missing_link";
pub const CODE_HTML_CARD_MISSING_TAG: &str = "html_card_missing_tag";
pub const CODE_HTML_CARD_MISSING_LABELS: &str = "html_card_missing_labels";
pub const CODE_HTML_CARD_MISSING_SUGGESTION: &str = "html_card_missing_suggestion";

// Codes: manifest.schema
pub const CODE_MANIFEST_INVALID_JSON: &str = "manifest_invalid_json";
pub const CODE_MANIFEST_NOT_OBJECT: &str = "manifest_not_object";
pub const CODE_MANIFEST_MISSING_FIELD: &str = "manifest_missing_field";
pub const CODE_MANIFEST_DATE_MISMATCH: &str = "manifest_date_mismatch";
pub const CODE_MANIFEST_PERIOD_MISMATCH: &str = "manifest_period_mismatch";
pub const CODE_MANIFEST_COUNT_NOT_INTEGER: &str = "manifest_count_not_integer";
pub const CODE_MANIFEST_REPOS_NOT_LIST: &str = "manifest_repos_not_list";
pub const CODE_MANIFEST_ENTRY_NOT_OBJECT: &str = "manifest_entry_not_object";
pub const CODE_MANIFEST_RANK_MISMATCH: &str = "manifest_rank_mismatch";
pub const CODE_MANIFEST_INVALID_REPO: &str = "manifest_invalid_repo";
pub const CODE_MANIFEST_INVALID_URL: &str = "manifest_invalid_url";
pub const CODE_MANIFEST_REPO_URL_MISMATCH: &str = "manifest_repo_url_mismatch";
pub const CODE_MANIFEST_REPORTED_COUNT: &str = "manifest_reported_count";

// Codes: consistency.counts
pub const CODE_SOURCE_COUNT_MISMATCH: &str = "source_count_mismatch";
pub const CODE_CROSS_FILE_COUNT_MISMATCH: &str = "cross_file_count_mismatch";
pub const CODE_REPORTED_COUNT_MISMATCH: &str = "reported_count_mismatch";

// Codes: consistency.order
pub const CODE_MARKDOWN_MANIFEST_MISMATCH: &str = "markdown_manifest_mismatch";
pub const CODE_HTML_MANIFEST_MISMATCH: &str = "html_manifest_mismatch";
pub const CODE_SOURCE_MARKDOWN_MISMATCH: &str = "source_markdown_mismatch";
pub const CODE_SOURCE_HTML_MISMATCH: &str = "source_html_mismatch";
pub const CODE_SOURCE_MANIFEST_MISMATCH: &str = "source_manifest_mismatch";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
