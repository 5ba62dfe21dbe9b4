//! Stable DTOs and IDs used across the trendguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report envelope
//! - stable string IDs and codes
//! - the repository identity type shared by every artifact parser
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod identity;
pub mod ids;
pub mod receipt;

pub use explain::{ExamplePair, Explanation, lookup_explanation};
pub use identity::{GITHUB_URL_PREFIX, RepoIdentity, is_repo_url};
pub use receipt::{
    Finding, ItemCounts, Location, ReportEnvelope, RunMeta, SCHEMA_REPORT_V1, Severity, ToolMeta,
    TrendguardData, TrendguardReport, Verdict, VerdictCounts, VerdictSummary,
};
