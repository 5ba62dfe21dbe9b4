use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for trendguard reports.
pub const SCHEMA_REPORT_V1: &str = "trendguard.report.v1";

/// Errors block a pass; warnings never do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Where a finding points: an artifact file name and, when known, a 1-based line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub check_id: String,
    pub code: String,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Stable identifier intended for dedup and trending:
    /// a hash of `check_id + code + artifact + message`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Check-specific structured payload.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

impl Finding {
    pub fn new(severity: Severity, check_id: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            check_id: check_id.to_string(),
            code: code.to_string(),
            message: message.into(),
            location: None,
            help: None,
            fingerprint: None,
            data: JsonValue::Null,
        }
    }

    pub fn at(&mut self, path: &str, line: Option<u32>) -> &mut Self {
        self.location = Some(Location {
            path: path.to_string(),
            line,
        });
        self
    }

    pub fn with_help(&mut self, help: &str) -> &mut Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn with_data(&mut self, data: JsonValue) -> &mut Self {
        self.data = data;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

impl Verdict {
    /// A report passes when it has no errors; warnings alone never fail it.
    pub fn passed(self) -> bool {
        !matches!(self, Verdict::Fail)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerdictCounts {
    pub warn: u32,
    pub error: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerdictSummary {
    pub status: Verdict,
    pub counts: VerdictCounts,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "Option<String>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub ended_at: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// Item counts extracted from each artifact.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ItemCounts {
    pub source: u32,
    pub markdown: u32,
    pub html: u32,
    pub manifest_repos: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_reported: Option<i64>,
}

/// Trendguard-specific summary payload for the report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrendguardData {
    pub period: String,
    pub date: String,
    pub report_dir: String,
    pub expected_report_dir: String,
    pub passed: bool,

    /// Absent when analysis halted before content was parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<ItemCounts>,

    /// Strategy that produced the source identity sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_strategy: Option<String>,
}

/// A generic receipt/envelope.
///
/// Keeping this generic allows embedding tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = TrendguardData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub verdict: VerdictSummary,
    pub findings: Vec<Finding>,
    pub data: TData,
}

pub type TrendguardReport = ReportEnvelope<TrendguardData>;

impl<TData> ReportEnvelope<TData> {
    /// Error messages in the order they were recorded.
    pub fn errors(&self) -> Vec<&str> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .map(|f| f.message.as_str())
            .collect()
    }

    /// Warning messages in the order they were recorded.
    pub fn warnings(&self) -> Vec<&str> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .map(|f| f.message.as_str())
            .collect()
    }
}
