use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const SCHEMA_CONFIG_V1: &str = "trendguard.config.v1";

/// `trendguard.toml` schema v1.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TrendguardConfigV1 {
    /// Optional schema string for tooling (`trendguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Root that holds `<period>/<date>` report directories. A leading `~/`
    /// expands against the caller's home directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_root: Option<String>,

    /// Accepted period names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods: Option<Vec<String>>,
}
