//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings,
//! and the caller supplies the home directory used for `~/` expansion.

#![forbid(unsafe_code)]

mod model;
mod resolve;

use camino::Utf8Path;

pub use model::{SCHEMA_CONFIG_V1, TrendguardConfigV1};
pub use resolve::{
    DEFAULT_OUTPUT_ROOT_NAME, DEFAULT_PERIODS, Overrides, ResolvedConfig, expand_home,
};

/// Parse `trendguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<TrendguardConfigV1> {
    let cfg: TrendguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective output root and period set.
pub fn resolve_config(
    cfg: TrendguardConfigV1,
    overrides: Overrides,
    home: Option<&Utf8Path>,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides, home)
}
