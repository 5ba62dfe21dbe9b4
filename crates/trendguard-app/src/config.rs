use anyhow::Context;
use camino::Utf8Path;
use trendguard_settings::{Overrides, ResolvedConfig, TrendguardConfigV1};

/// Parse and resolve configuration text. Blank text means defaults.
pub fn load_config(
    config_text: &str,
    overrides: Overrides,
    home: Option<&Utf8Path>,
) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        TrendguardConfigV1::default()
    } else {
        trendguard_settings::parse_config_toml(config_text).context("parse config")?
    };

    let resolved =
        trendguard_settings::resolve_config(cfg, overrides, home).context("resolve config")?;
    tracing::debug!(output_root = %resolved.output_root, periods = ?resolved.periods, "resolved config");
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_config_uses_defaults() {
        let resolved = load_config("  \n", Overrides::default(), Some(Utf8Path::new("/home/u")))
            .expect("load");
        assert_eq!(resolved.output_root.as_str(), "/home/u/.github_trending");
    }

    #[test]
    fn bad_toml_is_reported_with_context() {
        let err = load_config("output_root = [", Overrides::default(), None).expect_err("fails");
        assert_eq!(err.to_string(), "parse config");
    }
}
