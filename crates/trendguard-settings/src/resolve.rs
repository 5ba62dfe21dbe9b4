use crate::model::{SCHEMA_CONFIG_V1, TrendguardConfigV1};
use camino::{Utf8Path, Utf8PathBuf};

/// Directory under the home directory used when no root is configured.
pub const DEFAULT_OUTPUT_ROOT_NAME: &str = ".github_trending";

pub const DEFAULT_PERIODS: [&str; 3] = ["daily", "weekly", "monthly"];

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub output_root: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub output_root: Utf8PathBuf,
    pub periods: Vec<String>,
}

pub fn resolve_config(
    cfg: TrendguardConfigV1,
    overrides: Overrides,
    home: Option<&Utf8Path>,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let output_root = match overrides.output_root.or(cfg.output_root) {
        Some(root) => expand_home(&root, home)?,
        None => match home {
            Some(home) => home.join(DEFAULT_OUTPUT_ROOT_NAME),
            None => anyhow::bail!(
                "no output root configured and no home directory available to default to ~/{DEFAULT_OUTPUT_ROOT_NAME}"
            ),
        },
    };
    if output_root.as_str().is_empty() {
        anyhow::bail!("output_root must not be empty");
    }

    let periods = match cfg.periods {
        Some(periods) => {
            if periods.is_empty() {
                anyhow::bail!("periods must list at least one period");
            }
            if let Some(bad) = periods.iter().find(|p| !is_period_name(p)) {
                anyhow::bail!("invalid period name: {bad:?} (expected a single path segment)");
            }
            periods
        }
        None => DEFAULT_PERIODS.iter().map(|p| p.to_string()).collect(),
    };

    Ok(ResolvedConfig {
        output_root,
        periods,
    })
}

/// Expand a leading `~` or `~/` against `home`.
pub fn expand_home(path: &str, home: Option<&Utf8Path>) -> anyhow::Result<Utf8PathBuf> {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };
    match rest {
        None => Ok(Utf8PathBuf::from(path)),
        Some(rest) => match home {
            Some(home) if rest.is_empty() => Ok(home.to_path_buf()),
            Some(home) => Ok(home.join(rest)),
            None => anyhow::bail!("cannot expand {path}: no home directory available"),
        },
    }
}

fn is_period_name(p: &str) -> bool {
    !p.is_empty() && p != "." && p != ".." && !p.contains(['/', '\\'])
}
