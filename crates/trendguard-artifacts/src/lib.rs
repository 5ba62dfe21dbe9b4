//! Report directory adapters: where a report set must live, whether it is complete,
//! and reading its artifacts.
//!
//! This crate is allowed to do filesystem IO. Everything it finds wrong with the
//! directory becomes a finding; only genuine IO failures are errors.

#![forbid(unsafe_code)]

mod layout;
mod resolve;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use trendguard_domain::{Artifact, ArtifactSet, ValidationResult};
use trendguard_types::ids;

pub use layout::{
    MANIFEST_FILE_NAME, ReportLayout, SOURCE_FILE_NAME, expected_report_dir, html_file_name,
    markdown_file_name,
};
pub use resolve::{normalize_lexically, resolve_dir};

/// Resolved report directory compared against the expected location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationCheck {
    pub expected: Utf8PathBuf,
    pub actual: Utf8PathBuf,
}

impl LocationCheck {
    pub fn matches(&self) -> bool {
        self.expected == self.actual
    }
}

/// Record an error unless `report_dir` resolves to exactly `expected`.
pub fn check_location(
    report_dir: &Utf8Path,
    expected: &Utf8Path,
    result: &mut ValidationResult,
) -> LocationCheck {
    let check = LocationCheck {
        expected: resolve_dir(expected),
        actual: resolve_dir(report_dir),
    };
    if !check.matches() {
        tracing::debug!(expected = %check.expected, actual = %check.actual, "report directory outside expected root");
        result.error(
            ids::CHECK_REPORT_LOCATION,
            ids::CODE_OUTSIDE_EXPECTED_ROOT,
            format!(
                "Report directory must be exactly under the configured output root: expected '{}', got '{}'.",
                check.expected, check.actual
            ),
        );
    }
    check
}

/// Record one error per missing artifact. Returns true when all four exist.
pub fn check_presence(layout: &ReportLayout, result: &mut ValidationResult) -> bool {
    let mut complete = true;
    for path in layout.files() {
        if path.is_file() {
            continue;
        }
        complete = false;
        tracing::debug!(%path, "required artifact missing");
        result
            .error(
                ids::CHECK_REPORT_PRESENCE,
                ids::CODE_MISSING_FILE,
                format!("Missing required file: {path}."),
            )
            .at(path.file_name().unwrap_or(path.as_str()), None);
    }
    complete
}

/// Read all four artifacts. Invalid UTF-8 is replaced rather than rejected.
pub fn read_artifacts(layout: &ReportLayout) -> anyhow::Result<ArtifactSet> {
    let [source, markdown, html, manifest] = layout.files();
    Ok(ArtifactSet {
        source: read_artifact(&source)?,
        markdown: read_artifact(&markdown)?,
        html: read_artifact(&html)?,
        manifest: read_artifact(&manifest)?,
    })
}

fn read_artifact(path: &Utf8Path) -> anyhow::Result<Artifact> {
    let bytes = std::fs::read(path).with_context(|| format!("read {path}"))?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    tracing::debug!(%path, bytes = bytes.len(), "read artifact");
    let name = path.file_name().unwrap_or(path.as_str());
    Ok(Artifact::new(name, text))
}
