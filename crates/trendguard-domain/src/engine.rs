use crate::html::{check_html_report, parse_html_report};
use crate::manifest::{parse_manifest, validate_manifest};
use crate::markdown::{check_section_headings, parse_markdown_entries};
use crate::model::{ArtifactSet, Expectation};
use crate::reconcile::{ReconcileInput, reconcile};
use crate::report::DomainReport;
use crate::result::ValidationResult;
use crate::source::{SourceStrategy, extract_source_repos};
use serde_json::json;
use trendguard_types::{ItemCounts, RepoIdentity, ids};

/// Analyse the content of a report set whose location and presence were already checked.
///
/// `result` carries whatever the caller recorded so far. The only early stop is a
/// manifest that cannot be parsed as a JSON object.
pub fn evaluate(
    artifacts: &ArtifactSet,
    expect: &Expectation,
    mut result: ValidationResult,
) -> DomainReport {
    let source = &artifacts.source;
    if source.text.trim().is_empty() {
        result
            .error(
                ids::CHECK_REPORT_PRESENCE,
                ids::CODE_EMPTY_SOURCE,
                format!("{} is empty.", source.name),
            )
            .at(&source.name, None);
    }

    let Some(manifest) = parse_manifest(&artifacts.manifest.text, &artifacts.manifest.name, &mut result)
    else {
        return DomainReport::halted(result);
    };

    let extraction = extract_source_repos(&source.text);
    match extraction.strategy {
        SourceStrategy::None => {
            result
                .error(
                    ids::CHECK_SOURCE_EXTRACT,
                    ids::CODE_NO_SOURCE_REPOS,
                    format!("Cannot extract repo list from {}.", source.name),
                )
                .at(&source.name, None);
        }
        SourceStrategy::HeadingAnchors => {
            result
                .warn(
                    ids::CHECK_SOURCE_EXTRACT,
                    ids::CODE_SOURCE_FALLBACK_USED,
                    format!(
                        "No trending entry containers found in {}; repo list taken from heading anchors.",
                        source.name
                    ),
                )
                .at(&source.name, None);
        }
        SourceStrategy::EntryContainers => {}
    }
    if extraction.duplicates > 0 {
        result
            .warn(
                ids::CHECK_SOURCE_EXTRACT,
                ids::CODE_SOURCE_DUPLICATES_COLLAPSED,
                format!(
                    "Collapsed {} duplicate repo entries in {}.",
                    extraction.duplicates, source.name
                ),
            )
            .at(&source.name, None)
            .with_data(json!({ "duplicates": extraction.duplicates }));
    }

    let markdown = &artifacts.markdown;
    let entries = parse_markdown_entries(&markdown.text, &markdown.name, &mut result);
    check_section_headings(&markdown.text, &markdown.name, &mut result);

    let html = &artifacts.html;
    let html_report = parse_html_report(&html.text);
    check_html_report(&html.text, &html_report, &html.name, &mut result);

    let summary = validate_manifest(
        &manifest,
        &expect.period,
        &expect.date,
        &artifacts.manifest.name,
        &mut result,
    );

    let html_ids: Vec<Option<RepoIdentity>> = html_report
        .cards
        .iter()
        .map(|c| c.repo_url.as_deref().and_then(RepoIdentity::from_url))
        .collect();

    let input = ReconcileInput {
        source: extraction.repos.iter().map(RepoIdentity::as_str).collect(),
        markdown: entries.iter().map(|e| e.repo.as_str()).collect(),
        html: html_ids.iter().map(|r| r.as_ref().map(RepoIdentity::as_str)).collect(),
        manifest: summary.repo_sequence(),
        manifest_entries: summary.entries.len(),
        declared_source_count: summary.source_item_count,
        declared_reported_count: summary.reported_item_count,
    };
    reconcile(&input, &mut result);

    let items = ItemCounts {
        source: extraction.repos.len() as u32,
        markdown: entries.len() as u32,
        html: html_report.cards.len() as u32,
        manifest_repos: summary.entries.len() as u32,
        manifest_reported: summary.reported_item_count,
    };

    DomainReport::finish(result, Some(items), Some(extraction.strategy))
}
