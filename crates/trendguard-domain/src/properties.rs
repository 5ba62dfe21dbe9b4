//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - scanners never panicking on arbitrary input
//! - generated valid report sets always passing
//! - diff rendering for sequences that differ

use crate::engine::evaluate;
use crate::html::parse_html_report;
use crate::markdown::parse_markdown_entries;
use crate::markup::Tokenizer;
use crate::model::{Artifact, ArtifactSet, Expectation};
use crate::reconcile::describe_repo_diff;
use crate::result::ValidationResult;
use crate::source::extract_source_repos;
use proptest::prelude::*;
use trendguard_test_util::ReportSetBuilder;
use trendguard_types::Verdict;

// ============================================================================
// Strategies
// ============================================================================

fn arb_segment() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9][A-Za-z0-9_.-]{0,11}").unwrap()
}

fn arb_repo() -> impl Strategy<Value = String> {
    (arb_segment(), arb_segment()).prop_map(|(o, n)| format!("{o}/{n}"))
}

/// Distinct repositories in random order.
fn arb_repo_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(arb_repo(), 1..12)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

fn arb_markupish() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("<".to_string()),
            Just(">".to_string()),
            Just("</".to_string()),
            Just("<!--".to_string()),
            Just("-->".to_string()),
            Just("<div class=\"repo-card\">".to_string()),
            Just("</div>".to_string()),
            Just("<p>".to_string()),
            Just("<ul>".to_string()),
            Just("<script>".to_string()),
            Just("&amp;".to_string()),
            Just("&#".to_string()),
            Just("\"".to_string()),
            Just("### 1. [a/b](https://github.com/a/b)".to_string()),
            Just("是什么".to_string()),
            "[ -~]{0,8}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn build(repos: &[String]) -> ArtifactSet {
    let refs: Vec<&str> = repos.iter().map(String::as_str).collect();
    let b = ReportSetBuilder::new("weekly", "2026-02-17", &refs);
    ArtifactSet {
        source: Artifact::new(b.source_file_name(), b.source_html()),
        markdown: Artifact::new(b.markdown_file_name(), b.markdown()),
        html: Artifact::new(b.html_file_name(), b.html()),
        manifest: Artifact::new(b.manifest_file_name(), b.manifest_json()),
    }
}

fn expect() -> Expectation {
    Expectation {
        period: "weekly".to_string(),
        date: "2026-02-17".to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scanners_never_panic(input in arb_markupish()) {
        let _ = Tokenizer::new(&input).count();
        let _ = extract_source_repos(&input);
        let _ = parse_html_report(&input);
        let mut r = ValidationResult::new();
        let _ = parse_markdown_entries(&input, "x.md", &mut r);
    }

    #[test]
    fn tokenizer_survives_arbitrary_unicode(input in "\\PC{0,200}") {
        let _ = Tokenizer::new(&input).count();
    }

    #[test]
    fn valid_report_sets_pass(repos in arb_repo_list()) {
        let report = evaluate(&build(&repos), &expect(), ValidationResult::new());
        let errors: Vec<&str> = report.findings.iter().filter(|f| f.is_error()).map(|f| f.message.as_str()).collect();
        prop_assert_eq!(report.verdict, Verdict::Pass, "errors: {:?}", errors);
        let items = report.items.expect("content analysed");
        prop_assert_eq!(items.source as usize, repos.len());
        prop_assert_eq!(items.markdown, items.html);
        prop_assert_eq!(items.html, items.manifest_repos);
    }

    #[test]
    fn source_html_round_trips_identities(repos in arb_repo_list()) {
        let set = build(&repos);
        let extracted = extract_source_repos(&set.source.text);
        let got: Vec<&str> = extracted.repos.iter().map(|r| r.as_str()).collect();
        let want: Vec<&str> = repos.iter().map(String::as_str).collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn dropping_one_repo_is_named_missing(repos in arb_repo_list(), pick in any::<prop::sample::Index>()) {
        let expected: Vec<&str> = repos.iter().map(String::as_str).collect();
        let drop = pick.index(expected.len());
        let mut actual = expected.clone();
        let removed = actual.remove(drop);
        let diff = describe_repo_diff(&expected, &actual);
        let missing = format!("missing=[{removed}]");
        prop_assert!(diff.contains(&missing), "{}", diff);
        let first = format!("first_mismatch_at={} expected={}", drop + 1, removed);
        prop_assert!(diff.starts_with(&first), "{}", diff);
    }

    #[test]
    fn reruns_are_identical(repos in arb_repo_list(), cut in 0usize..4) {
        let mut set = build(&repos);
        let keep = set.html.text.len().saturating_sub(cut * 40);
        let mut end = keep;
        while !set.html.text.is_char_boundary(end) {
            end -= 1;
        }
        set.html.text.truncate(end);
        let a = evaluate(&set, &expect(), ValidationResult::new());
        let b = evaluate(&set, &expect(), ValidationResult::new());
        prop_assert_eq!(a.findings, b.findings);
    }
}
