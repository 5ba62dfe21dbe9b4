//! Fuzz target for whole report-set evaluation.
//!
//! Goal: evaluation is deterministic and never panics, whatever the four
//! artifacts contain.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_report_set
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use trendguard_domain::{Artifact, ArtifactSet, Expectation, ValidationResult, evaluate};

#[derive(Arbitrary, Debug)]
struct Input {
    source: String,
    markdown: String,
    html: String,
    manifest: String,
}

fuzz_target!(|input: Input| {
    let set = ArtifactSet {
        source: Artifact::new("original_trending.html", input.source),
        markdown: Artifact::new("report_2026-02-17.md", input.markdown),
        html: Artifact::new("report_2026-02-17.html", input.html),
        manifest: Artifact::new("report_manifest.json", input.manifest),
    };
    let expect = Expectation {
        period: "weekly".to_string(),
        date: "2026-02-17".to_string(),
    };
    let first = evaluate(&set, &expect, ValidationResult::new());
    let second = evaluate(&set, &expect, ValidationResult::new());
    assert_eq!(first.findings, second.findings);
});
