//! Fuzz target for manifest parsing and entry validation.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_manifest
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use trendguard_domain::ValidationResult;
use trendguard_domain::manifest::{parse_manifest, validate_manifest};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let mut result = ValidationResult::new();
        if let Some(map) = parse_manifest(text, "report_manifest.json", &mut result) {
            let repos = map.get("repos").and_then(|r| r.as_array()).map_or(0, Vec::len);
            let summary =
                validate_manifest(&map, "weekly", "2026-02-17", "report_manifest.json", &mut result);
            assert!(summary.entries.len() <= repos);
        }
    }
});
