//! Fuzz target for Markdown report parsing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_markdown_report
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use trendguard_domain::ValidationResult;
use trendguard_domain::markdown::{check_section_headings, parse_markdown_entries};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let mut result = ValidationResult::new();
        let _ = parse_markdown_entries(text, "report.md", &mut result);
        check_section_headings(text, "report.md", &mut result);
    }
});
