//! Fuzz target for HTML report card parsing and structure checks.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_html_report
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use trendguard_domain::ValidationResult;
use trendguard_domain::html::{check_html_report, parse_html_report};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let report = parse_html_report(&text);
    let mut result = ValidationResult::new();
    check_html_report(&text, &report, "report.html", &mut result);
});
