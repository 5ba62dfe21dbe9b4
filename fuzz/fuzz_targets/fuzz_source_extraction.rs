//! Fuzz target for trending-page repo extraction.
//!
//! Goal: extraction should **never panic** on any markup, and every
//! extracted identity must be a well-formed `owner/name`.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_source_extraction
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use trendguard_domain::source::extract_source_repos;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let extraction = extract_source_repos(&text);
    for repo in &extraction.repos {
        assert_eq!(repo.as_str().matches('/').count(), 1);
    }
});
