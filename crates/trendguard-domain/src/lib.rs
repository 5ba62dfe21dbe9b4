//! Pure report-set validation (no IO).
//!
//! Input: the text of the four artifacts, read elsewhere.
//! Output: findings in discovery order + verdict + extracted counts.

#![forbid(unsafe_code)]

pub mod html;
pub mod invocation;
pub mod manifest;
pub mod markdown;
pub mod markup;
pub mod model;
pub mod reconcile;
pub mod report;
pub mod result;
pub mod source;

mod engine;
mod fingerprint;

#[cfg(test)]
mod properties;

pub use engine::evaluate;
pub use fingerprint::fingerprint_for_finding;
pub use model::{Artifact, ArtifactSet, Expectation};
pub use report::DomainReport;
pub use result::ValidationResult;
