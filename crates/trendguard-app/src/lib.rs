//! Use case orchestration for trendguard.
//!
//! This crate provides the application layer: use cases that coordinate the settings, artifacts,
//! domain, and render layers. It is intentionally thin and delegates heavy lifting to the
//! appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod config;
mod existing;
mod explain;
mod render;
mod report;
mod validate;

pub use config::load_config;
pub use existing::{
    EXIT_EXISTING_INVALID, EXIT_EXISTING_VALID, EXIT_REPORT_MISSING, ExistingAction,
    ExistingInput, ExistingOutput, ExistingPayload, ExistingStatus, run_existing,
};
pub use explain::{ExplainOutput, run_explain};
pub use render::{render_annotations, render_markdown, render_text};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
pub use validate::{ValidateInput, ValidateOutput, run_validate, verdict_exit_code};
