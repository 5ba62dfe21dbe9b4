//! Rendering utilities for terminals and CI surfaces (plain text, Markdown, GitHub annotations).
//!
//! Renderers only see the `Renderable*` model, never the report envelope, so they stay
//! free of serde and schema concerns.

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;
mod text;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableCounts, RenderableData, RenderableFinding, RenderableLocation, RenderableReport,
    RenderableSeverity, RenderableVerdictStatus,
};
pub use text::render_text;
