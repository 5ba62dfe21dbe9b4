//! HTML report cards and document-level structure.

mod checks;
mod parser;

pub use checks::{REQUIRED_CLASSES, REQUIRED_LABELS, check_html_report};
pub use parser::{HtmlCard, HtmlReport, SECTION_MARKER, normalize_label, parse_html_report};
