//! `trendguard explain <id>`: documentation for a check id or finding code.

use std::fmt::Write as _;
use trendguard_types::explain::{self, Explanation};

/// What an identifier resolved to.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Check(Explanation),
    /// A finding code, documented through the check that emits it.
    Code {
        check_id: &'static str,
        explanation: Explanation,
    },
    Unknown(String),
}

impl ExplainOutput {
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Terminal text. Unknown identifiers render the list of valid ones.
    pub fn render(&self) -> String {
        match self {
            Self::Check(exp) => render_explanation(exp, None),
            Self::Code {
                check_id,
                explanation,
            } => render_explanation(explanation, Some(check_id)),
            Self::Unknown(identifier) => render_unknown(identifier),
        }
    }
}

pub fn run_explain(identifier: &str) -> ExplainOutput {
    let Some(explanation) = explain::lookup_explanation(identifier) else {
        return ExplainOutput::Unknown(identifier.to_string());
    };
    match explain::code_entry(identifier) {
        Some((check_id, _)) if check_id != identifier => ExplainOutput::Code {
            check_id,
            explanation,
        },
        _ => ExplainOutput::Check(explanation),
    }
}

fn render_explanation(exp: &Explanation, emitted_by: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", exp.title);
    let _ = writeln!(out, "{}", "=".repeat(exp.title.chars().count()));
    if let Some(check_id) = emitted_by {
        let _ = writeln!(out, "\nEmitted by `{check_id}`.");
    }
    let _ = writeln!(out, "\n{}", exp.description);

    let _ = writeln!(out, "\nRemediation\n-----------\n{}", exp.remediation);

    let lang = exp.examples.lang;
    let _ = writeln!(out, "\nBefore:\n```{lang}\n{}\n```", exp.examples.before);
    let _ = writeln!(out, "\nAfter:\n```{lang}\n{}\n```", exp.examples.after);
    out
}

fn render_unknown(identifier: &str) -> String {
    let mut out = format!("Unknown check_id or code: {identifier}\n");
    for (heading, names) in [
        ("check ids", explain::all_check_ids()),
        ("codes", explain::all_codes()),
    ] {
        let _ = writeln!(out, "\nKnown {heading}:");
        for name in names {
            let _ = writeln!(out, "  {name}");
        }
    }
    out
}
