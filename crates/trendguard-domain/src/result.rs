use crate::fingerprint::fingerprint_for_finding;
use trendguard_types::{Finding, Severity};

/// Append-only accumulator of findings for one validation call.
///
/// Findings keep insertion order; nothing is ever removed or re-sorted.
#[derive(Clone, Debug, Default)]
pub struct ValidationResult {
    findings: Vec<Finding>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) -> &mut Finding {
        let idx = self.findings.len();
        self.findings.push(finding);
        &mut self.findings[idx]
    }

    pub fn error(&mut self, check_id: &str, code: &str, message: impl Into<String>) -> &mut Finding {
        self.push(Finding::new(Severity::Error, check_id, code, message))
    }

    pub fn warn(&mut self, check_id: &str, code: &str, message: impl Into<String>) -> &mut Finding {
        self.push(Finding::new(Severity::Warning, check_id, code, message))
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }

    pub fn error_messages(&self) -> Vec<&str> {
        self.messages(Severity::Error)
    }

    pub fn warning_messages(&self) -> Vec<&str> {
        self.messages(Severity::Warning)
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Consume the accumulator, stamping every finding with its fingerprint.
    pub fn into_findings(self) -> Vec<Finding> {
        let mut findings = self.findings;
        for f in &mut findings {
            let artifact = f.location.as_ref().map(|l| l.path.as_str()).unwrap_or("");
            f.fingerprint = Some(fingerprint_for_finding(&f.check_id, &f.code, artifact, &f.message));
        }
        findings
    }

    fn messages(&self, severity: Severity) -> Vec<&str> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .map(|f| f.message.as_str())
            .collect()
    }
}
