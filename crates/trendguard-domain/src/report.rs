use crate::result::ValidationResult;
use crate::source::SourceStrategy;
use trendguard_types::{Finding, ItemCounts, Severity, Verdict, VerdictCounts};

#[derive(Clone, Debug)]
pub struct DomainReport {
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub counts: VerdictCounts,
    /// Absent when analysis halted before artifacts were parsed.
    pub items: Option<ItemCounts>,
    pub source_strategy: Option<SourceStrategy>,
}

impl DomainReport {
    /// Report for an invocation that stopped before content analysis completed.
    pub fn halted(result: ValidationResult) -> Self {
        Self::finish(result, None, None)
    }

    pub(crate) fn finish(
        result: ValidationResult,
        items: Option<ItemCounts>,
        source_strategy: Option<SourceStrategy>,
    ) -> Self {
        let findings = result.into_findings();
        let counts = count_findings(&findings);
        DomainReport {
            verdict: compute_verdict(&counts),
            findings,
            counts,
            items,
            source_strategy,
        }
    }

    pub fn passed(&self) -> bool {
        self.verdict.passed()
    }
}

pub fn count_findings(findings: &[Finding]) -> VerdictCounts {
    let mut counts = VerdictCounts::default();
    for f in findings {
        match f.severity {
            Severity::Warning => counts.warn += 1,
            Severity::Error => counts.error += 1,
        }
    }
    counts
}

fn compute_verdict(counts: &VerdictCounts) -> Verdict {
    if counts.error > 0 {
        Verdict::Fail
    } else if counts.warn > 0 {
        Verdict::Warn
    } else {
        Verdict::Pass
    }
}
