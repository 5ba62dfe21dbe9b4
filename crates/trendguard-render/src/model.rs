#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSeverity {
    Warning,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableLocation {
    pub path: String,
    pub line: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub severity: RenderableSeverity,
    pub check_id: String,
    pub code: String,
    pub message: String,
    pub location: Option<RenderableLocation>,
    pub help: Option<String>,
}

/// Per-artifact item counts, when content analysis ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableCounts {
    pub source: u32,
    pub markdown: u32,
    pub html: u32,
    pub manifest_repos: u32,
    pub manifest_reported: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub period: String,
    pub date: String,
    pub report_dir: String,
    pub counts: Option<RenderableCounts>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    /// Recording order; renderers never re-sort.
    pub findings: Vec<RenderableFinding>,
    pub data: RenderableData,
}

impl RenderableReport {
    pub fn errors(&self) -> impl Iterator<Item = &RenderableFinding> {
        self.findings
            .iter()
            .filter(|f| f.severity == RenderableSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &RenderableFinding> {
        self.findings
            .iter()
            .filter(|f| f.severity == RenderableSeverity::Warning)
    }
}
