/// One artifact as read from the report directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Artifact {
    /// File name used in finding locations.
    pub name: String,
    pub text: String,
}

impl Artifact {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// The four artifacts of one report set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArtifactSet {
    pub source: Artifact,
    pub markdown: Artifact,
    pub html: Artifact,
    pub manifest: Artifact,
}

/// Period and date the report set was requested for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expectation {
    pub period: String,
    pub date: String,
}
