use camino::{Utf8Path, Utf8PathBuf};

pub const SOURCE_FILE_NAME: &str = "original_trending.html";
pub const MANIFEST_FILE_NAME: &str = "report_manifest.json";

pub fn markdown_file_name(date: &str) -> String {
    format!("report_{date}.md")
}

pub fn html_file_name(date: &str) -> String {
    format!("report_{date}.html")
}

/// The only legal location of a report set: `<root>/<period>/<date>`.
pub fn expected_report_dir(output_root: &Utf8Path, period: &str, date: &str) -> Utf8PathBuf {
    output_root.join(period).join(date)
}

/// File paths of one report set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportLayout {
    pub report_dir: Utf8PathBuf,
    pub date: String,
}

impl ReportLayout {
    pub fn new(report_dir: impl Into<Utf8PathBuf>, date: &str) -> Self {
        Self {
            report_dir: report_dir.into(),
            date: date.to_string(),
        }
    }

    pub fn under_root(output_root: &Utf8Path, period: &str, date: &str) -> Self {
        Self::new(expected_report_dir(output_root, period, date), date)
    }

    pub fn source_file(&self) -> Utf8PathBuf {
        self.report_dir.join(SOURCE_FILE_NAME)
    }

    pub fn markdown_file(&self) -> Utf8PathBuf {
        self.report_dir.join(markdown_file_name(&self.date))
    }

    pub fn html_file(&self) -> Utf8PathBuf {
        self.report_dir.join(html_file_name(&self.date))
    }

    pub fn manifest_file(&self) -> Utf8PathBuf {
        self.report_dir.join(MANIFEST_FILE_NAME)
    }

    /// Source, Markdown, HTML, manifest.
    pub fn files(&self) -> [Utf8PathBuf; 4] {
        [
            self.source_file(),
            self.markdown_file(),
            self.html_file(),
            self.manifest_file(),
        ]
    }
}
