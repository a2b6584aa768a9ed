use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::preferences::Preferences;

/// One output file kind.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Alignment report as plain text.
    Txt,
    /// Alignment report as XML.
    Xml,
    /// Alignment report as PDF.
    Pdf,
    /// GeoTable as PDF.
    GeotablePdf,
    /// GeoTable as an Excel workbook.
    GeotableXlsx,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 5] = [
        ReportFormat::Txt,
        ReportFormat::Xml,
        ReportFormat::Pdf,
        ReportFormat::GeotablePdf,
        ReportFormat::GeotableXlsx,
    ];

    /// Output file name for an alignment, e.g. `CL_Alignment_Report.txt`.
    pub fn file_name(self, alignment: &str) -> String {
        let stem = sanitize_file_stem(alignment);
        match self {
            ReportFormat::Txt => format!("{stem}_Alignment_Report.txt"),
            ReportFormat::Xml => format!("{stem}_Alignment_Report.xml"),
            ReportFormat::Pdf => format!("{stem}_Alignment_Report.pdf"),
            ReportFormat::GeotablePdf => format!("{stem}_GeoTable.pdf"),
            ReportFormat::GeotableXlsx => format!("{stem}_GeoTable.xlsx"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportFormat::Txt => "Alignment Report (TXT)",
            ReportFormat::Xml => "Alignment Report (XML)",
            ReportFormat::Pdf => "Alignment Report (PDF)",
            ReportFormat::GeotablePdf => "GeoTable (PDF)",
            ReportFormat::GeotableXlsx => "GeoTable (XLSX)",
        }
    }
}

/// Replace characters that are unsafe in file names.
pub fn sanitize_file_stem(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "Alignment".to_string()
    } else {
        cleaned
    }
}

/// Everything one report pass needs. Built once, never mutated by generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Sorted, without duplicates.
    pub formats: Vec<ReportFormat>,
    pub output_dir: PathBuf,
    pub include_vertical: bool,
    /// Profile to report; the alignment's first profile when `None`.
    pub profile: Option<String>,
    pub project_name: Option<String>,
    pub prepared_by: Option<String>,
}

impl ReportConfig {
    /// All formats, vertical section included.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            formats: ReportFormat::ALL.to_vec(),
            output_dir: output_dir.into(),
            include_vertical: true,
            profile: None,
            project_name: None,
            prepared_by: None,
        }
    }

    /// Seed a config from stored preferences.
    pub fn from_preferences(preferences: &Preferences, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            formats: Vec::new(),
            output_dir: output_dir.into(),
            include_vertical: preferences.include_vertical,
            profile: None,
            project_name: preferences.project_name.clone(),
            prepared_by: preferences.prepared_by.clone(),
        }
        .with_formats(preferences.formats.iter().copied())
    }

    pub fn with_formats(mut self, formats: impl IntoIterator<Item = ReportFormat>) -> Self {
        let mut formats: Vec<ReportFormat> = formats.into_iter().collect();
        formats.sort();
        formats.dedup();
        self.formats = formats;
        self
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_vertical(mut self, include_vertical: bool) -> Self {
        self.include_vertical = include_vertical;
        self
    }
}
