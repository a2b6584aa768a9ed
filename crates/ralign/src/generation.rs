use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{ReportConfig, ReportFormat};
use crate::report::pdf::{write_geotable_pdf, write_report_pdf};
use crate::report::text::render_text;
use crate::report::xlsx::write_geotable_xlsx;
use crate::report::xml::render_xml;
use crate::report::{AlignmentReport, GeoTable};
use crate::source::DrawingSource;

/// Folder name used by batch runs next to the drawing.
pub const BATCH_DIR_NAME: &str = "AlignmentReports";

/// Result of writing one output format.
#[derive(Debug, Clone)]
pub struct FormatOutcome {
    pub format: ReportFormat,
    pub path: PathBuf,
    pub error: Option<String>,
}

impl FormatOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of one alignment in a batch run.
#[derive(Debug, Clone)]
pub struct AlignmentOutcome {
    pub alignment: String,
    pub formats: Vec<FormatOutcome>,
    /// Set when the alignment failed before any format was written.
    pub error: Option<String>,
}

impl AlignmentOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.formats.iter().all(FormatOutcome::is_ok)
    }
}

/// Generate every format in `config` for one alignment.
///
/// The report is computed once and shared by all emitters. A failing format is
/// recorded in its outcome and the remaining formats are still written.
pub fn generate_reports(
    source: &dyn DrawingSource,
    alignment: &str,
    config: &ReportConfig,
) -> Result<Vec<FormatOutcome>> {
    if config.formats.is_empty() {
        bail!("no output formats selected");
    }
    let report = AlignmentReport::build(source, alignment, config)?;
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "create output directory {}",
            config.output_dir.display()
        )
    })?;

    let needs_geotable = config
        .formats
        .iter()
        .any(|f| matches!(f, ReportFormat::GeotablePdf | ReportFormat::GeotableXlsx));
    let geotable = needs_geotable.then(|| GeoTable::from_report(&report));

    let total = config.formats.len();
    let mut outcomes = Vec::with_capacity(total);
    for (index, &format) in config.formats.iter().enumerate() {
        tracing::info!(
            alignment,
            "format {}/{}: {}",
            index + 1,
            total,
            format.label()
        );
        let path = config.output_dir.join(format.file_name(alignment));
        let error = match write_format(&report, geotable.as_ref(), format, &path) {
            Ok(()) => None,
            Err(err) => {
                tracing::error!(?format, "failed to write {}: {err:#}", path.display());
                Some(format!("{err:#}"))
            }
        };
        outcomes.push(FormatOutcome {
            format,
            path,
            error,
        });
    }

    Ok(outcomes)
}

fn write_format(
    report: &AlignmentReport,
    geotable: Option<&GeoTable>,
    format: ReportFormat,
    path: &Path,
) -> Result<()> {
    match format {
        ReportFormat::Txt => {
            fs::write(path, render_text(report)).with_context(|| format!("write {}", path.display()))
        }
        ReportFormat::Xml => {
            let xml = render_xml(report)?;
            fs::write(path, xml).with_context(|| format!("write {}", path.display()))
        }
        ReportFormat::Pdf => write_report_pdf(report, path),
        ReportFormat::GeotablePdf | ReportFormat::GeotableXlsx => {
            let owned;
            let geotable = match geotable {
                Some(geotable) => geotable,
                None => {
                    owned = GeoTable::from_report(report);
                    &owned
                }
            };
            if format == ReportFormat::GeotablePdf {
                write_geotable_pdf(geotable, path)
            } else {
                write_geotable_xlsx(geotable, path)
            }
        }
    }
}

/// Generate reports for every alignment in the drawing.
///
/// Per-alignment failures are recorded and never stop the batch.
pub fn generate_batch(source: &dyn DrawingSource, config: &ReportConfig) -> Vec<AlignmentOutcome> {
    let names = source.alignment_names();
    tracing::info!(alignments = names.len(), "batch run into {}", config.output_dir.display());

    names
        .into_iter()
        .map(|alignment| match generate_reports(source, &alignment, config) {
            Ok(formats) => AlignmentOutcome {
                alignment,
                formats,
                error: None,
            },
            Err(err) => {
                tracing::error!(%alignment, "alignment skipped: {err:#}");
                AlignmentOutcome {
                    alignment,
                    formats: Vec::new(),
                    error: Some(format!("{err:#}")),
                }
            }
        })
        .collect()
}

/// Batch output folder next to a drawing file.
pub fn default_batch_dir(drawing_path: &Path) -> PathBuf {
    drawing_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(BATCH_DIR_NAME)
}

/// Text report for one alignment without touching the filesystem.
pub fn preview_text(
    source: &dyn DrawingSource,
    alignment: &str,
    config: &ReportConfig,
) -> Result<String> {
    let report = AlignmentReport::build(source, alignment, config)?;
    Ok(render_text(&report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_batch_dir() {
        assert_eq!(
            default_batch_dir(Path::new("/data/site.json")),
            PathBuf::from("/data/AlignmentReports")
        );
        assert_eq!(
            default_batch_dir(Path::new("site.json")),
            PathBuf::from("AlignmentReports")
        );
    }

    #[test]
    fn test_outcome_status() {
        let ok = FormatOutcome {
            format: ReportFormat::Txt,
            path: PathBuf::from("a.txt"),
            error: None,
        };
        let failed = FormatOutcome {
            error: Some("disk full".to_string()),
            ..ok.clone()
        };
        let alignment = AlignmentOutcome {
            alignment: "CL".to_string(),
            formats: vec![ok.clone(), failed],
            error: None,
        };
        assert!(ok.is_ok());
        assert!(!alignment.is_ok());
    }
}
