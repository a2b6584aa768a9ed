//! Paginated PDF output in a monospaced font.
//!
//! Both PDF products are line-oriented: the alignment report reuses the text
//! layout and the GeoTable renders its fixed-width tables. Lines are never
//! wrapped; the font shrinks so the longest line fits the page width.

use anyhow::{Context, Result};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::text::render_text_lines;
use super::{AlignmentReport, GeoTable};

const MARGIN_MM: f32 = 12.7;
const MAX_FONT_PT: f32 = 9.0;
const MIN_FONT_PT: f32 = 5.0;
/// Courier advance width as a fraction of the font size.
const COURIER_ADVANCE: f32 = 0.6;
const PT_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageLayout {
    /// US Letter, portrait.
    Portrait,
    /// US Letter, landscape.
    Landscape,
}

impl PageLayout {
    fn size_mm(self) -> (f32, f32) {
        match self {
            PageLayout::Portrait => (215.9, 279.4),
            PageLayout::Landscape => (279.4, 215.9),
        }
    }
}

/// Font size and lines per page for `lines` on `layout`.
fn page_metrics(lines: &[String], layout: PageLayout) -> (f32, usize) {
    let (width, height) = layout.size_mm();
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0).max(1) as f32;
    let usable_width_pt = (width - 2.0 * MARGIN_MM) * PT_PER_MM;
    let font_pt = (usable_width_pt / (longest * COURIER_ADVANCE)).clamp(MIN_FONT_PT, MAX_FONT_PT);
    let line_height_pt = font_pt * 1.2;
    let usable_height_pt = (height - 2.0 * MARGIN_MM) * PT_PER_MM;
    let per_page = ((usable_height_pt / line_height_pt).floor() as usize).max(1);
    (font_pt, per_page)
}

/// Write `lines` to a PDF at `path`, starting a new page whenever one fills up.
pub fn write_lines_pdf(
    title: &str,
    lines: &[String],
    layout: PageLayout,
    path: &Path,
) -> Result<()> {
    let (width, height) = layout.size_mm();
    let (font_pt, per_page) = page_metrics(lines, layout);
    let line_height_mm = font_pt * 1.2 / PT_PER_MM;

    let (doc, first_page, first_layer) = PdfDocument::new(title, Mm(width), Mm(height), "Report");
    let font = doc
        .add_builtin_font(BuiltinFont::Courier)
        .context("load Courier font")?;

    let chunks: Vec<&[String]> = if lines.is_empty() {
        vec![lines]
    } else {
        lines.chunks(per_page).collect()
    };
    tracing::debug!(pages = chunks.len(), font_pt, "writing PDF {}", path.display());

    for (page_index, chunk) in chunks.iter().enumerate() {
        let (page, layer) = if page_index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(width), Mm(height), "Report")
        };
        let layer = doc.get_page(page).get_layer(layer);
        for (i, line) in chunk.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = height - MARGIN_MM - line_height_mm * (i as f32 + 1.0);
            layer.use_text(line.as_str(), font_pt, Mm(MARGIN_MM), Mm(y), &font);
        }
    }

    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .with_context(|| format!("write PDF {}", path.display()))?;
    Ok(())
}

pub fn write_report_pdf(report: &AlignmentReport, path: &Path) -> Result<()> {
    let title = format!("Alignment Report - {}", report.header.alignment);
    write_lines_pdf(&title, &render_text_lines(report), PageLayout::Portrait, path)
}

pub fn write_geotable_pdf(geotable: &GeoTable, path: &Path) -> Result<()> {
    let title = format!("GeoTable - {}", geotable.alignment);
    write_lines_pdf(&title, &geotable.render_lines(), PageLayout::Landscape, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_lines_use_max_font() {
        let lines = vec!["POB 0+00.00".to_string(); 10];
        let (font_pt, per_page) = page_metrics(&lines, PageLayout::Portrait);
        assert_eq!(font_pt, MAX_FONT_PT);
        assert!(per_page > 50);
    }

    #[test]
    fn test_long_lines_shrink_font() {
        let lines = vec!["x".repeat(160)];
        let (portrait, _) = page_metrics(&lines, PageLayout::Portrait);
        let (landscape, _) = page_metrics(&lines, PageLayout::Landscape);
        assert!(portrait < MAX_FONT_PT);
        assert!(landscape > portrait);
        assert!(portrait >= MIN_FONT_PT);
    }
}
