use serde::Serialize;

use super::{AlignmentReport, CurveRow, LineRow, SpiralRow};
use crate::format::{format_angle, format_bearing, format_distance};
use crate::geometry::is_infinite_radius;
use crate::station::Station;

/// A GeoTable cell. Numbers stay numeric so spreadsheets can compute with them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Number cell, or the text `Infinite` for a non-finite value.
    fn number(value: f64) -> Self {
        if value.is_finite() {
            Cell::Number(value)
        } else {
            Cell::text("Infinite")
        }
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(value) => format_distance(*value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub title: &'static str,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Width of each column in characters, header included.
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.display().chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Fixed-width text rendering used by the PDF emitter.
    pub fn render_lines(&self) -> Vec<String> {
        let widths = self.column_widths();
        let join = |cells: Vec<String>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:>width$}"))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut lines = vec![self.title.to_string()];
        let header = join(self.columns.iter().map(|c| c.to_string()).collect());
        let rule = "-".repeat(header.chars().count());
        lines.push(header);
        lines.push(rule);
        if self.rows.is_empty() {
            lines.push("(none)".to_string());
        }
        for row in &self.rows {
            lines.push(join(row.iter().map(Cell::display).collect()));
        }
        lines
    }
}

/// Line, curve and spiral tables for plan sheets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoTable {
    pub alignment: String,
    pub tables: Vec<Table>,
}

impl GeoTable {
    pub fn from_report(report: &AlignmentReport) -> Self {
        Self {
            alignment: report.header.alignment.clone(),
            tables: vec![
                line_table(report.lines()),
                curve_table(report.curves()),
                spiral_table(report.spirals()),
            ],
        }
    }

    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("GeoTable: {}", self.alignment), String::new()];
        for table in &self.tables {
            lines.extend(table.render_lines());
            lines.push(String::new());
        }
        lines
    }
}

fn station(value: Option<f64>) -> Cell {
    Cell::text(value.map(|v| Station::new(v).to_string()).unwrap_or_default())
}

fn line_table<'a>(rows: impl Iterator<Item = &'a LineRow>) -> Table {
    Table {
        title: "Line Table",
        columns: vec!["Line #", "Start Station", "End Station", "Length", "Bearing"],
        rows: rows
            .enumerate()
            .map(|(i, row)| {
                vec![
                    Cell::text(format!("L{}", i + 1)),
                    station(row.start.station),
                    station(row.end.station),
                    Cell::number(row.length),
                    Cell::text(format_bearing(row.azimuth)),
                ]
            })
            .collect(),
    }
}

fn curve_table<'a>(rows: impl Iterator<Item = &'a CurveRow>) -> Table {
    Table {
        title: "Curve Table",
        columns: vec![
            "Curve #",
            "PC Station",
            "PT Station",
            "Radius",
            "Delta",
            "Length",
            "Tangent",
            "Chord",
            "Chord Bearing",
        ],
        rows: rows
            .enumerate()
            .map(|(i, row)| {
                vec![
                    Cell::text(format!("C{}", i + 1)),
                    station(row.pc.station),
                    station(row.pt.station),
                    Cell::number(row.curve.radius),
                    Cell::text(format!(
                        "{} {}",
                        format_angle(row.curve.delta),
                        row.turn.side()
                    )),
                    Cell::number(row.curve.length),
                    Cell::number(row.curve.tangent),
                    Cell::number(row.curve.chord),
                    Cell::text(format_bearing(row.points.chord_azimuth)),
                ]
            })
            .collect(),
    }
}

fn spiral_table<'a>(rows: impl Iterator<Item = &'a SpiralRow>) -> Table {
    Table {
        title: "Spiral Table",
        columns: vec![
            "Spiral #",
            "Start Station",
            "End Station",
            "Type",
            "Length",
            "Radius",
            "Theta",
            "A",
            "Xs",
            "Ys",
            "P",
            "K",
            "LT",
            "ST",
            "LC",
            "Chord Bearing",
        ],
        rows: rows
            .enumerate()
            .map(|(i, row)| {
                let radius = if is_infinite_radius(row.geometry.radius) {
                    f64::INFINITY
                } else {
                    row.geometry.radius
                };
                vec![
                    Cell::text(format!("S{}", i + 1)),
                    station(row.start.station),
                    station(row.end.station),
                    Cell::text(row.role.label()),
                    Cell::number(row.geometry.length),
                    Cell::number(radius),
                    Cell::text(format_angle(row.geometry.theta)),
                    Cell::number(row.geometry.parameter_a),
                    Cell::number(row.geometry.xs),
                    Cell::number(row.geometry.ys),
                    Cell::number(row.geometry.p),
                    Cell::number(row.geometry.k),
                    Cell::number(row.geometry.long_tangent),
                    Cell::number(row.geometry.short_tangent),
                    Cell::number(row.geometry.long_chord),
                    Cell::text(format_bearing(row.points.chord_azimuth)),
                ]
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::number(12.345678).display(), "12.3457");
        assert_eq!(Cell::number(f64::INFINITY), Cell::Text("Infinite".to_string()));
    }

    #[test]
    fn test_render_empty_table() {
        let table = Table {
            title: "Curve Table",
            columns: vec!["Curve #", "Radius"],
            rows: Vec::new(),
        };
        let lines = table.render_lines();
        assert_eq!(lines[0], "Curve Table");
        assert_eq!(lines[1], "Curve #  Radius");
        assert_eq!(lines[3], "(none)");
    }

    #[test]
    fn test_column_widths_follow_longest_cell() {
        let table = Table {
            title: "Line Table",
            columns: vec!["Line #", "Length"],
            rows: vec![vec![Cell::text("L1"), Cell::Number(12345.5)]],
        };
        assert_eq!(table.column_widths(), vec![6, 10]);
        assert_eq!(table.render_lines()[3], "    L1  12345.5000");
    }
}
