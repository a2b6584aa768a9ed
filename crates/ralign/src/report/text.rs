use super::{AlignmentReport, Field, StationPoint};

const TITLE: &str = "Alignment Review Report";

fn header_line(name: &str, value: &str) -> String {
    format!("{:<14}{value}", format!("{name}:"))
}

fn field_line(field: &Field) -> String {
    format!("    {:<30}{}", format!("{}:", field.name), field.value)
}

fn horizontal_point_line(point: &StationPoint) -> String {
    format!(
        "    {:<5}{:>14}{:>18}{:>18}",
        point.label.as_str(),
        point.station_text(),
        point.northing_text(),
        point.easting_text()
    )
}

fn vertical_point_line(point: &StationPoint) -> String {
    format!(
        "    {:<5}{:>14}{:>18}",
        point.label.as_str(),
        point.station_text(),
        point.elevation_text()
    )
}

fn underline(lines: &mut Vec<String>, title: String) {
    let rule = "-".repeat(title.chars().count());
    lines.push(title);
    lines.push(rule);
}

/// Plain-text alignment report, one entry per output line.
pub fn render_text_lines(report: &AlignmentReport) -> Vec<String> {
    let header = &report.header;
    let mut lines = vec![TITLE.to_string(), "=".repeat(TITLE.len()), String::new()];

    if let Some(project) = &header.project {
        lines.push(header_line("Project", project));
    }
    lines.push(header_line("Drawing", &header.drawing));
    lines.push(header_line("Alignment", &header.alignment));
    if let Some(description) = &header.description {
        lines.push(header_line("Description", description));
    }
    if let Some(section) = &report.vertical {
        lines.push(header_line("Profile", &section.profile));
    }
    lines.push(header_line("Units", header.units.label()));
    lines.push(header_line("Generated", &header.generated_at));
    if let Some(prepared_by) = &header.prepared_by {
        lines.push(header_line("Prepared by", prepared_by));
    }
    lines.push(header_line("Report ID", &header.id.to_string()));
    lines.push(String::new());

    underline(&mut lines, "Horizontal Alignment".to_string());
    lines.push(format!(
        "    {:<5}{:>14}{:>18}{:>18}",
        "", "Station", "Northing", "Easting"
    ));
    for row in &report.horizontal {
        lines.push(String::new());
        lines.push(format!("Element {}: {}", row.number(), row.title()));
        if let Some(message) = row.message() {
            lines.push(format!("    {message}"));
        }
        lines.extend(row.points().iter().map(horizontal_point_line));
        lines.extend(row.fields().iter().map(field_line));
    }

    if let Some(section) = &report.vertical {
        lines.push(String::new());
        underline(&mut lines, format!("Vertical Alignment: {}", section.profile));
        lines.push(format!("    {:<5}{:>14}{:>18}", "", "Station", "Elevation"));
        for row in &section.rows {
            lines.push(String::new());
            lines.push(format!("Element {}: {}", row.number(), row.title()));
            if let Some(message) = row.message() {
                lines.push(format!("    {message}"));
            }
            lines.extend(row.points().iter().map(vertical_point_line));
            lines.extend(row.fields().iter().map(field_line));
        }
    }

    if !report.warnings.is_empty() {
        lines.push(String::new());
        underline(&mut lines, "Warnings".to_string());
        lines.extend(report.warnings.iter().map(|w| format!("    {w}")));
    }

    lines
}

pub fn render_text(report: &AlignmentReport) -> String {
    let mut text = render_text_lines(report).join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::PointLabel;
    use crate::types::Coordinate;

    #[test]
    fn test_point_line_columns() {
        let point = StationPoint {
            label: PointLabel::Pc,
            station: Some(1234.56),
            coordinate: Some(Coordinate::new(5000.0, 2000.123456)),
            elevation: None,
        };
        let line = horizontal_point_line(&point);
        assert!(line.starts_with("    PC "));
        assert!(line.contains("12+34.56"));
        assert!(line.ends_with("2000.1235"));
    }

    #[test]
    fn test_center_point_has_no_station() {
        let point = StationPoint {
            label: PointLabel::Cc,
            station: None,
            coordinate: Some(Coordinate::new(1.0, 2.0)),
            elevation: None,
        };
        assert!(!horizontal_point_line(&point).contains('+'));
    }

    #[test]
    fn test_field_line() {
        let field = Field {
            key: "Radius",
            name: "Radius",
            value: "500.0000".to_string(),
        };
        assert_eq!(
            field_line(&field),
            format!("    {:<30}500.0000", "Radius:")
        );
    }
}
