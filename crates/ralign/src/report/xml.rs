use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use super::{AlignmentReport, Field, StationPoint};

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn start(writer: &mut XmlWriter, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
    let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
    writer.write_event(Event::Start(element))?;
    Ok(())
}

fn end(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text_element(writer: &mut XmlWriter, name: &str, value: &str) -> Result<()> {
    start(writer, name, &[])?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    end(writer, name)
}

fn write_point(writer: &mut XmlWriter, point: &StationPoint) -> Result<()> {
    let station = point.station_text();
    let northing = point.northing_text();
    let easting = point.easting_text();
    let elevation = point.elevation_text();

    let mut attributes = vec![("label", point.label.as_str())];
    for (key, value) in [
        ("station", &station),
        ("northing", &northing),
        ("easting", &easting),
        ("elevation", &elevation),
    ] {
        if !value.is_empty() {
            attributes.push((key, value.as_str()));
        }
    }
    let element = BytesStart::new("Point").with_attributes(attributes);
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn write_element(
    writer: &mut XmlWriter,
    number: usize,
    title: &str,
    message: Option<String>,
    points: &[StationPoint],
    fields: &[Field],
) -> Result<()> {
    let number = number.to_string();
    start(writer, "Element", &[("index", number.as_str()), ("type", title)])?;
    if let Some(message) = message {
        text_element(writer, "Message", &message)?;
    }
    for point in points {
        write_point(writer, point)?;
    }
    for field in fields {
        text_element(writer, field.key, &field.value)?;
    }
    end(writer, "Element")
}

/// XML rendering of the alignment report, same content as the text report.
pub fn render_xml(report: &AlignmentReport) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let header = &report.header;
    let id = header.id.to_string();
    start(
        &mut writer,
        "AlignmentReport",
        &[("id", id.as_str()), ("generated", header.generated_at.as_str())],
    )?;

    start(&mut writer, "Header", &[])?;
    if let Some(project) = &header.project {
        text_element(&mut writer, "Project", project)?;
    }
    text_element(&mut writer, "Drawing", &header.drawing)?;
    text_element(&mut writer, "Alignment", &header.alignment)?;
    if let Some(description) = &header.description {
        text_element(&mut writer, "Description", description)?;
    }
    text_element(&mut writer, "Units", header.units.label())?;
    if let Some(prepared_by) = &header.prepared_by {
        text_element(&mut writer, "PreparedBy", prepared_by)?;
    }
    end(&mut writer, "Header")?;

    start(
        &mut writer,
        "HorizontalAlignment",
        &[("name", header.alignment.as_str())],
    )?;
    for row in &report.horizontal {
        write_element(
            &mut writer,
            row.number(),
            &row.title(),
            row.message(),
            &row.points(),
            &row.fields(),
        )?;
    }
    end(&mut writer, "HorizontalAlignment")?;

    if let Some(section) = &report.vertical {
        start(&mut writer, "VerticalAlignment", &[("name", section.profile.as_str())])?;
        for row in &section.rows {
            write_element(
                &mut writer,
                row.number(),
                &row.title(),
                row.message(),
                &row.points(),
                &row.fields(),
            )?;
        }
        end(&mut writer, "VerticalAlignment")?;
    }

    if !report.warnings.is_empty() {
        start(&mut writer, "Warnings", &[])?;
        for warning in &report.warnings {
            text_element(&mut writer, "Warning", warning)?;
        }
        end(&mut writer, "Warnings")?;
    }

    end(&mut writer, "AlignmentReport")?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).context("XML report is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::PointLabel;
    use crate::types::Coordinate;

    fn render_point(point: &StationPoint) -> String {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        write_point(&mut writer, point).expect("write");
        String::from_utf8(writer.into_inner().into_inner()).expect("utf8")
    }

    #[test]
    fn test_point_attributes() {
        let xml = render_point(&StationPoint {
            label: PointLabel::Pi,
            station: Some(1000.0),
            coordinate: Some(Coordinate::new(10.0, 20.0)),
            elevation: None,
        });
        assert_eq!(
            xml,
            r#"<Point label="PI" station="10+00.00" northing="10.0000" easting="20.0000"/>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        text_element(&mut writer, "Description", "Ramp <A> & B").expect("write");
        let xml = String::from_utf8(writer.into_inner().into_inner()).expect("utf8");
        assert_eq!(xml, "<Description>Ramp &lt;A&gt; &amp; B</Description>");
    }
}
