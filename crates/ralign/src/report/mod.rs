use anyhow::{anyhow, Result};
use serde::Serialize;
use ulid::Ulid;

pub mod geotable;
pub mod pdf;
pub mod text;
pub mod xlsx;
pub mod xml;

pub use geotable::{Cell, GeoTable, Table};

use crate::config::ReportConfig;
use crate::error::GeometryError;
use crate::format::{
    format_angle, format_bearing, format_distance, format_dms, format_grade, round_half_away,
};
use crate::geometry::{
    azimuth_between, is_infinite_radius, CircularCurve, CurvePoints, PointSource,
    SpiralGeometry, SpiralPoints, SpiralRole, VerticalCurveGeometry, VerticalCurveKind,
};
use crate::labels::{
    label_horizontal, label_vertical, spiral_role, ElementLabels, PointLabel, VerticalLabels,
};
use crate::source::{DrawingSource, HostCapabilities};
use crate::station::Station;
use crate::types::{
    Alignment, ArcElement, Coordinate, HorizontalElement, LineElement, LinearUnit, Profile,
    SpiralElement, SpiralType, TurnDirection, VerticalCurve, VerticalElement, VerticalTangent,
};

/// Largest station mismatch between consecutive elements that still counts as contiguous.
pub const STATION_TOLERANCE: f64 = 0.001;

/// A labeled point on a report row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationPoint {
    pub label: PointLabel,
    pub station: Option<f64>,
    pub coordinate: Option<Coordinate>,
    pub elevation: Option<f64>,
}

impl StationPoint {
    fn horizontal(label: PointLabel, station: f64, coordinate: Coordinate) -> Self {
        Self {
            label,
            station: Some(station),
            coordinate: Some(coordinate),
            elevation: None,
        }
    }

    fn vertical(label: PointLabel, station: f64, elevation: f64) -> Self {
        Self {
            label,
            station: Some(station),
            coordinate: None,
            elevation: Some(elevation),
        }
    }

    pub fn station_text(&self) -> String {
        self.station
            .map(|s| Station::new(s).to_string())
            .unwrap_or_default()
    }

    pub fn northing_text(&self) -> String {
        self.coordinate
            .map(|c| format_distance(c.northing))
            .unwrap_or_default()
    }

    pub fn easting_text(&self) -> String {
        self.coordinate
            .map(|c| format_distance(c.easting))
            .unwrap_or_default()
    }

    pub fn elevation_text(&self) -> String {
        self.elevation.map(format_distance).unwrap_or_default()
    }
}

/// A named value in a report block. `key` is the XML element name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub key: &'static str,
    pub name: &'static str,
    pub value: String,
}

fn field(key: &'static str, name: &'static str, value: impl Into<String>) -> Field {
    Field {
        key,
        name,
        value: value.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRow {
    pub index: usize,
    pub start: StationPoint,
    pub end: StationPoint,
    pub azimuth: f64,
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveRow {
    pub index: usize,
    pub pc: StationPoint,
    pub pi: StationPoint,
    pub cc: StationPoint,
    pub pt: StationPoint,
    pub turn: TurnDirection,
    pub curve: CircularCurve,
    pub points: CurvePoints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpiralRow {
    pub index: usize,
    pub start: StationPoint,
    pub spi: StationPoint,
    pub end: StationPoint,
    pub role: SpiralRole,
    pub turn: TurnDirection,
    pub radius_in: f64,
    pub radius_out: f64,
    pub geometry: SpiralGeometry,
    pub points: SpiralPoints,
}

/// One block of the horizontal section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HorizontalRow {
    Line(LineRow),
    Curve(CurveRow),
    Spiral(SpiralRow),
    Unsupported {
        index: usize,
        reason: String,
        start: Option<StationPoint>,
        end: Option<StationPoint>,
    },
    Error {
        index: usize,
        message: String,
    },
}

impl HorizontalRow {
    /// One-based element number shown in reports.
    pub fn number(&self) -> usize {
        let index = match self {
            HorizontalRow::Line(row) => row.index,
            HorizontalRow::Curve(row) => row.index,
            HorizontalRow::Spiral(row) => row.index,
            HorizontalRow::Unsupported { index, .. } | HorizontalRow::Error { index, .. } => {
                *index
            }
        };
        index + 1
    }

    pub fn title(&self) -> String {
        match self {
            HorizontalRow::Line(_) => "Linear".to_string(),
            HorizontalRow::Curve(_) => "Circular".to_string(),
            HorizontalRow::Spiral(row) => format!("Clothoid ({})", row.role.label()),
            HorizontalRow::Unsupported { .. } => "Unsupported".to_string(),
            HorizontalRow::Error { .. } => "Error".to_string(),
        }
    }

    pub fn points(&self) -> Vec<StationPoint> {
        match self {
            HorizontalRow::Line(row) => vec![row.start, row.end],
            HorizontalRow::Curve(row) => vec![row.pc, row.pi, row.cc, row.pt],
            HorizontalRow::Spiral(row) => vec![row.start, row.spi, row.end],
            HorizontalRow::Unsupported { start, end, .. } => {
                start.iter().chain(end.iter()).copied().collect()
            }
            HorizontalRow::Error { .. } => Vec::new(),
        }
    }

    /// Inline message for rows that could not be reported normally.
    pub fn message(&self) -> Option<String> {
        match self {
            HorizontalRow::Unsupported { reason, .. } => Some(reason.clone()),
            HorizontalRow::Error { index, message } => Some(error_line(*index, message)),
            _ => None,
        }
    }

    pub fn fields(&self) -> Vec<Field> {
        match self {
            HorizontalRow::Line(row) => vec![
                field("TangentDirection", "Tangent Direction", format_bearing(row.azimuth)),
                field("TangentLength", "Tangent Length", format_distance(row.length)),
            ],
            HorizontalRow::Curve(row) => {
                let c = &row.curve;
                let p = &row.points;
                vec![
                    field("Radius", "Radius", format_distance(c.radius)),
                    field(
                        "Delta",
                        "Delta",
                        format!("{} {}", format_angle(c.delta), row.turn.side()),
                    ),
                    field("DegreeOfCurvature", "Degree of Curvature (Arc)", format_dms(c.degree)),
                    field("Length", "Length", format_distance(c.length)),
                    field("Tangent", "Tangent", format_distance(c.tangent)),
                    field("Chord", "Chord", format_distance(c.chord)),
                    field("MiddleOrdinate", "Middle Ordinate", format_distance(c.middle_ordinate)),
                    field("External", "External", format_distance(c.external)),
                    field("BackTangentDirection", "Tangent Direction (Back)", format_bearing(p.back_azimuth)),
                    field("RadialDirectionIn", "Radial Direction (In)", format_bearing(p.radial_in_azimuth)),
                    field("ChordDirection", "Chord Direction", format_bearing(p.chord_azimuth)),
                    field("RadialDirectionOut", "Radial Direction (Out)", format_bearing(p.radial_out_azimuth)),
                    field("AheadTangentDirection", "Tangent Direction (Ahead)", format_bearing(p.ahead_azimuth)),
                    field("PointSource", "PI/CC Source", source_text(p.pi_source, p.center_source)),
                ]
            }
            HorizontalRow::Spiral(row) => {
                let g = &row.geometry;
                let p = &row.points;
                vec![
                    field("Type", "Type", row.role.label()),
                    field("EntranceRadius", "Entrance Radius", format_distance(display_radius(row.radius_in))),
                    field("ExitRadius", "Exit Radius", format_distance(display_radius(row.radius_out))),
                    field("Length", "Length", format_distance(g.length)),
                    field("Angle", "Angle", format!("{} {}", format_angle(g.theta), row.turn.side())),
                    field("Constant", "Constant (A)", format_distance(g.parameter_a)),
                    field("Xs", "Xs", format_distance(g.xs)),
                    field("Ys", "Ys", format_distance(g.ys)),
                    field("P", "P", format_distance(g.p)),
                    field("K", "K", format_distance(g.k)),
                    field("LongTangent", "Long Tangent", format_distance(g.long_tangent)),
                    field("ShortTangent", "Short Tangent", format_distance(g.short_tangent)),
                    field("LongChord", "Long Chord", format_distance(g.long_chord)),
                    field("StartTangentDirection", "Tangent Direction (Start)", format_bearing(p.start_azimuth)),
                    field("ChordDirection", "Chord Direction", format_bearing(p.chord_azimuth)),
                    field("EndTangentDirection", "Tangent Direction (End)", format_bearing(p.end_azimuth)),
                    field("PointSource", "SPI Source", source_text(p.spi_source, p.spi_source)),
                ]
            }
            HorizontalRow::Unsupported { .. } | HorizontalRow::Error { .. } => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TangentRow {
    pub index: usize,
    pub start: StationPoint,
    pub end: StationPoint,
    /// Grade as a fraction.
    pub grade: f64,
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalCurveRow {
    pub index: usize,
    pub pvc: StationPoint,
    pub pvi: StationPoint,
    pub pvt: StationPoint,
    pub geometry: VerticalCurveGeometry,
}

/// One block of the vertical section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum VerticalRow {
    Tangent(TangentRow),
    Curve(VerticalCurveRow),
    Unsupported { index: usize },
    Error { index: usize, message: String },
}

impl VerticalRow {
    pub fn number(&self) -> usize {
        let index = match self {
            VerticalRow::Tangent(row) => row.index,
            VerticalRow::Curve(row) => row.index,
            VerticalRow::Unsupported { index } | VerticalRow::Error { index, .. } => *index,
        };
        index + 1
    }

    pub fn title(&self) -> String {
        match self {
            VerticalRow::Tangent(_) => "Linear".to_string(),
            VerticalRow::Curve(row) => format!("Parabola ({})", row.geometry.kind.label()),
            VerticalRow::Unsupported { .. } => "Unsupported".to_string(),
            VerticalRow::Error { .. } => "Error".to_string(),
        }
    }

    pub fn points(&self) -> Vec<StationPoint> {
        match self {
            VerticalRow::Tangent(row) => vec![row.start, row.end],
            VerticalRow::Curve(row) => vec![row.pvc, row.pvi, row.pvt],
            VerticalRow::Unsupported { .. } | VerticalRow::Error { .. } => Vec::new(),
        }
    }

    pub fn message(&self) -> Option<String> {
        match self {
            VerticalRow::Unsupported { .. } => Some("unsupported profile entity".to_string()),
            VerticalRow::Error { index, message } => Some(error_line(*index, message)),
            _ => None,
        }
    }

    pub fn fields(&self) -> Vec<Field> {
        match self {
            VerticalRow::Tangent(row) => vec![
                field("TangentGrade", "Tangent Grade", format_grade(row.grade)),
                field("TangentLength", "Tangent Length", format_distance(row.length)),
            ],
            VerticalRow::Curve(row) => {
                let g = &row.geometry;
                let mut fields = vec![
                    field("Length", "Length", format_distance(g.length)),
                    field("EntranceGrade", "Entrance Grade", format_grade(g.grade_in / 100.0)),
                    field("ExitGrade", "Exit Grade", format_grade(g.grade_out / 100.0)),
                    field(
                        "RateOfChange",
                        "r = (g2 - g1) / L",
                        format!("{:.6}", round_half_away(g.rate_of_change, 6) + 0.0),
                    ),
                    field("KValue", "K = L / (g2 - g1)", format_distance(g.k_value)),
                    field("MiddleOrdinate", "Middle Ordinate", format_distance(g.middle_ordinate)),
                ];
                if let Some((station, elevation)) = g.turning_point {
                    let name = match g.kind {
                        VerticalCurveKind::Sag => "Low Point",
                        _ => "High Point",
                    };
                    fields.push(field(
                        "TurningPoint",
                        name,
                        format!("{} {}", Station::new(station), format_distance(elevation)),
                    ));
                }
                let sight_name = match g.kind {
                    VerticalCurveKind::Sag => "Headlight Sight Distance",
                    _ => "Stopping Sight Distance",
                };
                fields.push(field(
                    "SightDistance",
                    sight_name,
                    g.sight_distance
                        .map(format_distance)
                        .unwrap_or_else(|| "Unrestricted".to_string()),
                ));
                fields
            }
            VerticalRow::Unsupported { .. } | VerticalRow::Error { .. } => Vec::new(),
        }
    }
}

/// Vertical section for one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalSection {
    pub profile: String,
    pub rows: Vec<VerticalRow>,
}

/// Header block shared by every output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportHeader {
    pub id: Ulid,
    pub project: Option<String>,
    pub drawing: String,
    pub alignment: String,
    pub description: Option<String>,
    pub units: LinearUnit,
    pub generated_at: String,
    pub prepared_by: Option<String>,
}

/// Everything an emitter needs for one alignment; computed once per invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignmentReport {
    pub header: ReportHeader,
    pub horizontal: Vec<HorizontalRow>,
    pub vertical: Option<VerticalSection>,
    pub warnings: Vec<String>,
}

impl AlignmentReport {
    /// Build the report for `alignment_name` from `source`.
    ///
    /// Fails only when the alignment or an explicitly requested profile is missing.
    /// Element-level problems become error rows.
    pub fn build(
        source: &dyn DrawingSource,
        alignment_name: &str,
        config: &ReportConfig,
    ) -> Result<Self> {
        let alignment = source.alignment(alignment_name)?;
        let capabilities = source.capabilities();
        let units = source.units();

        let profile = select_profile(alignment, config)?;
        let mut warnings = contiguity_warnings(&alignment.elements);

        let horizontal = build_horizontal_rows(&alignment.elements, capabilities);
        let vertical = match profile {
            Some(profile) => {
                warnings.extend(vertical_contiguity_warnings(&profile.elements));
                Some(VerticalSection {
                    profile: profile.name.clone(),
                    rows: build_vertical_rows(&profile.elements, units),
                })
            }
            None => {
                if config.include_vertical {
                    warnings.push(format!(
                        "alignment '{}' has no profile; vertical section omitted",
                        alignment.name
                    ));
                }
                None
            }
        };

        let error_count = horizontal
            .iter()
            .filter(|row| matches!(row, HorizontalRow::Error { .. }))
            .count();
        tracing::info!(
            alignment = %alignment.name,
            elements = horizontal.len(),
            errors = error_count,
            warnings = warnings.len(),
            "built alignment report"
        );

        Ok(Self {
            header: ReportHeader {
                id: Ulid::new(),
                project: config.project_name.clone(),
                drawing: source.drawing_name(),
                alignment: alignment.name.clone(),
                description: alignment.description.clone(),
                units,
                generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                prepared_by: config.prepared_by.clone(),
            },
            horizontal,
            vertical,
            warnings,
        })
    }

    pub fn curves(&self) -> impl Iterator<Item = &CurveRow> {
        self.horizontal.iter().filter_map(|row| match row {
            HorizontalRow::Curve(curve) => Some(curve),
            _ => None,
        })
    }

    pub fn spirals(&self) -> impl Iterator<Item = &SpiralRow> {
        self.horizontal.iter().filter_map(|row| match row {
            HorizontalRow::Spiral(spiral) => Some(spiral),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineRow> {
        self.horizontal.iter().filter_map(|row| match row {
            HorizontalRow::Line(line) => Some(line),
            _ => None,
        })
    }
}

/// Text of an inline error row.
pub fn error_line(index: usize, message: &str) -> String {
    format!("Error processing entity {}: {message}", index + 1)
}

fn select_profile<'a>(alignment: &'a Alignment, config: &ReportConfig) -> Result<Option<&'a Profile>> {
    if !config.include_vertical {
        return Ok(None);
    }
    match &config.profile {
        Some(name) => alignment
            .profile(name)
            .map(Some)
            .ok_or_else(|| anyhow!("profile '{name}' not found on alignment '{}'", alignment.name)),
        None => Ok(alignment.profiles.first()),
    }
}

/// Report rows for every horizontal element; errors never stop the pass.
pub fn build_horizontal_rows(
    elements: &[HorizontalElement],
    capabilities: HostCapabilities,
) -> Vec<HorizontalRow> {
    let labels = label_horizontal(elements);
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            match horizontal_row(elements, index, element, labels[index], capabilities) {
                Ok(row) => row,
                Err(err) => {
                    tracing::warn!(index, error = %err, "horizontal element skipped");
                    HorizontalRow::Error {
                        index,
                        message: err.to_string(),
                    }
                }
            }
        })
        .collect()
}

fn horizontal_row(
    elements: &[HorizontalElement],
    index: usize,
    element: &HorizontalElement,
    labels: ElementLabels,
    capabilities: HostCapabilities,
) -> Result<HorizontalRow, GeometryError> {
    match element {
        HorizontalElement::Line(line) => line_row(index, line, labels).map(HorizontalRow::Line),
        HorizontalElement::Arc(arc) => {
            curve_row(index, arc, labels, capabilities).map(HorizontalRow::Curve)
        }
        HorizontalElement::Spiral(spiral) if spiral.spiral_type != SpiralType::Clothoid => {
            Ok(HorizontalRow::Unsupported {
                index,
                reason: format!("unsupported spiral type {:?}", spiral.spiral_type),
                start: Some(StationPoint::horizontal(labels.start, spiral.start_station, spiral.start)),
                end: Some(StationPoint::horizontal(labels.end, spiral.end_station, spiral.end)),
            })
        }
        HorizontalElement::Spiral(spiral) => {
            let role = spiral_role(elements, index).unwrap_or(SpiralRole::from_radii(
                spiral.radius_in,
                spiral.radius_out,
            ));
            spiral_row(index, spiral, role, labels, capabilities).map(HorizontalRow::Spiral)
        }
        HorizontalElement::Unsupported => Ok(HorizontalRow::Unsupported {
            index,
            reason: "unsupported alignment entity".to_string(),
            start: None,
            end: None,
        }),
    }
}

fn check_finite(values: &[f64], what: &'static str) -> Result<(), GeometryError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(GeometryError::NonFinite(what))
    }
}

fn line_row(index: usize, line: &LineElement, labels: ElementLabels) -> Result<LineRow, GeometryError> {
    check_finite(&[line.start_station, line.end_station], "station")?;
    check_finite(
        &[line.start.northing, line.start.easting, line.end.northing, line.end.easting],
        "coordinate",
    )?;
    let start = line.start.to_point();
    let end = line.end.to_point();
    let azimuth = match line.direction {
        Some(direction) => crate::format::normalize_azimuth(direction),
        None if (end - start).hypot() > 1e-9 => azimuth_between(start, end),
        None => return Err(GeometryError::Degenerate("line")),
    };
    Ok(LineRow {
        index,
        start: StationPoint::horizontal(labels.start, line.start_station, line.start),
        end: StationPoint::horizontal(labels.end, line.end_station, line.end),
        azimuth,
        length: line.end_station - line.start_station,
    })
}

fn curve_row(
    index: usize,
    arc: &ArcElement,
    labels: ElementLabels,
    capabilities: HostCapabilities,
) -> Result<CurveRow, GeometryError> {
    check_finite(&[arc.start_station, arc.end_station], "station")?;
    let curve = CircularCurve::new(arc.radius, arc.length)?;
    let points = CurvePoints::locate(arc, &curve, capabilities.sub_entities)?;
    Ok(CurveRow {
        index,
        pc: StationPoint::horizontal(labels.start, arc.start_station, arc.start),
        pi: StationPoint::horizontal(PointLabel::Pi, arc.start_station + curve.tangent, points.pi),
        cc: StationPoint {
            label: PointLabel::Cc,
            station: None,
            coordinate: Some(points.center),
            elevation: None,
        },
        pt: StationPoint::horizontal(labels.end, arc.end_station, arc.end),
        turn: arc.turn,
        curve,
        points,
    })
}

fn spiral_row(
    index: usize,
    spiral: &SpiralElement,
    role: SpiralRole,
    labels: ElementLabels,
    capabilities: HostCapabilities,
) -> Result<SpiralRow, GeometryError> {
    check_finite(&[spiral.start_station, spiral.end_station], "station")?;
    if is_infinite_radius(spiral.radius_in) && is_infinite_radius(spiral.radius_out) {
        return Err(GeometryError::SpiralWithoutRadius);
    }
    let radius = role.effective_radius(spiral.radius_in, spiral.radius_out);
    let geometry = SpiralGeometry::clothoid(spiral.length, radius)?;
    let points = SpiralPoints::locate(spiral, &geometry, role, capabilities.sub_entities)?;
    let spi_station = match role {
        SpiralRole::Entry => spiral.start_station + geometry.long_tangent,
        SpiralRole::Exit => spiral.end_station - geometry.long_tangent,
    };
    Ok(SpiralRow {
        index,
        start: StationPoint::horizontal(labels.start, spiral.start_station, spiral.start),
        spi: StationPoint::horizontal(PointLabel::Spi, spi_station, points.spi),
        end: StationPoint::horizontal(labels.end, spiral.end_station, spiral.end),
        role,
        turn: spiral.turn,
        radius_in: spiral.radius_in,
        radius_out: spiral.radius_out,
        geometry,
        points,
    })
}

/// Report rows for every profile element.
pub fn build_vertical_rows(elements: &[VerticalElement], units: LinearUnit) -> Vec<VerticalRow> {
    let labels = label_vertical(elements);
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let row = match element {
                VerticalElement::Tangent(tangent) => {
                    tangent_row(index, tangent, labels[index].start, labels[index].end)
                }
                VerticalElement::Circular(curve) => {
                    vertical_curve_row(index, curve, labels[index], units)
                }
                VerticalElement::Unsupported => Ok(VerticalRow::Unsupported { index }),
            };
            row.unwrap_or_else(|err| {
                tracing::warn!(index, error = %err, "profile element skipped");
                VerticalRow::Error {
                    index,
                    message: err.to_string(),
                }
            })
        })
        .collect()
}

fn tangent_row(
    index: usize,
    tangent: &VerticalTangent,
    start_label: PointLabel,
    end_label: PointLabel,
) -> Result<VerticalRow, GeometryError> {
    check_finite(
        &[
            tangent.start_station,
            tangent.end_station,
            tangent.start_elevation,
            tangent.end_elevation,
        ],
        "profile value",
    )?;
    let length = tangent.length();
    if length < 0.0 {
        return Err(GeometryError::InvalidLength(length));
    }
    Ok(VerticalRow::Tangent(TangentRow {
        index,
        start: StationPoint::vertical(start_label, tangent.start_station, tangent.start_elevation),
        end: StationPoint::vertical(end_label, tangent.end_station, tangent.end_elevation),
        grade: tangent.effective_grade(),
        length,
    }))
}

fn vertical_curve_row(
    index: usize,
    curve: &VerticalCurve,
    labels: VerticalLabels,
    units: LinearUnit,
) -> Result<VerticalRow, GeometryError> {
    check_finite(&[curve.start_elevation, curve.end_elevation], "elevation")?;
    let geometry = VerticalCurveGeometry::new(curve, units)?;
    let vertex = labels.vertex.unwrap_or(PointLabel::Pvi);
    Ok(VerticalRow::Curve(VerticalCurveRow {
        index,
        pvc: StationPoint::vertical(labels.start, curve.start_station, curve.start_elevation),
        pvi: StationPoint::vertical(vertex, geometry.pvi_station, geometry.pvi_elevation),
        pvt: StationPoint::vertical(labels.end, curve.end_station, curve.end_elevation),
        geometry,
    }))
}

fn contiguity_warnings(elements: &[HorizontalElement]) -> Vec<String> {
    let stations: Vec<(usize, (f64, f64))> = elements
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.stations().map(|s| (i, s)))
        .collect();
    station_warnings(&stations)
}

fn vertical_contiguity_warnings(elements: &[VerticalElement]) -> Vec<String> {
    let stations: Vec<(usize, (f64, f64))> = elements
        .iter()
        .enumerate()
        .filter_map(|(i, e)| match e {
            VerticalElement::Tangent(t) => Some((i, (t.start_station, t.end_station))),
            VerticalElement::Circular(c) => Some((i, (c.start_station, c.end_station))),
            VerticalElement::Unsupported => None,
        })
        .collect();
    station_warnings(&stations)
        .into_iter()
        .map(|w| format!("profile: {w}"))
        .collect()
}

fn station_warnings(stations: &[(usize, (f64, f64))]) -> Vec<String> {
    let mut warnings = Vec::new();
    for &(index, (start, end)) in stations {
        if end < start {
            warnings.push(format!(
                "entity {} runs backwards ({} to {})",
                index + 1,
                Station::new(start),
                Station::new(end)
            ));
        }
    }
    for pair in stations.windows(2) {
        let (a, (_, a_end)) = pair[0];
        let (b, (b_start, _)) = pair[1];
        if (b_start - a_end).abs() > STATION_TOLERANCE {
            warnings.push(format!(
                "entities {} and {} are not contiguous ({} vs {})",
                a + 1,
                b + 1,
                Station::new(a_end),
                Station::new(b_start)
            ));
        }
    }
    warnings
}

fn display_radius(radius: f64) -> f64 {
    if is_infinite_radius(radius) {
        f64::INFINITY
    } else {
        radius.abs()
    }
}

fn source_text(a: PointSource, b: PointSource) -> &'static str {
    match (a, b) {
        (PointSource::Host, PointSource::Host) => "Host",
        (PointSource::Computed, PointSource::Computed) => "Computed",
        _ => "Mixed",
    }
}
