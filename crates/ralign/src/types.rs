use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::source::HostApiVersion;

/// A grid coordinate as the host reports it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub northing: f64,
    pub easting: f64,
}

impl Coordinate {
    pub fn new(northing: f64, easting: f64) -> Self {
        Self { northing, easting }
    }

    /// Planar point with x = easting, y = northing.
    pub fn to_point(self) -> Point {
        Point::new(self.easting, self.northing)
    }

    pub fn from_point(point: Point) -> Self {
        Self {
            northing: point.y,
            easting: point.x,
        }
    }
}

/// Direction a curve or spiral turns while walking up-station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    Clockwise,
    Counterclockwise,
}

impl TurnDirection {
    /// +1 for a right (clockwise) turn, -1 for a left turn.
    pub fn sign(self) -> f64 {
        match self {
            TurnDirection::Clockwise => 1.0,
            TurnDirection::Counterclockwise => -1.0,
        }
    }

    /// Surveyor's wording used next to delta angles.
    pub fn side(self) -> &'static str {
        match self {
            TurnDirection::Clockwise => "Right",
            TurnDirection::Counterclockwise => "Left",
        }
    }
}

/// Spiral definitions the host can carry. Only clothoids are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpiralType {
    #[default]
    Clothoid,
    CubicParabola,
    Bloss,
    Sinusoidal,
    Cosine,
}

/// A tangent segment of a horizontal alignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineElement {
    pub start_station: f64,
    pub end_station: f64,
    pub start: Coordinate,
    pub end: Coordinate,
    /// Host-reported azimuth in radians. Derived from the endpoints when absent.
    #[serde(default)]
    pub direction: Option<f64>,
}

/// A circular curve of a horizontal alignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcElement {
    pub start_station: f64,
    pub end_station: f64,
    pub start: Coordinate,
    pub end: Coordinate,
    /// Signed by host convention; only the magnitude is used.
    pub radius: f64,
    pub length: f64,
    pub turn: TurnDirection,
    /// Azimuth of the back tangent at the PC, in radians.
    #[serde(default)]
    pub start_direction: Option<f64>,
    /// Sub-entity PI, only trusted when the host API exposes sub-entities.
    #[serde(default)]
    pub pi_point: Option<Coordinate>,
    /// Sub-entity center, only trusted when the host API exposes sub-entities.
    #[serde(default)]
    pub center_point: Option<Coordinate>,
}

/// A transition spiral of a horizontal alignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiralElement {
    pub start_station: f64,
    pub end_station: f64,
    pub start: Coordinate,
    pub end: Coordinate,
    /// Radius at the start. Zero or non-finite means infinite.
    pub radius_in: f64,
    /// Radius at the end. Zero or non-finite means infinite.
    pub radius_out: f64,
    pub length: f64,
    pub turn: TurnDirection,
    #[serde(default)]
    pub spiral_type: SpiralType,
    #[serde(default)]
    pub start_direction: Option<f64>,
    #[serde(default)]
    pub end_direction: Option<f64>,
    #[serde(default)]
    pub spi_point: Option<Coordinate>,
}

/// One entity of a horizontal alignment, ordered by station.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HorizontalElement {
    Line(LineElement),
    Arc(ArcElement),
    Spiral(SpiralElement),
    /// Any entity type the host exported that this generator cannot report.
    #[serde(other)]
    Unsupported,
}

/// Element kind used by the label state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Line,
    Arc,
    Spiral,
    Unsupported,
}

impl HorizontalElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            HorizontalElement::Line(_) => ElementKind::Line,
            HorizontalElement::Arc(_) => ElementKind::Arc,
            HorizontalElement::Spiral(_) => ElementKind::Spiral,
            HorizontalElement::Unsupported => ElementKind::Unsupported,
        }
    }

    /// Station range, or `None` for unsupported entities.
    pub fn stations(&self) -> Option<(f64, f64)> {
        match self {
            HorizontalElement::Line(line) => Some((line.start_station, line.end_station)),
            HorizontalElement::Arc(arc) => Some((arc.start_station, arc.end_station)),
            HorizontalElement::Spiral(spiral) => {
                Some((spiral.start_station, spiral.end_station))
            }
            HorizontalElement::Unsupported => None,
        }
    }
}

/// A straight grade segment of a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerticalTangent {
    pub start_station: f64,
    pub end_station: f64,
    pub start_elevation: f64,
    pub end_elevation: f64,
    /// Grade as a fraction (0.02 = 2%). Derived from the endpoints when absent.
    #[serde(default)]
    pub grade: Option<f64>,
}

impl VerticalTangent {
    pub fn length(&self) -> f64 {
        self.end_station - self.start_station
    }

    pub fn effective_grade(&self) -> f64 {
        self.grade.unwrap_or_else(|| {
            let run = self.length();
            if run.abs() < f64::EPSILON {
                0.0
            } else {
                (self.end_elevation - self.start_elevation) / run
            }
        })
    }
}

/// A symmetric parabolic vertical curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerticalCurve {
    pub start_station: f64,
    pub end_station: f64,
    pub start_elevation: f64,
    pub end_elevation: f64,
    /// Entrance grade as a fraction.
    pub grade_in: f64,
    /// Exit grade as a fraction.
    pub grade_out: f64,
    #[serde(default)]
    pub pvi_station: Option<f64>,
    #[serde(default)]
    pub pvi_elevation: Option<f64>,
}

/// One entity of a profile, ordered by station.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VerticalElement {
    Tangent(VerticalTangent),
    Circular(VerticalCurve),
    #[serde(other)]
    Unsupported,
}

/// A named vertical alignment attached to an alignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub elements: Vec<VerticalElement>,
}

/// A horizontal alignment with its profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alignment {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub elements: Vec<HorizontalElement>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Alignment {
    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

/// Linear unit of the drawing. Drives the sight-distance constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearUnit {
    #[default]
    Feet,
    Meters,
}

impl LinearUnit {
    pub fn label(self) -> &'static str {
        match self {
            LinearUnit::Feet => "US Survey Feet",
            LinearUnit::Meters => "Meters",
        }
    }
}

/// Read-only extract of every alignment in one host drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawing {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub host_api: HostApiVersion,
    #[serde(default)]
    pub units: LinearUnit,
    pub alignments: Vec<Alignment>,
}

impl Drawing {
    pub fn alignment(&self, name: &str) -> Option<&Alignment> {
        self.alignments.iter().find(|a| a.name == name)
    }

    pub fn alignment_names(&self) -> Vec<&str> {
        self.alignments.iter().map(|a| a.name.as_str()).collect()
    }
}
