use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::types::{LinearUnit, VerticalCurve};

/// Crest/sag classification of a vertical curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalCurveKind {
    Crest,
    Sag,
    /// Equal grades; the curve is a straight grade.
    Flat,
}

impl VerticalCurveKind {
    pub fn label(self) -> &'static str {
        match self {
            VerticalCurveKind::Crest => "Crest",
            VerticalCurveKind::Sag => "Sag",
            VerticalCurveKind::Flat => "Flat",
        }
    }
}

/// Derived quantities of a symmetric parabolic vertical curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalCurveGeometry {
    pub length: f64,
    /// Entrance grade, percent.
    pub grade_in: f64,
    /// Exit grade, percent.
    pub grade_out: f64,
    /// Algebraic grade difference g2 - g1, percent.
    pub grade_change: f64,
    /// Rate of change of grade (g2 - g1) / L, percent per unit length.
    pub rate_of_change: f64,
    /// Length per percent of grade change, infinite for a flat curve.
    pub k_value: f64,
    /// Offset from the PVI to the curve, always non-negative.
    pub middle_ordinate: f64,
    pub kind: VerticalCurveKind,
    pub pvi_station: f64,
    pub pvi_elevation: f64,
    /// Station and elevation of the high (crest) or low (sag) point when it lies
    /// inside the curve.
    pub turning_point: Option<(f64, f64)>,
    /// Sight distance the curve length provides, `None` when unrestricted.
    pub sight_distance: Option<f64>,
}

impl VerticalCurveGeometry {
    pub fn new(curve: &VerticalCurve, unit: LinearUnit) -> Result<Self, GeometryError> {
        let length = curve.end_station - curve.start_station;
        if !length.is_finite() || length <= 0.0 {
            return Err(GeometryError::InvalidLength(length));
        }
        if !curve.grade_in.is_finite() || !curve.grade_out.is_finite() {
            return Err(GeometryError::NonFinite("grade"));
        }

        let g1 = curve.grade_in * 100.0;
        let g2 = curve.grade_out * 100.0;
        let grade_change = g2 - g1;

        let kind = if grade_change < 0.0 {
            VerticalCurveKind::Crest
        } else if grade_change > 0.0 {
            VerticalCurveKind::Sag
        } else {
            VerticalCurveKind::Flat
        };

        let pvi_station = curve
            .pvi_station
            .unwrap_or(curve.start_station + length / 2.0);
        let pvi_elevation = curve
            .pvi_elevation
            .unwrap_or(curve.start_elevation + curve.grade_in * length / 2.0);

        let turning_point = if grade_change == 0.0 {
            None
        } else {
            let x = -curve.grade_in * length / (curve.grade_out - curve.grade_in);
            (0.0..=length).contains(&x).then(|| {
                let r = (curve.grade_out - curve.grade_in) / (2.0 * length);
                (
                    curve.start_station + x,
                    curve.start_elevation + curve.grade_in * x + r * x * x,
                )
            })
        };

        Ok(Self {
            length,
            grade_in: g1,
            grade_out: g2,
            grade_change,
            rate_of_change: grade_change / length,
            k_value: if grade_change == 0.0 {
                f64::INFINITY
            } else {
                length / grade_change.abs()
            },
            middle_ordinate: grade_change.abs() * length / 800.0,
            kind,
            pvi_station,
            pvi_elevation,
            turning_point,
            sight_distance: sight_distance(kind, grade_change.abs(), length, unit),
        })
    }
}

/// AASHTO sight distance provided by a vertical curve of `length`.
///
/// Crest curves use stopping sight distance with the standard eye and object
/// heights; sag curves use headlight sight distance. `grade_change` is |A| in
/// percent.
pub fn sight_distance(
    kind: VerticalCurveKind,
    grade_change: f64,
    length: f64,
    unit: LinearUnit,
) -> Option<f64> {
    if grade_change <= 0.0 {
        return None;
    }
    let a = grade_change;
    match kind {
        VerticalCurveKind::Flat => None,
        VerticalCurveKind::Crest => {
            let c = match unit {
                LinearUnit::Feet => 2158.0,
                LinearUnit::Meters => 658.0,
            };
            let within = (c * length / a).sqrt();
            if within <= length {
                Some(within)
            } else {
                Some((length + c / a) / 2.0)
            }
        }
        VerticalCurveKind::Sag => {
            let base = match unit {
                LinearUnit::Feet => 400.0,
                LinearUnit::Meters => 120.0,
            };
            // A*S^2 - 3.5*L*S - base*L = 0
            let b = 3.5 * length;
            let within = (b + (b * b + 4.0 * a * base * length).sqrt()) / (2.0 * a);
            if within <= length {
                Some(within)
            } else if 2.0 * a > 3.5 {
                Some((length * a + base) / (2.0 * a - 3.5))
            } else {
                None
            }
        }
    }
}
