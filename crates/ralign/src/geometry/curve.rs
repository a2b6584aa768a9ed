use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::{azimuth_between, azimuth_vector, PointSource};
use crate::error::GeometryError;
use crate::format::normalize_azimuth;
use crate::types::{ArcElement, Coordinate};

/// Closed-form quantities of a simple circular curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularCurve {
    pub radius: f64,
    pub length: f64,
    /// Central angle in radians.
    pub delta: f64,
    pub tangent: f64,
    pub chord: f64,
    pub middle_ordinate: f64,
    pub external: f64,
    /// Arc-definition degree of curvature for a 100-unit arc, in degrees.
    pub degree: f64,
}

impl CircularCurve {
    /// Build from radius (sign ignored) and arc length.
    pub fn new(radius: f64, length: f64) -> Result<Self, GeometryError> {
        let radius = radius.abs();
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(GeometryError::InvalidLength(length));
        }
        if length >= 2.0 * PI * radius {
            return Err(GeometryError::ArcExceedsCircle { radius, length });
        }

        let delta = length / radius;
        let half = delta.abs() / 2.0;
        Ok(Self {
            radius,
            length,
            delta,
            tangent: radius * half.tan(),
            chord: 2.0 * radius * half.sin(),
            middle_ordinate: radius * (1.0 - half.cos()),
            external: radius * (1.0 / half.cos() - 1.0),
            degree: (100.0 * delta / length) * (180.0 / PI),
        })
    }
}

/// Located points and directions of a circular curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoints {
    pub pi: Coordinate,
    pub center: Coordinate,
    pub pi_source: PointSource,
    pub center_source: PointSource,
    /// Azimuth of the back tangent at the PC.
    pub back_azimuth: f64,
    /// Azimuth of the ahead tangent at the PT.
    pub ahead_azimuth: f64,
    pub chord_azimuth: f64,
    /// Azimuth from the center to the PC.
    pub radial_in_azimuth: f64,
    /// Azimuth from the center to the PT.
    pub radial_out_azimuth: f64,
}

impl CurvePoints {
    /// Locate the PI and center of `arc`.
    ///
    /// Host sub-entity points are used when `use_host` is set and the points exist.
    /// Otherwise the PI is projected along the back tangent by the tangent length and
    /// the center is offset from the curve midpoint toward the turn side.
    pub fn locate(
        arc: &ArcElement,
        curve: &CircularCurve,
        use_host: bool,
    ) -> Result<Self, GeometryError> {
        let start = arc.start.to_point();
        let end = arc.end.to_point();
        let sign = arc.turn.sign();
        let chord_vec = end - start;
        let has_chord = chord_vec.hypot() > 1e-9;

        let chord_azimuth = if has_chord {
            azimuth_between(start, end)
        } else {
            match arc.start_direction {
                Some(dir) => normalize_azimuth(dir + sign * curve.delta / 2.0),
                None => return Err(GeometryError::Degenerate("arc")),
            }
        };
        let back_azimuth = match arc.start_direction {
            Some(dir) => normalize_azimuth(dir),
            None => normalize_azimuth(chord_azimuth - sign * curve.delta / 2.0),
        };
        let ahead_azimuth = normalize_azimuth(back_azimuth + sign * curve.delta);

        let (pi, pi_source) = match (use_host, arc.pi_point) {
            (true, Some(pi)) => (pi, PointSource::Host),
            _ => (
                Coordinate::from_point(start + azimuth_vector(back_azimuth) * curve.tangent),
                PointSource::Computed,
            ),
        };

        let (center, center_source) = match (use_host, arc.center_point) {
            (true, Some(center)) => (center, PointSource::Host),
            _ => {
                let normal = azimuth_vector(chord_azimuth + sign * PI / 2.0);
                let chord_mid = start.midpoint(end);
                let curve_mid = chord_mid - normal * curve.middle_ordinate;
                (
                    Coordinate::from_point(curve_mid + normal * curve.radius),
                    PointSource::Computed,
                )
            }
        };

        let center_point = center.to_point();
        Ok(Self {
            pi,
            center,
            pi_source,
            center_source,
            back_azimuth,
            ahead_azimuth,
            chord_azimuth,
            radial_in_azimuth: azimuth_between(center_point, start),
            radial_out_azimuth: azimuth_between(center_point, end),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TurnDirection;
    use approx::assert_relative_eq;

    fn quarter_arc(turn: TurnDirection) -> ArcElement {
        // R = 500 quarter circle heading north from the origin.
        let end = match turn {
            TurnDirection::Clockwise => Coordinate::new(500.0, 500.0),
            TurnDirection::Counterclockwise => Coordinate::new(500.0, -500.0),
        };
        ArcElement {
            start_station: 0.0,
            end_station: PI / 2.0 * 500.0,
            start: Coordinate::new(0.0, 0.0),
            end,
            radius: 500.0,
            length: PI / 2.0 * 500.0,
            turn,
            start_direction: None,
            pi_point: None,
            center_point: None,
        }
    }

    #[test]
    fn test_textbook_quarter_curve() {
        let curve = CircularCurve::new(500.0, PI / 2.0 * 500.0).expect("curve");
        assert_relative_eq!(curve.delta, PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(curve.chord, 500.0 * 2f64.sqrt(), epsilon = 1e-9);
        assert_relative_eq!(curve.tangent, 500.0, epsilon = 1e-9);
        assert_relative_eq!(curve.external, 500.0 * (2f64.sqrt() - 1.0), epsilon = 1e-9);
        assert_relative_eq!(curve.degree, 5729.5779513 / 500.0, epsilon = 1e-6);
    }

    #[test]
    fn test_negative_radius_uses_magnitude() {
        let curve = CircularCurve::new(-1000.0, 200.0).expect("curve");
        assert_eq!(curve.radius, 1000.0);
        assert_relative_eq!(curve.delta, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            CircularCurve::new(0.0, 10.0),
            Err(GeometryError::InvalidRadius(0.0))
        );
        assert_eq!(
            CircularCurve::new(100.0, -1.0),
            Err(GeometryError::InvalidLength(-1.0))
        );
        assert!(matches!(
            CircularCurve::new(10.0, 100.0),
            Err(GeometryError::ArcExceedsCircle { .. })
        ));
    }

    #[test]
    fn test_locate_right_turn_computed() {
        let arc = quarter_arc(TurnDirection::Clockwise);
        let curve = CircularCurve::new(arc.radius, arc.length).expect("curve");
        let points = CurvePoints::locate(&arc, &curve, true).expect("locate");
        assert_eq!(points.pi_source, PointSource::Computed);
        assert_relative_eq!(points.pi.northing, 500.0, epsilon = 1e-6);
        assert_relative_eq!(points.pi.easting, 0.0, epsilon = 1e-6);
        assert_relative_eq!(points.center.northing, 0.0, epsilon = 1e-6);
        assert_relative_eq!(points.center.easting, 500.0, epsilon = 1e-6);
        assert_relative_eq!(points.back_azimuth, 0.0, epsilon = 1e-9);
        assert_relative_eq!(points.ahead_azimuth, PI / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_locate_left_turn_computed() {
        let arc = quarter_arc(TurnDirection::Counterclockwise);
        let curve = CircularCurve::new(arc.radius, arc.length).expect("curve");
        let points = CurvePoints::locate(&arc, &curve, false).expect("locate");
        assert_relative_eq!(points.center.easting, -500.0, epsilon = 1e-6);
        assert_relative_eq!(points.center.northing, 0.0, epsilon = 1e-6);
        assert_relative_eq!(points.ahead_azimuth, 1.5 * PI, epsilon = 1e-9);
    }

    #[test]
    fn test_host_points_respected_only_when_supported() {
        let mut arc = quarter_arc(TurnDirection::Clockwise);
        arc.pi_point = Some(Coordinate::new(1.0, 2.0));
        let curve = CircularCurve::new(arc.radius, arc.length).expect("curve");

        let with_host = CurvePoints::locate(&arc, &curve, true).expect("locate");
        assert_eq!(with_host.pi_source, PointSource::Host);
        assert_eq!(with_host.pi, Coordinate::new(1.0, 2.0));

        let without_host = CurvePoints::locate(&arc, &curve, false).expect("locate");
        assert_eq!(without_host.pi_source, PointSource::Computed);
    }

    #[test]
    fn test_degenerate_arc_without_direction() {
        let mut arc = quarter_arc(TurnDirection::Clockwise);
        arc.end = arc.start;
        let curve = CircularCurve::new(arc.radius, arc.length).expect("curve");
        assert_eq!(
            CurvePoints::locate(&arc, &curve, false),
            Err(GeometryError::Degenerate("arc"))
        );
    }
}
