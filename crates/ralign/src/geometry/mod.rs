use kurbo::{Point, Vec2};

pub mod curve;
pub mod spiral;
pub mod vertical;

pub use curve::{CircularCurve, CurvePoints};
pub use spiral::{SpiralGeometry, SpiralPoints, SpiralRole};
pub use vertical::{VerticalCurveGeometry, VerticalCurveKind};

use crate::format::normalize_azimuth;

/// Where a reported point came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PointSource {
    /// Read from host sub-entity data.
    Host,
    /// Back-computed from endpoints and directions.
    Computed,
}

/// Grid azimuth (clockwise from north) from `from` to `to`, in radians.
pub fn azimuth_between(from: Point, to: Point) -> f64 {
    let v = to - from;
    normalize_azimuth(v.x.atan2(v.y))
}

/// Unit vector pointing along an azimuth.
pub fn azimuth_vector(azimuth: f64) -> Vec2 {
    Vec2::new(azimuth.sin(), azimuth.cos())
}

/// True when a radius stands for a tangent (zero or non-finite).
pub fn is_infinite_radius(radius: f64) -> bool {
    radius == 0.0 || !radius.is_finite()
}

/// Curvature for a host radius, treating zero/non-finite radii as straight.
pub fn curvature(radius: f64) -> f64 {
    if is_infinite_radius(radius) {
        0.0
    } else {
        1.0 / radius.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_azimuth_between_cardinals() {
        let origin = Point::new(0.0, 0.0);
        assert!((azimuth_between(origin, Point::new(0.0, 10.0)) - 0.0).abs() < 1e-12);
        assert!((azimuth_between(origin, Point::new(10.0, 0.0)) - PI / 2.0).abs() < 1e-12);
        assert!((azimuth_between(origin, Point::new(0.0, -10.0)) - PI).abs() < 1e-12);
        assert!((azimuth_between(origin, Point::new(-10.0, 0.0)) - 1.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_azimuth_vector_round_trip() {
        let az = 1.1;
        let v = azimuth_vector(az);
        let p = Point::new(0.0, 0.0) + v;
        assert!((azimuth_between(Point::new(0.0, 0.0), p) - az).abs() < 1e-12);
    }

    #[test]
    fn test_infinite_radius_convention() {
        assert!(is_infinite_radius(0.0));
        assert!(is_infinite_radius(f64::INFINITY));
        assert!(!is_infinite_radius(-500.0));
        assert_eq!(curvature(0.0), 0.0);
        assert_eq!(curvature(-500.0), 0.002);
    }
}
