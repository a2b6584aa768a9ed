use serde::{Deserialize, Serialize};

use super::{azimuth_between, azimuth_vector, curvature, is_infinite_radius, PointSource};
use crate::error::GeometryError;
use crate::format::normalize_azimuth;
use crate::types::{Coordinate, SpiralElement};

/// Below this central angle the spiral is treated as straight.
const STRAIGHT_THETA: f64 = 1e-9;

/// Whether a spiral leads into a curve or out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpiralRole {
    Entry,
    Exit,
}

impl SpiralRole {
    /// Radius comparison used when neighbors do not settle the role.
    ///
    /// Zero and non-finite radii are infinite, so `(0, 500)` is an entry and
    /// `(500, 0)` an exit.
    pub fn from_radii(radius_in: f64, radius_out: f64) -> Self {
        if curvature(radius_in) < curvature(radius_out) {
            SpiralRole::Entry
        } else {
            SpiralRole::Exit
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpiralRole::Entry => "Entrance",
            SpiralRole::Exit => "Exit",
        }
    }

    /// Radius at the curve end of the spiral.
    ///
    /// Falls back to the other radius when the role-selected one is infinite.
    pub fn effective_radius(self, radius_in: f64, radius_out: f64) -> f64 {
        let (curve_end, tangent_end) = match self {
            SpiralRole::Entry => (radius_out, radius_in),
            SpiralRole::Exit => (radius_in, radius_out),
        };
        [curve_end, tangent_end]
            .into_iter()
            .find(|radius| !is_infinite_radius(*radius))
            .map_or(f64::INFINITY, f64::abs)
    }
}

/// Series-approximated clothoid quantities measured from the tangent-side end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralGeometry {
    pub length: f64,
    /// Radius at the curve end; infinite for a straight spiral.
    pub radius: f64,
    /// Spiral central angle in radians.
    pub theta: f64,
    /// Clothoid parameter A.
    pub parameter_a: f64,
    pub xs: f64,
    pub ys: f64,
    pub p: f64,
    pub k: f64,
    pub long_tangent: f64,
    pub short_tangent: f64,
    pub long_chord: f64,
    /// Deflection of the long chord from the tangent-side direction, radians.
    pub chord_deflection: f64,
}

impl SpiralGeometry {
    /// Clothoid of `length` reaching `radius` at its curve end.
    ///
    /// A straight spiral (infinite radius or vanishing theta) uses the limits of
    /// the series as theta goes to zero instead of dividing by `sin`/`tan`.
    pub fn clothoid(length: f64, radius: f64) -> Result<Self, GeometryError> {
        if !length.is_finite() || length <= 0.0 {
            return Err(GeometryError::InvalidLength(length));
        }
        if radius.is_nan() || radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }

        let theta = if radius.is_infinite() {
            0.0
        } else {
            length / (2.0 * radius)
        };

        if theta < STRAIGHT_THETA {
            return Ok(Self {
                length,
                radius,
                theta,
                parameter_a: (length * radius).sqrt(),
                xs: length,
                ys: 0.0,
                p: 0.0,
                k: length / 2.0,
                long_tangent: 2.0 * length / 3.0,
                short_tangent: length / 3.0,
                long_chord: length,
                chord_deflection: 0.0,
            });
        }

        let t2 = theta * theta;
        let t3 = t2 * theta;
        let t4 = t2 * t2;
        let t5 = t4 * theta;

        let xs = length * (1.0 - t2 / 10.0 + t4 / 216.0);
        let ys = length * (theta / 3.0 - t3 / 42.0 + t5 / 1320.0);

        Ok(Self {
            length,
            radius,
            theta,
            parameter_a: (length * radius).sqrt(),
            xs,
            ys,
            p: ys - radius * (1.0 - theta.cos()),
            k: xs - radius * theta.sin(),
            long_tangent: xs - ys / theta.tan(),
            short_tangent: ys / theta.sin(),
            long_chord: (xs * xs + ys * ys).sqrt(),
            chord_deflection: (ys / xs).atan(),
        })
    }
}

/// Located SPI and directions of a spiral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpiralPoints {
    pub spi: Coordinate,
    pub spi_source: PointSource,
    pub start_azimuth: f64,
    pub end_azimuth: f64,
    pub chord_azimuth: f64,
}

impl SpiralPoints {
    /// Locate the spiral PI from the tangent-side end along its tangent by the long
    /// tangent distance.
    pub fn locate(
        spiral: &SpiralElement,
        geometry: &SpiralGeometry,
        role: SpiralRole,
        use_host: bool,
    ) -> Result<Self, GeometryError> {
        let start = spiral.start.to_point();
        let end = spiral.end.to_point();
        let sign = spiral.turn.sign();
        let has_chord = (end - start).hypot() > 1e-9;

        let (start_azimuth, end_azimuth) = match role {
            SpiralRole::Entry => {
                let start_az = match (spiral.start_direction, has_chord) {
                    (Some(dir), _) => dir,
                    (None, true) => azimuth_between(start, end) - sign * geometry.chord_deflection,
                    (None, false) => return Err(GeometryError::Degenerate("spiral")),
                };
                let end_az = spiral
                    .end_direction
                    .unwrap_or(start_az + sign * geometry.theta);
                (start_az, end_az)
            }
            SpiralRole::Exit => {
                let end_az = match (spiral.end_direction, has_chord) {
                    (Some(dir), _) => dir,
                    (None, true) => azimuth_between(start, end) + sign * geometry.chord_deflection,
                    (None, false) => return Err(GeometryError::Degenerate("spiral")),
                };
                let start_az = spiral
                    .start_direction
                    .unwrap_or(end_az - sign * geometry.theta);
                (start_az, end_az)
            }
        };
        let start_azimuth = normalize_azimuth(start_azimuth);
        let end_azimuth = normalize_azimuth(end_azimuth);

        let chord_azimuth = if has_chord {
            azimuth_between(start, end)
        } else {
            start_azimuth
        };

        let (spi, spi_source) = match (use_host, spiral.spi_point) {
            (true, Some(spi)) => (spi, PointSource::Host),
            _ => {
                let point = match role {
                    SpiralRole::Entry => {
                        start + azimuth_vector(start_azimuth) * geometry.long_tangent
                    }
                    SpiralRole::Exit => end - azimuth_vector(end_azimuth) * geometry.long_tangent,
                };
                (Coordinate::from_point(point), PointSource::Computed)
            }
        };

        Ok(Self {
            spi,
            spi_source,
            start_azimuth,
            end_azimuth,
            chord_azimuth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SpiralType, TurnDirection};
    use approx::assert_relative_eq;

    #[test]
    fn test_role_from_radii() {
        assert_eq!(SpiralRole::from_radii(0.0, 500.0), SpiralRole::Entry);
        assert_eq!(SpiralRole::from_radii(500.0, 0.0), SpiralRole::Exit);
        assert_eq!(SpiralRole::from_radii(f64::INFINITY, 800.0), SpiralRole::Entry);
        assert_eq!(SpiralRole::from_radii(1000.0, 500.0), SpiralRole::Entry);
        assert_eq!(SpiralRole::from_radii(500.0, 1000.0), SpiralRole::Exit);
    }

    #[test]
    fn test_effective_radius() {
        assert_eq!(SpiralRole::Entry.effective_radius(0.0, -500.0), 500.0);
        assert_eq!(SpiralRole::Exit.effective_radius(500.0, 0.0), 500.0);
        assert_eq!(SpiralRole::Entry.effective_radius(1000.0, 0.0), 1000.0);
        assert_eq!(SpiralRole::Exit.effective_radius(0.0, -750.0), 750.0);
        assert!(SpiralRole::Entry.effective_radius(0.0, f64::INFINITY).is_infinite());
    }

    #[test]
    fn test_clothoid_series() {
        let geometry = SpiralGeometry::clothoid(200.0, 1000.0).expect("spiral");
        let theta: f64 = 0.1;
        assert_relative_eq!(geometry.theta, theta, epsilon = 1e-12);
        assert_relative_eq!(geometry.parameter_a, (200_000f64).sqrt(), epsilon = 1e-9);
        let xs = 200.0 * (1.0 - theta.powi(2) / 10.0 + theta.powi(4) / 216.0);
        let ys = 200.0 * (theta / 3.0 - theta.powi(3) / 42.0 + theta.powi(5) / 1320.0);
        assert_relative_eq!(geometry.xs, xs, epsilon = 1e-9);
        assert_relative_eq!(geometry.ys, ys, epsilon = 1e-9);
        assert_relative_eq!(geometry.p, ys - 1000.0 * (1.0 - theta.cos()), epsilon = 1e-9);
        assert_relative_eq!(geometry.k, xs - 1000.0 * theta.sin(), epsilon = 1e-9);
        // Textbook values for Ls = 200, R = 1000.
        assert_relative_eq!(geometry.xs, 199.8001, epsilon = 1e-4);
        assert_relative_eq!(geometry.ys, 6.6619, epsilon = 1e-4);
        assert_relative_eq!(geometry.long_tangent, 133.4032, epsilon = 1e-3);
        assert_relative_eq!(geometry.short_tangent, 66.7302, epsilon = 1e-3);
    }

    #[test]
    fn test_straight_spiral_limits() {
        let geometry = SpiralGeometry::clothoid(90.0, f64::INFINITY).expect("spiral");
        assert_eq!(geometry.theta, 0.0);
        assert_eq!(geometry.long_tangent, 60.0);
        assert_eq!(geometry.short_tangent, 30.0);
        assert_eq!(geometry.xs, 90.0);
        assert_eq!(geometry.p, 0.0);
        assert!(geometry.long_tangent.is_finite());
    }

    #[test]
    fn test_near_straight_spiral_is_continuous() {
        let nearly = SpiralGeometry::clothoid(90.0, 1e9).expect("spiral");
        assert_relative_eq!(nearly.long_tangent, 60.0, epsilon = 1e-3);
        assert_relative_eq!(nearly.short_tangent, 30.0, epsilon = 1e-3);
    }

    #[test]
    fn test_invalid_spiral() {
        assert_eq!(
            SpiralGeometry::clothoid(0.0, 500.0),
            Err(GeometryError::InvalidLength(0.0))
        );
        assert_eq!(
            SpiralGeometry::clothoid(100.0, -5.0),
            Err(GeometryError::InvalidRadius(-5.0))
        );
    }

    #[test]
    fn test_entry_spi_on_back_tangent() {
        let spiral = SpiralElement {
            start_station: 0.0,
            end_station: 200.0,
            start: Coordinate::new(0.0, 0.0),
            end: Coordinate::new(199.8001, 6.6619),
            radius_in: 0.0,
            radius_out: 1000.0,
            length: 200.0,
            turn: TurnDirection::Clockwise,
            spiral_type: SpiralType::Clothoid,
            start_direction: Some(0.0),
            end_direction: None,
            spi_point: None,
        };
        let geometry = SpiralGeometry::clothoid(200.0, 1000.0).expect("spiral");
        let points =
            SpiralPoints::locate(&spiral, &geometry, SpiralRole::Entry, false).expect("locate");
        assert_eq!(points.spi_source, PointSource::Computed);
        assert_relative_eq!(points.spi.easting, 0.0, epsilon = 1e-9);
        assert_relative_eq!(points.spi.northing, geometry.long_tangent, epsilon = 1e-9);
        assert_relative_eq!(points.end_azimuth, 0.1, epsilon = 1e-12);
    }
}
