//! Number, angle and bearing formatting shared by every report emitter.

use std::f64::consts::PI;

/// Decimal places used for coordinates and distances.
pub const COORDINATE_DECIMALS: u32 = 4;

/// Round half away from zero at `decimals` places.
pub fn round_half_away(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Two-stage rounding used for coordinates.
///
/// Values within `5 * 10^-(decimals + 1)` of a whole number snap to it first, which
/// keeps floating-point residue such as `24999.99997` from surviving as
/// `24999.9999`. Everything else rounds half away from zero.
pub fn round_coordinate(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let nearest = value.round();
    let tolerance = 5.0 * 10f64.powi(-(decimals as i32 + 1));
    if (value - nearest).abs() < tolerance {
        return nearest + 0.0;
    }
    round_half_away(value, decimals) + 0.0
}

/// Coordinate or distance with four decimals.
pub fn format_distance(value: f64) -> String {
    if !value.is_finite() {
        return "Infinite".to_string();
    }
    format!(
        "{:.4}",
        round_coordinate(value, COORDINATE_DECIMALS)
    )
}

/// Grade fraction as a percentage, `0.02` -> `2.0000%`.
pub fn format_grade(fraction: f64) -> String {
    format!("{:.4}%", round_half_away(fraction * 100.0, 4) + 0.0)
}

/// Split non-negative decimal degrees into degrees, minutes and seconds.
///
/// Degrees and minutes are truncated from the remainder; only seconds are rounded
/// (to hundredths), carrying into minutes and degrees when they reach sixty.
pub fn dms_parts(value: f64) -> (u32, u32, f64) {
    let value = value.abs();
    let mut degrees = value.trunc();
    let minutes_total = (value - degrees) * 60.0;
    let mut minutes = minutes_total.trunc();
    let mut seconds = round_half_away((minutes_total - minutes) * 60.0, 2);
    if seconds >= 60.0 {
        seconds -= 60.0;
        minutes += 1.0;
    }
    if minutes >= 60.0 {
        minutes -= 60.0;
        degrees += 1.0;
    }
    (degrees as u32, minutes as u32, seconds.max(0.0))
}

/// Decimal degrees as `D°MM'SS.SS"`.
pub fn format_dms(degrees: f64) -> String {
    let sign = if degrees < 0.0 { "-" } else { "" };
    let (d, m, s) = dms_parts(degrees);
    let text = format!("{d}°{m:02}'{s:05.2}\"");
    if text == "0°00'00.00\"" {
        return text;
    }
    format!("{sign}{text}")
}

/// Angle in radians as `D°MM'SS.SS"`.
pub fn format_angle(radians: f64) -> String {
    format_dms(radians.to_degrees())
}

/// Normalize an azimuth in radians into [0, 2π).
pub fn normalize_azimuth(azimuth: f64) -> f64 {
    let full = 2.0 * PI;
    let wrapped = azimuth.rem_euclid(full);
    if wrapped >= full {
        0.0
    } else {
        wrapped
    }
}

/// Quadrant bearing for an azimuth in radians, e.g. `N 45°00'00.00" E`.
pub fn format_bearing(azimuth: f64) -> String {
    let degrees = normalize_azimuth(azimuth).to_degrees();
    let (north_south, angle, east_west) = if degrees < 90.0 {
        ("N", degrees, "E")
    } else if degrees < 180.0 {
        ("S", 180.0 - degrees, "E")
    } else if degrees < 270.0 {
        ("S", degrees - 180.0, "W")
    } else {
        ("N", 360.0 - degrees, "W")
    };
    format!("{north_south} {} {east_west}", format_dms(angle))
}
