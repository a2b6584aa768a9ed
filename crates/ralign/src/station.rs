use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::round_half_away;

/// Distance along an alignment, displayed in `NN+OO.OO` form.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Station(f64);

impl Station {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw distance along the alignment.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Station {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_station(self.0))
    }
}

/// Format a station as `NN+OO.OO`.
///
/// The value is rounded to hundredths (half away from zero) before it is split,
/// so `99.995` carries into the next full station instead of printing `0+100.00`.
pub fn format_station(value: f64) -> String {
    if !value.is_finite() {
        return "?+??.??".to_string();
    }
    let cents = round_half_away(value.abs() * 100.0, 0) as i64;
    let sign = if value < 0.0 && cents != 0 { "-" } else { "" };
    let full = cents / 10_000;
    let remainder = cents % 10_000;
    format!(
        "{sign}{full}+{:02}.{:02}",
        remainder / 100,
        remainder % 100
    )
}
