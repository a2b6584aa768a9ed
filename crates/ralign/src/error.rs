use thiserror::Error;

/// Reasons a single alignment element cannot be reduced to report fields.
///
/// These never abort a report; the element is rendered as an inline error row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid radius {0}")]
    InvalidRadius(f64),
    #[error("invalid length {0}")]
    InvalidLength(f64),
    #[error("arc length {length} exceeds a full circle of radius {radius}")]
    ArcExceedsCircle { radius: f64, length: f64 },
    #[error("spiral has no finite radius at either end")]
    SpiralWithoutRadius,
    #[error("{0} has coincident endpoints and no host direction")]
    Degenerate(&'static str),
    #[error("non-finite {0}")]
    NonFinite(&'static str),
}
