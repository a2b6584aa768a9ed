mod config;
mod error;
pub mod format;
mod generation;
pub mod geometry;
mod labels;
mod preferences;
pub mod report;
mod source;
mod station;
mod types;

pub use config::*;
pub use error::GeometryError;
pub use generation::*;
pub use labels::*;
pub use preferences::Preferences;
pub use report::{AlignmentReport, GeoTable, HorizontalRow, StationPoint, VerticalRow};
pub use source::*;
pub use station::{format_station, Station};
pub use types::*;

