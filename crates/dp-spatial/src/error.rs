//! Spatial-subsystem error type.

use thiserror::Error;

use dp_core::GeoCoord;

/// Errors produced by `dp-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// An endpoint is not a coordinate of the street map.
    #[error("coordinate {0} not found in street map")]
    BadCoord(GeoCoord),

    /// Both endpoints exist but lie in disconnected parts of the map.
    #[error("no route from {from} to {to}")]
    NoRoute { from: GeoCoord, to: GeoCoord },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
