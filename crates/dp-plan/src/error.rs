use dp_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    /// A leg could not be routed (`BadCoord` or `NoRoute`).
    #[error("routing failed: {0}")]
    Route(#[from] SpatialError),

    #[error("delivery parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PlanResult<T> = Result<T, PlanError>;
