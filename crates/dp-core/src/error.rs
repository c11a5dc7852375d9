//! Core error type.
//!
//! Sub-crates define their own error enums; `CoreError` only covers failures
//! that can occur while constructing core values.

use thiserror::Error;

/// Errors produced by `dp-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `dp-core`.
pub type CoreResult<T> = Result<T, CoreError>;
