//! Error types for the famplan ecosystem.

use thiserror::Error;

/// Errors that can occur in famplan operations.
#[derive(Error, Debug)]
pub enum FamPlanError {
    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("Event store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for famplan operations.
pub type FamPlanResult<T> = Result<T, FamPlanError>;
