//! Error types for GridSolve

use std::time::Duration;

use thiserror::Error;

/// Main error type for GridSolve operations
#[derive(Debug, Error)]
pub enum GridSolveError {
    /// Structural or semantic problem in the problem definition.
    ///
    /// Always raised before enumeration starts; a solve that began with a
    /// valid problem cannot fail with this variant.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The search exceeded its configured wall-clock deadline.
    ///
    /// Carries the configured limit. Any incumbent found before the
    /// deadline has been discarded.
    #[error("Solver timed out after exceeding the {0:?} time limit")]
    Timeout(Duration),
}

/// Result type alias for GridSolve operations
pub type Result<T> = std::result::Result<T, GridSolveError>;
