//! Error types of the separation storage.
//!
//! Rejecting a cut is not an error, and neither is infeasibility detected while applying bound
//! changes. Misuse of the storage, such as submitting a row that is already in the LP, is a
//! contract violation and panics.
use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur while storing or committing cuts.
#[derive(Error, Debug)]
pub enum SeparationError {
    /// Growing one of the storage arrays failed.
    #[error("Out of memory while growing the separation storage: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// The LP refused a row.
    #[error("Could not add row to the LP: {0}")]
    Lp(String),
}

/// Result type for separation storage operations.
pub type SeparationResult<T> = Result<T, SeparationError>;
