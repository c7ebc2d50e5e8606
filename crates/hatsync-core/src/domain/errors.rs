//! Domain error types
//!
//! Errors raised while building or validating domain values, before any
//! adapter is involved.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A completion count exceeded the number of attempted units
    #[error("Invalid sync outcome: {completed} completed out of {attempted} attempted")]
    InvalidOutcome {
        /// Units launched
        attempted: usize,
        /// Units reported as completed without error
        completed: usize,
    },
}
