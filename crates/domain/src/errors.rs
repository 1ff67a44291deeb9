//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// City name was empty after trimming
    #[error("City name must not be empty")]
    EmptyCityName,
}
