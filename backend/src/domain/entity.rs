//! Domain Layer - Errors
//!
//! The error type shared by every layer below the commands.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
///
/// None of these end a session: read failures fall back to seed data,
/// write failures become notices, validation failures leave the store as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Failed to read stored data: {0}")]
    PersistenceRead(String),
    #[error("Failed to save data: {0}")]
    PersistenceWrite(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::Validation("status is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: status is required");
        let err = DomainError::PersistenceWrite("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Failed to save data: quota exceeded");
    }
}
