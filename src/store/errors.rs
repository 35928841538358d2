//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record carries the requested id
    #[error("User with ID {0} not found")]
    NotFound(u64),

    /// Another record already uses this email
    #[error("Email already exists")]
    EmailTaken(String),
}
