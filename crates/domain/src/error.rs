//! Unified error types for the domain layer

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., empty login fields)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Class identifier is not a digit string
    #[error("Invalid class id: {0:?}")]
    InvalidClassId(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for rejected user input.
    ///
    /// # Example
    /// ```ignore
    /// if email.is_empty() {
    ///     return Err(DomainError::validation("Please fill in both fields."));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid class id error
    pub fn invalid_class_id(raw: impl Into<String>) -> Self {
        Self::InvalidClassId(raw.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
