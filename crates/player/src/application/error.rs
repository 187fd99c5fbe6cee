//! Service layer error types

use thiserror::Error;

use clearance_domain::DomainError;

/// Errors that can occur while signing in
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The page name does not say whether this is a student or faculty login
    #[error("Role could not be detected from page name")]
    RoleUnknown,
    /// The form was submitted with missing fields
    #[error(transparent)]
    InvalidCredentials(#[from] DomainError),
}

impl SessionError {
    /// Message suitable for showing to the user, if any.
    ///
    /// Only input problems are shown; a missing role is a page wiring issue.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::RoleUnknown => None,
            Self::InvalidCredentials(DomainError::Validation(msg)) => Some(msg.clone()),
            Self::InvalidCredentials(other) => Some(other.to_string()),
        }
    }
}
