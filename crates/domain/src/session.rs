//! Simulated sign-in inputs
//!
//! There is no real authentication. Credentials only need to be present; the
//! email's local part is used as the greeting name.

use crate::error::DomainError;

const MISSING_FIELDS: &str = "Please fill in both fields.";

/// Validated sign-in form values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either field is empty after trimming.
    pub fn new(email: &str, password: &str) -> Result<Self, DomainError> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::validation(MISSING_FIELDS));
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// The part of the email before `@`
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }
}
