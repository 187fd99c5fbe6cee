//! Application layer: approval tracking, status projection, polling, and
//! the simulated session flows.

pub mod error;
pub mod services;

pub use error::SessionError;
