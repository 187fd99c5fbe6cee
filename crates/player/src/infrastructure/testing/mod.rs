//! Test-only infrastructure fakes.

pub mod fixtures;
