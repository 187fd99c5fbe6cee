//! Clearance player.
//!
//! Approval tracking, status projection, and polling over a shared
//! key-value store, with adapters for the browser and a headless desktop
//! runner. Multi-platform support is provided via compile-time `cfg`
//! selection.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod runner;

pub use application::services::{
    ApprovalOutcome, ApprovalTracker, PageController, Poller, PollerHandle, StatusProjector,
};
pub use config::PlayerConfig;
