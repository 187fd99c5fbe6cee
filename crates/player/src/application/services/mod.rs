//! Application services
//!
//! Each service takes its ports as generic parameters and is constructed by
//! the runner with platform adapters, or by tests with in-memory ones.

pub mod approval_tracker;
pub mod page_controller;
pub mod poller;
pub mod session_service;
pub mod status_projector;

pub use approval_tracker::{ApprovalOutcome, ApprovalTracker};
pub use page_controller::PageController;
pub use poller::{Poller, PollerHandle, DEFAULT_POLL_INTERVAL_MS};
pub use session_service::{LoginService, LoginTiming, LogoutService};
pub use status_projector::StatusProjector;
