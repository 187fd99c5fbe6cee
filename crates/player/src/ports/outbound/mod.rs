//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with the store, the timer, and the
//! document without depending on concrete implementations.

pub mod page_surface;
pub mod platform;

pub use page_surface::{ClassRow, CountCell, PageSurface};
pub use platform::{Navigator, SleepProvider, StorageProvider};

#[cfg(any(test, feature = "testing"))]
pub use page_surface::MockPageSurface;
#[cfg(any(test, feature = "testing"))]
pub use platform::MockNavigator;
