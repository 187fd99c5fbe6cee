//! Platform abstraction ports for cross-platform compatibility
//!
//! These traits abstract platform-specific operations so that:
//! 1. Application code remains platform-agnostic
//! 2. Platform-specific code is isolated in infrastructure
//! 3. Code becomes easily testable with in-memory implementations

use std::{future::Future, pin::Pin};

/// Durable string key-value store (localStorage/file-based)
///
/// Shared by every page of the same origin. Entries are never deleted;
/// approvals only accumulate. There is no locking: callers
/// rely on single-threaded, run-to-completion execution, and concurrent
/// writers from other tabs are last-write-wins.
pub trait StorageProvider: Clone + 'static {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str);

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Every key currently in the store, in no particular order
    fn keys(&self) -> Vec<String>;
}

/// Async sleep abstraction
///
/// Used by the poller and the sign-in flow so neither needs `#[cfg]` branches.
pub trait SleepProvider: Clone + 'static {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>>;
}

/// Page navigation
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Navigator {
    /// Leave the current page for `href`
    fn navigate(&self, href: &str);
}
