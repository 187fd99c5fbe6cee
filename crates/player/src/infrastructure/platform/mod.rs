//! Platform-specific implementations
//!
//! This module provides platform-specific implementations of the
//! platform abstraction traits defined in ports/outbound/platform.rs.
//!
//! The correct platform is selected at compile time based on the target architecture.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
mod desktop;

pub mod memory;

#[cfg(target_arch = "wasm32")]
pub use wasm::{current_path, WasmNavigator, WasmSleepProvider, WasmStorageProvider};

#[cfg(not(target_arch = "wasm32"))]
pub use desktop::{DesktopSleepProvider, DesktopStorageProvider, LogNavigator};

pub use memory::MemoryStorageProvider;
