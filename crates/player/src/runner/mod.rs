//! Composition roots
//!
//! `browser` binds services to the live document; `headless` renders an
//! in-memory page against the desktop store and logs what changes.

#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(not(target_arch = "wasm32"))]
mod headless;

#[cfg(target_arch = "wasm32")]
pub use browser::run_browser;

#[cfg(not(target_arch = "wasm32"))]
pub use headless::{headless_context, headless_page, run_headless};
