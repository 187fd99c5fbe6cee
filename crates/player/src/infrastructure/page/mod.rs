//! Page surface implementations
//!
//! `DomPage` renders into the browser document; `InMemoryPage` is a plain
//! in-process document for tests and the headless desktop runner.

#[cfg(target_arch = "wasm32")]
mod dom;

pub mod memory;

#[cfg(target_arch = "wasm32")]
pub use dom::DomPage;

pub use memory::{ControlState, ControlStyle, CountCellState, InMemoryPage, RowState};
