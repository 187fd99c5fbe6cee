//! Infrastructure adapters: store, timer, navigation, and page surfaces.

pub mod page;
pub mod platform;

#[cfg(test)]
pub mod testing;
