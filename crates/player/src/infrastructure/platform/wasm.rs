//! WASM platform implementations
//!
//! Browser-backed providers using `web-sys` and `gloo-timers`.

use std::{future::Future, pin::Pin};

use gloo_timers::future::TimeoutFuture;
use web_sys::Storage;

use crate::ports::outbound::{Navigator, SleepProvider, StorageProvider};

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Storage provider backed by `window.localStorage`
///
/// Writes that the browser rejects (quota, privacy mode) are logged and
/// dropped.
#[derive(Clone, Default)]
pub struct WasmStorageProvider;

impl StorageProvider for WasmStorageProvider {
    fn save(&self, key: &str, value: &str) {
        let Some(storage) = local_storage() else {
            tracing::warn!("localStorage unavailable, dropping write to {}", key);
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            tracing::error!("Failed to write {} to localStorage: {:?}", key, e);
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn keys(&self) -> Vec<String> {
        let Some(storage) = local_storage() else {
            return Vec::new();
        };
        let len = storage.length().unwrap_or(0);
        (0..len)
            .filter_map(|i| storage.key(i).ok().flatten())
            .collect()
    }
}

/// Sleep provider using browser timers
#[derive(Clone, Default)]
pub struct WasmSleepProvider;

impl SleepProvider for WasmSleepProvider {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        Box::pin(async move {
            TimeoutFuture::new(ms).await;
        })
    }
}

/// Navigator that assigns `window.location.href`
#[derive(Clone, Default)]
pub struct WasmNavigator;

impl Navigator for WasmNavigator {
    fn navigate(&self, href: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(href) {
            tracing::error!("Failed to navigate to {}: {:?}", href, e);
        }
    }
}

/// Path of the current page, empty if unavailable
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}
