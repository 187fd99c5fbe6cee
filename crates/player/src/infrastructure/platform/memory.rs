//! In-memory platform implementations
//!
//! Used by unit tests and by the headless runner when no durable store is
//! wanted. Behaves like a fresh browser profile.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::outbound::StorageProvider;

/// Storage provider backed by a shared `HashMap`
///
/// Clones share the same map, the way two tabs share one origin's storage.
#[derive(Clone, Default)]
pub struct MemoryStorageProvider {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.data.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn save(&self, key: &str, value: &str) {
        match self.data.write() {
            Ok(mut guard) => {
                guard.insert(key.to_string(), value.to_string());
            }
            Err(e) => tracing::error!("Failed to acquire write lock for storage: {}", e),
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.data.read() {
            Ok(guard) => guard.get(key).cloned(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                None
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        match self.data.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                Vec::new()
            }
        }
    }
}
