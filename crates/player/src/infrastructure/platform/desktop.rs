//! Desktop platform implementations
//!
//! Provides platform-specific implementations for desktop using
//! standard library and native crates.

use crate::ports::outbound::{Navigator, SleepProvider, StorageProvider};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::{future::Future, pin::Pin};

/// Desktop storage provider with file-based persistence
///
/// Stores key-value pairs in a JSON file at:
/// - Linux: ~/.config/clearance/player/storage.json
/// - macOS: ~/Library/Application Support/io.clearance.player/storage.json
/// - Windows: C:\Users\<User>\AppData\Roaming\clearance\player\storage.json
///
/// Several processes may share one file. Every read re-reads the file, and
/// every write merges the file's current entries before writing it back, so
/// another process's keys are seen and never dropped. Concurrent writes to
/// the same key are last-write-wins.
#[derive(Clone)]
pub struct DesktopStorageProvider {
    /// Path to the storage file
    storage_path: PathBuf,
    /// Entries as of the last successful read, plus our own writes
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for DesktopStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopStorageProvider {
    /// Create a storage provider in the platform config directory
    pub fn new() -> Self {
        let storage_path = if let Some(dirs) = ProjectDirs::from("io", "clearance", "player") {
            dirs.config_dir().join("storage.json")
        } else {
            // Fallback to current directory if project dirs unavailable
            PathBuf::from("clearance_storage.json")
        };
        Self::at(storage_path)
    }

    /// Create a storage provider backed by `storage_path`
    ///
    /// An unreadable or corrupt file reads as empty rather than failing.
    pub fn at(storage_path: impl Into<PathBuf>) -> Self {
        let provider = Self {
            storage_path: storage_path.into(),
            cache: Arc::new(RwLock::new(HashMap::new())),
        };
        provider.refresh();

        tracing::debug!("Desktop storage initialized at: {:?}", provider.storage_path);
        provider
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Read the file as it is on disk now
    fn read_file(&self) -> Option<HashMap<String, String>> {
        if !self.storage_path.exists() {
            return None;
        }
        match fs::read_to_string(&self.storage_path) {
            Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                Ok(map) => Some(map),
                Err(e) => {
                    tracing::warn!("Failed to parse storage file: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read storage file: {}", e);
                None
            }
        }
    }

    /// Merge the file's current entries into the cache; file values win
    fn merge_from_file(&self, cache: &mut HashMap<String, String>) {
        if let Some(on_disk) = self.read_file() {
            cache.extend(on_disk);
        }
    }

    fn refresh(&self) {
        match self.cache.write() {
            Ok(mut guard) => self.merge_from_file(&mut guard),
            Err(e) => tracing::error!("Failed to acquire write lock for storage: {}", e),
        }
    }

    /// Write the cache to disk
    fn persist(&self, cache: &HashMap<String, String>) {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::error!("Failed to create storage directory: {}", e);
                    return;
                }
            }
        }

        match serde_json::to_string_pretty(cache) {
            Ok(data) => {
                if let Err(e) = fs::write(&self.storage_path, data) {
                    tracing::error!("Failed to write storage file: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize storage data: {}", e);
            }
        }
    }
}

impl StorageProvider for DesktopStorageProvider {
    fn save(&self, key: &str, value: &str) {
        match self.cache.write() {
            Ok(mut guard) => {
                self.merge_from_file(&mut guard);
                guard.insert(key.to_string(), value.to_string());
                self.persist(&guard);
            }
            Err(e) => {
                tracing::error!("Failed to acquire write lock for storage: {}", e);
            }
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        self.refresh();
        match self.cache.read() {
            Ok(guard) => guard.get(key).cloned(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                None
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        self.refresh();
        match self.cache.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                Vec::new()
            }
        }
    }
}

/// Desktop sleep provider using tokio timer
#[derive(Clone, Default)]
pub struct DesktopSleepProvider;

impl SleepProvider for DesktopSleepProvider {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        Box::pin(async move {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        })
    }
}

/// Desktop navigator
///
/// There is no page to leave in the headless runner; navigation is logged.
#[derive(Clone, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, href: &str) {
        tracing::info!(href, "Navigation requested");
    }
}
