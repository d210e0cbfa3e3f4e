//! Storage layer for durable key-value state
//!
//! The stores persist JSON blobs under well-known keys. `StorageBackend` is
//! the injection seam: production uses one file per key in the user config
//! directory, tests use the in-memory backend.

use crate::config::app::NAME;
use crate::error::{AppError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable key-value storage for JSON payloads
pub trait StorageBackend: Send + Sync {
    /// Read the value for a key; `None` if the key is absent or empty
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write the value for a key, replacing any previous value
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Load and parse a JSON payload from storage
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn StorageBackend,
    key: &str,
) -> Result<Option<T>> {
    let raw = match storage.read(key)? {
        Some(raw) => raw,
        None => return Ok(None),
    };

    let data = serde_json::from_str(&raw)
        .map_err(|e| AppError::Storage(format!("Failed to parse '{}': {}", key, e)))?;

    Ok(Some(data))
}

/// Serialize a payload to JSON and write it to storage
pub fn save_json<T: Serialize>(storage: &dyn StorageBackend, key: &str, data: &T) -> Result<()> {
    let raw = serde_json::to_string(data)
        .map_err(|e| AppError::Storage(format!("Failed to serialize '{}': {}", key, e)))?;
    storage.write(key, &raw)
}

// =============================================================================
// FileStorage - one JSON file per key
// =============================================================================

/// Get the application config directory path
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir().map(|p| p.join(NAME)).ok_or_else(|| {
        AppError::Config(
            "Could not determine config directory. HOME environment variable may not be set."
                .to_string(),
        )
    })
}

/// Create a directory if it doesn't exist, with proper error handling
fn create_dir_if_needed(path: &Path) -> Result<()> {
    match fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let msg = match e.kind() {
                ErrorKind::PermissionDenied => {
                    format!("Permission denied: cannot create directory {:?}", path)
                }
                _ => format!("Failed to create directory {:?}: {}", path, e),
            };
            Err(AppError::Storage(msg))
        }
    }
}

/// File-backed storage in a directory, one `<key>.json` file per key
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage under the default config directory
    pub fn new() -> Result<Self> {
        Ok(Self { dir: config_dir()? })
    }

    /// Create storage under a custom directory (for testing)
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The directory files are written to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => {
                // An empty file is treated as an absent key
                if content.trim().is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(content))
                }
            }
            Err(e) => match e.kind() {
                ErrorKind::NotFound => Ok(None),
                ErrorKind::PermissionDenied => Err(AppError::Storage(format!(
                    "Permission denied: cannot read {:?}",
                    path
                ))),
                _ => Err(AppError::Storage(format!(
                    "Failed to read {:?}: {}",
                    path, e
                ))),
            },
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        create_dir_if_needed(&self.dir)?;
        let path = self.path_for(key);
        match fs::write(&path, value) {
            Ok(()) => Ok(()),
            Err(e) => {
                let msg = match e.kind() {
                    ErrorKind::PermissionDenied => {
                        format!("Permission denied: cannot write to {:?}", path)
                    }
                    ErrorKind::ReadOnlyFilesystem => {
                        format!("Cannot write to {:?}: filesystem is read-only", path)
                    }
                    _ => format!("Failed to write to {:?}: {}", path, e),
                };
                Err(AppError::Storage(msg))
            }
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) => match e.kind() {
                ErrorKind::NotFound => Ok(()), // Already gone, that's fine
                _ => Err(AppError::Storage(format!(
                    "Failed to delete {:?}: {}",
                    path, e
                ))),
            },
        }
    }
}

// =============================================================================
// MemoryStorage - in-memory backend for tests and embedding
// =============================================================================

/// In-memory storage backend
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key with a raw value (for hydration tests)
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).filter(|v| !v.trim().is_empty()).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }
}
