//! Key-value persistence backends.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StorageError;

/// Byte-oriented persistent storage with string keys.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QuotaExceeded`] when the write would take the
    /// store past its quota, or another [`StorageError`] on backend failure.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

fn byte_len(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

/// In-process store, optionally bounded by a byte quota over keys and values.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    quota: Option<u64>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quota(quota_bytes: u64) -> Self {
        Self {
            entries: Mutex::default(),
            quota: Some(quota_bytes),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut entries = self.lock();
        if let Some(quota) = self.quota {
            let others: u64 = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| byte_len(k.len() + v.len()))
                .sum();
            let needed = others + byte_len(key.len() + value.len());
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota: Option<u64>,
}

impl FileStore {
    /// Opens (creating if needed) the store directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>, quota_bytes: Option<u64>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            quota: quota_bytes,
        })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// Bytes used by every stored file except `exclude`.
    fn used_bytes(&self, exclude: &Path) -> Result<u64, StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.dir.clone(),
            source,
        };
        let mut total = 0;
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if entry.path() == exclude {
                continue;
            }
            let meta = entry.metadata().map_err(io_err)?;
            if meta.is_file() {
                total += meta.len();
            }
        }
        Ok(total)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if let Some(quota) = self.quota {
            let needed = self.used_bytes(&path)? + byte_len(value.len());
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        // Write to a sibling file then rename so a crash never leaves a
        // half-written value.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_overwrites() {
        let store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.set("k", b"one").unwrap();
        store.set("k", b"two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"two"[..]));
    }

    #[test]
    fn memory_store_quota_counts_keys_and_values() {
        let store = MemoryStore::with_quota(10);
        store.set("ab", b"12345678").unwrap();
        // Replacing the same key only counts the new value.
        store.set("ab", b"87654321").unwrap();
        let err = store.set("c", b"1").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                needed: 12,
                quota: 10,
                ..
            }
        ));
        assert_eq!(store.get("ab").unwrap().as_deref(), Some(&b"87654321"[..]));
    }

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("inv"), None).unwrap();
        assert!(store.get("agriInventory").unwrap().is_none());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path(), None).unwrap();
        assert!(matches!(
            store.set("../escape", b"x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
    }
}
