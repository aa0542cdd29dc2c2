//! Key/value persistence
//!
//! Only a handful of values survive a reload:
//! - `storyPlayed` flag
//! - `highScore`
//! - `settings` (JSON)
//!
//! Corrupted values are healed: replaced with the default and rewritten.

#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use std::collections::HashMap;
use std::fmt;

/// Storage keys
pub mod keys {
    pub const STORY_PLAYED: &str = "storyPlayed";
    pub const HIGH_SCORE: &str = "highScore";
    pub const SETTINGS: &str = "settings";
}

/// Store write failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend (e.g. LocalStorage) is not available
    Unavailable,
    /// Backend refused the write (quota, private mode)
    Rejected { key: String, reason: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "storage backend unavailable"),
            StoreError::Rejected { key, reason } => {
                write!(f, "storage rejected write to '{}': {}", key, reason)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// String-keyed persisted store
pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Write a value, logging instead of failing
pub fn write_or_warn(store: &mut dyn Store, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        log::warn!("Could not persist '{}': {}", key, e);
    }
}

/// Read a boolean flag. Anything other than "true"/"false" heals to false.
pub fn read_flag(store: &mut dyn Store, key: &str) -> bool {
    match store.get(key).as_deref() {
        None => false,
        Some("true") => true,
        Some("false") => false,
        Some(other) => {
            log::warn!("Invalid flag '{}' = {:?}, resetting", key, other);
            write_or_warn(store, key, "false");
            false
        }
    }
}

/// Read an unsigned integer. Unparsable values heal to `default`.
pub fn read_u64(store: &mut dyn Store, key: &str, default: u64) -> u64 {
    let Some(raw) = store.get(key) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(v) => v,
        Err(_) => {
            log::warn!("Invalid integer '{}' = {:?}, resetting to {}", key, raw, default);
            write_or_warn(store, key, &default.to_string());
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a"), None);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("1"));
        store.remove("a").unwrap();
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_read_flag() {
        let mut store = MemoryStore::new().with(keys::STORY_PLAYED, "true");
        assert!(read_flag(&mut store, keys::STORY_PLAYED));
        assert!(!read_flag(&mut store, "missing"));
    }

    #[test]
    fn test_corrupt_flag_heals() {
        let mut store = MemoryStore::new().with(keys::STORY_PLAYED, "yes please");
        assert!(!read_flag(&mut store, keys::STORY_PLAYED));
        assert_eq!(store.get(keys::STORY_PLAYED).as_deref(), Some("false"));
    }

    #[test]
    fn test_corrupt_integer_heals() {
        let mut store = MemoryStore::new().with(keys::HIGH_SCORE, "-12abc");
        assert_eq!(read_u64(&mut store, keys::HIGH_SCORE, 0), 0);
        assert_eq!(store.get(keys::HIGH_SCORE).as_deref(), Some("0"));
    }

    #[test]
    fn test_integer_tolerates_whitespace() {
        let mut store = MemoryStore::new().with(keys::HIGH_SCORE, " 420 ");
        assert_eq!(read_u64(&mut store, keys::HIGH_SCORE, 0), 420);
    }
}
