//! Key-value persistence port
//!
//! The board snapshot and the opponent flags are kept behind a tiny
//! string-to-string store. Tests use [`MemoryStore`]; the desktop app uses
//! [`JsonFileStore`], which mirrors the whole key space into one JSON file.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, warn};

/// Key holding the serialized board
pub const ITEMS_KEY: &str = "items";
/// Key holding the automated-opponent flag ("0"/"1")
pub const AUTOMATED_KEY: &str = "AI";
/// Key holding the alternate-generator flag ("0"/"1")
pub const NETWORK_KEY: &str = "NN";

/// Synchronous string store. Failures are not reported to callers.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// Store handle shared between the board and the game.
pub type SharedStore = Rc<RefCell<dyn KeyValueStore>>;

/// Wrap a store into a [`SharedStore`] handle.
pub fn shared<S: KeyValueStore + 'static>(store: S) -> SharedStore {
    Rc::new(RefCell::new(store))
}

/// Read a "0"/"1" flag; anything that is not a non-zero number reads as off.
pub fn read_flag(store: &dyn KeyValueStore, key: &str) -> bool {
    store
        .get(key)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .is_some_and(|n| n != 0)
}

/// Write a flag as "0"/"1".
pub fn write_flag(store: &mut dyn KeyValueStore, key: &str, on: bool) {
    store.set(key, if on { "1" } else { "0" }.to_string());
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Store persisted as a single JSON object on disk.
///
/// Every mutation rewrites the file. Read or write failures are logged and the
/// in-memory copy stays authoritative.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file is missing or unreadable.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "discarding unreadable store");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read store");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), keys = entries.len(), "opened store");
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let result = serde_json::to_string_pretty(&self.entries)
            .map_err(std::io::Error::from)
            .and_then(|json| std::fs::write(&self.path, json));
        if let Err(e) = result {
            warn!(path = %self.path.display(), error = %e, "failed to write store");
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.get("a").is_none());
        store.set("a", "1".to_string());
        assert_eq!(store.get("a").as_deref(), Some("1"));
        store.remove("a");
        assert!(store.is_empty());
    }

    #[test]
    fn test_flags_read_as_numbers() {
        let mut store = MemoryStore::new();
        assert!(!read_flag(&store, AUTOMATED_KEY));
        write_flag(&mut store, AUTOMATED_KEY, true);
        assert_eq!(store.get(AUTOMATED_KEY).as_deref(), Some("1"));
        assert!(read_flag(&store, AUTOMATED_KEY));
        write_flag(&mut store, AUTOMATED_KEY, false);
        assert_eq!(store.get(AUTOMATED_KEY).as_deref(), Some("0"));
        assert!(!read_flag(&store, AUTOMATED_KEY));

        store.set(NETWORK_KEY, "garbage".to_string());
        assert!(!read_flag(&store, NETWORK_KEY));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let mut store = JsonFileStore::open(&path);
            store.set(AUTOMATED_KEY, "1".to_string());
            store.set(ITEMS_KEY, "{}".to_string());
            store.remove(ITEMS_KEY);
        }

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get(AUTOMATED_KEY).as_deref(), Some("1"));
        assert!(store.get(ITEMS_KEY).is_none());
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert!(store.get(ITEMS_KEY).is_none());
    }
}
