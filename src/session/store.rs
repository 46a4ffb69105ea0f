//! Key/value storage for saved games.

use rustc_hash::FxHashMap;

/// Where snapshots are persisted, e.g. browser local storage or a file.
pub trait SnapshotStore {
    /// Read the value stored under `key`.
    fn load(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: String);

    /// Delete the value under `key`.
    fn remove(&mut self, key: &str);
}

/// In-process store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load("k").is_none());

        store.save("k", "v1".into());
        store.save("k", "v2".into());
        assert_eq!(store.load("k").as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        store.remove("k");
        assert!(store.is_empty());
    }
}
