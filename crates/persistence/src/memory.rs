use codex_ports::{StateStore, StoreResult};
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory keyed store
///
/// Thread-safe storage using DashMap.
/// Suitable for tests and ephemeral runs; clones share the same map.
pub struct InMemoryStore {
    records: Arc<DashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryStore {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl StateStore for InMemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.records.get(key).map(|r| r.value().clone()))
    }

    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.records.remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "InMemoryStore"
    }
}
