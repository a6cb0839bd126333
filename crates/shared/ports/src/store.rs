use crate::error::StoreResult;

/// Port for durable keyed storage
///
/// Values are opaque text records. Implementations:
/// - In-memory map for tests and ephemeral runs
/// - One-file-per-key directory for the headless binary
pub trait StateStore: Send + Sync {
    /// Read the record under `key`, `None` if absent
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write (insert or overwrite) the record under `key`
    fn put(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove the record under `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Get the store's name/identifier for debugging
    fn name(&self) -> &str {
        "StateStore"
    }
}
