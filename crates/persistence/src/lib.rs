//! Codex Persistence
//!
//! Saves and restores the player's economy under a single versioned key.
//!
//! - **Store adapters**: [`InMemoryStore`] and [`FileStore`] implement the
//!   `StateStore` port
//! - **PersistenceStore**: JSON encode/decode of `{cash, stocks}`, with
//!   purge-on-corruption
//!
//! ## Versioning
//!
//! The schema version lives only in the key name (`codex-save-v3`). A build
//! with a different key never sees older saves; nothing is migrated.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::{PersistenceError, Result};
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use store::{DEFAULT_SAVE_KEY, LoadOutcome, PersistenceStore, SavedGame};
