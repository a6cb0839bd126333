//! Codex Ports
//!
//! Port definitions (traits) for the Codex idle game.
//! These define the boundaries between the game engine and the outside world:
//! durable keyed storage and the reference price provider.

mod error;
mod price_feed;
mod store;

pub use error::{FeedError, FeedResult, StoreError, StoreResult};
pub use price_feed::PriceFeed;
pub use store::StateStore;
