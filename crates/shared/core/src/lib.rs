//! Codex Core Domain
//!
//! Pure domain types for the Codex idle game.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    ChoiceCatalog, ChoiceOption, EconomyState, Position, TradeOutcome, TradeSide, TypingBuffer,
};
pub use values::{Cash, Price, Symbol};
