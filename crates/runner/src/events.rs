use codex_core::{Cash, ChoiceOption, Price, Symbol, TradeSide};

use crate::choice::PresentedChoice;

/// Notifications published by a running game
///
/// Delivered over a broadcast channel; slow subscribers may lag and miss
/// events, the game never waits for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Background tasks were (re)spawned
    Started,
    /// State was wiped back to defaults
    Reset,
    /// Tasks were cancelled by `shutdown`
    Stopped,
    /// An economy tick landed; `cash` is the new balance
    Income { cash: Cash },
    /// Every price moved by one market tick
    MarketMoved,
    /// A buy or sell executed
    Trade {
        symbol: Symbol,
        side: TradeSide,
        price: Price,
    },
    /// A choice branch is waiting for `choose`
    ChoiceOffered(PresentedChoice),
    /// The pending choice was resolved and its reward applied
    ChoiceResolved { choice_id: u64, option: ChoiceOption },
    /// The typing buffer overflowed and was emptied
    BufferCleared,
    /// The reference price feed answered
    ExchangeRateUpdated(Price),
}
