//! Codex Clock
//!
//! Paces every periodic and randomized wait in the game:
//!
//! ```text
//! game duration ──► TimeScale ──► real (tokio) duration
//!   1s economy tick      Fast(10)       100ms
//!   30s market tick      Normal         30s
//!   80ms keystroke       Slow(2)        160ms
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use codex_clock::{GameClock, TimeScale};
//! use std::time::Duration;
//!
//! let clock = GameClock::new(TimeScale::Fast(10));
//! let mut ticks = clock.interval(Duration::from_secs(1));
//! ticks.tick().await;                              // ~100ms of wall time
//! clock.sleep(Duration::from_millis(80)).await;    // ~8ms of wall time
//! ```
//!
//! Tests run under tokio's paused clock, so a `Normal` scale is still instant.

mod game;
mod scale;

pub use game::GameClock;
pub use scale::TimeScale;
