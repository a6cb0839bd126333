//! Codex Runner - Idle Game Orchestration
//!
//! Wires the domain, clock, persistence and price feed into a playable game:
//!
//! - **Economy clock**: passive income every tick
//! - **Market simulator**: random walk over the stock basket
//! - **Typing simulator**: the coding animation with choice branches
//! - **Choice engine**: one pending reward choice at a time
//! - **Game**: lifecycle and command surface
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//!   │ Economy clock│  │    Market    │  │    Typing    │
//!   │   (1s tick)  │  │  (30s tick)  │  │  simulator   │
//!   └──────┬───────┘  └──────┬───────┘  └──────┬───────┘
//!          │ accrue          │ reprice         │ edit / offer choice
//!          ▼                 ▼                 ▼
//!   ┌─────────────────────────────────────────────────┐
//!   │ Engine: RwLock<GameState> + ChoiceEngine        │──► broadcast<GameEvent>
//!   └───────────────────────┬─────────────────────────┘
//!                           │ save after each mutation
//!                           ▼
//!                  ┌─────────────────┐
//!                  │ PersistenceStore│
//!                  └─────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod game;

mod choice;
mod economy_clock;
mod engine;
mod market;
mod typing;

// Re-export main types
pub use choice::PresentedChoice;
pub use config::{ConfigError, GameConfig, load_config, load_default_config};
pub use error::{GameError, Result};
pub use events::GameEvent;
pub use game::{Game, GamePhase};
