//! Game - the orchestrator and its command surface
//!
//! Owns the shared [`Engine`] and the three background tasks (economy
//! clock, market simulator, typing simulator). Tasks are only ever
//! replaced cancel-then-spawn, so at most one of each runs.

use codex_core::{ChoiceOption, EconomyState, TradeOutcome, TradeSide};
use codex_persistence::{LoadOutcome, PersistenceStore};
use codex_ports::{PriceFeed, StateStore};
use log::info;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::choice::PresentedChoice;
use crate::config::GameConfig;
use crate::economy_clock::run_economy_clock;
use crate::engine::Engine;
use crate::error::Result;
use crate::events::GameEvent;
use crate::market::MarketSimulator;
use crate::typing::TypingSimulator;

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No background task is running
    Idle,
    /// Economy clock, market and typing animation are live
    Running,
}

/// A running idle game
///
/// Dropping it aborts every background task.
pub struct Game {
    engine: Arc<Engine>,
    tasks: tokio::sync::Mutex<Vec<JoinHandle<()>>>,
    /// Source of per-task seeds
    rng: Mutex<StdRng>,
    feed_task: Mutex<Option<JoinHandle<()>>>,
}

impl Game {
    /// Load any save, wire the stores and kick off the reference price fetch
    ///
    /// A restored save starts the background tasks immediately; a fresh game
    /// stays `Idle` until `start`.
    pub async fn boot(
        config: GameConfig,
        store: Arc<dyn StateStore>,
        feed: Arc<dyn PriceFeed>,
    ) -> Result<Self> {
        config.validate()?;

        let persistence = PersistenceStore::new(store, config.save_key.clone());
        let outcome = persistence.load();
        let restored = outcome.is_restored();
        let economy = match outcome {
            LoadOutcome::Restored(saved) => {
                info!(
                    "Restored save {} (cash {})",
                    persistence.key(),
                    saved.cash
                );
                saved.into_economy(config.default_exchange_rate)
            }
            LoadOutcome::Absent => {
                info!("No save under {}, starting fresh", persistence.key());
                config.initial_economy()
            }
        };

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let game = Self {
            engine: Arc::new(Engine::new(config, economy, persistence)),
            tasks: tokio::sync::Mutex::new(Vec::new()),
            rng: Mutex::new(rng),
            feed_task: Mutex::new(None),
        };

        game.spawn_rate_fetch(feed);
        if restored {
            game.start().await;
        }
        Ok(game)
    }

    /// Single non-blocking fetch; failure keeps the default rate
    fn spawn_rate_fetch(&self, feed: Arc<dyn PriceFeed>) {
        let engine = self.engine.clone();
        let handle = tokio::spawn(async move {
            match feed.reference_price().await {
                Ok(rate) => {
                    info!("Reference price from {}: {}", feed.name(), rate);
                    engine.set_exchange_rate(rate).await;
                }
                Err(e) => info!(
                    "{} unavailable, keeping default rate: {}",
                    feed.name(),
                    e
                ),
            }
        });
        *self.feed_task.lock() = Some(handle);
    }

    fn next_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.rng.lock().next_u64())
    }

    /// Cancel whatever runs, including a pending choice, and wait for it to end
    async fn stop_tasks(&self, tasks: &mut Vec<JoinHandle<()>>) {
        for handle in tasks.iter() {
            handle.abort();
        }
        for handle in tasks.drain(..) {
            let _ = handle.await;
        }
        if self.engine.choices().cancel() {
            info!("Pending choice cancelled");
        }
    }

    fn spawn_tasks(&self, tasks: &mut Vec<JoinHandle<()>>) {
        let engine = &self.engine;
        let market = MarketSimulator::new(&engine.config().market, self.next_rng());
        let typing = TypingSimulator::new(engine.clone(), self.next_rng());

        tasks.push(tokio::spawn(run_economy_clock(engine.clone())));
        tasks.push(tokio::spawn(market.run(engine.clone())));
        tasks.push(tokio::spawn(typing.run()));
    }

    /// Idle → Running; when already running, the tasks are restarted
    pub async fn start(&self) {
        let mut tasks = self.tasks.lock().await;
        self.stop_tasks(&mut tasks).await;
        self.spawn_tasks(&mut tasks);
        info!("Game started");
        self.engine.emit(GameEvent::Started);
    }

    /// Wipe progress and start over
    ///
    /// The reference exchange rate survives the reset.
    pub async fn reset(&self) {
        let mut tasks = self.tasks.lock().await;
        self.stop_tasks(&mut tasks).await;
        self.engine.reset_state().await;
        info!("Game reset");
        self.engine.emit(GameEvent::Reset);

        self.spawn_tasks(&mut tasks);
        self.engine.emit(GameEvent::Started);
    }

    /// Cancel everything and return to `Idle`; progress is already saved
    pub async fn shutdown(&self) {
        let mut tasks = self.tasks.lock().await;
        self.stop_tasks(&mut tasks).await;
        if let Some(feed) = self.feed_task.lock().take() {
            feed.abort();
        }
        info!("Game stopped");
        self.engine.emit(GameEvent::Stopped);
    }

    pub async fn buy(&self, symbol: &str) -> TradeOutcome {
        self.engine.trade(symbol, TradeSide::Buy).await
    }

    pub async fn sell(&self, symbol: &str) -> TradeOutcome {
        self.engine.trade(symbol, TradeSide::Sell).await
    }

    /// Resolve the pending choice with the option at `index`
    pub async fn choose(&self, index: usize) -> Result<ChoiceOption> {
        self.engine.resolve_choice(index).await
    }

    pub fn pending_choice(&self) -> Option<PresentedChoice> {
        self.engine.choices().pending()
    }

    /// Snapshot of cash, holdings and the reference rate
    pub async fn economy(&self) -> EconomyState {
        self.engine.economy().await
    }

    pub async fn buffer_text(&self) -> String {
        self.engine.buffer_text().await
    }

    pub async fn phase(&self) -> GamePhase {
        if self.tasks.lock().await.is_empty() {
            GamePhase::Idle
        } else {
            GamePhase::Running
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.engine.subscribe()
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        for handle in self.tasks.get_mut().iter() {
            handle.abort();
        }
        if let Some(feed) = self.feed_task.get_mut().take() {
            feed.abort();
        }
        self.engine.choices().cancel();
    }
}
