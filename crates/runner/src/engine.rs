//! Shared game core used by every background task
//!
//! `GameState` lives behind one `RwLock`. Each named operation takes the
//! write guard, mutates, saves and publishes without awaiting in between,
//! so a save always reflects the mutation that triggered it.

use codex_clock::GameClock;
use codex_core::{ChoiceOption, EconomyState, Price, TradeOutcome, TradeSide, TypingBuffer};
use codex_persistence::PersistenceStore;
use log::{debug, info, warn};
use tokio::sync::{RwLock, broadcast};

use crate::choice::ChoiceEngine;
use crate::config::GameConfig;
use crate::error::Result;
use crate::events::GameEvent;
use crate::market::MarketSimulator;

const EVENT_CAPACITY: usize = 1024;

/// Everything mutable in a game
#[derive(Debug, Clone)]
pub(crate) struct GameState {
    pub economy: EconomyState,
    pub buffer: TypingBuffer,
}

pub(crate) struct Engine {
    config: GameConfig,
    clock: GameClock,
    choices: ChoiceEngine,
    state: RwLock<GameState>,
    persistence: PersistenceStore,
    events: broadcast::Sender<GameEvent>,
}

impl Engine {
    pub fn new(config: GameConfig, economy: EconomyState, persistence: PersistenceStore) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            clock: GameClock::new(config.time_scale),
            choices: ChoiceEngine::new(config.choices.catalog.clone(), config.choices.presented),
            state: RwLock::new(GameState {
                economy,
                buffer: TypingBuffer::new(),
            }),
            config,
            persistence,
            events,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> GameClock {
        self.clock
    }

    pub fn choices(&self) -> &ChoiceEngine {
        &self.choices
    }

    pub fn emit(&self, event: GameEvent) {
        if self.events.send(event).is_err() {
            log::trace!("No game event subscribers");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    pub async fn economy(&self) -> EconomyState {
        self.state.read().await.economy.clone()
    }

    pub async fn buffer_text(&self) -> String {
        self.state.read().await.buffer.text()
    }

    /// Synchronous save, called with the state write guard held
    fn persist(&self, economy: &EconomyState) {
        if let Err(e) = self.persistence.save(economy) {
            warn!("Failed to save game state: {}", e);
        }
    }

    /// One economy tick
    pub async fn accrue_income(&self) {
        let mut state = self.state.write().await;
        state.economy.accrue(self.config.economy.income_per_tick);
        self.persist(&state.economy);

        let cash = state.economy.cash();
        debug!("Income tick, cash {}", cash);
        self.emit(GameEvent::Income { cash });
    }

    /// One market tick
    pub async fn move_market(&self, market: &mut MarketSimulator) {
        let mut state = self.state.write().await;
        market.tick(&mut state.economy);
        self.persist(&state.economy);
        self.emit(GameEvent::MarketMoved);
    }

    /// Buy or sell one share; rejected trades change and save nothing
    pub async fn trade(&self, symbol: &str, side: TradeSide) -> TradeOutcome {
        let mut state = self.state.write().await;
        let outcome = match side {
            TradeSide::Buy => state.economy.buy(symbol),
            TradeSide::Sell => state.economy.sell(symbol),
        };

        match outcome {
            TradeOutcome::Executed { price } => {
                self.persist(&state.economy);
                debug!("{} {} @ {}", side, symbol, price);
                self.emit(GameEvent::Trade {
                    symbol: symbol.to_string(),
                    side,
                    price,
                });
            }
            TradeOutcome::Rejected => debug!("{} {} rejected", side, symbol),
        }
        outcome
    }

    /// Resolve the pending choice: reward, save, publish, then wake the waiter
    pub async fn resolve_choice(&self, index: usize) -> Result<ChoiceOption> {
        let mut state = self.state.write().await;
        let resolution = self.choices.take(index)?;

        state.economy.apply_reward(resolution.option.reward);
        self.persist(&state.economy);
        info!(
            "Choice {} resolved: {}",
            resolution.choice_id, resolution.option
        );

        let option = resolution.option.clone();
        self.emit(GameEvent::ChoiceResolved {
            choice_id: resolution.choice_id,
            option: option.clone(),
        });
        if !resolution.complete() {
            debug!("Choice waiter already gone");
        }
        Ok(option)
    }

    /// Apply one edit to the typing buffer
    pub async fn edit_buffer<T>(&self, edit: impl FnOnce(&mut TypingBuffer) -> T) -> T {
        let mut state = self.state.write().await;
        edit(&mut state.buffer)
    }

    pub async fn buffer_line_count(&self) -> usize {
        self.state.read().await.buffer.line_count()
    }

    /// Wipe back to a fresh game, keeping the reference rate
    ///
    /// The purge happens first; nothing is saved until the next mutation.
    pub async fn reset_state(&self) {
        let mut state = self.state.write().await;
        if let Err(e) = self.persistence.purge() {
            warn!("Failed to purge saved game: {}", e);
        }

        let rate = state.economy.exchange_rate();
        let mut economy = self.config.initial_economy();
        economy.set_exchange_rate(rate);
        state.economy = economy;
        state.buffer.clear();
    }

    pub async fn set_exchange_rate(&self, rate: Price) {
        self.state.write().await.economy.set_exchange_rate(rate);
        self.emit(GameEvent::ExchangeRateUpdated(rate));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codex_persistence::{InMemoryStore, LoadOutcome};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn engine(store: &InMemoryStore) -> Engine {
        let config = GameConfig::default();
        let economy = config.initial_economy();
        let persistence = PersistenceStore::with_default_key(Arc::new(store.clone()));
        Engine::new(config, economy, persistence)
    }

    fn saved_cash(store: &InMemoryStore) -> Option<rust_decimal::Decimal> {
        match PersistenceStore::with_default_key(Arc::new(store.clone())).load() {
            LoadOutcome::Restored(saved) => Some(saved.cash),
            LoadOutcome::Absent => None,
        }
    }

    #[tokio::test]
    async fn test_income_is_saved_with_the_tick() {
        let store = InMemoryStore::new();
        let engine = engine(&store);
        let mut events = engine.subscribe();

        engine.accrue_income().await;

        assert_eq!(saved_cash(&store), Some(dec!(10013.75)));
        assert_eq!(
            events.recv().await.unwrap(),
            GameEvent::Income {
                cash: dec!(10013.75)
            }
        );
    }

    #[tokio::test]
    async fn test_rejected_trade_saves_nothing() {
        let store = InMemoryStore::new();
        let engine = engine(&store);

        let outcome = engine.trade("NVDA", TradeSide::Sell).await;
        assert_eq!(outcome, TradeOutcome::Rejected);
        assert!(store.is_empty());

        let outcome = engine.trade("NVDA", TradeSide::Buy).await;
        assert_eq!(outcome, TradeOutcome::Executed { price: dec!(120) });
        assert_eq!(saved_cash(&store), Some(dec!(9880)));
    }

    #[tokio::test]
    async fn test_resolve_choice_applies_reward_once() {
        let store = InMemoryStore::new();
        let engine = engine(&store);
        let mut rng = StdRng::seed_from_u64(8);
        let (choice, rx) = engine.choices().offer(&mut rng);

        let option = engine.resolve_choice(0).await.unwrap();
        assert_eq!(option, choice.options[0]);
        assert_eq!(rx.await.unwrap(), option);
        assert_eq!(engine.economy().await.cash(), dec!(10000) + option.reward);
        assert_eq!(saved_cash(&store), Some(dec!(10000) + option.reward));

        assert!(engine.resolve_choice(0).await.is_err());
        assert_eq!(engine.economy().await.cash(), dec!(10000) + option.reward);
    }

    #[tokio::test]
    async fn test_reset_keeps_rate_and_purges() {
        let store = InMemoryStore::new();
        let engine = engine(&store);
        engine.set_exchange_rate(dec!(65000)).await;
        engine.trade("TSLA", TradeSide::Buy).await;
        engine.edit_buffer(|b| b.insert_str("x\ny")).await;

        engine.reset_state().await;

        let eco = engine.economy().await;
        assert_eq!(eco.cash(), dec!(10000));
        assert_eq!(eco.position("TSLA").unwrap().owned, 0);
        assert_eq!(eco.exchange_rate(), dec!(65000));
        assert_eq!(engine.buffer_text().await, "");
        assert!(store.is_empty());
    }
}
