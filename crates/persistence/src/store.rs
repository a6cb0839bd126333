use codex_core::{Cash, EconomyState, Position, Price};
use codex_ports::{StateStore, StoreError};
use log::{debug, error, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{PersistenceError, Result};

/// Storage key of the current save schema
pub const DEFAULT_SAVE_KEY: &str = "codex-save-v3";

/// Decimal places kept for cash and prices after a load
///
/// Saves carry JSON floats; rounding back to the precision the market
/// produces makes save -> load exact.
const LOAD_DP: u32 = 4;

/// Largest cash balance or share price a save may hold (10^15)
///
/// Keeps `price * owned` and every sum of them well inside `Decimal` range.
const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Largest share count a save may hold
const MAX_OWNED: u32 = 1_000_000;

/// Persisted record: `{"cash": 10000.0, "stocks": [{symbol, price, owned}, ...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    #[serde(with = "rust_decimal::serde::float")]
    pub cash: Cash,
    pub stocks: Vec<Position>,
}

impl SavedGame {
    pub fn from_economy(economy: &EconomyState) -> Self {
        Self {
            cash: economy.cash(),
            stocks: economy.holdings().to_vec(),
        }
    }

    /// Rebuild the economy; the reference rate is never persisted
    pub fn into_economy(self, exchange_rate: Price) -> EconomyState {
        EconomyState::new(self.cash, self.stocks, exchange_rate)
    }

    /// Check the invariants a live economy always holds
    pub fn validate(&self) -> Result<()> {
        if self.cash < Decimal::ZERO {
            return Err(PersistenceError::InvalidState(format!(
                "negative cash {}",
                self.cash
            )));
        }
        if self.cash > MAX_AMOUNT {
            return Err(PersistenceError::InvalidState(format!(
                "cash {} out of range",
                self.cash
            )));
        }

        let mut seen = HashSet::new();
        for stock in &self.stocks {
            if stock.price <= Decimal::ZERO {
                return Err(PersistenceError::InvalidState(format!(
                    "non-positive price {} for {}",
                    stock.price, stock.symbol
                )));
            }
            if stock.price > MAX_AMOUNT || stock.owned > MAX_OWNED {
                return Err(PersistenceError::InvalidState(format!(
                    "{} out of range: price {}, owned {}",
                    stock.symbol, stock.price, stock.owned
                )));
            }
            if !seen.insert(stock.symbol.as_str()) {
                return Err(PersistenceError::InvalidState(format!(
                    "duplicate symbol {}",
                    stock.symbol
                )));
            }
        }
        Ok(())
    }

    fn normalized(mut self) -> Self {
        self.cash = self.cash.round_dp(LOAD_DP);
        for stock in &mut self.stocks {
            stock.price = stock.price.round_dp(LOAD_DP);
        }
        self
    }

    /// Parse and validate a raw record
    pub fn decode(raw: &str) -> Result<Self> {
        let saved: SavedGame = serde_json::from_str(raw)?;
        let saved = saved.normalized();
        saved.validate()?;
        Ok(saved)
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Result of a load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A valid save was found
    Restored(SavedGame),
    /// Nothing usable: caller starts from defaults
    Absent,
}

impl LoadOutcome {
    pub fn is_restored(&self) -> bool {
        matches!(self, LoadOutcome::Restored(_))
    }
}

/// Versioned save/load of the economy over a keyed store
pub struct PersistenceStore {
    store: Arc<dyn StateStore>,
    key: String,
}

impl PersistenceStore {
    pub fn new(store: Arc<dyn StateStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Create with the current schema key
    pub fn with_default_key(store: Arc<dyn StateStore>) -> Self {
        Self::new(store, DEFAULT_SAVE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialize `{cash, stocks}` and write it under the versioned key
    pub fn save(&self, economy: &EconomyState) -> Result<()> {
        let raw = SavedGame::from_economy(economy).encode()?;
        self.store.put(&self.key, &raw)?;
        debug!("Saved state under {} ({} bytes)", self.key, raw.len());
        Ok(())
    }

    /// Read the versioned key
    ///
    /// A malformed record (bad bytes, bad JSON, broken invariant) is purged
    /// and reported as `Absent`. A store that cannot be read at all is also
    /// `Absent`, but nothing is purged.
    pub fn load(&self) -> LoadOutcome {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Absent,
            Err(e @ StoreError::Corrupt(_)) => {
                self.discard(&PersistenceError::Store(e));
                return LoadOutcome::Absent;
            }
            Err(e) => {
                warn!("Could not read {} from {}: {}", self.key, self.store.name(), e);
                return LoadOutcome::Absent;
            }
        };

        match SavedGame::decode(&raw) {
            Ok(saved) => LoadOutcome::Restored(saved),
            Err(e) => {
                self.discard(&e);
                LoadOutcome::Absent
            }
        }
    }

    fn discard(&self, cause: &PersistenceError) {
        error!("Failed to load state under {}: {}", self.key, cause);
        if let Err(e) = self.purge() {
            warn!("Could not purge corrupted save {}: {}", self.key, e);
        }
    }

    /// Remove the persisted copy
    pub fn purge(&self) -> Result<()> {
        self.store.remove(&self.key)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;
    use rust_decimal_macros::dec;

    fn economy() -> EconomyState {
        let mut nvda = Position::new("NVDA", dec!(121.2345));
        nvda.owned = 2;
        EconomyState::new(
            dec!(10017.5),
            vec![nvda, Position::new("TSLA", dec!(350))],
            dec!(100000),
        )
    }

    #[test]
    fn test_save_then_load_is_equal() {
        let store = InMemoryStore::new();
        let persistence = PersistenceStore::with_default_key(Arc::new(store.clone()));

        let eco = economy();
        persistence.save(&eco).unwrap();

        match persistence.load() {
            LoadOutcome::Restored(saved) => {
                assert_eq!(saved.into_economy(dec!(100000)), eco);
            }
            LoadOutcome::Absent => panic!("save should be restored"),
        }
    }

    #[test]
    fn test_persisted_layout() {
        let raw = SavedGame::from_economy(&economy()).encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["cash"], serde_json::json!(10017.5));
        assert_eq!(value["stocks"][0]["symbol"], "NVDA");
        assert_eq!(value["stocks"][0]["owned"], 2);
        assert!(value["stocks"][0]["price"].is_number());
        assert!(value.get("exchange_rate").is_none());
    }

    #[test]
    fn test_missing_key_is_absent() {
        let persistence = PersistenceStore::with_default_key(Arc::new(InMemoryStore::new()));
        assert_eq!(persistence.load(), LoadOutcome::Absent);
    }

    #[test]
    fn test_malformed_record_is_purged() {
        let store = InMemoryStore::new();
        store.put(DEFAULT_SAVE_KEY, "{not json").unwrap();

        let persistence = PersistenceStore::with_default_key(Arc::new(store.clone()));
        assert_eq!(persistence.load(), LoadOutcome::Absent);
        assert!(!store.contains(DEFAULT_SAVE_KEY));
    }

    #[test]
    fn test_invariant_violations_are_purged() {
        let bad = [
            r#"{"cash": -1, "stocks": []}"#,
            r#"{"cash": 5, "stocks": [{"symbol": "X", "price": 0, "owned": 1}]}"#,
            r#"{"cash": 5, "stocks": [{"symbol": "X", "price": 2, "owned": -1}]}"#,
            r#"{"cash": 5, "stocks": [
                {"symbol": "X", "price": 2, "owned": 0},
                {"symbol": "X", "price": 3, "owned": 0}
            ]}"#,
            r#"{"stocks": []}"#,
        ];

        for raw in bad {
            let store = InMemoryStore::new();
            store.put(DEFAULT_SAVE_KEY, raw).unwrap();
            let persistence = PersistenceStore::with_default_key(Arc::new(store.clone()));

            assert_eq!(persistence.load(), LoadOutcome::Absent, "{raw}");
            assert!(!store.contains(DEFAULT_SAVE_KEY), "{raw} should be purged");
        }
    }

    #[test]
    fn test_out_of_range_magnitudes_are_purged() {
        let bad = [
            r#"{"cash": 5e28, "stocks": [{"symbol": "X", "price": 5e28, "owned": 2}]}"#,
            r#"{"cash": 1e16, "stocks": []}"#,
            r#"{"cash": 5, "stocks": [{"symbol": "X", "price": 1e16, "owned": 0}]}"#,
            r#"{"cash": 5, "stocks": [{"symbol": "X", "price": 2, "owned": 4000000000}]}"#,
        ];

        for raw in bad {
            assert!(SavedGame::decode(raw).is_err(), "{raw}");

            let store = InMemoryStore::new();
            store.put(DEFAULT_SAVE_KEY, raw).unwrap();
            let persistence = PersistenceStore::with_default_key(Arc::new(store.clone()));
            assert_eq!(persistence.load(), LoadOutcome::Absent, "{raw}");
            assert!(!store.contains(DEFAULT_SAVE_KEY), "{raw} should be purged");
        }

        let edge = r#"{"cash": 1000000000000000, "stocks": [
            {"symbol": "X", "price": 1000000000000000, "owned": 1000000}
        ]}"#;
        let eco = SavedGame::decode(edge).unwrap().into_economy(dec!(100000));
        assert_eq!(eco.net_worth(), dec!(1000001000000000000000));
    }

    #[test]
    fn test_other_keys_are_invisible() {
        let store = InMemoryStore::new();
        store
            .put("codex-save-v2", r#"{"cash": 99999, "stocks": []}"#)
            .unwrap();

        let persistence = PersistenceStore::with_default_key(Arc::new(store.clone()));
        assert_eq!(persistence.load(), LoadOutcome::Absent);
        // The older save is neither read nor touched
        assert!(store.contains("codex-save-v2"));
    }

    #[test]
    fn test_loads_unrounded_float_save() {
        let raw = r#"{"cash":10137.5,"stocks":[
            {"symbol":"NVDA","price":120.9912345678,"owned":1},
            {"symbol":"TSLA","price":350,"owned":0}
        ]}"#;
        let saved = SavedGame::decode(raw).unwrap();
        assert_eq!(saved.cash, dec!(10137.5));
        assert_eq!(saved.stocks[0].price, dec!(120.9912));
        assert_eq!(saved.stocks[0].owned, 1);
    }
}
