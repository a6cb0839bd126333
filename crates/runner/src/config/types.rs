use codex_clock::TimeScale;
use codex_core::{Cash, ChoiceCatalog, EconomyState, Position, Price, Symbol};
use rand::Rng;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level game configuration
///
/// Every field has a default matching the shipped game, so a config file
/// only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Storage key of the save; changing it orphans older saves
    pub save_key: String,
    /// Cash of a fresh game
    #[serde(with = "rust_decimal::serde::float")]
    pub initial_cash: Cash,
    /// Reference price kept when the external feed fails
    #[serde(with = "rust_decimal::serde::float")]
    pub default_exchange_rate: Price,
    /// Pacing of every timer in the game
    pub time_scale: TimeScale,
    /// Seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
    pub economy: EconomyConfig,
    pub market: MarketConfig,
    pub typing: TypingConfig,
    pub choices: ChoiceConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_key: "codex-save-v3".to_string(),
            initial_cash: dec!(10000),
            default_exchange_rate: dec!(100000),
            time_scale: TimeScale::Normal,
            seed: None,
            economy: EconomyConfig::default(),
            market: MarketConfig::default(),
            typing: TypingConfig::default(),
            choices: ChoiceConfig::default(),
        }
    }
}

impl GameConfig {
    /// Fresh economy: initial cash, the configured basket, default rate
    pub fn initial_economy(&self) -> EconomyState {
        let holdings = self
            .market
            .stocks
            .iter()
            .map(|s| Position::new(s.symbol.clone(), s.price))
            .collect();
        EconomyState::new(self.initial_cash, holdings, self.default_exchange_rate)
    }
}

/// Passive income settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Cash added every economy tick
    #[serde(with = "rust_decimal::serde::float")]
    pub income_per_tick: Cash,
    pub tick_interval_ms: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            income_per_tick: dec!(13.75),
            tick_interval_ms: 1_000,
        }
    }
}

impl EconomyConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// One stock of the fixed basket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockConfig {
    pub symbol: Symbol,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Price,
}

impl StockConfig {
    pub fn new(symbol: impl Into<Symbol>, price: Price) -> Self {
        Self {
            symbol: symbol.into(),
            price,
        }
    }
}

/// Random-walk market settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub tick_interval_ms: u64,
    /// Half-width of the uniform per-tick move (0.01 = ±1%)
    pub volatility: f64,
    /// Lowest price any stock can reach
    #[serde(with = "rust_decimal::serde::float")]
    pub price_floor: Price,
    /// Decimal places kept after each move
    pub price_dp: u32,
    pub stocks: Vec<StockConfig>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 30_000,
            volatility: 0.01,
            price_floor: dec!(1),
            price_dp: 4,
            stocks: vec![
                StockConfig::new("NVDA", dec!(120)),
                StockConfig::new("TSLA", dec!(350)),
                StockConfig::new("AAPL", dec!(220)),
                StockConfig::new("MSFT", dec!(420)),
                StockConfig::new("GOOGL", dec!(150)),
                StockConfig::new("AMZN", dec!(180)),
                StockConfig::new("META", dec!(500)),
                StockConfig::new("NFLX", dec!(650)),
            ],
        }
    }
}

impl MarketConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Uniform delay window in milliseconds, `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min: u64,
    pub max: u64,
}

impl DelayRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Draw a delay; a collapsed window always yields `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let ms = if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        };
        Duration::from_millis(ms)
    }
}

/// Typing animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Pause after every typed char
    pub char_delay_ms: DelayRange,
    /// Pause after every deleted char
    pub backspace_delay_ms: DelayRange,
    /// Chance of a correction burst after a typed char
    pub backspace_probability: f64,
    /// Longest correction burst
    pub max_backspace: u32,
    /// Line count above which the buffer is cleared
    pub max_lines: usize,
    /// Pause around each phase of a buffer clear
    pub clear_pause_ms: u64,
    /// Shown between the two clear phases
    pub clear_placeholder: String,
    /// Lines the simulated developer types
    pub corpus: Vec<String>,
}

impl Default for TypingConfig {
    fn default() -> Self {
        let corpus = [
            r#"const greeting = "Hello, World!";"#,
            "function add(a, b) {",
            "  return a + b;",
            "}",
            "let sum = add(5, 10);",
            "console.log(sum);",
            "if (sum > 10) {",
            r#"  console.log("Large");"#,
            "} else {",
            r#"  console.log("Small");"#,
            "}",
            "for (let i = 0; i < 5; i++) {",
            "  console.log(i);",
            "}",
            "class ApiClient {",
            "  constructor(baseUrl) {",
            "    this.baseUrl = baseUrl;",
            "  }",
            "  async fetch(endpoint) {",
            "    const res = await fetch(this.baseUrl + endpoint);",
            "    return res.json();",
            "  }",
            "}",
        ];

        Self {
            char_delay_ms: DelayRange::new(30, 130),
            backspace_delay_ms: DelayRange::new(40, 140),
            backspace_probability: 0.04,
            max_backspace: 3,
            max_lines: 50,
            clear_pause_ms: 1_000,
            clear_placeholder: "// Clearing buffer...\n".to_string(),
            corpus: corpus.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl TypingConfig {
    pub fn clear_pause(&self) -> Duration {
        Duration::from_millis(self.clear_pause_ms)
    }
}

/// Choice branch settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoiceConfig {
    /// Chance of a choice branch after each typed line
    pub probability: f64,
    /// Options shown per branch; validation only accepts 3
    pub presented: usize,
    /// Resolve unanswered choices with a random option after this long;
    /// `None` waits forever
    pub auto_choose_after_ms: Option<u64>,
    pub catalog: ChoiceCatalog,
}

impl Default for ChoiceConfig {
    fn default() -> Self {
        Self {
            probability: 0.15,
            presented: 3,
            auto_choose_after_ms: None,
            catalog: ChoiceCatalog::default(),
        }
    }
}

impl ChoiceConfig {
    pub fn auto_choose_after(&self) -> Option<Duration> {
        self.auto_choose_after_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_initial_economy() {
        let config = GameConfig::default();
        let eco = config.initial_economy();

        assert_eq!(eco.cash(), dec!(10000));
        assert_eq!(eco.holdings().len(), 8);
        assert_eq!(eco.position("NVDA").unwrap().price, dec!(120));
        assert!(eco.holdings().iter().all(|p| p.owned == 0));
        assert_eq!(eco.exchange_rate(), dec!(100000));
    }

    #[test]
    fn test_delay_range_sampling() {
        let mut rng = StdRng::seed_from_u64(3);
        let range = DelayRange::new(30, 130);
        for _ in 0..500 {
            let d = range.sample(&mut rng);
            assert!(d >= Duration::from_millis(30) && d < Duration::from_millis(130));
        }

        let fixed = DelayRange::new(50, 50);
        assert_eq!(fixed.sample(&mut rng), Duration::from_millis(50));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"economy": {"income_per_tick": 2.5}}"#).unwrap();

        assert_eq!(config.economy.income_per_tick, dec!(2.5));
        assert_eq!(config.economy.tick_interval_ms, 1_000);
        assert_eq!(config.market, MarketConfig::default());
    }
}
