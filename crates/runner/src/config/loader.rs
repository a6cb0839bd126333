use rust_decimal::Decimal;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::types::GameConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Load game configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<GameConfig, ConfigError> {
    let default_config = include_str!("game_config.json");
    load_config_from_str(default_config)
}

/// Options shown per choice branch; the prompt always has three slots
pub const PRESENTED_OPTIONS: usize = 3;

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}

fn check_probability(name: &str, p: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(invalid(format!("{name} must be within [0, 1], got {p}")));
    }
    Ok(())
}

impl GameConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.save_key.trim().is_empty() {
            return Err(invalid("save_key is empty"));
        }
        if self.initial_cash < Decimal::ZERO {
            return Err(invalid("initial_cash is negative"));
        }
        if self.default_exchange_rate <= Decimal::ZERO {
            return Err(invalid("default_exchange_rate must be positive"));
        }
        if self.time_scale.is_degenerate() {
            return Err(invalid(format!(
                "time_scale factor must be non-zero: {:?}",
                self.time_scale
            )));
        }

        if self.economy.income_per_tick < Decimal::ZERO {
            return Err(invalid("economy.income_per_tick is negative"));
        }
        if self.economy.tick_interval_ms == 0 {
            return Err(invalid("economy.tick_interval_ms must be non-zero"));
        }

        let market = &self.market;
        if market.tick_interval_ms == 0 {
            return Err(invalid("market.tick_interval_ms must be non-zero"));
        }
        if !(0.0..1.0).contains(&market.volatility) {
            return Err(invalid(format!(
                "market.volatility must be within [0, 1), got {}",
                market.volatility
            )));
        }
        if market.price_floor <= Decimal::ZERO {
            return Err(invalid("market.price_floor must be positive"));
        }
        let mut symbols = HashSet::new();
        for stock in &market.stocks {
            if !symbols.insert(stock.symbol.as_str()) {
                return Err(invalid(format!("duplicate stock symbol {}", stock.symbol)));
            }
            if stock.price < market.price_floor {
                return Err(invalid(format!(
                    "{} starts below the price floor",
                    stock.symbol
                )));
            }
        }

        let typing = &self.typing;
        if typing.corpus.is_empty() {
            return Err(invalid("typing.corpus is empty"));
        }
        if typing.char_delay_ms.min > typing.char_delay_ms.max
            || typing.backspace_delay_ms.min > typing.backspace_delay_ms.max
        {
            return Err(invalid("typing delay ranges need min <= max"));
        }
        if typing.max_backspace == 0 {
            return Err(invalid("typing.max_backspace must be at least 1"));
        }
        check_probability("typing.backspace_probability", typing.backspace_probability)?;

        let choices = &self.choices;
        check_probability("choices.probability", choices.probability)?;
        if choices.presented != PRESENTED_OPTIONS {
            return Err(invalid(format!(
                "choices.presented must be {PRESENTED_OPTIONS}, got {}",
                choices.presented
            )));
        }
        if choices.catalog.len() < choices.presented {
            return Err(invalid(format!(
                "choice catalog holds {} options, {} are presented",
                choices.catalog.len(),
                choices.presented
            )));
        }
        if choices.catalog.options().iter().any(|o| o.reward < Decimal::ZERO) {
            return Err(invalid("choice rewards must be non-negative"));
        }

        Ok(())
    }
}
