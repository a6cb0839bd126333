use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Price, Symbol};

/// Holding in a single stock of the fixed basket
///
/// The serialized form is also the persisted record:
/// `{"symbol": "NVDA", "price": 120.0, "owned": 0}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Ticker symbol (unique within the basket)
    pub symbol: Symbol,

    /// Current market price, never below the market floor once perturbed
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Price,

    /// Shares held
    pub owned: u32,
}

impl Position {
    /// Create a position with no shares held
    pub fn new(symbol: impl Into<Symbol>, price: Price) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            owned: 0,
        }
    }

    /// Market value of the shares held
    pub fn value(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.owned))
    }

    /// Multiply the price by `multiplier`, then clamp to `floor`
    ///
    /// The result is rounded to `dp` decimal places so repeated
    /// perturbations don't accumulate unbounded scale. Saturates at
    /// `Decimal::MAX`.
    pub fn reprice(&mut self, multiplier: Decimal, floor: Price, dp: u32) {
        let moved = self.price.saturating_mul(multiplier).round_dp(dp);
        self.price = moved.max(floor);
    }
}
