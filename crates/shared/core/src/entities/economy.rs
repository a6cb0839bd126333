use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::Position;
use crate::values::{Cash, Price};

/// Result of a buy or sell command
///
/// Rejections are not errors: an unaffordable buy, a sell with nothing
/// held, or an unknown symbol all leave the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeOutcome {
    /// One share changed hands at `price`
    Executed { price: Price },
    /// Nothing changed
    Rejected,
}

impl TradeOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, TradeOutcome::Executed { .. })
    }
}

/// The player's cash and stock holdings
///
/// Every mutation goes through a named operation. `cash` never goes
/// negative: `buy` is the only operation that spends, and it refuses
/// anything unaffordable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EconomyState {
    cash: Cash,
    holdings: Vec<Position>,
    /// Price of one reference asset, used only for the derived
    /// net-worth-in-reference value
    exchange_rate: Price,
}

impl EconomyState {
    /// Create a state from cash, the ordered basket, and a reference rate
    ///
    /// Negative cash is clamped to zero.
    pub fn new(cash: Cash, holdings: Vec<Position>, exchange_rate: Price) -> Self {
        Self {
            cash: cash.max(Decimal::ZERO),
            holdings,
            exchange_rate,
        }
    }

    pub fn cash(&self) -> Cash {
        self.cash
    }

    pub fn holdings(&self) -> &[Position] {
        &self.holdings
    }

    pub fn exchange_rate(&self) -> Price {
        self.exchange_rate
    }

    /// Get the position for a symbol
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.holdings.iter().find(|p| p.symbol == symbol)
    }

    fn position_mut(&mut self, symbol: &str) -> Option<&mut Position> {
        self.holdings.iter_mut().find(|p| p.symbol == symbol)
    }

    /// Passive income: add a fixed increment to cash
    pub fn accrue(&mut self, income: Cash) {
        self.cash = self.cash.saturating_add(income.max(Decimal::ZERO));
    }

    /// Apply a choice reward to cash
    pub fn apply_reward(&mut self, reward: Cash) {
        self.cash = self.cash.saturating_add(reward.max(Decimal::ZERO));
    }

    /// Buy one share at the current price if cash covers it
    pub fn buy(&mut self, symbol: &str) -> TradeOutcome {
        let cash = self.cash;
        let Some(position) = self.position_mut(symbol) else {
            return TradeOutcome::Rejected;
        };
        if cash < position.price {
            return TradeOutcome::Rejected;
        }

        let price = position.price;
        position.owned += 1;
        self.cash -= price;
        TradeOutcome::Executed { price }
    }

    /// Sell one share at the current price if any are held
    pub fn sell(&mut self, symbol: &str) -> TradeOutcome {
        let Some(position) = self.position_mut(symbol) else {
            return TradeOutcome::Rejected;
        };
        if position.owned == 0 {
            return TradeOutcome::Rejected;
        }

        let price = position.price;
        position.owned -= 1;
        self.cash = self.cash.saturating_add(price);
        TradeOutcome::Executed { price }
    }

    /// Mutable access to every position, for market repricing
    pub fn positions_mut(&mut self) -> impl Iterator<Item = &mut Position> {
        self.holdings.iter_mut()
    }

    /// Replace the reference rate (external feed result)
    pub fn set_exchange_rate(&mut self, rate: Price) {
        if rate > Decimal::ZERO {
            self.exchange_rate = rate;
        }
    }

    /// Market value of all shares held
    pub fn stock_value(&self) -> Decimal {
        self.holdings
            .iter()
            .map(Position::value)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Cash plus stock value
    pub fn net_worth(&self) -> Decimal {
        self.cash.saturating_add(self.stock_value())
    }

    /// Net worth expressed in units of the reference asset (6 dp)
    pub fn net_worth_in_reference(&self) -> Decimal {
        if self.exchange_rate <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.net_worth() / self.exchange_rate).round_dp(6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn basket() -> Vec<Position> {
        vec![
            Position::new("NVDA", dec!(120)),
            Position::new("TSLA", dec!(350)),
        ]
    }

    fn state(cash: Decimal) -> EconomyState {
        EconomyState::new(cash, basket(), dec!(100000))
    }

    #[test]
    fn test_accrue_is_linear() {
        let mut eco = state(dec!(10000));
        for _ in 0..10 {
            eco.accrue(dec!(13.75));
        }
        assert_eq!(eco.cash(), dec!(10137.50));
    }

    #[test]
    fn test_buy_then_sell_round_trip() {
        let mut eco = state(dec!(10137.50));

        let outcome = eco.buy("NVDA");
        assert_eq!(outcome, TradeOutcome::Executed { price: dec!(120) });
        assert_eq!(eco.cash(), dec!(10017.50));
        assert_eq!(eco.position("NVDA").unwrap().owned, 1);

        let outcome = eco.sell("NVDA");
        assert!(outcome.is_executed());
        assert_eq!(eco.cash(), dec!(10137.50));
        assert_eq!(eco.position("NVDA").unwrap().owned, 0);
    }

    #[test]
    fn test_sell_uses_drifted_price() {
        let mut eco = state(dec!(10017.50));
        eco.buy("NVDA");
        let cash_after_buy = eco.cash();

        for pos in eco.positions_mut() {
            pos.reprice(dec!(1.01), dec!(1), 4);
        }

        assert_eq!(
            eco.sell("NVDA"),
            TradeOutcome::Executed { price: dec!(121.2) }
        );
        assert_eq!(eco.cash(), cash_after_buy + dec!(121.2));
    }

    #[test]
    fn test_buy_rejected_when_unaffordable() {
        let mut eco = state(dec!(119.99));
        let before = eco.clone();

        assert_eq!(eco.buy("NVDA"), TradeOutcome::Rejected);
        assert_eq!(eco, before);
    }

    #[test]
    fn test_buy_with_exact_cash_empties_wallet() {
        let mut eco = state(dec!(120));
        assert!(eco.buy("NVDA").is_executed());
        assert_eq!(eco.cash(), Decimal::ZERO);
    }

    #[test]
    fn test_sell_rejected_when_nothing_held() {
        let mut eco = state(dec!(500));
        let before = eco.clone();

        assert_eq!(eco.sell("TSLA"), TradeOutcome::Rejected);
        assert_eq!(eco, before);
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        let mut eco = state(dec!(500));
        assert_eq!(eco.buy("GME"), TradeOutcome::Rejected);
        assert_eq!(eco.sell("GME"), TradeOutcome::Rejected);
        assert_eq!(eco.cash(), dec!(500));
    }

    #[test]
    fn test_negative_inputs_never_reduce_cash() {
        let mut eco = EconomyState::new(dec!(-5), basket(), dec!(100000));
        assert_eq!(eco.cash(), Decimal::ZERO);

        eco.accrue(dec!(-10));
        eco.apply_reward(dec!(-10));
        assert_eq!(eco.cash(), Decimal::ZERO);
    }

    #[test]
    fn test_huge_values_saturate() {
        let mut whale = Position::new("X", Decimal::MAX);
        whale.owned = 2;
        let mut eco = EconomyState::new(Decimal::MAX, vec![whale], dec!(100000));

        eco.accrue(dec!(13.75));
        eco.apply_reward(dec!(300));
        assert_eq!(eco.cash(), Decimal::MAX);
        assert_eq!(eco.stock_value(), Decimal::MAX);
        assert_eq!(eco.net_worth(), Decimal::MAX);

        assert!(eco.sell("X").is_executed());
        assert_eq!(eco.cash(), Decimal::MAX);
    }

    #[test]
    fn test_net_worth_and_reference_value() {
        let mut eco = state(dec!(1000));
        eco.buy("NVDA");
        eco.buy("NVDA");

        assert_eq!(eco.stock_value(), dec!(240));
        assert_eq!(eco.net_worth(), dec!(1000));
        assert_eq!(eco.net_worth_in_reference(), dec!(0.01));

        eco.set_exchange_rate(dec!(50000));
        assert_eq!(eco.net_worth_in_reference(), dec!(0.02));

        // Non-positive rates are ignored
        eco.set_exchange_rate(dec!(0));
        assert_eq!(eco.exchange_rate(), dec!(50000));
    }
}
