//! Market Simulator - random walk over the fixed stock basket
//!
//! Every tick multiplies each price by `1 + u`, `u ~ U[-v, +v]`, rounds it
//! and clamps it to the floor. Prices are the only thing a tick touches.

use codex_core::{EconomyState, Price};
use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::config::MarketConfig;
use crate::engine::Engine;

/// Places kept on the per-tick multiplier before it is applied
const MULTIPLIER_DP: u32 = 6;

pub(crate) struct MarketSimulator {
    volatility: f64,
    floor: Price,
    dp: u32,
    rng: StdRng,
}

impl MarketSimulator {
    pub fn new(config: &MarketConfig, rng: StdRng) -> Self {
        Self {
            volatility: config.volatility,
            floor: config.price_floor,
            dp: config.price_dp,
            rng,
        }
    }

    fn next_multiplier(&mut self) -> Decimal {
        if self.volatility <= 0.0 {
            return Decimal::ONE;
        }
        let u: f64 = self.rng.gen_range(-self.volatility..=self.volatility);
        Decimal::from_f64_retain(1.0 + u)
            .map(|m| m.round_dp(MULTIPLIER_DP))
            .unwrap_or(Decimal::ONE)
    }

    /// Perturb every price once
    pub fn tick(&mut self, economy: &mut EconomyState) {
        let (floor, dp) = (self.floor, self.dp);
        for position in economy.positions_mut() {
            let multiplier = self.next_multiplier();
            position.reprice(multiplier, floor, dp);
        }
    }

    /// Tick forever on the market interval
    pub async fn run(mut self, engine: Arc<Engine>) {
        let period = engine.config().market.tick_interval();
        info!("Market simulator started ({:?} interval)", period);

        let mut ticker = engine.clock().interval(period);
        loop {
            ticker.tick().await;
            engine.move_market(&mut self).await;
            debug!("Market tick applied");
        }
    }
}
