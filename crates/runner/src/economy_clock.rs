use log::info;
use std::sync::Arc;

use crate::engine::Engine;

/// Passive income task: one economy tick per interval, forever
pub(crate) async fn run_economy_clock(engine: Arc<Engine>) {
    let period = engine.config().economy.tick_interval();
    info!(
        "Economy clock started (+{} every {:?})",
        engine.config().economy.income_per_tick,
        period
    );

    let mut ticker = engine.clock().interval(period);
    loop {
        ticker.tick().await;
        engine.accrue_income().await;
    }
}
