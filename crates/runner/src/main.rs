use anyhow::Context;
use codex_core::EconomyState;
use codex_gateway::CoinGeckoFeed;
use codex_persistence::FileStore;
use codex_runner::{Game, GameEvent, GamePhase, load_config, load_default_config};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Unanswered choices are auto-resolved after this long when no one is playing
const HEADLESS_AUTO_CHOOSE_MS: u64 = 5_000;
const STATUS_INTERVAL: Duration = Duration::from_secs(10);

fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("CODEX_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("codex-idle")
}

fn log_status(economy: &EconomyState) {
    info!(
        "Cash ${} | stocks ${} | net worth ${} ({} BTC)",
        economy.cash().round_dp(2),
        economy.stock_value().round_dp(2),
        economy.net_worth().round_dp(2),
        economy.net_worth_in_reference()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = match std::env::args().nth(1) {
        Some(path) => load_config(&path).with_context(|| format!("loading config {path}"))?,
        None => load_default_config()?,
    };
    if config.choices.auto_choose_after_ms.is_none() {
        config.choices.auto_choose_after_ms = Some(HEADLESS_AUTO_CHOOSE_MS);
    }

    let dir = data_dir();
    info!("Saving to {}", dir.display());
    let store = Arc::new(FileStore::new(dir));
    let feed = Arc::new(CoinGeckoFeed::new());

    let game = Game::boot(config, store, feed).await?;
    let mut events = game.subscribe();
    if game.phase().await == GamePhase::Idle {
        game.start().await;
    }

    let mut status = tokio::time::interval(STATUS_INTERVAL);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Interrupted, shutting down");
                break;
            }
            _ = status.tick() => log_status(&game.economy().await),
            event = events.recv() => match event {
                Ok(GameEvent::ChoiceOffered(choice)) => {
                    let labels: Vec<String> =
                        choice.options.iter().map(ToString::to_string).collect();
                    info!("Choice {}: {}", choice.id, labels.join(" | "));
                }
                Ok(GameEvent::ChoiceResolved { option, .. }) => info!("Selected {}", option),
                Ok(GameEvent::Trade { symbol, side, price }) => {
                    info!("{} {} @ {}", side, symbol, price)
                }
                Ok(GameEvent::ExchangeRateUpdated(rate)) => info!("BTC/USD {}", rate),
                Ok(_) => {}
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    log::debug!("Skipped {} game events", n)
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    game.shutdown().await;
    log_status(&game.economy().await);
    Ok(())
}
