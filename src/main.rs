// src/main.rs
use crate::config::{AppConfig, Credentials, LoggingConfig};
use crate::connectors::payeer::PayeerClient;
use crate::core::engine::TradingEngine;
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod connectors;
mod core;
mod error;
mod health;
mod strategies;
mod types;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Load Configuration
    let config = AppConfig::load()?;
    let _log_guard = init_logging(&config.logging)?;

    // Missing credentials end the process before any network call.
    let credentials = Credentials::from_env()?;
    let pair = config.pair()?;

    info!("========================================");
    info!("       PAYEER TRADER - v{}", env!("CARGO_PKG_VERSION"));
    info!("========================================");
    info!("Target: {}", pair);
    info!("Entry:  {:?}", config.strategy.entry);
    info!("Exit:   {:?}", config.strategy.exit);
    info!("Sizing: {:?}", config.strategy.sizing);
    if config.exchange.retry_order_create && !config.exchange.client_order_ids {
        warn!("order_create is retried on transient failures; a retry may place a duplicate order");
    }

    // 2. Initialize Components
    let _health = health::spawn(&config.health);
    let client = PayeerClient::new(credentials, &config.exchange, &config.market)?;

    // 3. Run Engine
    let mut engine = TradingEngine::new(client, pair, &config.market, config.strategy, config.schedule);
    engine.run().await;

    info!("Engine finished");
    Ok(())
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.filter))?;

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "payeer_trader.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}
