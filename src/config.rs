// src/config.rs

use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::error::TradingError;
use crate::types::Pair;

pub const API_ID_VAR: &str = "API_ID";
pub const API_SECRET_VAR: &str = "API_SECRET";

/// API identity and signing key. Loaded once at startup, never logged.
#[derive(Clone)]
pub struct Credentials {
    pub api_id: String,
    secret: String,
}

impl Credentials {
    pub fn new(api_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_id: api_id.into(),
            secret: secret.into(),
        }
    }

    pub fn from_env() -> Result<Self, TradingError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Missing or blank values are a configuration error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TradingError> {
        let read = |name: &str| match lookup(name) {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(TradingError::Configuration(format!(
                "environment variable {} is not set",
                name
            ))),
        };
        Ok(Self::new(read(API_ID_VAR)?, read(API_SECRET_VAR)?))
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_id", &self.api_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExchangeConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub max_attempts: u32,
    pub backoff_unit_ms: u64,
    pub backoff_factor: u32,
    /// Resubmitting `order_create` after a transient failure may double-fill.
    pub retry_order_create: bool,
    /// Attach a `client_order_id` to orders; only useful if the exchange deduplicates on it.
    pub client_order_ids: bool,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://payeer.com/api/trade/".to_string(),
            request_timeout_secs: 30,
            max_attempts: 5,
            backoff_unit_ms: 1000,
            backoff_factor: 2,
            retry_order_create: true,
            client_order_ids: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MarketConfig {
    pub pair: String,
    pub amount_precision: u32,
    pub price_precision: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            pair: "DASH_EUR".to_string(),
            amount_precision: 4,
            price_precision: 2,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryRule {
    /// Buy when the price reaches one of the compressed grid buy levels.
    Grid { buy_levels: Vec<Decimal> },
    /// Buy once the price is at or below a fixed level.
    FixedPrice { price: Decimal },
    /// Buy right away with a limit `fraction` below the last price.
    Discount { fraction: Decimal },
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExitRule {
    TrailingStop { fraction: Decimal },
    FixedTarget { price: Decimal },
    Grid { sell_levels: Vec<Decimal> },
    /// Resting sell at `entry * (1 + profit_fraction)`, cancelled on a stop-loss.
    Bracket {
        profit_fraction: Decimal,
        stop_loss_fraction: Decimal,
    },
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SizingMode {
    RiskFraction { fraction: Decimal },
    FixedAmount { amount: Decimal },
    ExchangeMinimum,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
    Market,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StrategyConfig {
    pub entry: EntryRule,
    pub exit: ExitRule,
    pub sizing: SizingMode,
    pub trend_filter: bool,
    pub short_window: usize,
    pub long_window: usize,
    pub history_capacity: usize,
    pub compression_factor: Decimal,
    pub dust_threshold: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
    pub order_type: OrderType,
    pub await_fill: bool,
    pub single_shot: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            entry: EntryRule::Grid {
                buy_levels: vec![
                    Decimal::new(25, 0),
                    Decimal::new(275, 1),
                    Decimal::new(30, 0),
                ],
            },
            exit: ExitRule::TrailingStop {
                fraction: Decimal::new(2, 2),
            },
            sizing: SizingMode::RiskFraction {
                fraction: Decimal::new(1, 2),
            },
            trend_filter: true,
            short_window: 10,
            long_window: 50,
            history_capacity: 100,
            compression_factor: Decimal::new(9, 1),
            dust_threshold: Decimal::new(1, 3),
            min_price: Decimal::new(20, 0),
            max_price: Decimal::new(50, 0),
            order_type: OrderType::Limit,
            await_fill: false,
            single_shot: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScheduleConfig {
    pub cycle_interval_secs: u64,
    pub bad_data_delay_secs: u64,
    pub recovery_delay_secs: u64,
    pub poll_interval_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cycle_interval_secs: 60,
            bad_data_delay_secs: 60,
            recovery_delay_secs: 10,
            poll_interval_secs: 10,
        }
    }
}

impl ScheduleConfig {
    pub fn cycle_interval(&self) -> Duration {
        Duration::from_secs(self.cycle_interval_secs)
    }

    pub fn bad_data_delay(&self) -> Duration {
        Duration::from_secs(self.bad_data_delay_secs)
    }

    pub fn recovery_delay(&self) -> Duration {
        Duration::from_secs(self.recovery_delay_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HealthConfig {
    pub enabled: bool,
    pub bind_addr: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "payeer_trader=info".to_string(),
            directory: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub exchange: ExchangeConfig,
    pub market: MarketConfig,
    pub strategy: StrategyConfig,
    pub schedule: ScheduleConfig,
    pub health: HealthConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Defaults, then `Settings.toml` if present, then `APP__SECTION__KEY` variables.
    pub fn load() -> Result<Self, TradingError> {
        let builder = Config::builder()
            .add_source(File::with_name("Settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn pair(&self) -> Result<Pair, TradingError> {
        Pair::parse(&self.market.pair)
    }

    pub fn validate(&self) -> Result<(), TradingError> {
        let invalid = |msg: String| Err(TradingError::Configuration(msg));
        self.pair()?;

        let s = &self.strategy;
        if s.min_price >= s.max_price {
            return invalid(format!(
                "min_price {} must be below max_price {}",
                s.min_price, s.max_price
            ));
        }
        if s.compression_factor <= Decimal::ZERO || s.compression_factor > Decimal::ONE {
            return invalid(format!(
                "compression_factor {} must be in (0, 1]",
                s.compression_factor
            ));
        }
        if s.short_window == 0 || s.short_window >= s.long_window {
            return invalid("short_window must be non-zero and below long_window".into());
        }
        if s.long_window > s.history_capacity {
            return invalid("long_window cannot exceed history_capacity".into());
        }
        if s.dust_threshold < Decimal::ZERO {
            return invalid("dust_threshold cannot be negative".into());
        }
        match &s.exit {
            ExitRule::TrailingStop { fraction } if !is_fraction(*fraction) => {
                return invalid(format!("trailing stop fraction {} must be in (0, 1)", fraction));
            }
            ExitRule::Bracket {
                profit_fraction,
                stop_loss_fraction,
            } if *profit_fraction <= Decimal::ZERO || !is_fraction(*stop_loss_fraction) => {
                return invalid("bracket fractions must be positive and below 1".into());
            }
            _ => {}
        }
        if let EntryRule::Discount { fraction } = &s.entry {
            if *fraction < Decimal::ZERO || *fraction >= Decimal::ONE {
                return invalid(format!("discount fraction {} must be in [0, 1)", fraction));
            }
        }
        if self.exchange.max_attempts == 0 {
            return invalid("max_attempts must be at least 1".into());
        }
        Ok(())
    }
}

fn is_fraction(value: Decimal) -> bool {
    value > Decimal::ZERO && value < Decimal::ONE
}
