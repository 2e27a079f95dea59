// src/types.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::TradingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Value of the `action` field expected by the exchange.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

/// A tradable `BASE_QUOTE` combination, e.g. `DASH_EUR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub base: String,
    pub quote: String,
}

impl Pair {
    pub fn parse(raw: &str) -> Result<Self, TradingError> {
        match raw.split_once('_') {
            Some((base, quote))
                if !base.is_empty() && !quote.is_empty() && !quote.contains('_') =>
            {
                Ok(Self {
                    base: base.to_uppercase(),
                    quote: quote.to_uppercase(),
                })
            }
            _ => Err(TradingError::Configuration(format!(
                "pair '{}' must look like BASE_QUOTE",
                raw
            ))),
        }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.base, self.quote)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Balance {
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub available: Decimal,
}

/// Snapshot of every currency balance, replaced wholesale on each fetch.
#[derive(Debug, Clone, Default)]
pub struct Balances(pub HashMap<String, Balance>);

impl Balances {
    /// Zero when the currency is not listed.
    pub fn get(&self, currency: &str) -> Balance {
        self.0.get(currency).copied().unwrap_or_default()
    }

    pub fn available(&self, currency: &str) -> Decimal {
        self.get(currency).available
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairLimits {
    pub min_amount: Decimal,
    pub min_value: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Filled,
    Cancelled,
    Unknown,
}

impl OrderStatus {
    pub fn from_remote(status: &str) -> Self {
        match status {
            "success" => OrderStatus::Filled,
            "processing" | "waiting" | "new" => OrderStatus::Pending,
            "canceled" | "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub side: Side,
    pub amount: Decimal,
    pub price: Option<Decimal>,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub entry_price: Decimal,
    pub amount_held: Decimal,
    pub trailing_stop: Option<Decimal>, // None until the first stop update
    pub highest_price: Decimal,
}

impl Position {
    pub fn open(entry_price: Decimal, amount: Decimal) -> Self {
        Self {
            entry_price,
            amount_held: amount,
            trailing_stop: None,
            highest_price: entry_price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Armed,
    Trailing,
}
