// src/strategies/trend.rs
use crate::types::Trend;
use rust_decimal::Decimal;
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 100;

/// Most recent prices, oldest first. Evicts from the front once full.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    prices: VecDeque<Decimal>,
    capacity: usize,
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl PriceHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            prices: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, price: Decimal) {
        if self.prices.len() == self.capacity {
            self.prices.pop_front();
        }
        self.prices.push_back(price);
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Mean of the last `window` prices, `None` if fewer are recorded.
    pub fn sma(&self, window: usize) -> Option<Decimal> {
        if window == 0 || self.prices.len() < window {
            return None;
        }
        let sum: Decimal = self.prices.iter().rev().take(window).sum();
        Some(sum / Decimal::from(window))
    }
}

/// Short-vs-long SMA crossover. Neutral until `long_window` samples exist and on ties.
pub fn detect_trend(history: &PriceHistory, short_window: usize, long_window: usize) -> Trend {
    if history.len() < long_window {
        return Trend::Neutral;
    }

    match (history.sma(short_window), history.sma(long_window)) {
        (Some(short), Some(long)) if short > long => Trend::Up,
        (Some(short), Some(long)) if short < long => Trend::Down,
        _ => Trend::Neutral,
    }
}
