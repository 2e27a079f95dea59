// src/connectors/mock.rs
//! Scripted in-memory exchange used by engine and monitor tests.
use crate::connectors::traits::ExchangeGateway;
use crate::error::TradingError;
use crate::types::{Balance, Balances, Order, OrderStatus, PairLimits, Side};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    prices: VecDeque<Option<Decimal>>,
    balances: HashMap<String, Balance>,
    statuses: HashMap<String, VecDeque<OrderStatus>>,
    calls: Vec<String>,
    orders: Vec<Order>,
    cancelled: Vec<String>,
    next_id: u64,
    reject_orders: bool,
}

pub struct MockGateway {
    pub base: String,
    pub quote: String,
    pub limits: PairLimits,
    /// Buys and sells settle into the balances as soon as they are placed.
    pub fill_immediately: bool,
    inner: Mutex<Inner>,
}

impl MockGateway {
    pub fn new(base: &str, quote: &str, limits: PairLimits) -> Self {
        Self {
            base: base.to_string(),
            quote: quote.to_string(),
            limits,
            fill_immediately: true,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Queues ticker results; `None` simulates an unavailable ticker. The last entry repeats.
    pub fn push_prices(&self, prices: impl IntoIterator<Item = Option<Decimal>>) {
        self.inner.lock().unwrap().prices.extend(prices);
    }

    pub fn set_available(&self, currency: &str, amount: Decimal) {
        self.inner.lock().unwrap().balances.insert(
            currency.to_string(),
            Balance {
                total: amount,
                available: amount,
            },
        );
    }

    /// Status sequence reported for `order_id`; the last entry repeats.
    pub fn script_status(&self, order_id: &str, statuses: impl IntoIterator<Item = OrderStatus>) {
        self.inner
            .lock()
            .unwrap()
            .statuses
            .insert(order_id.to_string(), statuses.into_iter().collect());
    }

    pub fn reject_orders(&self) {
        self.inner.lock().unwrap().reject_orders = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.inner.lock().unwrap().orders.clone()
    }

    pub fn cancelled(&self) -> Vec<String> {
        self.inner.lock().unwrap().cancelled.clone()
    }

    fn adjust(balances: &mut HashMap<String, Balance>, currency: &str, delta: Decimal) {
        let entry = balances.entry(currency.to_string()).or_default();
        entry.total += delta;
        entry.available += delta;
    }
}

fn next_from<T: Copy>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.len() > 1 {
        queue.pop_front()
    } else {
        queue.front().copied()
    }
}

#[async_trait]
impl ExchangeGateway for MockGateway {
    async fn get_ticker(&self, pair: &str) -> Result<Decimal, TradingError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push("ticker".to_string());
        next_from(&mut inner.prices)
            .flatten()
            .ok_or_else(|| TradingError::DataUnavailable(format!("no price for {}", pair)))
    }

    async fn get_balances(&self) -> Balances {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push("balances".to_string());
        Balances(inner.balances.clone())
    }

    async fn get_pair_limits(&self, _pair: &str) -> Result<PairLimits, TradingError> {
        self.inner.lock().unwrap().calls.push("limits".to_string());
        Ok(self.limits)
    }

    async fn place_order(
        &self,
        _pair: &str,
        side: Side,
        amount: Decimal,
        price: Option<Decimal>,
    ) -> Result<Order, TradingError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("place:{}", side.as_str()));
        if inner.reject_orders {
            return Err(TradingError::OrderRejected(
                serde_json::json!({ "error": "rejected" }),
            ));
        }

        inner.next_id += 1;
        let order = Order {
            id: inner.next_id.to_string(),
            side,
            amount,
            price,
            status: OrderStatus::Pending,
        };

        if self.fill_immediately {
            let fill_price = price
                .or_else(|| inner.prices.front().copied().flatten())
                .unwrap_or(Decimal::ZERO);
            let value = amount * fill_price;
            let (base, quote) = match side {
                Side::Buy => (amount, -value),
                Side::Sell => (-amount, value),
            };
            Self::adjust(&mut inner.balances, &self.base, base);
            Self::adjust(&mut inner.balances, &self.quote, quote);
        }

        inner.orders.push(order.clone());
        Ok(order)
    }

    async fn get_order_status(&self, order_id: &str) -> Result<OrderStatus, TradingError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("status:{}", order_id));
        Ok(inner
            .statuses
            .get_mut(order_id)
            .and_then(next_from)
            .unwrap_or(OrderStatus::Unknown))
    }

    async fn cancel_order(&self, order_id: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(format!("cancel:{}", order_id));
        inner.cancelled.push(order_id.to_string());
        true
    }
}
