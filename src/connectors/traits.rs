// src/connectors/traits.rs
use crate::error::TradingError;
use crate::types::{Balances, Order, OrderStatus, PairLimits, Side};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Typed market and account operations. Amounts and prices are passed at full
/// precision; implementations round them right before transmission.
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    async fn get_ticker(&self, pair: &str) -> Result<Decimal, TradingError>;

    /// Never fails: an empty snapshot stands in for an unreachable account.
    async fn get_balances(&self) -> Balances;

    async fn get_pair_limits(&self, pair: &str) -> Result<PairLimits, TradingError>;

    /// `price: None` places a market order.
    async fn place_order(
        &self,
        pair: &str,
        side: Side,
        amount: Decimal,
        price: Option<Decimal>,
    ) -> Result<Order, TradingError>;

    async fn get_order_status(&self, order_id: &str) -> Result<OrderStatus, TradingError>;

    async fn cancel_order(&self, order_id: &str) -> bool;
}
