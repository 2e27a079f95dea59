// src/core/monitor.rs
use crate::connectors::traits::ExchangeGateway;
use crate::types::{Order, OrderStatus};
use rust_decimal::Decimal;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    Filled,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BracketOutcome {
    /// The resting sell filled.
    TargetFilled,
    /// Price fell through the stop-loss; both legs were cancelled.
    StoppedOut { price: Decimal },
    /// A leg was cancelled on the exchange side.
    Cancelled,
}

/// A buy and its take-profit sell, placed together.
#[derive(Debug, Clone)]
pub struct Bracket {
    pub buy: Order,
    pub sell: Order,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
}

/// Polls orders until they reach a terminal state, sleeping between every round of calls.
#[derive(Debug, Clone)]
pub struct OrderMonitor {
    poll_interval: Duration,
}

impl OrderMonitor {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub async fn wait_for_fill<G>(&self, gateway: &G, order_id: &str) -> FillOutcome
    where
        G: ExchangeGateway + ?Sized,
    {
        loop {
            match status_of(gateway, order_id).await {
                OrderStatus::Filled => {
                    info!("Order {} filled", order_id);
                    return FillOutcome::Filled;
                }
                OrderStatus::Cancelled => {
                    warn!("Order {} was cancelled before filling", order_id);
                    return FillOutcome::Cancelled;
                }
                _ => sleep(self.poll_interval).await,
            }
        }
    }

    pub async fn run_bracket<G>(
        &self,
        gateway: &G,
        pair: &str,
        bracket: &Bracket,
        stop_loss_fraction: Decimal,
    ) -> BracketOutcome
    where
        G: ExchangeGateway + ?Sized,
    {
        let stop_price = bracket.buy_price * (Decimal::ONE - stop_loss_fraction);
        let mut buy_filled = false;
        let mut target_seen = false;

        info!(
            "Monitoring bracket buy={} sell={} (target {}, stop {})",
            bracket.buy.id, bracket.sell.id, bracket.sell_price, stop_price
        );

        loop {
            match status_of(gateway, &bracket.sell.id).await {
                OrderStatus::Filled => {
                    info!("✅ Sell order {} filled", bracket.sell.id);
                    return BracketOutcome::TargetFilled;
                }
                OrderStatus::Cancelled => {
                    warn!("Sell order {} cancelled remotely", bracket.sell.id);
                    if !buy_filled {
                        gateway.cancel_order(&bracket.buy.id).await;
                    }
                    return BracketOutcome::Cancelled;
                }
                _ => {}
            }

            // Once the buy is in, only the sell leg and the live price matter.
            if !buy_filled {
                match status_of(gateway, &bracket.buy.id).await {
                    OrderStatus::Filled => {
                        info!("Buy order {} filled, watching price", bracket.buy.id);
                        buy_filled = true;
                    }
                    OrderStatus::Cancelled => {
                        warn!("Buy order {} cancelled remotely", bracket.buy.id);
                        gateway.cancel_order(&bracket.sell.id).await;
                        return BracketOutcome::Cancelled;
                    }
                    _ => {}
                }
            }

            match gateway.get_ticker(pair).await {
                Ok(price) if price <= stop_price => {
                    warn!(
                        "🛑 Stop-loss hit at {} (stop {}), cancelling both orders",
                        price, stop_price
                    );
                    gateway.cancel_order(&bracket.buy.id).await;
                    gateway.cancel_order(&bracket.sell.id).await;
                    return BracketOutcome::StoppedOut { price };
                }
                Ok(price) if price >= bracket.sell_price && !target_seen => {
                    info!(
                        "Profit target {} reached at {}, waiting for the sell to fill",
                        bracket.sell_price, price
                    );
                    target_seen = true;
                }
                Ok(_) => {}
                Err(e) => warn!("Price check failed while monitoring: {}", e),
            }

            sleep(self.poll_interval).await;
        }
    }
}

async fn status_of<G>(gateway: &G, order_id: &str) -> OrderStatus
where
    G: ExchangeGateway + ?Sized,
{
    match gateway.get_order_status(order_id).await {
        Ok(status) => status,
        Err(e) => {
            warn!("Status check for order {} failed: {}", order_id, e);
            OrderStatus::Unknown
        }
    }
}
