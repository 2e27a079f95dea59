// src/core/engine.rs
use crate::config::{EntryRule, ExitRule, MarketConfig, OrderType, ScheduleConfig, StrategyConfig};
use crate::connectors::traits::ExchangeGateway;
use crate::core::monitor::{Bracket, BracketOutcome, FillOutcome, OrderMonitor};
use crate::error::TradingError;
use crate::strategies::grid::{adjust_grid_levels, first_buy_level, first_sell_level};
use crate::strategies::sizing::size_for_mode;
use crate::strategies::trend::{detect_trend, PriceHistory};
use crate::types::{Balances, EngineState, Pair, PairLimits, Position, Side, Trend};
use crate::utils::precision::normalize_price;
use rust_decimal::Decimal;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, warn};

/// What a single cycle did. Skips are outcomes, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    OutOfBounds { price: Decimal },
    Holding,
    InsufficientBalance,
    Entered {
        order_id: String,
        price: Decimal,
        amount: Decimal,
    },
    EntryCancelled,
    StopUpdated { stop: Decimal },
    Exited {
        order_id: String,
        price: Decimal,
        amount: Decimal,
    },
    BracketClosed(BracketOutcome),
}

impl CycleOutcome {
    pub fn completes_round_trip(&self) -> bool {
        matches!(
            self,
            CycleOutcome::Exited { .. } | CycleOutcome::BracketClosed(_)
        )
    }
}

enum PositionUpdate {
    Hold,
    StopRaised(Decimal),
    Exit(&'static str),
}

pub struct TradingEngine<G> {
    gateway: G,
    pair: Pair,
    symbol: String,
    amount_precision: u32,
    price_precision: u32,
    strategy: StrategyConfig,
    schedule: ScheduleConfig,
    monitor: OrderMonitor,
    history: PriceHistory,
    limits: Option<PairLimits>,
    position: Option<Position>,
}

impl<G> TradingEngine<G>
where
    G: ExchangeGateway,
{
    pub fn new(
        gateway: G,
        pair: Pair,
        market: &MarketConfig,
        strategy: StrategyConfig,
        schedule: ScheduleConfig,
    ) -> Self {
        Self {
            symbol: pair.to_string(),
            amount_precision: market.amount_precision,
            price_precision: market.price_precision,
            history: PriceHistory::new(strategy.history_capacity),
            monitor: OrderMonitor::new(schedule.poll_interval()),
            gateway,
            pair,
            strategy,
            schedule,
            limits: None,
            position: None,
        }
    }

    pub fn state(&self) -> EngineState {
        match &self.position {
            None => EngineState::Idle,
            Some(p) if p.trailing_stop.is_none() => EngineState::Armed,
            Some(_) => EngineState::Trailing,
        }
    }

    #[cfg(test)]
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// Runs cycles until the process stops, or after one round trip in single-shot mode.
    pub async fn run(&mut self) {
        info!(
            "Engine loop running for {} (entry: {:?}, exit: {:?})",
            self.symbol, self.strategy.entry, self.strategy.exit
        );

        loop {
            let before = self.state();
            let result = self.run_cycle().await;
            let after = self.state();
            if before != after {
                info!("Engine state {:?} -> {:?}", before, after);
            }

            let delay = match result {
                Ok(outcome) => {
                    if self.strategy.single_shot && outcome.completes_round_trip() {
                        info!("Single-shot round trip complete: {:?}", outcome);
                        return;
                    }
                    self.delay_after(&outcome)
                }
                Err(e @ TradingError::DataUnavailable(_)) => {
                    error!("Cycle skipped: {}", e);
                    self.schedule.bad_data_delay()
                }
                Err(e) => {
                    error!("Cycle failed: {}", e);
                    self.schedule.recovery_delay()
                }
            };
            sleep(delay).await;
        }
    }

    fn delay_after(&self, outcome: &CycleOutcome) -> Duration {
        match outcome {
            CycleOutcome::OutOfBounds { .. } => self.schedule.bad_data_delay(),
            _ => self.schedule.cycle_interval(),
        }
    }

    pub async fn run_cycle(&mut self) -> Result<CycleOutcome, TradingError> {
        let price = self.gateway.get_ticker(&self.symbol).await?;
        info!("Fetched price {} {}", price, self.pair.quote);

        if price < self.strategy.min_price || price > self.strategy.max_price {
            warn!(
                "Price {} is outside [{}, {}], skipping cycle",
                price, self.strategy.min_price, self.strategy.max_price
            );
            return Ok(CycleOutcome::OutOfBounds { price });
        }

        self.history.record(price);
        let trend = detect_trend(
            &self.history,
            self.strategy.short_window,
            self.strategy.long_window,
        );
        info!("Detected trend: {:?}", trend);

        let balances = self.gateway.get_balances().await;
        if balances.is_empty() {
            warn!("Balance snapshot is empty");
        }
        let quote = balances.get(&self.pair.quote);
        info!(
            "{} balance: {} available / {} total",
            self.pair.quote, quote.available, quote.total
        );

        if self.position.is_some() {
            self.manage_position(price, &balances).await
        } else {
            self.try_enter(price, trend, &balances).await
        }
    }

    async fn pair_limits(&mut self) -> Result<PairLimits, TradingError> {
        if let Some(limits) = self.limits {
            return Ok(limits);
        }
        let limits = self.gateway.get_pair_limits(&self.symbol).await?;
        info!(
            "Pair limits for {}: min amount {}, min value {}",
            self.symbol, limits.min_amount, limits.min_value
        );
        self.limits = Some(limits);
        Ok(limits)
    }

    /// Price to buy at, if the entry rule fires now.
    fn entry_price(&self, price: Decimal) -> Option<Decimal> {
        match &self.strategy.entry {
            EntryRule::Grid { buy_levels } => {
                let levels =
                    adjust_grid_levels(price, buy_levels, self.strategy.compression_factor);
                first_buy_level(price, &levels).map(|level| {
                    info!("Price {} reached grid buy level {}", price, level);
                    price
                })
            }
            EntryRule::FixedPrice { price: target } => (price <= *target).then_some(price),
            EntryRule::Discount { fraction } => Some(price * (Decimal::ONE - *fraction)),
        }
    }

    fn limit_price(&self, price: Decimal) -> Option<Decimal> {
        match self.strategy.order_type {
            OrderType::Limit => Some(price),
            OrderType::Market => None,
        }
    }

    async fn try_enter(
        &mut self,
        price: Decimal,
        trend: Trend,
        balances: &Balances,
    ) -> Result<CycleOutcome, TradingError> {
        if self.strategy.trend_filter && trend == Trend::Down {
            info!("Downtrend, not buying");
            return Ok(CycleOutcome::Holding);
        }

        // Sized against the price the exchange will actually see.
        let Some(order_price) = self
            .entry_price(price)
            .map(|p| normalize_price(p, self.price_precision))
        else {
            return Ok(CycleOutcome::Holding);
        };

        let dust = self.strategy.dust_threshold;
        let available = balances.available(&self.pair.quote);
        if available <= dust {
            warn!(
                "Insufficient {} balance: {} (dust threshold {})",
                self.pair.quote, available, dust
            );
            return Ok(CycleOutcome::InsufficientBalance);
        }

        let limits = self.pair_limits().await?;
        let Some(amount) = size_for_mode(
            &self.strategy.sizing,
            available,
            order_price,
            &limits,
            dust,
            self.amount_precision,
        ) else {
            warn!(
                "{} {} cannot cover the exchange minimum at {}",
                available, self.pair.quote, order_price
            );
            return Ok(CycleOutcome::InsufficientBalance);
        };

        info!(
            "Placing BUY for {} {} at {} {}",
            amount, self.pair.base, order_price, self.pair.quote
        );
        let buy = self
            .gateway
            .place_order(&self.symbol, Side::Buy, amount, self.limit_price(order_price))
            .await?;
        info!("✅ Buy order placed: {}", buy.id);

        if self.strategy.await_fill
            && self.monitor.wait_for_fill(&self.gateway, &buy.id).await == FillOutcome::Cancelled
        {
            return Ok(CycleOutcome::EntryCancelled);
        }

        if let ExitRule::Bracket {
            profit_fraction,
            stop_loss_fraction,
        } = self.strategy.exit
        {
            let sell_price = order_price * (Decimal::ONE + profit_fraction);
            let sell = match self
                .gateway
                .place_order(&self.symbol, Side::Sell, amount, Some(sell_price))
                .await
            {
                Ok(order) => order,
                Err(e) => {
                    error!("Sell leg failed, cancelling buy {}: {}", buy.id, e);
                    self.gateway.cancel_order(&buy.id).await;
                    return Err(e);
                }
            };
            info!("✅ Sell order placed: {} at {}", sell.id, sell_price);

            let bracket = Bracket {
                buy,
                sell,
                buy_price: order_price,
                sell_price,
            };
            let outcome = self
                .monitor
                .run_bracket(&self.gateway, &self.symbol, &bracket, stop_loss_fraction)
                .await;
            info!("Bracket closed: {:?}", outcome);
            return Ok(CycleOutcome::BracketClosed(outcome));
        }

        self.position = Some(Position::open(order_price, amount));
        Ok(CycleOutcome::Entered {
            order_id: buy.id,
            price: order_price,
            amount,
        })
    }

    async fn manage_position(
        &mut self,
        price: Decimal,
        balances: &Balances,
    ) -> Result<CycleOutcome, TradingError> {
        let held = balances.available(&self.pair.base);
        if held <= self.strategy.dust_threshold {
            info!("Holding {} {}, below dust threshold, waiting", held, self.pair.base);
            return Ok(CycleOutcome::Holding);
        }

        match self.update_position(price, held) {
            PositionUpdate::Hold => Ok(CycleOutcome::Holding),
            PositionUpdate::StopRaised(stop) => Ok(CycleOutcome::StopUpdated { stop }),
            PositionUpdate::Exit(reason) => self.exit(price, reason).await,
        }
    }

    fn update_position(&mut self, price: Decimal, held: Decimal) -> PositionUpdate {
        let Some(position) = self.position.as_mut() else {
            return PositionUpdate::Hold;
        };
        position.amount_held = held;

        match &self.strategy.exit {
            ExitRule::TrailingStop { fraction } => {
                let mut raised = None;
                if price > position.highest_price || position.trailing_stop.is_none() {
                    position.highest_price = position.highest_price.max(price);
                    let stop = position.highest_price * (Decimal::ONE - *fraction);
                    position.trailing_stop = Some(stop);
                    info!("Updated trailing stop to {} {}", stop, self.pair.quote);
                    raised = Some(stop);
                }

                match (position.trailing_stop, raised) {
                    (Some(stop), _) if price <= stop => PositionUpdate::Exit("trailing stop"),
                    (_, Some(stop)) => PositionUpdate::StopRaised(stop),
                    _ => PositionUpdate::Hold,
                }
            }
            ExitRule::FixedTarget { price: target } if price >= *target => {
                PositionUpdate::Exit("profit target")
            }
            ExitRule::Grid { sell_levels } => {
                let levels =
                    adjust_grid_levels(price, sell_levels, self.strategy.compression_factor);
                match first_sell_level(price, &levels) {
                    Some(level) => {
                        info!("Price {} reached grid sell level {}", price, level);
                        PositionUpdate::Exit("grid sell level")
                    }
                    None => PositionUpdate::Hold,
                }
            }
            _ => PositionUpdate::Hold,
        }
    }

    async fn exit(
        &mut self,
        price: Decimal,
        reason: &'static str,
    ) -> Result<CycleOutcome, TradingError> {
        let Some((entry, amount)) = self.position.as_ref().map(|p| (p.entry_price, p.amount_held))
        else {
            return Ok(CycleOutcome::Holding);
        };
        info!(
            "Selling all {} {} at {} due to {} (entry {})",
            amount, self.pair.base, price, reason, entry
        );
        // On failure the position stays open and the next cycle tries again.
        let order = self
            .gateway
            .place_order(&self.symbol, Side::Sell, amount, self.limit_price(price))
            .await?;
        info!("✅ Sell order placed: {}", order.id);

        self.position = None;
        Ok(CycleOutcome::Exited {
            order_id: order.id,
            price,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SizingMode;
    use crate::connectors::mock::MockGateway;
    use crate::types::OrderStatus;
    use rust_decimal_macros::dec;

    fn gateway() -> MockGateway {
        MockGateway::new(
            "DASH",
            "EUR",
            PairLimits {
                min_amount: dec!(0.0001),
                min_value: dec!(0.5),
            },
        )
    }

    fn strategy() -> StrategyConfig {
        StrategyConfig {
            entry: EntryRule::FixedPrice { price: dec!(95) },
            exit: ExitRule::TrailingStop {
                fraction: dec!(0.02),
            },
            trend_filter: false,
            min_price: dec!(1),
            max_price: dec!(1000),
            ..StrategyConfig::default()
        }
    }

    fn schedule() -> ScheduleConfig {
        ScheduleConfig {
            cycle_interval_secs: 0,
            bad_data_delay_secs: 0,
            recovery_delay_secs: 0,
            poll_interval_secs: 0,
        }
    }

    fn engine(gw: MockGateway, strategy: StrategyConfig) -> TradingEngine<MockGateway> {
        TradingEngine::new(
            gw,
            Pair::parse("DASH_EUR").unwrap(),
            &MarketConfig::default(),
            strategy,
            schedule(),
        )
    }

    #[tokio::test]
    async fn test_out_of_bounds_skips_everything() {
        let gw = gateway();
        gw.push_prices([Some(dec!(45))]);
        gw.set_available("EUR", dec!(100));
        let mut engine = engine(
            gw,
            StrategyConfig {
                min_price: dec!(20),
                max_price: dec!(40),
                ..strategy()
            },
        );

        let outcome = engine.run_cycle().await.unwrap();

        assert_eq!(outcome, CycleOutcome::OutOfBounds { price: dec!(45) });
        assert_eq!(engine.gateway.calls(), vec!["ticker".to_string()]);
        assert_eq!(engine.history.len(), 0);
    }

    #[tokio::test]
    async fn test_trailing_stop_round_trip() {
        let gw = gateway();
        gw.set_available("EUR", dec!(1000));
        gw.push_prices([Some(dec!(95)), Some(dec!(100)), Some(dec!(97))]);
        let mut engine = engine(gw, strategy());

        let entered = engine.run_cycle().await.unwrap();
        assert!(matches!(entered, CycleOutcome::Entered { price, .. } if price == dec!(95)));
        assert_eq!(engine.state(), EngineState::Armed);

        let raised = engine.run_cycle().await.unwrap();
        assert_eq!(raised, CycleOutcome::StopUpdated { stop: dec!(98) });
        assert_eq!(engine.state(), EngineState::Trailing);
        assert_eq!(engine.position().unwrap().highest_price, dec!(100));

        let exited = engine.run_cycle().await.unwrap();
        assert!(matches!(exited, CycleOutcome::Exited { price, .. } if price == dec!(97)));
        assert_eq!(engine.state(), EngineState::Idle);

        let orders = engine.gateway.orders();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].side, Side::Sell);
        assert_eq!(orders[1].amount, orders[0].amount);
    }

    #[tokio::test]
    async fn test_stop_never_lowers() {
        let gw = gateway();
        gw.set_available("EUR", dec!(1000));
        gw.push_prices([Some(dec!(95)), Some(dec!(100)), Some(dec!(99)), Some(dec!(98.5))]);
        let mut engine = engine(gw, strategy());

        engine.run_cycle().await.unwrap();
        engine.run_cycle().await.unwrap();
        assert_eq!(engine.run_cycle().await.unwrap(), CycleOutcome::Holding);
        assert_eq!(engine.run_cycle().await.unwrap(), CycleOutcome::Holding);
        assert_eq!(engine.position().unwrap().trailing_stop, Some(dec!(98)));
    }

    #[tokio::test]
    async fn test_risk_sized_entry() {
        let gw = gateway();
        gw.set_available("EUR", dec!(100));
        gw.push_prices([Some(dec!(50))]);
        let mut engine = engine(
            gw,
            StrategyConfig {
                entry: EntryRule::FixedPrice { price: dec!(60) },
                sizing: SizingMode::RiskFraction {
                    fraction: dec!(0.01),
                },
                ..strategy()
            },
        );

        let outcome = engine.run_cycle().await.unwrap();
        assert!(matches!(outcome, CycleOutcome::Entered { amount, .. } if amount == dec!(0.02)));
    }

    #[tokio::test]
    async fn test_minimum_entry_meets_min_value_as_sent() {
        let gw = gateway();
        gw.set_available("EUR", dec!(100));
        gw.push_prices([Some(dec!(31.57))]);
        let mut engine = engine(
            gw,
            StrategyConfig {
                entry: EntryRule::Discount {
                    fraction: dec!(0.01),
                },
                sizing: SizingMode::ExchangeMinimum,
                ..strategy()
            },
        );

        // 31.57 * 0.99 = 31.2543 goes out as 31.25, and 0.5 / 31.25 = 0.016
        let outcome = engine.run_cycle().await.unwrap();
        assert!(matches!(
            outcome,
            CycleOutcome::Entered { price, amount, .. } if price == dec!(31.25) && amount == dec!(0.016)
        ));
        let order = &engine.gateway.orders()[0];
        assert_eq!(order.price, Some(dec!(31.25)));
        assert!(order.amount * dec!(31.25) >= dec!(0.5));
    }

    #[tokio::test]
    async fn test_downtrend_blocks_grid_entry() {
        let gw = gateway();
        gw.set_available("EUR", dec!(100));
        gw.push_prices([Some(dec!(25))]);
        let grid = StrategyConfig {
            entry: EntryRule::Grid {
                buy_levels: vec![dec!(26), dec!(28), dec!(30)],
            },
            trend_filter: true,
            ..strategy()
        };
        let mut engine = engine(gw, grid);
        for _ in 0..50 {
            engine.history.record(dec!(30));
        }

        assert_eq!(engine.run_cycle().await.unwrap(), CycleOutcome::Holding);
        assert!(!engine.gateway.calls().iter().any(|c| c.starts_with("place")));

        engine.strategy.trend_filter = false;
        let outcome = engine.run_cycle().await.unwrap();
        assert!(matches!(outcome, CycleOutcome::Entered { .. }));
    }

    #[tokio::test]
    async fn test_grid_entry_waits_for_a_level() {
        let gw = gateway();
        gw.set_available("EUR", dec!(100));
        gw.push_prices([Some(dec!(31)), Some(dec!(29.5))]);
        let mut engine = engine(
            gw,
            StrategyConfig {
                entry: EntryRule::Grid {
                    buy_levels: vec![dec!(25), dec!(30)],
                },
                ..strategy()
            },
        );

        assert_eq!(engine.run_cycle().await.unwrap(), CycleOutcome::Holding);
        assert!(matches!(
            engine.run_cycle().await.unwrap(),
            CycleOutcome::Entered { .. }
        ));
    }

    #[tokio::test]
    async fn test_dust_balance_does_not_trade() {
        let gw = gateway();
        gw.set_available("EUR", dec!(0.0005));
        gw.push_prices([Some(dec!(50))]);
        let mut engine = engine(gw, strategy());

        assert_eq!(
            engine.run_cycle().await.unwrap(),
            CycleOutcome::InsufficientBalance
        );
        assert!(!engine.gateway.calls().contains(&"limits".to_string()));
    }

    #[tokio::test]
    async fn test_rejected_order_stays_idle_and_limits_are_cached() {
        let gw = gateway();
        gw.set_available("EUR", dec!(100));
        gw.push_prices([Some(dec!(50))]);
        gw.reject_orders();
        let mut engine = engine(gw, strategy());

        for _ in 0..2 {
            let result = engine.run_cycle().await;
            assert!(matches!(result, Err(TradingError::OrderRejected(_))));
            assert_eq!(engine.state(), EngineState::Idle);
        }
        let limit_calls = engine
            .gateway
            .calls()
            .iter()
            .filter(|c| *c == "limits")
            .count();
        assert_eq!(limit_calls, 1);
    }

    #[tokio::test]
    async fn test_fixed_target_exit() {
        let gw = gateway();
        gw.set_available("EUR", dec!(100));
        gw.push_prices([Some(dec!(50)), Some(dec!(54)), Some(dec!(55))]);
        let mut engine = engine(
            gw,
            StrategyConfig {
                entry: EntryRule::FixedPrice { price: dec!(50) },
                exit: ExitRule::FixedTarget { price: dec!(55) },
                ..strategy()
            },
        );

        engine.run_cycle().await.unwrap();
        assert_eq!(engine.run_cycle().await.unwrap(), CycleOutcome::Holding);
        assert!(matches!(
            engine.run_cycle().await.unwrap(),
            CycleOutcome::Exited { .. }
        ));
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[tokio::test]
    async fn test_grid_exit() {
        let gw = gateway();
        gw.set_available("EUR", dec!(100));
        gw.push_prices([Some(dec!(50)), Some(dec!(53)), Some(dec!(56))]);
        let mut engine = engine(
            gw,
            StrategyConfig {
                entry: EntryRule::FixedPrice { price: dec!(50) },
                exit: ExitRule::Grid {
                    sell_levels: vec![dec!(55), dec!(60)],
                },
                ..strategy()
            },
        );

        engine.run_cycle().await.unwrap();
        assert_eq!(engine.run_cycle().await.unwrap(), CycleOutcome::Holding);
        assert!(matches!(
            engine.run_cycle().await.unwrap(),
            CycleOutcome::Exited { price, .. } if price == dec!(56)
        ));
    }

    #[tokio::test]
    async fn test_position_waits_while_holding_is_dust() {
        let mut gw = gateway();
        gw.fill_immediately = false;
        gw.set_available("EUR", dec!(100));
        gw.push_prices([Some(dec!(50)), Some(dec!(40))]);
        let mut engine = engine(gw, strategy());

        engine.run_cycle().await.unwrap();
        assert_eq!(engine.run_cycle().await.unwrap(), CycleOutcome::Holding);
        assert_eq!(engine.state(), EngineState::Armed);
    }

    #[tokio::test]
    async fn test_bracket_entry() {
        let gw = gateway();
        gw.set_available("EUR", dec!(100));
        gw.push_prices([Some(dec!(50))]);
        gw.script_status("1", [OrderStatus::Filled]);
        gw.script_status("2", [OrderStatus::Pending, OrderStatus::Filled]);
        let mut engine = engine(
            gw,
            StrategyConfig {
                entry: EntryRule::Discount {
                    fraction: dec!(0.01),
                },
                exit: ExitRule::Bracket {
                    profit_fraction: dec!(0.03),
                    stop_loss_fraction: dec!(0.02),
                },
                ..strategy()
            },
        );

        let outcome = engine.run_cycle().await.unwrap();

        assert_eq!(
            outcome,
            CycleOutcome::BracketClosed(BracketOutcome::TargetFilled)
        );
        let orders = engine.gateway.orders();
        assert_eq!(orders[0].price, Some(dec!(49.5)));
        assert_eq!(orders[1].price, Some(dec!(50.985)));
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[tokio::test]
    async fn test_cancelled_entry_returns_to_idle() {
        let gw = gateway();
        gw.set_available("EUR", dec!(100));
        gw.push_prices([Some(dec!(50))]);
        gw.script_status("1", [OrderStatus::Pending, OrderStatus::Cancelled]);
        let mut engine = engine(
            gw,
            StrategyConfig {
                await_fill: true,
                ..strategy()
            },
        );

        assert_eq!(
            engine.run_cycle().await.unwrap(),
            CycleOutcome::EntryCancelled
        );
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[tokio::test]
    async fn test_missing_price_is_data_unavailable() {
        let gw = gateway();
        gw.push_prices([None]);
        let mut engine = engine(gw, strategy());

        let result = engine.run_cycle().await;
        assert!(matches!(result, Err(TradingError::DataUnavailable(_))));
    }

    #[tokio::test]
    async fn test_single_shot_run_survives_bad_cycles() {
        let gw = gateway();
        gw.set_available("EUR", dec!(100));
        gw.push_prices([
            None,
            Some(dec!(500000)),
            Some(dec!(90)),
            Some(dec!(100)),
            Some(dec!(97)),
        ]);
        let mut engine = engine(
            gw,
            StrategyConfig {
                single_shot: true,
                ..strategy()
            },
        );

        engine.run().await;

        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.gateway.orders().len(), 2);
    }
}
