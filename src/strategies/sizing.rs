// src/strategies/sizing.rs
use crate::config::SizingMode;
use crate::types::PairLimits;
use crate::utils::precision::{ceil_amount, normalize_amount};
use rust_decimal::Decimal;

/// Smallest base amount the exchange accepts at `price`.
pub fn min_required(price: Decimal, limits: &PairLimits) -> Decimal {
    limits.min_amount.max(limits.min_value / price)
}

/// Risk-based size: `max(min_required, balance * risk / price)` capped at
/// `balance / price`, on the `amount_dp` grid. `None` when nothing sensible can be bought.
pub fn size_position(
    balance: Decimal,
    risk_fraction: Decimal,
    price: Decimal,
    limits: &PairLimits,
    dust_threshold: Decimal,
    amount_dp: u32,
) -> Option<Decimal> {
    size_with(balance, price, limits, dust_threshold, amount_dp, |_| {
        balance * risk_fraction / price
    })
}

/// Sizes an entry according to the configured mode.
pub fn size_for_mode(
    mode: &SizingMode,
    balance: Decimal,
    price: Decimal,
    limits: &PairLimits,
    dust_threshold: Decimal,
    amount_dp: u32,
) -> Option<Decimal> {
    match mode {
        SizingMode::RiskFraction { fraction } => {
            size_position(balance, *fraction, price, limits, dust_threshold, amount_dp)
        }
        SizingMode::FixedAmount { amount } => {
            size_with(balance, price, limits, dust_threshold, amount_dp, |_| *amount)
        }
        SizingMode::ExchangeMinimum => {
            size_with(balance, price, limits, dust_threshold, amount_dp, |minimum| minimum)
        }
    }
}

// The minimum is rounded up and the result truncated, so the amount sent
// after the gateway's own truncation still covers the exchange minimum.
fn size_with(
    balance: Decimal,
    price: Decimal,
    limits: &PairLimits,
    dust_threshold: Decimal,
    amount_dp: u32,
    candidate: impl FnOnce(Decimal) -> Decimal,
) -> Option<Decimal> {
    if price <= Decimal::ZERO || balance <= dust_threshold {
        return None;
    }

    let minimum = ceil_amount(min_required(price, limits), amount_dp);
    let affordable = balance / price;
    if affordable < minimum {
        return None;
    }

    let size = minimum.max(candidate(minimum)).min(affordable);
    Some(normalize_amount(size, amount_dp))
}
