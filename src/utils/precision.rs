// src/utils/precision.rs
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount DOWN to `dp` decimal places so the order never exceeds the balance.
/// Example: amount=0.123456, dp=4 -> 0.1234
pub fn normalize_amount(amount: Decimal, dp: u32) -> Decimal {
    amount
        .round_dp_with_strategy(dp, RoundingStrategy::ToZero)
        .normalize()
}

/// Rounds an amount UP to `dp` decimal places, for minimums that truncation must not undercut.
/// Example: amount=0.0158378, dp=4 -> 0.0159
pub fn ceil_amount(amount: Decimal, dp: u32) -> Decimal {
    amount
        .round_dp_with_strategy(dp, RoundingStrategy::AwayFromZero)
        .normalize()
}

/// Rounds a price to the NEAREST value with `dp` decimal places.
/// Example: price=100.165, dp=2 -> 100.17
pub fn normalize_price(price: Decimal, dp: u32) -> Decimal {
    price
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
