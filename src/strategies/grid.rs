// src/strategies/grid.rs
use rust_decimal::Decimal;

/// Pulls every baseline level toward `current_price` by `compression_factor`.
/// A factor of 1 keeps the baseline as is. Result is sorted ascending.
pub fn adjust_grid_levels(
    current_price: Decimal,
    baseline: &[Decimal],
    compression_factor: Decimal,
) -> Vec<Decimal> {
    let mut levels: Vec<Decimal> = baseline
        .iter()
        .map(|level| current_price + (*level - current_price) * compression_factor)
        .collect();
    levels.sort();
    levels
}

/// Lowest buy level the price has come down to (`price <= level`).
pub fn first_buy_level(price: Decimal, levels: &[Decimal]) -> Option<Decimal> {
    let mut sorted = levels.to_vec();
    sorted.sort();
    sorted.into_iter().find(|level| price <= *level)
}

/// Highest sell level the price has climbed to (`price >= level`).
pub fn first_sell_level(price: Decimal, levels: &[Decimal]) -> Option<Decimal> {
    let mut sorted = levels.to_vec();
    sorted.sort();
    sorted.into_iter().rev().find(|level| price >= *level)
}
