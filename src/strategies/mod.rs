// src/strategies/mod.rs
pub mod grid;
pub mod sizing;
pub mod trend;
