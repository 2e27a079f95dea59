// src/core/mod.rs
pub mod engine;
pub mod monitor;
