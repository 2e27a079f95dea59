// src/connectors/mod.rs
pub mod messages;
pub mod payeer;
pub mod retry;
pub mod traits;

#[cfg(test)]
pub mod mock;
