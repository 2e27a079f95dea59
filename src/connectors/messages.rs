// src/connectors/messages.rs
//! Response bodies of the trade API. Numbers arrive either as JSON numbers or
//! as strings; `Decimal` accepts both.
use crate::types::Balance;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// `ticker`: `{"success":true,"pairs":{"DASH_EUR":{"last":"31.5", ...}}}`
#[derive(Debug, Deserialize)]
pub struct TickerResponse {
    #[serde(default)]
    pub pairs: HashMap<String, TickerEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TickerEntry {
    pub last: Option<Decimal>,
}

/// `account`: `{"success":true,"balances":{"EUR":{"total":1,"available":1,"hold":0}}}`
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    #[serde(default)]
    pub balances: HashMap<String, Balance>,
}

/// `info`: `{"success":true,"pairs":{"DASH_EUR":{"min_amount":"0.0001","min_value":"0.5"}}}`
#[derive(Debug, Deserialize)]
pub struct InfoResponse {
    #[serde(default)]
    pub pairs: HashMap<String, PairInfo>,
}

#[derive(Debug, Deserialize)]
pub struct PairInfo {
    pub min_amount: Decimal,
    pub min_value: Decimal,
}

/// `order_create`: the id comes back as a number.
#[derive(Debug, Deserialize)]
pub struct OrderCreateResponse {
    pub order_id: serde_json::Value,
}

impl OrderCreateResponse {
    pub fn id(&self) -> Option<String> {
        match &self.order_id {
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderStatusResponse {
    #[serde(default)]
    pub order: Option<OrderInfo>,
}

#[derive(Debug, Deserialize)]
pub struct OrderInfo {
    #[serde(default)]
    pub status: String,
}
