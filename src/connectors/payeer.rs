// src/connectors/payeer.rs
use crate::config::{Credentials, ExchangeConfig, MarketConfig};
use crate::connectors::messages::{
    AccountResponse, InfoResponse, OrderCreateResponse, OrderStatusResponse, TickerResponse,
};
use crate::connectors::retry::RetryPolicy;
use crate::connectors::traits::ExchangeGateway;
use crate::error::{ApiError, TradingError};
use crate::types::{Balances, Order, OrderStatus, PairLimits, Side};
use crate::utils::precision::{normalize_amount, normalize_price};
use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use sha2::Sha256;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

pub type JsonObject = Map<String, Value>;

const ORDER_CREATE: &str = "order_create";

/// Hex HMAC-SHA256 of `method ++ body`.
pub fn sign(secret: &[u8], method: &str, body: &str) -> Result<String, ApiError> {
    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|e| ApiError::Signing(e.to_string()))?;
    mac.update(method.as_bytes());
    mac.update(body.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Whether resending a call can cause a second remote action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Idempotency {
    Idempotent,
    NonIdempotent,
}

impl Idempotency {
    pub fn of(method: &str) -> Self {
        if method == ORDER_CREATE {
            Idempotency::NonIdempotent
        } else {
            Idempotency::Idempotent
        }
    }
}

pub struct PayeerClient {
    credentials: Credentials,
    http_client: Client,
    base_url: String,
    retry: RetryPolicy,
    retry_order_create: bool,
    client_order_ids: bool,
    amount_precision: u32,
    price_precision: u32,
}

impl PayeerClient {
    pub fn new(
        credentials: Credentials,
        exchange: &ExchangeConfig,
        market: &MarketConfig,
    ) -> Result<Self, TradingError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(exchange.request_timeout_secs))
            .build()
            .map_err(|e| TradingError::Configuration(format!("HTTP client: {}", e)))?;

        let mut base_url = exchange.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            credentials,
            http_client,
            base_url,
            retry: RetryPolicy::from(exchange),
            retry_order_create: exchange.retry_order_create,
            client_order_ids: exchange.client_order_ids,
            amount_precision: market.amount_precision,
            price_precision: market.price_precision,
        })
    }

    pub async fn call(&self, method: &str, payload: JsonObject) -> Result<JsonObject, ApiError> {
        self.call_with(method, payload, Idempotency::of(method))
            .await
    }

    /// Signs `payload` (with `ts` prepended) once and sends the same bytes on every attempt.
    pub async fn call_with(
        &self,
        method: &str,
        payload: JsonObject,
        idempotency: Idempotency,
    ) -> Result<JsonObject, ApiError> {
        let mut request = JsonObject::new();
        request.insert("ts".to_string(), json!(Utc::now().timestamp_millis()));
        request.extend(payload);

        let body = serde_json::to_string(&request).map_err(|e| ApiError::Signing(e.to_string()))?;
        let signature = sign(self.credentials.secret(), method, &body)?;

        let policy = match idempotency {
            Idempotency::NonIdempotent if !self.retry_order_create => self.retry.single_attempt(),
            _ => self.retry.clone(),
        };

        let response = policy
            .run(method, || self.send_once(method, &body, &signature))
            .await?;

        if response.get("success").and_then(Value::as_bool) == Some(true) {
            Ok(response)
        } else {
            warn!("'{}' returned success=false: {:?}", method, response);
            Err(ApiError::Rejected {
                method: method.to_string(),
                body: Value::Object(response),
            })
        }
    }

    async fn send_once(
        &self,
        method: &str,
        body: &str,
        signature: &str,
    ) -> Result<JsonObject, ApiError> {
        let url = format!("{}{}", self.base_url, method);

        let response = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header("API-ID", &self.credentials.api_id)
            .header("API-SIGN", signature)
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ApiError::Decode(format!("expected an object, got {}", other))),
            Err(e) => Err(ApiError::Decode(e.to_string())),
        }
    }
}

fn decode<T: DeserializeOwned>(method: &str, body: JsonObject) -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(body))
        .map_err(|e| ApiError::Decode(format!("{}: {}", method, e)))
}

fn object(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

#[async_trait]
impl ExchangeGateway for PayeerClient {
    async fn get_ticker(&self, pair: &str) -> Result<Decimal, TradingError> {
        let body = self
            .call("ticker", object(json!({ "pair": pair })))
            .await
            .map_err(|e| TradingError::DataUnavailable(format!("ticker {}: {}", pair, e)))?;

        let resp: TickerResponse = decode("ticker", body)
            .map_err(|e| TradingError::DataUnavailable(e.to_string()))?;

        resp.pairs
            .get(pair)
            .and_then(|entry| entry.last)
            .ok_or_else(|| TradingError::DataUnavailable(format!("no last price for {}", pair)))
    }

    async fn get_balances(&self) -> Balances {
        let result = match self.call("account", JsonObject::new()).await {
            Ok(body) => decode::<AccountResponse>("account", body),
            Err(e) => Err(e),
        };

        match result {
            Ok(resp) => Balances(resp.balances),
            Err(e) => {
                error!("Failed to fetch balances: {}", e);
                Balances::default()
            }
        }
    }

    async fn get_pair_limits(&self, pair: &str) -> Result<PairLimits, TradingError> {
        let body = self
            .call("info", object(json!({ "pair": pair })))
            .await
            .map_err(|e| TradingError::LimitsUnavailable(format!("{}: {}", pair, e)))?;

        let resp: InfoResponse =
            decode("info", body).map_err(|e| TradingError::LimitsUnavailable(e.to_string()))?;

        resp.pairs
            .get(pair)
            .map(|info| PairLimits {
                min_amount: info.min_amount,
                min_value: info.min_value,
            })
            .ok_or_else(|| TradingError::LimitsUnavailable(format!("{} not listed", pair)))
    }

    async fn place_order(
        &self,
        pair: &str,
        side: Side,
        amount: Decimal,
        price: Option<Decimal>,
    ) -> Result<Order, TradingError> {
        let amount = normalize_amount(amount, self.amount_precision);
        let price = price.map(|p| normalize_price(p, self.price_precision));

        if amount <= Decimal::ZERO {
            return Err(TradingError::OrderRejected(
                json!({ "error": "amount rounds to zero" }),
            ));
        }

        let order_type = if price.is_some() { "limit" } else { "market" };
        let mut payload = object(json!({
            "pair": pair,
            "type": order_type,
            "action": side.as_str(),
            "amount": amount.to_string(),
        }));
        if let Some(p) = price {
            payload.insert("price".to_string(), json!(p.to_string()));
        }

        let idempotency = if self.client_order_ids {
            payload.insert(
                "client_order_id".to_string(),
                json!(Uuid::new_v4().to_string()),
            );
            Idempotency::Idempotent
        } else {
            Idempotency::NonIdempotent
        };

        info!(
            "🚀 Sending Order: {} {} {} @ {:?}",
            side.as_str(),
            amount,
            pair,
            price
        );

        let body = match self.call_with(ORDER_CREATE, payload, idempotency).await {
            Ok(body) => body,
            Err(ApiError::Rejected { body, .. }) => return Err(TradingError::OrderRejected(body)),
            Err(e) => return Err(TradingError::Api(e)),
        };

        let resp: OrderCreateResponse = decode(ORDER_CREATE, body.clone())?;
        let id = resp
            .id()
            .ok_or_else(|| TradingError::OrderRejected(Value::Object(body)))?;

        Ok(Order {
            id,
            side,
            amount,
            price,
            status: OrderStatus::Pending,
        })
    }

    async fn get_order_status(&self, order_id: &str) -> Result<OrderStatus, TradingError> {
        let body = self
            .call("order_status", object(json!({ "order_id": order_id })))
            .await?;
        let resp: OrderStatusResponse = decode("order_status", body)?;

        Ok(resp
            .order
            .map(|o| OrderStatus::from_remote(&o.status))
            .unwrap_or(OrderStatus::Unknown))
    }

    async fn cancel_order(&self, order_id: &str) -> bool {
        match self
            .call("order_cancel", object(json!({ "order_id": order_id })))
            .await
        {
            Ok(_) => {
                info!("Order {} cancelled", order_id);
                true
            }
            Err(e) => {
                error!("Failed to cancel order {}: {}", order_id, e);
                false
            }
        }
    }
}
