// src/error.rs
use thiserror::Error;

/// Failures of a single signed call to the exchange.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("'{method}' reported failure: {body}")]
    Rejected {
        method: String,
        body: serde_json::Value,
    },

    #[error("undecodable response: {0}")]
    Decode(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<ApiError> },
}

impl ApiError {
    pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Status { status, .. } => Self::RETRYABLE_STATUSES.contains(status),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Everything that can end a trading cycle early.
#[derive(Debug, Error)]
pub enum TradingError {
    #[error("exchange API error: {0}")]
    Api(#[from] ApiError),

    #[error("market data unavailable: {0}")]
    DataUnavailable(String),

    #[error("pair limits unavailable: {0}")]
    LimitsUnavailable(String),

    #[error("order rejected: {0}")]
    OrderRejected(serde_json::Value),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<config::ConfigError> for TradingError {
    fn from(e: config::ConfigError) -> Self {
        TradingError::Configuration(e.to_string())
    }
}
