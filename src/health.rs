// src/health.rs
//! Liveness endpoint. Runs in its own task and never touches trading state.
use crate::config::HealthConfig;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub fn router() -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "running" }))
}

pub async fn serve(bind_addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!("Health check server listening on {}", bind_addr);
    axum::serve(listener, router()).await?;
    Ok(())
}

pub fn spawn(config: &HealthConfig) -> Option<JoinHandle<()>> {
    if !config.enabled {
        return None;
    }
    let bind_addr = config.bind_addr.clone();
    Some(tokio::spawn(async move {
        if let Err(e) = serve(&bind_addr).await {
            error!("Health check server stopped: {}", e);
        }
    }))
}
