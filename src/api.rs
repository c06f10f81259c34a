//! HTTP API for the Work-Time Engine.
//!
//! This module exposes a minimal, stateless REST API around the engine
//! using the [`axum`](https://crates.io/crates/axum) framework.  Clients
//! post income details and purchase prices and receive rates and
//! time-cost breakdowns as JSON.  Nothing a client sends is stored.

use crate::config::Config;
use crate::engine::{compute_time_cost, price_items};
use crate::format::{format_time_cost, minutes_to_afford, COFFEE_PRICE};
use crate::models::{IncomeDescription, PricedItem, TimeCostBreakdown};
use crate::rate::derive_hourly_rate;
use crate::validate::validate_calculation;
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Application state shared across requests.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    /// The request's workday length, or the configured default.
    fn workday(&self, hours_per_day: Option<f64>) -> f64 {
        hours_per_day
            .filter(|hours| *hours > 0.0)
            .unwrap_or(self.config.default_workday_hours)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResponse {
    pub hourly_rate: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeCostRequest {
    pub item_cost: f64,
    pub hourly_rate: f64,
    #[serde(default)]
    pub hours_per_day: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub income: IncomeDescription,
    #[serde(default)]
    pub item_cost: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub hourly_rate: f64,
    pub time_cost: TimeCostBreakdown,
    /// The breakdown rendered as text, e.g. `2 work days, 4.0 hours`.
    pub summary: String,
    pub minutes_for_coffee: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub income: IncomeDescription,
    pub items: Vec<PricedItem>,
}

/// Build the API router for the given configuration.  Returns the
/// router and a handle to the state.
pub fn build_router(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState { config });
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/api/rate", post(rate_handler))
        .route("/api/time-cost", post(time_cost_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/batch", post(batch_handler))
        .with_state(state.clone());
    (router, state)
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Handler for POST /api/rate
async fn rate_handler(Json(income): Json<IncomeDescription>) -> Json<RateResponse> {
    let hourly_rate = derive_hourly_rate(&income);
    debug!(period = %income.period, hourly_rate, "derived rate");
    Json(RateResponse { hourly_rate })
}

/// Handler for POST /api/time-cost
async fn time_cost_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<TimeCostRequest>,
) -> Response {
    let workday = app_state.workday(request.hours_per_day);
    match compute_time_cost(request.item_cost, request.hourly_rate, Some(workday)) {
        Some(time_cost) => (StatusCode::OK, Json(time_cost)).into_response(),
        None => undetermined(),
    }
}

/// Handler for POST /api/calculate
///
/// Validates the whole form first and reports every failing field.
async fn calculate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<CalculateRequest>,
) -> Response {
    if let Err(errors) = validate_calculation(&request.income, request.item_cost) {
        debug!(%errors, "rejected calculation");
        let body = Json(json!({ "errors": errors.messages() }));
        return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
    }
    let item_cost = request.item_cost.unwrap_or_default();
    let hourly_rate = derive_hourly_rate(&request.income);
    let workday = app_state.workday(request.income.hours_per_day);
    let Some(time_cost) = compute_time_cost(item_cost, hourly_rate, Some(workday)) else {
        return undetermined();
    };
    info!(hourly_rate, total_hours = time_cost.total_hours, "calculated time cost");
    let response = CalculateResponse {
        hourly_rate,
        time_cost,
        summary: format_time_cost(&time_cost),
        minutes_for_coffee: minutes_to_afford(COFFEE_PRICE, hourly_rate),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for POST /api/batch
async fn batch_handler(
    State(app_state): State<Arc<AppState>>,
    Json(mut request): Json<BatchRequest>,
) -> Response {
    request.income.hours_per_day = Some(app_state.workday(request.income.hours_per_day));
    // Pricing runs on the rayon pool; keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || price_items(&request.income, &request.items)).await;
    match result {
        Ok(batch) => (StatusCode::OK, Json(batch)).into_response(),
        Err(err) => {
            let body = Json(json!({ "error": err.to_string() }));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}

fn undetermined() -> Response {
    let body = Json(json!({ "error": "undetermined" }));
    (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
}

/// Launch the API server.  This function builds the router from the
/// given configuration and binds to its address.  It runs until the
/// process receives Ctrl-C.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_addr;
    let (router, _state) = build_router(config);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("server error")
}
