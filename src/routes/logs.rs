// SPDX-License-Identifier: MIT

//! Flight log and fuel ledger routes.
//!
//! Fuel transactions are append-only: the leftover quantity is computed and
//! validated server-side before anything is written.

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{CustomerType, FlightLog, FuelTransaction};
use crate::services::fuel::{compute_left_over, display_quantity};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    50
}

const MAX_PER_PAGE: u32 = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/flights", get(list_flights).post(create_flight))
        .route("/api/fuel", get(list_fuel).post(create_fuel))
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/flights/{id}", delete(delete_flight))
}

fn validation_error(e: validator::ValidationErrors) -> AppError {
    AppError::Validation(e.to_string())
}

fn parse_rfc3339(field: &str, raw: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|_| {
            AppError::BadRequest(format!("Invalid '{}': must be RFC3339 datetime", field))
        })
}

// ─── Flight Logs ─────────────────────────────────────────────

#[derive(Deserialize)]
struct FlightsQuery {
    /// Filter by aircraft registration
    aircraft: Option<String>,
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: u32,
    /// Pagination: items per page
    #[serde(default = "default_per_page")]
    per_page: u32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlightLogsResponse {
    pub flights: Vec<FlightLog>,
    pub page: u32,
    pub per_page: u32,
}

/// Get flight logs, newest first, optionally filtered by aircraft.
async fn list_flights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FlightsQuery>,
) -> Result<Json<FlightLogsResponse>> {
    if params.page < 1 {
        return Err(AppError::BadRequest(
            "Page must be greater than 0".to_string(),
        ));
    }

    let limit = params.per_page.min(MAX_PER_PAGE);
    let offset = (params.page - 1)
        .checked_mul(limit)
        .ok_or_else(|| AppError::BadRequest("Page number causes overflow".to_string()))?;

    let flights = state
        .db
        .list_flight_logs(params.aircraft.as_deref(), limit, offset)
        .await?;

    Ok(Json(FlightLogsResponse {
        flights,
        page: params.page,
        per_page: limit,
    }))
}

#[derive(Deserialize, Validate)]
pub struct CreateFlightRequest {
    /// Flight date (RFC3339)
    pub flight_date: String,
    #[validate(length(min = 1, message = "aircraft is required"))]
    pub aircraft_id: String,
    #[validate(length(min = 1, message = "pilot is required"))]
    pub pilot_id: String,
    #[validate(length(min = 1, message = "origin is required"))]
    pub origin: String,
    #[validate(length(min = 1, message = "destination is required"))]
    pub destination: String,
    #[validate(range(min = 0.1, max = 24.0, message = "flight hours out of range"))]
    pub flight_hours: f64,
    pub remarks: Option<String>,
}

/// Log a flight.
async fn create_flight(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateFlightRequest>,
) -> Result<Json<FlightLog>> {
    payload.validate().map_err(validation_error)?;
    let flight_date = parse_rfc3339("flight_date", &payload.flight_date)?;

    if state.db.get_aircraft(&payload.aircraft_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Aircraft {} not found",
            payload.aircraft_id
        )));
    }

    let log = FlightLog {
        id: uuid::Uuid::new_v4().to_string(),
        flight_date: format_utc_rfc3339(flight_date),
        aircraft_id: payload.aircraft_id,
        pilot_id: payload.pilot_id,
        origin: payload.origin,
        destination: payload.destination,
        flight_hours: payload.flight_hours,
        remarks: payload.remarks,
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };

    state.db.upsert_flight_log(&log).await?;
    tracing::info!(id = %log.id, aircraft = %log.aircraft_id, "Flight logged");

    Ok(Json(log))
}

/// Delete a flight log (admin).
async fn delete_flight(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    state.db.delete_flight_log(&id).await?;
    tracing::info!(id = %id, "Flight log deleted");

    Ok(Json(serde_json::json!({ "deleted": id })))
}

// ─── Fuel Ledger ─────────────────────────────────────────────

#[derive(Deserialize)]
struct FuelQuery {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_per_page")]
    per_page: u32,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FuelLogsResponse {
    pub transactions: Vec<FuelTransaction>,
    pub page: u32,
    pub per_page: u32,
}

/// Get fuel transactions, newest first.
async fn list_fuel(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FuelQuery>,
) -> Result<Json<FuelLogsResponse>> {
    if params.page < 1 {
        return Err(AppError::BadRequest(
            "Page must be greater than 0".to_string(),
        ));
    }

    let limit = params.per_page.min(MAX_PER_PAGE);
    let offset = (params.page - 1)
        .checked_mul(limit)
        .ok_or_else(|| AppError::BadRequest("Page number causes overflow".to_string()))?;

    let transactions = state.db.list_fuel_logs(limit, offset).await?;

    Ok(Json(FuelLogsResponse {
        transactions,
        page: params.page,
        per_page: limit,
    }))
}

#[derive(Deserialize)]
pub struct CreateFuelRequest {
    /// Transaction date (RFC3339)
    pub transaction_date: String,
    pub customer_type: CustomerType,
    pub aircraft_id: Option<String>,
    /// Quantity on hand before the transaction (liters)
    pub start_quantity: f64,
    /// Quantity moved by the transaction (liters)
    pub liters: f64,
    /// Cost, for truck replenishment
    pub cost: Option<f64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FuelLogCreatedResponse {
    pub transaction: FuelTransaction,
    /// Leftover rounded to one decimal for display; the stored value keeps
    /// full precision.
    pub left_over_display: f64,
}

/// Append a fuel transaction.
///
/// The leftover quantity is derived here, never taken from the client, and
/// validation happens before any write is attempted.
async fn create_fuel(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateFuelRequest>,
) -> Result<Json<FuelLogCreatedResponse>> {
    let left_over_quantity =
        compute_left_over(payload.start_quantity, payload.liters, payload.customer_type)?;
    let transaction_date = parse_rfc3339("transaction_date", &payload.transaction_date)?;

    let transaction = FuelTransaction {
        id: uuid::Uuid::new_v4().to_string(),
        transaction_date: format_utc_rfc3339(transaction_date),
        customer_type: payload.customer_type,
        aircraft_id: payload.aircraft_id,
        start_quantity: payload.start_quantity,
        liters: payload.liters,
        left_over_quantity,
        cost: payload.cost,
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };

    state.db.add_fuel_log(&transaction).await?;
    tracing::info!(
        id = %transaction.id,
        customer_type = ?transaction.customer_type,
        left_over = left_over_quantity,
        "Fuel transaction logged"
    );

    Ok(Json(FuelLogCreatedResponse {
        left_over_display: display_quantity(left_over_quantity),
        transaction,
    }))
}
