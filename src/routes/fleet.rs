// SPDX-License-Identifier: MIT

//! Fleet routes: aircraft and employee CRUD.
//!
//! Reads are open to any authenticated session; writes are admin-only (the
//! gate is layered in routes/mod.rs).

use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{Aircraft, Employee};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/aircraft", get(list_aircraft))
        .route("/api/employees", get(list_employees))
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/aircraft", post(create_aircraft))
        .route("/api/aircraft/{registration}", put(update_aircraft))
        .route("/api/aircraft/{registration}", delete(delete_aircraft))
        .route("/api/employees", post(create_employee))
        .route("/api/employees/{id}", put(update_employee))
        .route("/api/employees/{id}", delete(delete_employee))
}

fn validation_error(e: validator::ValidationErrors) -> AppError {
    AppError::Validation(e.to_string())
}

// ─── Aircraft ────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AircraftListResponse {
    pub aircraft: Vec<Aircraft>,
    pub total: u32,
}

/// List the fleet.
async fn list_aircraft(State(state): State<Arc<AppState>>) -> Result<Json<AircraftListResponse>> {
    let mut aircraft = state.db.list_aircraft().await?;
    aircraft.sort_by(|a, b| a.registration.cmp(&b.registration));

    let total = aircraft.len() as u32;
    Ok(Json(AircraftListResponse { aircraft, total }))
}

#[derive(Deserialize, Validate)]
pub struct CreateAircraftRequest {
    #[validate(length(min = 1, message = "registration is required"))]
    pub registration: String,
    #[validate(length(min = 1, message = "model is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "manufacturer is required"))]
    pub manufacturer: String,
    #[validate(range(min = 1, message = "seats must be at least 1"))]
    pub seats: u32,
    pub year: Option<i32>,
}

/// Register a new aircraft (admin).
async fn create_aircraft(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAircraftRequest>,
) -> Result<Json<Aircraft>> {
    payload.validate().map_err(validation_error)?;

    if state.db.get_aircraft(&payload.registration).await?.is_some() {
        return Err(AppError::BadRequest(format!(
            "Aircraft {} already exists",
            payload.registration
        )));
    }

    let aircraft = Aircraft {
        registration: payload.registration,
        model: payload.model,
        manufacturer: payload.manufacturer,
        seats: payload.seats,
        year: payload.year,
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };

    state.db.upsert_aircraft(&aircraft).await?;
    tracing::info!(registration = %aircraft.registration, "Aircraft created");

    Ok(Json(aircraft))
}

#[derive(Deserialize, Validate)]
pub struct UpdateAircraftRequest {
    #[validate(length(min = 1, message = "model is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "manufacturer is required"))]
    pub manufacturer: String,
    #[validate(range(min = 1, message = "seats must be at least 1"))]
    pub seats: u32,
    pub year: Option<i32>,
}

/// Update an aircraft (admin). Fetch-modify-write to preserve `created_at`.
async fn update_aircraft(
    State(state): State<Arc<AppState>>,
    Path(registration): Path<String>,
    Json(payload): Json<UpdateAircraftRequest>,
) -> Result<Json<Aircraft>> {
    payload.validate().map_err(validation_error)?;

    let mut aircraft = state
        .db
        .get_aircraft(&registration)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Aircraft {} not found", registration)))?;

    aircraft.model = payload.model;
    aircraft.manufacturer = payload.manufacturer;
    aircraft.seats = payload.seats;
    aircraft.year = payload.year;

    state.db.upsert_aircraft(&aircraft).await?;
    Ok(Json(aircraft))
}

/// Remove an aircraft from the registry (admin).
async fn delete_aircraft(
    State(state): State<Arc<AppState>>,
    Path(registration): Path<String>,
) -> Result<Json<serde_json::Value>> {
    if state.db.get_aircraft(&registration).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Aircraft {} not found",
            registration
        )));
    }

    state.db.delete_aircraft(&registration).await?;
    tracing::info!(registration = %registration, "Aircraft deleted");

    Ok(Json(serde_json::json!({ "deleted": registration })))
}

// ─── Employees ───────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EmployeeListResponse {
    pub employees: Vec<Employee>,
    pub total: u32,
}

/// List all employees.
async fn list_employees(State(state): State<Arc<AppState>>) -> Result<Json<EmployeeListResponse>> {
    let mut employees = state.db.list_employees().await?;
    employees.sort_by(|a, b| {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
    });

    let total = employees.len() as u32;
    Ok(Json(EmployeeListResponse { employees, total }))
}

#[derive(Deserialize, Validate)]
pub struct EmployeeRequest {
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "position is required"))]
    pub position: String,
    pub license_number: Option<String>,
}

/// Add an employee (admin).
async fn create_employee(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EmployeeRequest>,
) -> Result<Json<Employee>> {
    payload.validate().map_err(validation_error)?;

    let employee = Employee {
        id: uuid::Uuid::new_v4().to_string(),
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        position: payload.position,
        license_number: payload.license_number,
        created_at: format_utc_rfc3339(chrono::Utc::now()),
    };

    state.db.upsert_employee(&employee).await?;
    tracing::info!(id = %employee.id, "Employee created");

    Ok(Json(employee))
}

/// Update an employee (admin).
async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeRequest>,
) -> Result<Json<Employee>> {
    payload.validate().map_err(validation_error)?;

    let mut employee = state
        .db
        .get_employee(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", id)))?;

    employee.first_name = payload.first_name;
    employee.last_name = payload.last_name;
    employee.email = payload.email;
    employee.position = payload.position;
    employee.license_number = payload.license_number;

    state.db.upsert_employee(&employee).await?;
    Ok(Json(employee))
}

/// Remove an employee (admin).
async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    if state.db.get_employee(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Employee {} not found", id)));
    }

    state.db.delete_employee(&id).await?;
    tracing::info!(id = %id, "Employee deleted");

    Ok(Json(serde_json::json!({ "deleted": id })))
}
