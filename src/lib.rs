// SPDX-License-Identifier: MIT

//! Skyops: aviation-operations management backend
//!
//! This crate provides the backend API for tracking aircraft, employees,
//! flight logs and the fuel ledger, with role-based access resolved from
//! Firestore authorization collections.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
