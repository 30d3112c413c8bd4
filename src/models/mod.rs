// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod aircraft;
pub mod employee;
pub mod flight_log;
pub mod fuel_log;
pub mod user;

pub use aircraft::Aircraft;
pub use employee::Employee;
pub use flight_log::FlightLog;
pub use fuel_log::{CustomerType, FuelTransaction};
pub use user::{AuthorizationRecord, Identity, Role};
