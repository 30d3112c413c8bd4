//! Aircraft model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Aircraft record stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Aircraft {
    /// Registration / tail number (also used as document ID)
    pub registration: String,
    /// Model designation (e.g. "C172")
    pub model: String,
    /// Manufacturer name
    pub manufacturer: String,
    /// Seat count
    pub seats: u32,
    /// Year of manufacture
    pub year: Option<i32>,
    /// When the record was created (RFC3339)
    pub created_at: String,
}
