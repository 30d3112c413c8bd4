//! Flight log model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Flight log record stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FlightLog {
    /// Generated document ID
    pub id: String,
    /// Flight date (RFC3339)
    pub flight_date: String,
    /// Aircraft registration flown
    pub aircraft_id: String,
    /// Employee ID of the pilot in command
    pub pilot_id: String,
    /// Departure airfield
    pub origin: String,
    /// Arrival airfield
    pub destination: String,
    /// Block hours flown
    pub flight_hours: f64,
    /// Free-form remarks
    pub remarks: Option<String>,
    /// When the record was created (RFC3339)
    pub created_at: String,
}
