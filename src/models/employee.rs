//! Employee model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Employee record stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Employee {
    /// Generated document ID
    pub id: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Work email
    pub email: String,
    /// Position (e.g. "Pilot", "Mechanic")
    pub position: String,
    /// Pilot/mechanic license number, if any
    pub license_number: Option<String>,
    /// When the record was created (RFC3339)
    pub created_at: String,
}
