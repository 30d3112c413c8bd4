//! Fuel transaction model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Who the fuel moved for. Determines the ledger direction: `Refueling`
/// replenishes the truck, the other two dispense from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    /// Company-owned aircraft
    Company,
    /// External customer aircraft
    External,
    /// Refueling-truck replenishment
    Refueling,
}

impl CustomerType {
    /// Whether this transaction removes fuel from the truck.
    pub fn is_dispensing(self) -> bool {
        !matches!(self, CustomerType::Refueling)
    }
}

/// One fueling event. Immutable once logged; no edit-then-recompute cascade
/// to later transactions is modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FuelTransaction {
    /// Generated document ID
    pub id: String,
    /// Date of the transaction (RFC3339)
    pub transaction_date: String,
    /// Customer classification
    pub customer_type: CustomerType,
    /// Aircraft fueled, if applicable
    pub aircraft_id: Option<String>,
    /// Quantity on hand before the transaction (liters)
    pub start_quantity: f64,
    /// Quantity moved by the transaction (liters)
    pub liters: f64,
    /// Quantity remaining after the transaction (liters, full precision)
    pub left_over_quantity: f64,
    /// Monetary cost, used for truck replenishment
    pub cost: Option<f64>,
    /// When the record was created (RFC3339)
    pub created_at: String,
}
