//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Admin authorization set (membership => admin role)
    pub const ADMIN: &str = "admin";
    /// Open authorization set (membership => standard role)
    pub const OPEN: &str = "open";
    pub const AIRCRAFT: &str = "aircraft";
    pub const EMPLOYEES: &str = "employees";
    pub const FLIGHT_LOGS: &str = "flight_logs";
    pub const FUEL_LOGS: &str = "fuel_logs";
}
