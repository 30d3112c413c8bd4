//! Identity and authorization models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Authenticated identity as supplied by the external auth provider.
///
/// Opaque to this application: the provider guarantees `uid` is stable and
/// unique; nothing else is assumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Provider-assigned unique user ID
    pub uid: String,
    /// Email address
    pub email: String,
}

/// Access tier of a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Open,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Authorization record stored in one of the two role collections.
///
/// A uid should appear in at most one of `admin`/`open`; if it somehow
/// appears in both, admin wins (see `services::session`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationRecord {
    /// Provider user ID (also used as document ID)
    pub uid: String,
    /// Email address
    pub email: String,
    /// Denormalized display name
    pub username: String,
}
