// SPDX-License-Identifier: MIT

//! Role resolution and route guarding.
//!
//! A signed-in user's access tier is determined by membership in one of two
//! disjoint authorization collections (`admin` and `open`). The resolver
//! checks both concurrently, applies admin-wins precedence, and fails closed:
//! a lookup error counts as non-membership, never as a grant.
//!
//! Session state lives in an explicit [`SessionContext`] with defined
//! transitions rather than ambient globals, and the route guard is a pure
//! function of state and route so it can be tested without I/O.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Identity, Role};
use async_trait::async_trait;

/// Sign-in route users are sent to when access is denied.
pub const LOGIN_ROUTE: &str = "/login";
/// Sign-up route (treated like the sign-in route by the guard).
pub const SIGNUP_ROUTE: &str = "/signup";
/// Default landing route for authenticated users.
pub const LANDING_ROUTE: &str = "/";

/// Membership lookups against the two authorization sets.
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn is_admin_member(&self, uid: &str) -> Result<bool, AppError>;
    async fn is_open_member(&self, uid: &str) -> Result<bool, AppError>;
}

#[async_trait]
impl RoleStore for FirestoreDb {
    async fn is_admin_member(&self, uid: &str) -> Result<bool, AppError> {
        self.is_role_member(Role::Admin, uid).await
    }

    async fn is_open_member(&self, uid: &str) -> Result<bool, AppError> {
        self.is_role_member(Role::Open, uid).await
    }
}

/// Session classification, driven by the transitions in [`SessionContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Initial state, before any session check has started
    Unknown,
    /// Session check or role lookups in flight
    Loading,
    /// No identity
    Unauthenticated,
    /// Authenticated identity with no membership in either set
    NoRole,
    /// Authenticated administrator
    Admin,
    /// Authenticated standard user
    Open,
}

/// Outcome of resolving both authorization sets for one identity.
///
/// Tagged with the uid it was computed for so a late result for a stale
/// identity can be discarded instead of applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub uid: String,
    pub role: Option<Role>,
}

/// Fail-closed lookup policy: an error from the backing store is logged and
/// treated as non-membership.
fn lookup_or_denied(set: &str, uid: &str, result: Result<bool, AppError>) -> bool {
    match result {
        Ok(member) => member,
        Err(e) => {
            tracing::warn!(uid, set, error = %e, "Role lookup failed, treating as non-member");
            false
        }
    }
}

/// Resolve the role for an identity.
///
/// Both lookups are issued concurrently and both complete before a result is
/// produced; admin membership wins ties. Idempotent for unchanged set
/// membership.
pub async fn resolve_role<S: RoleStore + ?Sized>(store: &S, identity: &Identity) -> Resolution {
    let (admin, open) = tokio::join!(
        store.is_admin_member(&identity.uid),
        store.is_open_member(&identity.uid),
    );

    let is_admin = lookup_or_denied("admin", &identity.uid, admin);
    let is_open = lookup_or_denied("open", &identity.uid, open);

    let role = if is_admin {
        Some(Role::Admin)
    } else if is_open {
        Some(Role::Open)
    } else {
        None
    };

    Resolution {
        uid: identity.uid.clone(),
        role,
    }
}

/// Explicit session state holder with defined transitions.
#[derive(Debug, Clone)]
pub struct SessionContext {
    identity: Option<Identity>,
    state: SessionState,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            identity: None,
            state: SessionState::Unknown,
        }
    }

    /// Session check started.
    pub fn begin_check(&mut self) {
        self.state = SessionState::Loading;
    }

    /// Session check resolved with no identity.
    pub fn set_unauthenticated(&mut self) {
        self.identity = None;
        self.state = SessionState::Unauthenticated;
    }

    /// Session check resolved with an identity; role lookups are pending.
    pub fn set_identity(&mut self, identity: Identity) {
        self.identity = Some(identity);
        self.state = SessionState::Loading;
    }

    /// Apply a resolution. Returns false (and leaves the state untouched) if
    /// the resolution was computed for a different identity than the one the
    /// session now holds.
    pub fn apply(&mut self, resolution: Resolution) -> bool {
        let Some(identity) = &self.identity else {
            tracing::debug!(uid = %resolution.uid, "Discarding resolution for signed-out session");
            return false;
        };
        if identity.uid != resolution.uid {
            tracing::debug!(
                current = %identity.uid,
                resolved = %resolution.uid,
                "Discarding stale role resolution"
            );
            return false;
        }

        self.state = match resolution.role {
            Some(Role::Admin) => SessionState::Admin,
            Some(Role::Open) => SessionState::Open,
            None => SessionState::NoRole,
        };
        true
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        match self.state {
            SessionState::Admin => Some(Role::Admin),
            SessionState::Open => Some(Role::Open),
            _ => None,
        }
    }
}

// ─── Route Guard ─────────────────────────────────────────────────

/// What the guard decided for a state/route pair.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GuardVerdict {
    /// Render the requested route
    Render,
    /// Render a neutral loading indicator; no navigation
    ShowLoading,
    /// Navigate elsewhere
    Redirect { location: &'static str },
    /// Invalid session: terminate it, then navigate
    SignOutAndRedirect { location: &'static str },
}

fn is_sign_in_route(route: &str) -> bool {
    route == LOGIN_ROUTE || route == SIGNUP_ROUTE
}

/// Evaluate the route guard for the current session state and route.
///
/// Pure: side effects (navigation, provider sign-out) are carried out by the
/// caller according to the verdict.
pub fn evaluate_guard(state: SessionState, route: &str) -> GuardVerdict {
    match state {
        SessionState::Unknown | SessionState::Loading => GuardVerdict::ShowLoading,
        SessionState::Unauthenticated => {
            if is_sign_in_route(route) {
                GuardVerdict::Render
            } else {
                GuardVerdict::Redirect {
                    location: LOGIN_ROUTE,
                }
            }
        }
        SessionState::Admin | SessionState::Open => {
            if is_sign_in_route(route) {
                GuardVerdict::Redirect {
                    location: LANDING_ROUTE,
                }
            } else {
                GuardVerdict::Render
            }
        }
        SessionState::NoRole => {
            if is_sign_in_route(route) {
                // Broken session on the sign-in page: let the user retry.
                GuardVerdict::Render
            } else {
                // Every authenticated identity is expected to carry exactly
                // one role; absence is a provisioning defect, so deny rather
                // than grant a default role.
                GuardVerdict::SignOutAndRedirect {
                    location: LOGIN_ROUTE,
                }
            }
        }
    }
}

// ─── Navigation Filtering ────────────────────────────────────────

/// One entry in the navigation menu.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub admin_only: bool,
}

/// Full navigation surface, before role filtering.
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        path: LANDING_ROUTE,
        admin_only: false,
    },
    NavItem {
        label: "Aircraft",
        path: "/aircraft",
        admin_only: false,
    },
    NavItem {
        label: "Employees",
        path: "/employees",
        admin_only: false,
    },
    NavItem {
        label: "Flight Logs",
        path: "/flights",
        admin_only: false,
    },
    NavItem {
        label: "Fuel Logs",
        path: "/fuel",
        admin_only: false,
    },
    NavItem {
        label: "Users",
        path: "/users",
        admin_only: true,
    },
];

/// Navigation items visible to a session. Admin-only items are hidden from
/// open sessions; sessions without a role see nothing.
pub fn visible_nav(role: Option<Role>) -> Vec<NavItem> {
    match role {
        Some(Role::Admin) => NAV_ITEMS.to_vec(),
        Some(Role::Open) => NAV_ITEMS
            .iter()
            .filter(|item| !item.admin_only)
            .copied()
            .collect(),
        None => Vec::new(),
    }
}
