// SPDX-License-Identifier: MIT

//! Current-user profile and user-role administration routes.

use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{AuthorizationRecord, Role};
use crate::services::session::resolve_role;
use crate::AppState;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/me", get(get_me))
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/{uid}/role", put(set_role))
        .route("/api/users/{uid}", delete(delete_user))
}

// ─── Current User ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeResponse {
    pub uid: String,
    pub email: String,
    pub role: Option<Role>,
}

/// Get the current identity and its resolved role.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MeResponse>> {
    let resolution = resolve_role(&state.db, &user.identity()).await;

    Ok(Json(MeResponse {
        uid: user.uid,
        email: user.email,
        role: resolution.role,
    }))
}

// ─── Role Administration ─────────────────────────────────────

/// Merged view of one user across the two role sets.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserRoleView {
    pub uid: String,
    pub email: String,
    pub username: String,
    pub role: Role,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UsersResponse {
    pub users: Vec<UserRoleView>,
    pub total: u32,
}

/// List all users with their roles (admin).
///
/// The two sets are meant to be disjoint; if a uid somehow appears in both,
/// the admin record wins here, matching resolver precedence.
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<UsersResponse>> {
    let (admins, opens) = futures_util::try_join!(
        state.db.list_authorizations(Role::Admin),
        state.db.list_authorizations(Role::Open),
    )?;

    let admin_uids: HashSet<String> = admins.iter().map(|r| r.uid.clone()).collect();

    let mut users: Vec<UserRoleView> = admins
        .into_iter()
        .map(|r| UserRoleView {
            uid: r.uid,
            email: r.email,
            username: r.username,
            role: Role::Admin,
        })
        .chain(
            opens
                .into_iter()
                .filter(|r| !admin_uids.contains(&r.uid))
                .map(|r| UserRoleView {
                    uid: r.uid,
                    email: r.email,
                    username: r.username,
                    role: Role::Open,
                }),
        )
        .collect();

    users.sort_by(|a, b| a.username.cmp(&b.username));

    let total = users.len() as u32;
    Ok(Json(UsersResponse { users, total }))
}

#[derive(Deserialize, Validate)]
pub struct SetRoleRequest {
    pub role: Role,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
}

/// Assign a role to a user (admin).
///
/// The record lands in exactly one set: assignment removes any membership in
/// the other set.
async fn set_role(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
    Json(payload): Json<SetRoleRequest>,
) -> Result<Json<UserRoleView>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record = AuthorizationRecord {
        uid: uid.clone(),
        email: payload.email,
        username: payload.username,
    };

    state.db.set_user_role(&record, payload.role).await?;

    Ok(Json(UserRoleView {
        uid: record.uid,
        email: record.email,
        username: record.username,
        role: payload.role,
    }))
}

/// Remove a user from both role sets (admin).
///
/// The next session check for that identity will resolve to no role and be
/// signed out by the guard.
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> Result<Json<serde_json::Value>> {
    state.db.delete_user_roles(&uid).await?;

    Ok(Json(serde_json::json!({ "deleted": uid })))
}
