// SPDX-License-Identifier: MIT

//! Session routes: sign-in token exchange, session/guard inspection, logout.
//!
//! The identity provider is external; `POST /auth/session` only exchanges a
//! provider-issued token for an application session cookie. Role resolution
//! and the route guard live in `services::session`.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, decode_session, extract_token, SESSION_COOKIE};
use crate::services::session::{
    evaluate_guard, resolve_role, visible_nav, GuardVerdict, NavItem, SessionContext, SessionState,
};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/session", post(create_session).get(get_session))
        .route("/auth/logout", post(logout))
}

/// Request body for exchanging an identity-provider token.
#[derive(Deserialize)]
pub struct CreateSessionRequest {
    /// Token issued by the external identity provider
    pub id_token: String,
}

/// Session snapshot returned to the frontend shell.
#[derive(Serialize)]
pub struct SessionResponse {
    pub state: SessionState,
    pub role: Option<crate::models::Role>,
    pub email: Option<String>,
    pub verdict: GuardVerdict,
    pub nav: Vec<NavItem>,
}

fn session_response(ctx: &SessionContext, route: &str) -> SessionResponse {
    SessionResponse {
        state: ctx.state(),
        role: ctx.role(),
        email: ctx.identity().map(|i| i.email.clone()),
        verdict: evaluate_guard(ctx.state(), route),
        nav: visible_nav(ctx.role()),
    }
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Removal cookie; path must match the one the session cookie was set with.
fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

/// Exchange an identity-provider token for a session cookie.
///
/// The provider token is verified with the shared provider key; on success a
/// session JWT is minted and the resolved session snapshot returned.
async fn create_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let identity = decode_session(&payload.id_token, &state.config.identity_provider_key)
        .map_err(|_| AppError::InvalidToken)?
        .identity();

    tracing::info!(uid = %identity.uid, "Session created");

    let jwt = create_jwt(&identity.uid, &identity.email, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let mut ctx = SessionContext::new();
    ctx.begin_check();
    ctx.set_identity(identity.clone());
    let resolution = resolve_role(&state.db, &identity).await;
    ctx.apply(resolution);

    let jar = jar.add(session_cookie(jwt));
    Ok((jar, Json(session_response(&ctx, crate::services::session::LANDING_ROUTE))))
}

#[derive(Deserialize)]
struct SessionQuery {
    /// Route the frontend wants a guard verdict for
    #[serde(default = "default_route")]
    route: String,
}

fn default_route() -> String {
    crate::services::session::LANDING_ROUTE.to_string()
}

/// Resolve the current session and return state, guard verdict, and the
/// role-filtered navigation items for the given route.
///
/// A session whose identity has no role triggers the forced sign-out: the
/// session cookie is cleared in the same response that carries the redirect
/// verdict.
async fn get_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<SessionQuery>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let mut ctx = SessionContext::new();
    ctx.begin_check();

    let identity = extract_token(&jar, &headers)
        .and_then(|token| decode_session(&token, &state.config.jwt_signing_key).ok())
        .map(|user| user.identity());

    match identity {
        None => ctx.set_unauthenticated(),
        Some(identity) => {
            ctx.set_identity(identity.clone());
            let resolution = resolve_role(&state.db, &identity).await;
            ctx.apply(resolution);
        }
    }

    let response = session_response(&ctx, &params.route);

    let jar = if matches!(response.verdict, GuardVerdict::SignOutAndRedirect { .. }) {
        tracing::warn!(
            uid = ?ctx.identity().map(|i| i.uid.as_str()),
            "Authenticated identity with no role, terminating session"
        );
        jar.remove(removal_cookie())
    } else {
        jar
    };

    Ok((jar, Json(response)))
}

/// Logout - clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (jar.remove(removal_cookie()), StatusCode::NO_CONTENT)
}
