// SPDX-License-Identifier: MIT

//! JWT authentication middleware and admin role gate.

use crate::error::AppError;
use crate::models::Identity;
use crate::services::session::resolve_role;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "skyops_token";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (provider user ID)
    pub sub: String,
    /// Email address
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
}

impl AuthUser {
    pub fn identity(&self) -> Identity {
        Identity {
            uid: self.uid.clone(),
            email: self.email.clone(),
        }
    }
}

/// Pull the session token from the cookie jar or Authorization header.
pub fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Decode a session token into an [`AuthUser`].
pub fn decode_session(token: &str, signing_key: &[u8]) -> Result<AuthUser, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data =
        decode::<Claims>(token, &key, &validation).map_err(|_| AppError::InvalidToken)?;

    Ok(AuthUser {
        uid: token_data.claims.sub,
        email: token_data.claims.email,
    })
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token =
        extract_token(&jar, request.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    let auth_user = decode_session(&token, &state.config.jwt_signing_key)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Middleware that requires a resolved admin role.
///
/// Must be layered inside `require_auth` so the [`AuthUser`] extension is
/// present. Lookup errors deny access (fail closed).
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or(AppError::Unauthorized)?;

    let resolution = resolve_role(&state.db, &user.identity()).await;

    match resolution.role {
        Some(role) if role.is_admin() => Ok(next.run(request).await),
        _ => {
            tracing::warn!(uid = %user.uid, "Admin route denied");
            Err(AppError::Forbidden)
        }
    }
}

/// Create a JWT for a user session.
pub fn create_jwt(uid: &str, email: &str, signing_key: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: uid.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + 30 * 24 * 60 * 60, // 30 days
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_round_trip() {
        let key = b"test_jwt_key_32_bytes_minimum!!";
        let token = create_jwt("u1", "u1@example.com", key).unwrap();

        let user = decode_session(&token, key).unwrap();
        assert_eq!(user.uid, "u1");
        assert_eq!(user.email, "u1@example.com");
    }

    #[test]
    fn test_decode_rejects_wrong_key() {
        let token = create_jwt("u1", "u1@example.com", b"correct_key_32_bytes_minimum!!!").unwrap();
        let err = decode_session(&token, b"wrong_key_32_bytes_minimum!!!!!").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_session("not.a.jwt", b"key").unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
