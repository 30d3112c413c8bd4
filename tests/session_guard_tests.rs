// SPDX-License-Identifier: MIT

//! Session endpoint and route-guard behavior over HTTP.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

mod common;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response should be JSON")
}

#[tokio::test]
async fn test_session_without_token_is_unauthenticated() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/auth/session?route=/aircraft")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["state"], "unauthenticated");
    assert_eq!(body["verdict"]["action"], "redirect");
    assert_eq!(body["verdict"]["location"], "/login");
    assert_eq!(body["nav"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_session_without_token_renders_login_route() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/auth/session?route=/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["state"], "unauthenticated");
    assert_eq!(body["verdict"]["action"], "render");
}

#[tokio::test]
async fn test_no_role_session_is_signed_out() {
    let (app, state) = common::create_test_app();
    let token = common::create_session_token("u1", "u1@example.com", &state.config.jwt_signing_key);

    // Offline db: both role lookups error, which fails closed to no role.
    // The guard must force sign-out and point at the sign-in route.
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/auth/session?route=/aircraft")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // The forced sign-out clears the session cookie.
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("sign-out should clear the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("skyops_token="));

    let body = body_json(response).await;
    assert_eq!(body["state"], "no_role");
    assert_eq!(body["verdict"]["action"], "sign_out_and_redirect");
    assert_eq!(body["verdict"]["location"], "/login");
}

#[tokio::test]
async fn test_create_session_with_provider_token() {
    let (app, state) = common::create_test_app();

    // A token signed by the identity provider's shared key is accepted.
    let id_token =
        common::create_session_token("u1", "u1@example.com", &state.config.identity_provider_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/session")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({ "id_token": id_token }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::SET_COOKIE));

    let body = body_json(response).await;
    assert_eq!(body["email"], "u1@example.com");
}

#[tokio::test]
async fn test_create_session_rejects_bad_provider_token() {
    let (app, state) = common::create_test_app();

    // A token signed with the wrong key (e.g. our own session key) must not
    // be accepted as a provider token.
    let forged = common::create_session_token("u1", "u1@example.com", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/session")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({ "id_token": forged }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.headers().contains_key(header::SET_COOKIE));
}
