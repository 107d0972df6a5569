mod common;

use axum::http::StatusCode;
use common::{get, post_empty, post_json, signup, test_app};
use serde_json::json;

#[tokio::test]
async fn test_unauthed_ping_needs_no_token() {
    let app = test_app();
    let response = get(&app, "/api/test/unauthed-ping", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "unauthed-ping");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app();

    let response = get(&app, "/api/test/ping", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"], "Missing Authorization header");

    let response = get(&app, "/api/recipes", Some("not-a-real-token")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_signup_then_ping() {
    let app = test_app();
    let token = signup(&app, "alice").await;

    let response = get(&app, "/api/test/ping", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["username"], "alice");
}

#[tokio::test]
async fn test_signup_rejects_duplicate_username_case_insensitively() {
    let app = test_app();
    signup(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/auth/signup",
        None,
        json!({"username": "ALICE", "password": "whatever"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.json()["error"], "Username already exists");
}

#[tokio::test]
async fn test_signup_rejects_blank_username() {
    let app = test_app();
    let response = post_json(
        &app,
        "/api/auth/signup",
        None,
        json!({"username": "   ", "password": "whatever"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_credentials_get_json_error() {
    let app = test_app();
    let response = post_json(
        &app,
        "/api/auth/login",
        None,
        json!({"username": 5, "password": "whatever"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn test_login() {
    let app = test_app();
    signup(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/auth/login",
        None,
        json!({"username": "alice", "password": "wrong"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"], "Invalid credentials");

    let response = post_json(
        &app,
        "/api/auth/login",
        None,
        json!({"username": "nobody", "password": "correct horse"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = post_json(
        &app,
        "/api/auth/login",
        None,
        json!({"username": "Alice", "password": "correct horse"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let token = response.json()["token"].as_str().unwrap().to_string();

    let response = get(&app, "/api/test/ping", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_current_session() {
    let app = test_app();
    let token = signup(&app, "alice").await;

    let response = get(&app, "/api/auth/session", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["username"], "alice");
    assert!(body["user_id"].is_string());
    assert!(body["expires_at"].is_string());
}

#[tokio::test]
async fn test_logout_ends_only_that_session() {
    let app = test_app();
    let first = signup(&app, "alice").await;

    let response = post_json(
        &app,
        "/api/auth/login",
        None,
        json!({"username": "alice", "password": "correct horse"}),
    )
    .await;
    let second = response.json()["token"].as_str().unwrap().to_string();

    let response = post_empty(&app, "/api/auth/logout", Some(&first)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = get(&app, "/api/auth/session", Some(&first)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = get(&app, "/api/auth/session", Some(&second)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app();
    let response = get(&app, "/api-docs/openapi.json", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.json()["paths"]["/api/recipes/{id}"].is_object());
}
