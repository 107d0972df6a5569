#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use cookbook_server::config::Settings;
use cookbook_server::{app, db, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// A fresh app backed by its own in-memory database.
pub fn test_app() -> Router {
    let settings = Settings {
        database_url: db::IN_MEMORY.to_string(),
        insecure_password_hashing: true,
        ..Settings::default()
    };
    let pool = db::create_pool(&settings.database_url).unwrap();
    app(AppState::new(pool, settings))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response body is not JSON ({}): {}",
                e,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

fn builder(method: Method, path: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(path);
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
        None => builder,
    }
}

pub async fn get(app: &Router, path: &str, token: Option<&str>) -> TestResponse {
    let request = builder(Method::GET, path, token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, path: &str, token: Option<&str>, body: Value) -> TestResponse {
    let request = builder(Method::POST, path, token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: &Router, path: &str, token: Option<&str>) -> TestResponse {
    let request = builder(Method::POST, path, token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Upload `data` as the `file` part of a multipart form.
pub async fn post_file(
    app: &Router,
    path: &str,
    token: Option<&str>,
    file_name: &str,
    data: &[u8],
) -> TestResponse {
    const BOUNDARY: &str = "cookbook-test-boundary";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let request = builder(Method::POST, path, token)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Sign up a user and return their bearer token.
pub async fn signup(app: &Router, username: &str) -> String {
    let response = post_json(
        app,
        "/api/auth/signup",
        None,
        json!({"username": username, "password": "correct horse"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()["token"].as_str().unwrap().to_string()
}

/// The flour/eggs recipe used across tests: written for 4 servings.
pub fn pancakes() -> Value {
    json!({
        "title": "Fluffy Pancakes",
        "servings": 4,
        "prep_time": 10,
        "cook_time": 15,
        "ingredients": [
            {"quantity": 2, "unit": "cup", "item": "flour"},
            {"quantity": 3, "unit": "item", "item": "eggs"},
            {"quantity": "1 1/2", "unit": "tbsp", "item": "sugar"}
        ],
        "instructions": [
            {"step": "Whisk everything together"},
            {"step": "Fry in a hot pan"}
        ]
    })
}

pub async fn create_recipe(app: &Router, token: &str, recipe: Value) -> String {
    let response = post_json(app, "/api/recipes", Some(token), recipe).await;
    assert_eq!(
        response.status,
        StatusCode::CREATED,
        "{}",
        String::from_utf8_lossy(&response.body)
    );
    response.json()["id"].as_str().unwrap().to_string()
}
