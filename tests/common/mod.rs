#![allow(dead_code)]

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use parking_api::auth::{generate_jwt, Claims};
use parking_api::types::Role;

/// Fresh router per request; oneshot consumes the service
pub fn app() -> Router {
    parking_api::app()
}

/// Mint a token the way the login endpoint would, signed with the
/// development secret the middleware verifies against
pub fn token_for(role: Role) -> String {
    let username = match role {
        Role::Admin => "test-admin",
        Role::User => "test-user",
    };
    let claims = Claims::new(Uuid::new_v4(), username.to_string(), role);
    generate_jwt(claims).expect("token")
}

/// Token whose exp is far enough in the past to beat validation leeway
pub fn expired_token() -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: Uuid::new_v4(),
        username: "test-user".to_string(),
        role: Role::Admin,
        exp: now - 7200,
        iat: now - 10800,
    };
    generate_jwt(claims).expect("token")
}

pub async fn get(path: &str, bearer: Option<&str>) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::empty())?;

    let response = app().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

pub async fn post_json(path: &str, bearer: Option<&str>, payload: Value) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::from(payload.to_string()))?;

    let response = app().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}
