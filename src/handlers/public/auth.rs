// handlers/public/auth.rs - token acquisition endpoints (no auth required)

use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::{self, Claims};
use crate::config;
use crate::database::repos::users;
use crate::database::DatabaseManager;
use crate::error::{ApiError, FieldError};
use crate::middleware::{ApiResponse, ApiResult};
use crate::types::Role;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: u64,
    pub user: Value,
}

fn validate_register(req: &RegisterRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if req.username.trim().len() < 3 {
        errors.push(FieldError::new("username", "username must be at least 3 characters"));
    }
    if !req.email.contains('@') {
        errors.push(FieldError::new("email", "email must be a valid address"));
    }
    if req.password.len() < 8 {
        errors.push(FieldError::new("password", "password must be at least 8 characters"));
    }
    errors
}

/// POST /auth/register - create a user account (role defaults to `user`)
pub async fn register(Json(payload): Json<RegisterRequest>) -> ApiResult<Value> {
    let errors = validate_register(&payload);
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let pool = DatabaseManager::pool().await?;

    let salt = auth::generate_salt();
    let hash = auth::hash_password(&payload.password, &salt);

    let user = users::create(
        &pool,
        payload.username.trim(),
        payload.email.trim(),
        &hash,
        &salt,
        Role::User,
    )
    .await?;

    tracing::info!("Registered user '{}'", user.username);
    Ok(ApiResponse::created(json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "role": user.role,
    })))
}

/// POST /auth/login - authenticate and receive a JWT
pub async fn login(Json(payload): Json<LoginRequest>) -> ApiResult<TokenResponse> {
    let pool = DatabaseManager::pool().await?;

    let user = users::find_by_username(&pool, payload.username.trim())
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    if !auth::verify_password(&payload.password, &user.password_salt, &user.password_hash) {
        tracing::warn!("Failed login attempt for user '{}'", user.username);
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let role: Role = user
        .role
        .parse()
        .map_err(|_| ApiError::internal_server_error("Corrupt role on user record"))?;

    let claims = Claims::new(user.id, user.username.clone(), role);
    let token = auth::generate_jwt(claims)?;

    Ok(ApiResponse::success(TokenResponse {
        token,
        expires_in: config::config().security.jwt_expiry_hours * 3600,
        user: json!({
            "id": user.id,
            "username": user.username,
            "role": user.role,
        }),
    }))
}
