// handlers/protected/auth.rs - session introspection for authenticated users

use axum::extract::Extension;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/auth/whoami - identity decoded from the bearer token
pub async fn whoami_get(Extension(user): Extension<AuthUser>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "id": user.user_id,
        "username": user.username,
        "role": user.role,
    })))
}
