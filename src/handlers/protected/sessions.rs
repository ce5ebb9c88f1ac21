// handlers/protected/sessions.rs - car entry/exit and session listing

use axum::extract::Query;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::ParkingSession;
use crate::database::repos::sessions;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::session_service;

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub plate: String,
    pub parking_lot_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ExitRequest {
    pub plate: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub open: Option<bool>,
}

/// POST /api/sessions/entry - open a session for a car entering a lot
pub async fn entry_post(Json(payload): Json<EntryRequest>) -> ApiResult<ParkingSession> {
    if payload.plate.trim().is_empty() {
        return Err(ApiError::validation_single("plate", "plate is required"));
    }

    let pool = DatabaseManager::pool().await?;
    let session = session_service::enter(&pool, &payload.plate, payload.parking_lot_id).await?;
    Ok(ApiResponse::created(session))
}

/// POST /api/sessions/exit - close the car's open session, computing the fee
pub async fn exit_post(Json(payload): Json<ExitRequest>) -> ApiResult<ParkingSession> {
    if payload.plate.trim().is_empty() {
        return Err(ApiError::validation_single("plate", "plate is required"));
    }

    let pool = DatabaseManager::pool().await?;
    let session = session_service::exit(&pool, &payload.plate).await?;
    Ok(ApiResponse::success(session))
}

/// GET /api/sessions[?open=true]
pub async fn list_get(Query(query): Query<ListQuery>) -> ApiResult<Vec<ParkingSession>> {
    let pool = DatabaseManager::pool().await?;
    let rows = sessions::list(&pool, query.open.unwrap_or(false)).await?;
    Ok(ApiResponse::success(rows))
}
