// handlers/protected/lots.rs - parking lot management
//
// Reads require authentication; create/update/delete additionally require the
// admin role (checked in-handler against the injected identity).

use axum::extract::{Extension, Path};
use axum::response::Json;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::database::models::{NewParkingLot, ParkingLot};
use crate::database::repos::lots;
use crate::database::DatabaseManager;
use crate::error::{ApiError, FieldError};
use crate::middleware::{require_admin, ApiResponse, ApiResult, AuthUser};

fn validate_lot(lot: &NewParkingLot) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if lot.name.trim().is_empty() {
        errors.push(FieldError::new("name", "name is required"));
    }
    if lot.capacity <= 0 {
        errors.push(FieldError::new("capacity", "capacity must be greater than zero"));
    }
    if lot.hourly_rate < Decimal::ZERO {
        errors.push(FieldError::new("hourly_rate", "hourly_rate must not be negative"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors))
    }
}

/// GET /api/lots
pub async fn list_get() -> ApiResult<Vec<ParkingLot>> {
    let pool = DatabaseManager::pool().await?;
    Ok(ApiResponse::success(lots::list(&pool).await?))
}

/// GET /api/lots/:id
pub async fn record_get(Path(id): Path<Uuid>) -> ApiResult<ParkingLot> {
    let pool = DatabaseManager::pool().await?;
    Ok(ApiResponse::success(lots::find_by_id(&pool, id).await?))
}

/// POST /api/lots (admin)
pub async fn create_post(
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewParkingLot>,
) -> ApiResult<ParkingLot> {
    require_admin(&user)?;
    validate_lot(&payload)?;
    let pool = DatabaseManager::pool().await?;
    Ok(ApiResponse::created(lots::create(&pool, &payload).await?))
}

/// PUT /api/lots/:id (admin)
pub async fn record_put(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewParkingLot>,
) -> ApiResult<ParkingLot> {
    require_admin(&user)?;
    validate_lot(&payload)?;
    let pool = DatabaseManager::pool().await?;
    Ok(ApiResponse::success(lots::update(&pool, id, &payload).await?))
}

/// DELETE /api/lots/:id (admin)
pub async fn record_delete(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    require_admin(&user)?;
    let pool = DatabaseManager::pool().await?;
    lots::delete(&pool, id).await?;
    Ok(ApiResponse::<()>::no_content())
}
