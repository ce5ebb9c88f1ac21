// handlers/protected/cars.rs - car registry CRUD (authenticated)

use axum::extract::Path;
use axum::response::Json;
use uuid::Uuid;

use crate::database::models::{Car, NewCar};
use crate::database::repos::cars;
use crate::database::DatabaseManager;
use crate::error::{ApiError, FieldError};
use crate::middleware::{ApiResponse, ApiResult};

fn validate_car(car: &NewCar) -> Result<(), ApiError> {
    let mut errors = Vec::new();
    if car.plate.trim().is_empty() {
        errors.push(FieldError::new("plate", "plate is required"));
    }
    if car.owner_name.trim().is_empty() {
        errors.push(FieldError::new("owner_name", "owner_name is required"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors))
    }
}

/// GET /api/cars
pub async fn list_get() -> ApiResult<Vec<Car>> {
    let pool = DatabaseManager::pool().await?;
    Ok(ApiResponse::success(cars::list(&pool).await?))
}

/// POST /api/cars
pub async fn create_post(Json(payload): Json<NewCar>) -> ApiResult<Car> {
    validate_car(&payload)?;
    let pool = DatabaseManager::pool().await?;
    let car = cars::create(&pool, &payload).await?;
    Ok(ApiResponse::created(car))
}

/// GET /api/cars/:id
pub async fn record_get(Path(id): Path<Uuid>) -> ApiResult<Car> {
    let pool = DatabaseManager::pool().await?;
    Ok(ApiResponse::success(cars::find_by_id(&pool, id).await?))
}

/// PUT /api/cars/:id
pub async fn record_put(Path(id): Path<Uuid>, Json(payload): Json<NewCar>) -> ApiResult<Car> {
    validate_car(&payload)?;
    let pool = DatabaseManager::pool().await?;
    Ok(ApiResponse::success(cars::update(&pool, id, &payload).await?))
}

/// DELETE /api/cars/:id
pub async fn record_delete(Path(id): Path<Uuid>) -> ApiResult<()> {
    let pool = DatabaseManager::pool().await?;
    cars::delete(&pool, id).await?;
    Ok(ApiResponse::<()>::no_content())
}
