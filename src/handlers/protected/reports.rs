// handlers/protected/reports.rs - admin-only report endpoints
//
// Route chain for every handler here: validation middleware -> JWT middleware
// -> admin middleware -> controller. By the time a handler runs, the request
// extensions hold the validated parameters.

use axum::extract::Extension;

use crate::database::repos::reports;
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult, DateRange, RevenueParams};
use crate::types::GroupBy;

/// GET /api/reports/outgoing?startDate&endDate
///
/// Sessions whose exit timestamp falls within the range, boundaries inclusive.
pub async fn outgoing_get(
    Extension(range): Extension<DateRange>,
) -> ApiResult<Vec<reports::SessionRecord>> {
    let pool = DatabaseManager::pool().await?;
    let rows = reports::outgoing_by_date_range(&pool, range.start, range.end).await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/reports/incoming?startDate&endDate
///
/// Same as outgoing, filtered on the entry timestamp instead.
pub async fn incoming_get(
    Extension(range): Extension<DateRange>,
) -> ApiResult<Vec<reports::SessionRecord>> {
    let pool = DatabaseManager::pool().await?;
    let rows = reports::incoming_by_date_range(&pool, range.start, range.end).await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/reports/occupancy
///
/// Per lot: count of sessions currently without an exit timestamp vs. capacity.
pub async fn occupancy_get() -> ApiResult<Vec<reports::OccupancyRecord>> {
    let pool = DatabaseManager::pool().await?;
    let rows = reports::occupancy(&pool).await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/reports/revenue?startDate&endDate&groupBy
///
/// Sum of fees for sessions exited within the range. `groupBy` switches the
/// aggregation key: absent for a single total, `parking` for per-lot rows,
/// `day` for per-calendar-day rows.
pub async fn revenue_get(
    Extension(params): Extension<RevenueParams>,
) -> ApiResult<serde_json::Value> {
    let pool = DatabaseManager::pool().await?;
    let DateRange { start, end } = params.range;

    let data = match params.group_by {
        None => {
            let total = reports::revenue_total(&pool, start, end).await?;
            serde_json::to_value(total)
        }
        Some(GroupBy::Parking) => {
            let rows = reports::revenue_by_lot(&pool, start, end).await?;
            serde_json::to_value(rows)
        }
        Some(GroupBy::Day) => {
            let rows = reports::revenue_by_day(&pool, start, end).await?;
            serde_json::to_value(rows)
        }
    }
    .map_err(|e| {
        tracing::error!("Failed to serialize revenue report: {}", e);
        crate::error::ApiError::internal_server_error("Failed to format response")
    })?;

    Ok(ApiResponse::success(data))
}
