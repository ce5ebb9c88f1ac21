//! Report queries. All aggregation happens in SQL; each query is independently
//! consistent as of its own execution (no cross-query transaction).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;

/// Session row joined with plate and lot name, as returned by the
/// incoming/outgoing reports
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub plate: String,
    pub parking_lot_id: Uuid,
    pub parking_lot: String,
    pub entered_at: DateTime<Utc>,
    pub exited_at: Option<DateTime<Utc>>,
    pub fee: Option<Decimal>,
}

/// Per-lot occupancy: open sessions vs. capacity
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OccupancyRecord {
    pub parking_lot_id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub occupied: i64,
}

/// Total revenue over a range
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RevenueTotal {
    pub total: Decimal,
    pub sessions: i64,
}

/// Revenue grouped by parking lot
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RevenueByLot {
    pub parking_lot_id: Uuid,
    pub name: String,
    pub total: Decimal,
    pub sessions: i64,
}

/// Revenue grouped by calendar day of exit (UTC)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RevenueByDay {
    pub day: NaiveDate,
    pub total: Decimal,
    pub sessions: i64,
}

const SESSION_RECORD_SELECT: &str = r#"
    SELECT s.id, c.plate, l.id AS parking_lot_id, l.name AS parking_lot,
           s.entered_at, s.exited_at, s.fee
    FROM parking_sessions s
    JOIN cars c ON c.id = s.car_id
    JOIN parking_lots l ON l.id = s.parking_lot_id
"#;

/// Sessions whose exit timestamp falls within the range, boundaries inclusive
pub async fn outgoing_by_date_range(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<SessionRecord>, DatabaseError> {
    let rows = sqlx::query_as::<_, SessionRecord>(&format!(
        "{} WHERE s.exited_at BETWEEN $1 AND $2 ORDER BY s.exited_at",
        SESSION_RECORD_SELECT
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Sessions whose entry timestamp falls within the range, boundaries inclusive
pub async fn incoming_by_date_range(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<SessionRecord>, DatabaseError> {
    let rows = sqlx::query_as::<_, SessionRecord>(&format!(
        "{} WHERE s.entered_at BETWEEN $1 AND $2 ORDER BY s.entered_at",
        SESSION_RECORD_SELECT
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// One row per lot: count of sessions without an exit timestamp vs. capacity
pub async fn occupancy(pool: &PgPool) -> Result<Vec<OccupancyRecord>, DatabaseError> {
    let rows = sqlx::query_as::<_, OccupancyRecord>(
        r#"
        SELECT l.id AS parking_lot_id, l.name, l.capacity,
               COUNT(s.id) FILTER (WHERE s.exited_at IS NULL) AS occupied
        FROM parking_lots l
        LEFT JOIN parking_sessions s ON s.parking_lot_id = l.id
        GROUP BY l.id, l.name, l.capacity
        ORDER BY l.name
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Sum of fees for sessions exited within the range
pub async fn revenue_total(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<RevenueTotal, DatabaseError> {
    let row = sqlx::query_as::<_, RevenueTotal>(
        r#"
        SELECT COALESCE(SUM(s.fee), 0) AS total, COUNT(s.id) AS sessions
        FROM parking_sessions s
        WHERE s.exited_at BETWEEN $1 AND $2
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

pub async fn revenue_by_lot(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<RevenueByLot>, DatabaseError> {
    let rows = sqlx::query_as::<_, RevenueByLot>(
        r#"
        SELECT l.id AS parking_lot_id, l.name,
               COALESCE(SUM(s.fee), 0) AS total, COUNT(s.id) AS sessions
        FROM parking_sessions s
        JOIN parking_lots l ON l.id = s.parking_lot_id
        WHERE s.exited_at BETWEEN $1 AND $2
        GROUP BY l.id, l.name
        ORDER BY l.name
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn revenue_by_day(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<RevenueByDay>, DatabaseError> {
    let rows = sqlx::query_as::<_, RevenueByDay>(
        r#"
        SELECT (s.exited_at AT TIME ZONE 'UTC')::date AS day,
               COALESCE(SUM(s.fee), 0) AS total, COUNT(s.id) AS sessions
        FROM parking_sessions s
        WHERE s.exited_at BETWEEN $1 AND $2
        GROUP BY day
        ORDER BY day
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
