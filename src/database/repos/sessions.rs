use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::ParkingSession;

const SESSION_COLUMNS: &str =
    "id, car_id, parking_lot_id, entered_at, exited_at, fee, created_at";

pub async fn list(pool: &PgPool, open_only: bool) -> Result<Vec<ParkingSession>, DatabaseError> {
    let sql = if open_only {
        format!(
            "SELECT {} FROM parking_sessions WHERE exited_at IS NULL ORDER BY entered_at DESC",
            SESSION_COLUMNS
        )
    } else {
        format!(
            "SELECT {} FROM parking_sessions ORDER BY entered_at DESC",
            SESSION_COLUMNS
        )
    };

    let sessions = sqlx::query_as::<_, ParkingSession>(&sql).fetch_all(pool).await?;
    Ok(sessions)
}

/// The car's open session, if any
pub async fn find_open_for_car(
    pool: &PgPool,
    car_id: Uuid,
) -> Result<Option<ParkingSession>, DatabaseError> {
    let session = sqlx::query_as::<_, ParkingSession>(&format!(
        "SELECT {} FROM parking_sessions WHERE car_id = $1 AND exited_at IS NULL",
        SESSION_COLUMNS
    ))
    .bind(car_id)
    .fetch_optional(pool)
    .await?;
    Ok(session)
}

/// Count of open sessions in a lot, within the caller's transaction so entry
/// admission sees a consistent view while the lot row is locked
pub async fn open_count_for_lot(
    tx: &mut Transaction<'_, Postgres>,
    lot_id: Uuid,
) -> Result<i64, DatabaseError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM parking_sessions WHERE parking_lot_id = $1 AND exited_at IS NULL",
    )
    .bind(lot_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(count)
}

pub async fn open_exists_for_car(
    tx: &mut Transaction<'_, Postgres>,
    car_id: Uuid,
) -> Result<bool, DatabaseError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM parking_sessions WHERE car_id = $1 AND exited_at IS NULL",
    )
    .bind(car_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(count > 0)
}

pub async fn create(
    tx: &mut Transaction<'_, Postgres>,
    car_id: Uuid,
    lot_id: Uuid,
    entered_at: DateTime<Utc>,
) -> Result<ParkingSession, DatabaseError> {
    let session = sqlx::query_as::<_, ParkingSession>(&format!(
        r#"
        INSERT INTO parking_sessions (id, car_id, parking_lot_id, entered_at)
        VALUES ($1, $2, $3, $4)
        RETURNING {}
        "#,
        SESSION_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(car_id)
    .bind(lot_id)
    .bind(entered_at)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| {
        // Partial unique index on open sessions catches a racing double entry
        if DatabaseError::is_unique_violation(&e) {
            DatabaseError::Conflict("Car already has an open session".to_string())
        } else {
            e.into()
        }
    })?;
    Ok(session)
}

/// Complete a session: set the exit timestamp and the computed fee
pub async fn close(
    pool: &PgPool,
    session_id: Uuid,
    exited_at: DateTime<Utc>,
    fee: Decimal,
) -> Result<ParkingSession, DatabaseError> {
    sqlx::query_as::<_, ParkingSession>(&format!(
        r#"
        UPDATE parking_sessions
        SET exited_at = $2, fee = $3
        WHERE id = $1 AND exited_at IS NULL
        RETURNING {}
        "#,
        SESSION_COLUMNS
    ))
    .bind(session_id)
    .bind(exited_at)
    .bind(fee)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("Open session {} not found", session_id)))
}
