use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewParkingLot, ParkingLot};

const LOT_COLUMNS: &str = "id, name, location, capacity, hourly_rate, created_at";

pub async fn list(pool: &PgPool) -> Result<Vec<ParkingLot>, DatabaseError> {
    let lots = sqlx::query_as::<_, ParkingLot>(&format!(
        "SELECT {} FROM parking_lots ORDER BY name",
        LOT_COLUMNS
    ))
    .fetch_all(pool)
    .await?;
    Ok(lots)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<ParkingLot, DatabaseError> {
    sqlx::query_as::<_, ParkingLot>(&format!(
        "SELECT {} FROM parking_lots WHERE id = $1",
        LOT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("Parking lot {} not found", id)))
}

pub async fn create(pool: &PgPool, lot: &NewParkingLot) -> Result<ParkingLot, DatabaseError> {
    let lot_row = sqlx::query_as::<_, ParkingLot>(&format!(
        r#"
        INSERT INTO parking_lots (id, name, location, capacity, hourly_rate)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {}
        "#,
        LOT_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(&lot.name)
    .bind(&lot.location)
    .bind(lot.capacity)
    .bind(lot.hourly_rate)
    .fetch_one(pool)
    .await?;
    Ok(lot_row)
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    lot: &NewParkingLot,
) -> Result<ParkingLot, DatabaseError> {
    sqlx::query_as::<_, ParkingLot>(&format!(
        r#"
        UPDATE parking_lots
        SET name = $2, location = $3, capacity = $4, hourly_rate = $5
        WHERE id = $1
        RETURNING {}
        "#,
        LOT_COLUMNS
    ))
    .bind(id)
    .bind(&lot.name)
    .bind(&lot.location)
    .bind(lot.capacity)
    .bind(lot.hourly_rate)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("Parking lot {} not found", id)))
}

/// Delete a lot. Refused while the lot still has open sessions; historical
/// (closed) sessions keep the lot reference, so deletion also fails on the
/// foreign key if any session ever used the lot.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), DatabaseError> {
    let open: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM parking_sessions WHERE parking_lot_id = $1 AND exited_at IS NULL",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    if open > 0 {
        return Err(DatabaseError::Conflict(format!(
            "Parking lot {} has {} open session(s)",
            id, open
        )));
    }

    let result = sqlx::query("DELETE FROM parking_lots WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23503") => {
                DatabaseError::Conflict(format!(
                    "Parking lot {} is referenced by historical sessions",
                    id
                ))
            }
            _ => DatabaseError::from(e),
        })?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("Parking lot {} not found", id)));
    }
    Ok(())
}
