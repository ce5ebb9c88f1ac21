//! Session lifecycle: car entry and exit.
//!
//! Entry admission runs inside a single transaction with the lot row locked,
//! so two concurrent entries cannot push a lot past capacity.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{ParkingLot, ParkingSession};
use crate::database::repos::{cars, sessions};
use crate::services::fees;

/// Open a parking session for the car with the given plate.
///
/// Fails with NotFound for unknown car/lot, Conflict if the car already has an
/// open session or the lot is at capacity.
pub async fn enter(
    pool: &PgPool,
    plate: &str,
    lot_id: Uuid,
) -> Result<ParkingSession, DatabaseError> {
    let car = cars::find_by_plate(pool, plate).await?;

    let mut tx = pool.begin().await?;

    // Lock the lot row for the duration of the admission check
    let lot = sqlx::query_as::<_, ParkingLot>(
        "SELECT id, name, location, capacity, hourly_rate, created_at \
         FROM parking_lots WHERE id = $1 FOR UPDATE",
    )
    .bind(lot_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("Parking lot {} not found", lot_id)))?;

    if sessions::open_exists_for_car(&mut tx, car.id).await? {
        return Err(DatabaseError::Conflict(format!(
            "Car '{}' already has an open session",
            car.plate
        )));
    }

    let occupied = sessions::open_count_for_lot(&mut tx, lot.id).await?;
    if occupied >= lot.capacity as i64 {
        return Err(DatabaseError::Conflict(format!(
            "Parking lot '{}' is full ({}/{})",
            lot.name, occupied, lot.capacity
        )));
    }

    let session = sessions::create(&mut tx, car.id, lot.id, Utc::now()).await?;
    tx.commit().await?;

    info!("Car '{}' entered lot '{}' (session {})", car.plate, lot.name, session.id);
    Ok(session)
}

/// Close the open session for the car with the given plate, computing the fee
/// from the occupied duration and the lot's hourly rate.
pub async fn exit(pool: &PgPool, plate: &str) -> Result<ParkingSession, DatabaseError> {
    let car = cars::find_by_plate(pool, plate).await?;

    let open = sessions::find_open_for_car(pool, car.id).await?.ok_or_else(|| {
        DatabaseError::NotFound(format!("No open session for car '{}'", car.plate))
    })?;

    let lot = crate::database::repos::lots::find_by_id(pool, open.parking_lot_id).await?;

    let exited_at = Utc::now();
    let fee = fees::compute_fee(open.entered_at, exited_at, lot.hourly_rate);

    let session = sessions::close(pool, open.id, exited_at, fee).await?;
    info!(
        "Car '{}' exited lot '{}' after {}h, fee {} (session {})",
        car.plate,
        lot.name,
        fees::billable_hours(open.entered_at, exited_at),
        fee,
        session.id
    );
    Ok(session)
}
