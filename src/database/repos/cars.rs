use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{normalize_plate, Car, NewCar};

pub async fn list(pool: &PgPool) -> Result<Vec<Car>, DatabaseError> {
    let cars = sqlx::query_as::<_, Car>(
        "SELECT id, plate, owner_name, owner_phone, created_at FROM cars ORDER BY plate",
    )
    .fetch_all(pool)
    .await?;
    Ok(cars)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Car, DatabaseError> {
    sqlx::query_as::<_, Car>(
        "SELECT id, plate, owner_name, owner_phone, created_at FROM cars WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("Car {} not found", id)))
}

pub async fn find_by_plate(pool: &PgPool, plate: &str) -> Result<Car, DatabaseError> {
    let plate = normalize_plate(plate);
    sqlx::query_as::<_, Car>(
        "SELECT id, plate, owner_name, owner_phone, created_at FROM cars WHERE plate = $1",
    )
    .bind(&plate)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound(format!("Car with plate '{}' not found", plate)))
}

pub async fn create(pool: &PgPool, car: &NewCar) -> Result<Car, DatabaseError> {
    let plate = normalize_plate(&car.plate);
    sqlx::query_as::<_, Car>(
        r#"
        INSERT INTO cars (id, plate, owner_name, owner_phone)
        VALUES ($1, $2, $3, $4)
        RETURNING id, plate, owner_name, owner_phone, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&plate)
    .bind(&car.owner_name)
    .bind(&car.owner_phone)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if DatabaseError::is_unique_violation(&e) {
            DatabaseError::Conflict(format!("Car with plate '{}' already exists", plate))
        } else {
            e.into()
        }
    })
}

pub async fn update(pool: &PgPool, id: Uuid, car: &NewCar) -> Result<Car, DatabaseError> {
    let plate = normalize_plate(&car.plate);
    sqlx::query_as::<_, Car>(
        r#"
        UPDATE cars
        SET plate = $2, owner_name = $3, owner_phone = $4
        WHERE id = $1
        RETURNING id, plate, owner_name, owner_phone, created_at
        "#,
    )
    .bind(id)
    .bind(&plate)
    .bind(&car.owner_name)
    .bind(&car.owner_phone)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        if DatabaseError::is_unique_violation(&e) {
            DatabaseError::Conflict(format!("Car with plate '{}' already exists", plate))
        } else {
            DatabaseError::from(e)
        }
    })?
    .ok_or_else(|| DatabaseError::NotFound(format!("Car {} not found", id)))
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), DatabaseError> {
    let result = sqlx::query("DELETE FROM cars WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("Car {} not found", id)));
    }
    Ok(())
}
