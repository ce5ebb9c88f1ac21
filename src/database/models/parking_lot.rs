use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParkingLot {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub hourly_rate: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewParkingLot {
    pub name: String,
    pub location: String,
    pub capacity: i32,
    pub hourly_rate: Decimal,
}
