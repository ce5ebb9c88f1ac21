use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered car. The plate is stored normalized (uppercase, no
/// surrounding whitespace) and is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Car {
    pub id: Uuid,
    pub plate: String,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewCar {
    pub plate: String,
    pub owner_name: String,
    pub owner_phone: Option<String>,
}

/// Normalize a plate for storage and lookup
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}
