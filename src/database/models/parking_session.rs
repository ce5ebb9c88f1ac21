use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One car's occupancy interval in a parking lot.
///
/// `entered_at` is always set; `exited_at` and `fee` are set together when the
/// car exits. Sessions are never deleted: they are the historical source for
/// the report endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParkingSession {
    pub id: Uuid,
    pub car_id: Uuid,
    pub parking_lot_id: Uuid,
    pub entered_at: DateTime<Utc>,
    pub exited_at: Option<DateTime<Utc>>,
    pub fee: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl ParkingSession {
    pub fn is_open(&self) -> bool {
        self.exited_at.is_none()
    }
}
