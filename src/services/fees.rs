//! Parking fee computation.
//!
//! Fee = billable hours * the lot's hourly rate, where billable hours is the
//! occupied duration rounded up to whole hours with a one-hour minimum.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

const SECONDS_PER_HOUR: i64 = 3600;

/// Whole hours billed for an occupancy interval
pub fn billable_hours(entered_at: DateTime<Utc>, exited_at: DateTime<Utc>) -> i64 {
    let seconds = (exited_at - entered_at).num_seconds().max(0);
    let hours = (seconds + SECONDS_PER_HOUR - 1) / SECONDS_PER_HOUR;
    hours.max(1)
}

pub fn compute_fee(
    entered_at: DateTime<Utc>,
    exited_at: DateTime<Utc>,
    hourly_rate: Decimal,
) -> Decimal {
    Decimal::from(billable_hours(entered_at, exited_at)) * hourly_rate
}
