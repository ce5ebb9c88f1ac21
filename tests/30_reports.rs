//! Report endpoint tests against a real database.
//!
//! These need DATABASE_URL pointing at a PostgreSQL instance with the
//! migrations applied, so they are ignored by default:
//!
//!   cargo test -- --ignored

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use parking_api::database::models::{NewCar, NewParkingLot};
use parking_api::database::repos::{cars, lots};
use parking_api::database::DatabaseManager;
use parking_api::services::session_service;
use parking_api::types::Role;

fn unique_plate() -> String {
    format!("T-{}", &Uuid::new_v4().simple().to_string()[..8]).to_uppercase()
}

async fn seed_lot(pool: &PgPool, capacity: i32) -> Result<Uuid> {
    let lot = lots::create(
        pool,
        &NewParkingLot {
            name: format!("test-lot-{}", Uuid::new_v4()),
            location: "integration test".to_string(),
            capacity,
            hourly_rate: Decimal::from_str("2.50")?,
        },
    )
    .await?;
    Ok(lot.id)
}

async fn seed_car(pool: &PgPool) -> Result<(Uuid, String)> {
    let plate = unique_plate();
    let car = cars::create(
        pool,
        &NewCar {
            plate: plate.clone(),
            owner_name: "Test Owner".to_string(),
            owner_phone: None,
        },
    )
    .await?;
    Ok((car.id, plate))
}

/// Insert a completed session directly so exit timestamp and fee are exact
async fn seed_closed_session(
    pool: &PgPool,
    car_id: Uuid,
    lot_id: Uuid,
    entered_at: DateTime<Utc>,
    exited_at: DateTime<Utc>,
    fee: &str,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO parking_sessions (id, car_id, parking_lot_id, entered_at, exited_at, fee) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(id)
    .bind(car_id)
    .bind(lot_id)
    .bind(entered_at)
    .bind(exited_at)
    .bind(Decimal::from_str(fee)?)
    .execute(pool)
    .await?;
    Ok(id)
}

fn dec(v: &serde_json::Value) -> Decimal {
    Decimal::from_str(v.as_str().expect("decimal as string")).expect("parse decimal")
}

#[tokio::test]
#[ignore = "requires DATABASE_URL with migrated schema"]
async fn occupancy_reports_open_sessions_per_lot() -> Result<()> {
    let pool = DatabaseManager::pool().await?;
    let lot_id = seed_lot(&pool, 3).await?;

    for _ in 0..2 {
        let (_, plate) = seed_car(&pool).await?;
        session_service::enter(&pool, &plate, lot_id).await?;
    }

    let token = common::token_for(Role::Admin);
    let (status, body) = common::get("/api/reports/occupancy", Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);

    let rows = body["data"].as_array().expect("array");
    let row = rows
        .iter()
        .find(|r| r["parking_lot_id"] == lot_id.to_string())
        .expect("seeded lot present");

    assert_eq!(row["occupied"], 2);
    assert_eq!(row["capacity"], 3);
    assert!(row["occupied"].as_i64().unwrap() <= row["capacity"].as_i64().unwrap());
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL with migrated schema"]
async fn revenue_grouped_by_day_sums_to_ungrouped_total() -> Result<()> {
    let pool = DatabaseManager::pool().await?;
    let lot_id = seed_lot(&pool, 5).await?;
    let (car_id, _) = seed_car(&pool).await?;

    // Two days inside the window, one session outside it
    let day1 = Utc.with_ymd_and_hms(2020, 5, 1, 10, 0, 0).unwrap();
    let day2 = Utc.with_ymd_and_hms(2020, 5, 2, 15, 30, 0).unwrap();
    let outside = Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap();
    for (exit, fee) in [(day1, "5.00"), (day2, "7.50"), (outside, "99.00")] {
        seed_closed_session(&pool, car_id, lot_id, exit - chrono::Duration::hours(2), exit, fee)
            .await?;
    }

    let token = common::token_for(Role::Admin);
    let range = "startDate=2020-05-01&endDate=2020-05-31";

    let (status, total_body) =
        common::get(&format!("/api/reports/revenue?{}", range), Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    let total = dec(&total_body["data"]["total"]);

    let (status, by_day_body) = common::get(
        &format!("/api/reports/revenue?{}&groupBy=day", range),
        Some(&token),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let day_sum: Decimal = by_day_body["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|row| dec(&row["total"]))
        .sum();

    assert_eq!(day_sum, total);

    // Grouping by lot must preserve the same invariant
    let (_, by_lot_body) = common::get(
        &format!("/api/reports/revenue?{}&groupBy=parking", range),
        Some(&token),
    )
    .await?;
    let lot_sum: Decimal = by_lot_body["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|row| dec(&row["total"]))
        .sum();
    assert_eq!(lot_sum, total);
    Ok(())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL with migrated schema"]
async fn outgoing_report_has_inclusive_boundaries() -> Result<()> {
    let pool = DatabaseManager::pool().await?;
    let lot_id = seed_lot(&pool, 5).await?;
    let (car_id, _) = seed_car(&pool).await?;

    let start = Utc.with_ymd_and_hms(2021, 3, 10, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2021, 3, 12, 0, 0, 0).unwrap();

    let at_start =
        seed_closed_session(&pool, car_id, lot_id, start - chrono::Duration::hours(1), start, "2.50")
            .await?;
    let at_end =
        seed_closed_session(&pool, car_id, lot_id, end - chrono::Duration::hours(1), end, "2.50")
            .await?;
    let after = seed_closed_session(
        &pool,
        car_id,
        lot_id,
        end,
        end + chrono::Duration::seconds(1),
        "2.50",
    )
    .await?;

    let token = common::token_for(Role::Admin);
    let (status, body) = common::get(
        "/api/reports/outgoing?startDate=2021-03-10T00:00:00Z&endDate=2021-03-12T00:00:00Z",
        Some(&token),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<String> = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();

    assert!(ids.contains(&at_start.to_string()));
    assert!(ids.contains(&at_end.to_string()));
    assert!(!ids.contains(&after.to_string()));
    Ok(())
}
