mod common;

use anyhow::Result;
use axum::http::StatusCode;
use parking_api::types::Role;

fn field_names(body: &serde_json::Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .map(|e| e["field"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn missing_both_dates_lists_both_fields() -> Result<()> {
    let (status, body) = common::get("/api/reports/outgoing", None).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = field_names(&body);
    assert!(fields.contains(&"startDate".to_string()), "body: {}", body);
    assert!(fields.contains(&"endDate".to_string()), "body: {}", body);
    Ok(())
}

#[tokio::test]
async fn validation_runs_before_authentication() -> Result<()> {
    // No bearer token, invalid query: validation wins, 400 not 401
    let (status, body) = common::get("/api/reports/incoming", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("errors").is_some());
    Ok(())
}

#[tokio::test]
async fn unparsable_date_reported_per_field() -> Result<()> {
    let (status, body) = common::get(
        "/api/reports/outgoing?startDate=yesterday&endDate=2026-01-31",
        None,
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = field_names(&body);
    assert_eq!(fields, vec!["startDate".to_string()]);
    Ok(())
}

#[tokio::test]
async fn invalid_group_by_rejected() -> Result<()> {
    let (status, body) = common::get(
        "/api/reports/revenue?startDate=2026-01-01&endDate=2026-01-31&groupBy=week",
        None,
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = field_names(&body);
    assert_eq!(fields, vec!["groupBy".to_string()]);
    let message = body["errors"][0]["message"].as_str().unwrap();
    assert!(message.contains("parking, day"), "message: {}", message);
    Ok(())
}

#[tokio::test]
async fn valid_query_without_token_hits_auth_not_validation() -> Result<()> {
    let (status, body) = common::get(
        "/api/reports/outgoing?startDate=2026-01-01&endDate=2026-01-31",
        None,
    )
    .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("message").is_some());
    assert!(body.get("errors").is_none());
    Ok(())
}

#[tokio::test]
async fn revenue_missing_dates_with_admin_token_still_400() -> Result<()> {
    let token = common::token_for(Role::Admin);
    let (status, body) = common::get("/api/reports/revenue", Some(&token)).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(field_names(&body).len(), 2);
    Ok(())
}

#[tokio::test]
async fn rfc3339_dates_accepted_by_validation() -> Result<()> {
    // Passes validation, then fails auth: proves RFC 3339 parses
    let (status, _) = common::get(
        "/api/reports/incoming?startDate=2026-01-01T00:00:00Z&endDate=2026-01-31T23:00:00Z",
        None,
    )
    .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}
