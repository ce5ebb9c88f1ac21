//! Validation middleware for the report query parameters.
//!
//! Each middleware carries a declared [`Schema`], evaluates every constraint,
//! and rejects with a 400 listing all violations before the request reaches
//! authentication or the controller. On success the parsed values are attached
//! as request extensions for the handler.

use axum::{
    extract::{Query, Request},
    middleware::Next,
    response::Response,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::ApiError;
use crate::types::{GroupBy, GROUP_BY_VALUES};
use crate::validation::{parse_date, Format, Schema};

/// Validated `[startDate, endDate]` range, boundaries inclusive
#[derive(Clone, Debug)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Validated revenue report parameters
#[derive(Clone, Debug)]
pub struct RevenueParams {
    pub range: DateRange,
    pub group_by: Option<GroupBy>,
}

fn date_range_schema() -> Schema {
    Schema::new()
        .required("startDate", Format::Date)
        .required("endDate", Format::Date)
}

fn revenue_schema() -> Schema {
    date_range_schema().optional("groupBy", Format::Enum(GROUP_BY_VALUES))
}

fn parse_range(params: &HashMap<String, String>) -> DateRange {
    // Schema validation already guaranteed both fields are present and parse
    let start = parse_date(params["startDate"].trim()).expect("validated").range_start();
    let end = parse_date(params["endDate"].trim()).expect("validated").range_end();
    DateRange { start, end }
}

/// Validates `startDate` and `endDate` for the date-ranged report endpoints
pub async fn validate_date_range(
    Query(params): Query<HashMap<String, String>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let errors = date_range_schema().validate(&params);
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    request.extensions_mut().insert(parse_range(&params));
    Ok(next.run(request).await)
}

/// Validates the revenue endpoint parameters: date range plus optional `groupBy`
pub async fn validate_revenue_query(
    Query(params): Query<HashMap<String, String>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let errors = revenue_schema().validate(&params);
    if !errors.is_empty() {
        return Err(ApiError::validation(errors));
    }

    let group_by = params
        .get("groupBy")
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| GroupBy::from_str(v).expect("validated"));

    let revenue = RevenueParams { range: parse_range(&params), group_by };
    request.extensions_mut().insert(revenue);
    Ok(next.run(request).await)
}
