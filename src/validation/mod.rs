//! Declarative query-parameter validation.
//!
//! A [`Schema`] is a list of field rules (required/optional plus a format
//! constraint). Validation evaluates every declared rule against the request's
//! parameters and collects all violations; there is no short-circuit, so a
//! request missing both dates reports both fields.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;

use crate::error::FieldError;

/// Format constraint applied to a field value when present
#[derive(Debug, Clone, Copy)]
pub enum Format {
    /// `YYYY-MM-DD` or full RFC 3339 timestamp
    Date,
    /// Membership in a fixed set of values
    Enum(&'static [&'static str]),
    /// Any non-empty string
    Text,
}

#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    required: bool,
    format: Format,
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: &'static str, format: Format) -> Self {
        self.fields.push(Field { name, required: true, format });
        self
    }

    pub fn optional(mut self, name: &'static str, format: Format) -> Self {
        self.fields.push(Field { name, required: false, format });
        self
    }

    /// Evaluate all declared rules. Empty result means the request passes.
    pub fn validate(&self, params: &HashMap<String, String>) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for field in &self.fields {
            match params.get(field.name).map(|v| v.trim()).filter(|v| !v.is_empty()) {
                None => {
                    if field.required {
                        errors.push(FieldError::new(
                            field.name,
                            format!("{} is required", field.name),
                        ));
                    }
                }
                Some(value) => {
                    if let Some(message) = check_format(field.name, value, field.format) {
                        errors.push(FieldError::new(field.name, message));
                    }
                }
            }
        }

        errors
    }
}

fn check_format(name: &str, value: &str, format: Format) -> Option<String> {
    match format {
        Format::Text => None,
        Format::Date => {
            if parse_date(value).is_none() {
                Some(format!("{} must be a date (YYYY-MM-DD or RFC 3339)", name))
            } else {
                None
            }
        }
        Format::Enum(allowed) => {
            if allowed.contains(&value) {
                None
            } else {
                Some(format!("{} must be one of: {}", name, allowed.join(", ")))
            }
        }
    }
}

/// Parse a date parameter. Day-granularity values keep their calendar day;
/// the start/end helpers below pick the boundary instant.
pub fn parse_date(value: &str) -> Option<ParsedDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(ParsedDate::Day(date));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(ParsedDate::Instant(dt.with_timezone(&Utc)));
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Day(NaiveDate),
    Instant(DateTime<Utc>),
}

impl ParsedDate {
    /// Boundary instant when the value opens a range: start of day in UTC
    pub fn range_start(self) -> DateTime<Utc> {
        match self {
            ParsedDate::Day(date) => {
                Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("valid time"))
            }
            ParsedDate::Instant(dt) => dt,
        }
    }

    /// Boundary instant when the value closes a range: end of day in UTC,
    /// so a day-granularity endDate is inclusive of that whole day
    pub fn range_end(self) -> DateTime<Utc> {
        match self {
            ParsedDate::Day(date) => Utc.from_utc_datetime(
                &date.and_hms_micro_opt(23, 59, 59, 999_999).expect("valid time"),
            ),
            ParsedDate::Instant(dt) => dt,
        }
    }
}
