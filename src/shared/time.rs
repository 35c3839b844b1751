//! Timestamp parsing shared by the HTTP layer and the booking service.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::errors::{DomainError, DomainResult};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS` /
/// `YYYY-MM-DD HH:MM:SS` one which is taken as UTC.
pub fn parse_timestamp(value: &str) -> DomainResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DomainError::Validation(format!("Invalid timestamp: '{}'", value)))
}
