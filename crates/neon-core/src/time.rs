//! Timestamp literal validation.
//!
//! Literals are validated but never normalized: downstream hashing operates
//! on the exact string, so `12:00:00Z` and `12:00:00.000Z` stay distinct.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::errors::{codes, ErrorInfo, GenieError};

/// Parses an ISO-8601 literal into a UTC instant.
///
/// Accepts RFC 3339 instants, offset-less date-times (read as UTC) and bare
/// calendar dates.
pub fn parse_timestamp(literal: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(literal) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(literal, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(literal, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn invalid_timestamp(timestamp_iso: &str) -> GenieError {
    GenieError::Provenance(
        ErrorInfo::new(
            codes::INVALID_TIMESTAMP,
            format!("Invalid ISO 8601 timestamp: {timestamp_iso}"),
        )
        .with_context("timestamp_iso", timestamp_iso),
    )
}

/// Returns the literal unchanged when it denotes a valid calendar instant.
pub fn validate_timestamp(timestamp_iso: &str) -> Result<&str, GenieError> {
    match parse_timestamp(timestamp_iso) {
        Some(_) => Ok(timestamp_iso),
        None => Err(invalid_timestamp(timestamp_iso)),
    }
}

/// Milliseconds since the Unix epoch for a valid literal.
pub fn iso_to_millis(timestamp_iso: &str) -> Result<i64, GenieError> {
    let instant = parse_timestamp(timestamp_iso).ok_or_else(|| invalid_timestamp(timestamp_iso))?;
    Ok(instant.timestamp_millis())
}
