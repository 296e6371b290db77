//! Date format detection and normalization
//!
//! String values written in the literal layout `YYYY-MM-DDTHH:MM:SS.ffffff`
//! (one to six fractional digits) are recognised as dates. Once a field is
//! known to hold dates, every string at that field is rewritten in place to a
//! date-wrapper `{"$date": "<iso-8601>"}`, which is the only date shape the
//! collators read.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde_json::{Map, Value};
use tracing::trace;

use super::error::{ExplorerError, Result};
use super::types::{DATE_KEY, Document};

/// Literal layout recognised during date detection (chrono syntax)
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Weekday names, Monday first
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Month names, January first
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parse a string written in the fixed date layout.
///
/// The fractional part is mandatory and holds one to six digits. Only
/// digits and the `-`, `:`, `.` and `T` separators may appear, so padded or
/// signed fields are rejected before chrono sees them.
pub fn parse_date_literal(value: &str) -> Option<NaiveDateTime> {
    if !value.starts_with(|c: char| c.is_ascii_digit())
        || !value
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'-' | b':' | b'.' | b'T'))
    {
        return None;
    }
    let (_, fraction) = value.rsplit_once('.')?;
    if fraction.is_empty() || fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    NaiveDateTime::parse_from_str(value, DATE_FORMAT).ok()
}

/// ISO-8601 rendering of an instant; the fraction is omitted when zero
pub fn to_iso_string(instant: &NaiveDateTime) -> String {
    if instant.nanosecond() == 0 {
        instant.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        instant.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Build the canonical date-wrapper for an instant
pub fn date_wrapper(instant: &NaiveDateTime) -> Value {
    let mut wrapper = Map::new();
    wrapper.insert(DATE_KEY.to_string(), Value::String(to_iso_string(instant)));
    Value::Object(wrapper)
}

/// Parse an ISO-8601 string held by a date-wrapper.
///
/// Accepts naive date-times (optional fraction, `T` or space separator),
/// RFC 3339 timestamps with an offset (converted to UTC) and bare dates
/// (midnight).
pub fn parse_iso_instant(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok());
    if let Some(instant) = naive {
        return Ok(instant);
    }

    let offset_err = match DateTime::parse_from_rfc3339(trimmed) {
        Ok(instant) => return Ok(instant.naive_utc()),
        Err(e) => e,
    };

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ExplorerError::DateParse {
            value: value.to_string(),
            reason: offset_err.to_string(),
        })
}

/// Extract the instant held by a date-wrapper value
pub fn parse_date_wrapper(value: &Value) -> Result<NaiveDateTime> {
    match value.get(DATE_KEY) {
        Some(Value::String(s)) => parse_iso_instant(s),
        Some(other) => Err(ExplorerError::DateParse {
            value: other.to_string(),
            reason: "date-wrapper does not hold a string".to_string(),
        }),
        None => Err(ExplorerError::DateParse {
            value: value.to_string(),
            reason: format!("missing '{}' key", DATE_KEY),
        }),
    }
}

/// Rewrite every string at `field` that matches the date layout into a
/// date-wrapper. Strings that do not match are left untouched and will be
/// classified as unexpected. Returns the number of rewritten values.
pub fn normalize_dates(documents: &mut [&mut Document], field: &str) -> usize {
    let mut rewritten = 0;
    for document in documents.iter_mut() {
        let Some(Value::String(raw)) = document.get(field) else {
            continue;
        };
        match parse_date_literal(raw) {
            Some(instant) => {
                document.insert(field.to_string(), date_wrapper(&instant));
                rewritten += 1;
            }
            None => trace!(field, value = %raw, "String does not match the date layout"),
        }
    }
    rewritten
}
