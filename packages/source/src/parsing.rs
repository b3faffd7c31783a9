//! Field parsing helpers for raw Socrata records.
//!
//! Every function returns `None` for values that are missing or corrupt;
//! the normalizer decides what to do with such rows.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Timestamp formats accepted for the occurrence date, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses an occurrence timestamp.
///
/// Accepts Socrata floating timestamps (`2024-01-15T14:30:00.000`), the
/// bulk CSV export format (`01/15/2024 12:00:00 AM`) and bare dates
/// (`2024-01-15`, interpreted as midnight).
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parses an `HHMM` military time string (e.g. `"2130"`, `"5"` for 00:05).
///
/// Short values are treated as left-padded with zeros.
#[must_use]
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    if s.is_empty() || s.len() > 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = s.parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(value / 100, value % 100, 0)
}

/// Parses a coordinate from a JSON string or number.
///
/// Non-finite values (`NaN`, `inf`) are treated as missing.
#[must_use]
pub fn parse_coordinate(value: Option<&serde_json::Value>) -> Option<f64> {
    let parsed = match value? {
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        serde_json::Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    parsed.is_finite().then_some(parsed)
}

/// Reads a non-empty text value, converting numbers to strings.
#[must_use]
pub fn parse_text(value: Option<&serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
