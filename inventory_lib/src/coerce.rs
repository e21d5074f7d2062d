//! Explicit value coercions used by the normalizer.
//!
//! Every helper takes `Option<&Value>` so a missing field and a JSON `null`
//! behave the same. Defaults are always passed in by the caller.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Parses a decimal from a number or numeric string.
///
/// Returns `None` for null, missing, empty or whitespace-only strings,
/// non-numeric strings, booleans, arrays, objects, and non-finite results.
pub fn parse_decimal(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok()
            }
        }
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// [`parse_decimal`] with an explicit fallback.
pub fn parse_decimal_or_default(value: Option<&Value>, default: f64) -> f64 {
    parse_decimal(value).unwrap_or(default)
}

/// Parses an integer. Fractional values are truncated toward zero.
pub fn parse_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        _ => None,
    }
}

pub fn parse_int_or_default(value: Option<&Value>, default: i64) -> i64 {
    parse_int(value).unwrap_or(default)
}

/// Parses a boolean flag. Accepts JSON booleans, `0`/`1`, and the strings
/// `true`/`false`/`yes`/`no`/`1`/`0` in any case.
pub fn parse_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Flags default to `default` unless the source says otherwise explicitly.
pub fn parse_bool_or_default(value: Option<&Value>, default: bool) -> bool {
    parse_bool(value).unwrap_or(default)
}

/// Renders a scalar as text. Empty strings count as absent; arrays and
/// objects are not text.
pub fn parse_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parses a point in time.
///
/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC),
/// a bare `YYYY-MM-DD` (midnight UTC), or a number of epoch milliseconds.
pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        // Epoch millis. Years outside 0..=9999 have no RFC 3339 form.
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .filter(|dt| (0..=9999).contains(&dt.year())),
        _ => None,
    }
}

/// Parses a calendar date from `YYYY-MM-DD` or any timestamp [`parse_timestamp`] accepts.
pub fn parse_date(value: Option<&Value>) -> Option<NaiveDate> {
    if let Some(Value::String(s)) = value {
        if let Ok(date) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
            return Some(date);
        }
    }
    parse_timestamp(value).map(|dt| dt.date_naive())
}
