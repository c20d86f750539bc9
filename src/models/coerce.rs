//! Lenient readers for backend column values.
//!
//! Backend rows are loosely typed: numbers may arrive as strings, columns may
//! be missing or null, lookups may be bare ids or expanded objects. Every
//! reader here falls back to a type-appropriate default instead of failing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::lookup::LookupRef;

pub fn text_from(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Object(map) => map
            .get("Name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Value::Null | Value::Array(_) => String::new(),
    }
}

/// Reads a decimal, `0.0` when absent or unparseable.
pub fn number_from(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Reads an integer, truncating decimals, `0` when absent or unparseable.
pub fn integer_from(value: &Value) -> i32 {
    let number = match value {
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
    };
    number.and_then(|n| i32::try_from(n).ok()).unwrap_or(0)
}

/// Parses RFC 3339 timestamps, naive ISO timestamps (assumed UTC) and bare
/// dates (midnight UTC).
pub fn timestamp_from(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.as_str()?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn date_from(value: &Value) -> Option<NaiveDate> {
    let raw = value.as_str()?.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| timestamp_from(value).map(|ts| ts.date_naive()))
}

/// Reads a row identifier; anything that is not a positive integer is `None`.
pub fn row_id_from(value: &Value) -> Option<i32> {
    LookupRef::from_value(value).map(|lookup| lookup.id())
}

pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(|value| text_from(&value))
}

pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Value::deserialize(deserializer).map(|value| number_from(&value))
}

pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Value::deserialize(deserializer).map(|value| integer_from(&value))
}

pub fn timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    Value::deserialize(deserializer).map(|value| timestamp_from(&value))
}

pub fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    Value::deserialize(deserializer).map(|value| date_from(&value))
}

pub fn row_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Value::deserialize(deserializer).map(|value| row_id_from(&value))
}

pub fn lookup<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<LookupRef>, D::Error> {
    Value::deserialize(deserializer).map(|value| LookupRef::from_value(&value))
}

/// Converts a supplied patch value for a nullable text column: blank clears
/// the column, anything else is written trimmed.
pub fn patch_text(value: Option<&String>) -> Option<Option<String>> {
    value.map(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}
