//! Text and structured-value decoding for bound settings
//!
//! Environment variables and flag occurrences arrive as single strings, so
//! composite kinds need an encoding:
//! - lists are one CSV record (`"a","b,c",d`)
//! - maps are a JSON object (`{"k": "v"}`), a single `key=value` pair, or a
//!   CSV record of `key=value` pairs
//!
//! Structured sources (YAML/TOML) carry real arrays and objects and decode
//! directly, falling back to the string encodings when the value is a string.

use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

pub type StringMap = BTreeMap<String, String>;

/// Parse the boolean spellings accepted in environment and config values.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Parse a duration such as `1h2m3s` or `500ms`.
///
/// A unitless integer is a count of seconds, not nanoseconds, so `30` means
/// thirty seconds.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime::parse_duration(trimmed).map_err(|err| err.to_string())
}

/// Decode one CSV record into its fields.
///
/// Fields are kept verbatim, so quoting preserves leading and trailing
/// whitespace. Returns `None` for blank input or when the record cannot be read.
pub fn decode_list(raw: &str) -> Option<Vec<String>> {
    if raw.trim().is_empty() {
        return None;
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(raw.as_bytes());

    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => Some(record.iter().map(str::to_string).collect()),
        _ => None,
    }
}

/// Decode a map from a JSON object, `key=value`, or `k1=v1,k2=v2`.
pub fn decode_map(raw: &str) -> Option<StringMap> {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') {
        return decode_json_map(trimmed);
    }

    let (key, rest) = trimmed.split_once('=')?;
    if let Some(expanded) = decode_json_map(rest.trim()) {
        return Some(expanded);
    }

    // More than one pair only when every CSV field is itself a pair.
    if let Some(fields) = decode_list(trimmed) {
        if fields.len() > 1 && fields.iter().all(|f| f.contains('=')) {
            return Some(
                fields
                    .iter()
                    .filter_map(|f| f.split_once('='))
                    .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                    .collect(),
            );
        }
    }

    let mut map = StringMap::new();
    map.insert(key.to_string(), rest.to_string());
    Some(map)
}

fn decode_json_map(raw: &str) -> Option<StringMap> {
    match serde_json::from_str::<Value>(raw).ok()? {
        Value::Object(object) => value_to_map(&Value::Object(object)),
        _ => None,
    }
}

/// Render a scalar structured value as text. Arrays and objects have no text form.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn value_to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => parse_bool(s),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

pub fn value_to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => parse_int(s),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

pub fn value_to_duration(value: &Value) -> Option<Duration> {
    match value {
        Value::String(s) => parse_duration(s).ok(),
        Value::Number(n) => n.as_u64().map(Duration::from_secs),
        _ => None,
    }
}

pub fn value_to_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => items.iter().map(scalar_to_string).collect(),
        Value::String(s) => decode_list(s),
        _ => None,
    }
}

pub fn value_to_map(value: &Value) -> Option<StringMap> {
    match value {
        Value::Object(object) => object
            .iter()
            .map(|(k, v)| scalar_to_string(v).map(|s| (k.clone(), s)))
            .collect(),
        Value::String(s) => decode_map(s),
        _ => None,
    }
}
