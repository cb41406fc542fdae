//! Alias-aware field accessors over loosely-typed upstream JSON.
//!
//! Every accessor returns `Option<T>`; callers apply their own default.
//! Upstreams disagree on whether numbers arrive as JSON numbers or strings
//! ("0.915", "-", "N/A"), so both are accepted.

use serde_json::{Map, Value};

pub type Object = Map<String, Value>;

/// Textual value of a scalar, or of an NHL-style `{"default": "..."}` object.
pub fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("default").and_then(value_as_string),
        _ => None,
    }
}

pub fn value_as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

pub fn value_as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn value_as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_u64().map(|v| v != 0),
        _ => None,
    }
}

/// First alias that resolves through `convert`.
fn first_of<T>(obj: &Object, keys: &[&str], convert: fn(&Value) -> Option<T>) -> Option<T> {
    keys.iter().find_map(|k| obj.get(*k).and_then(convert))
}

pub fn str_field(obj: &Object, keys: &[&str]) -> Option<String> {
    first_of(obj, keys, value_as_string)
}

pub fn f64_field(obj: &Object, keys: &[&str]) -> Option<f64> {
    first_of(obj, keys, value_as_f64)
}

pub fn u32_field(obj: &Object, keys: &[&str]) -> Option<u32> {
    first_of(obj, keys, value_as_u32)
}

pub fn bool_field(obj: &Object, keys: &[&str]) -> Option<bool> {
    first_of(obj, keys, value_as_bool)
}

/// Parse a "W-L-OTL" record string.
pub fn parse_record(record: &str) -> Option<(u32, u32, u32)> {
    let mut parts = record.trim().split('-').map(|p| p.trim().parse::<u32>());
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Ok(w)), Some(Ok(l)), Some(Ok(otl)), None) => Some((w, l, otl)),
        _ => None,
    }
}

/// Short JSON kind name for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
