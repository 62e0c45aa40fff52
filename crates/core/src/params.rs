//! Tolerant parameter extraction from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. A missing key or
//! a value of the wrong type yields the default. Configuration coming from a
//! hosting page must never break the page, so none of these fail.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// JSON integers are accepted and converted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts an entity count from `params[name]`.
///
/// Out-of-range numbers are clamped instead of discarded: negative values
/// become 0 and fractional values are floored.
/// Non-numbers fall back to `default`.
pub fn param_count(params: &Value, name: &str, default: usize) -> usize {
    match params.get(name) {
        Some(v) if v.is_u64() => v.as_u64().map_or(default, |n| n as usize),
        Some(v) if v.is_i64() => 0,
        Some(v) => match v.as_f64() {
            Some(f) if f.is_finite() => f.max(0.0).floor() as usize,
            _ => default,
        },
        None => default,
    }
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Shallow-merges `overrides` on top of `base`.
///
/// Both must be JSON objects for keys to merge; if `overrides` is not an
/// object, `base` is returned unchanged.
pub fn merge_params(base: &Value, overrides: &Value) -> Value {
    let mut merged = match base {
        Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };
    if let Value::Object(extra) = overrides {
        for (k, v) in extra {
            merged.insert(k.clone(), v.clone());
        }
    }
    Value::Object(merged)
}
