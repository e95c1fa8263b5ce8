//! Input coercion functions
//!
//! Chat input is never rejected. Missing or malformed profile fields are
//! replaced with fixed defaults so every request can be answered.
//!
//! A value counts as missing when it is absent, `null`, `false`, zero, an
//! empty string, or an empty array/object.

use serde_json::Value;

/// Age used when the request carries no usable age
pub const DEFAULT_AGE: i64 = 25;
/// Weight (kg) used when the request carries no usable weight
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
/// Height (cm) used when the request carries no usable height
pub const DEFAULT_HEIGHT_CM: f64 = 170.0;
/// Name used when neither the request nor the environment supplies one
pub const DEFAULT_NAME: &str = "User";

/// Whether a JSON value should be treated as not supplied
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Coerce an age; floats are truncated, numeric strings are parsed
pub fn coerce_age(value: Option<&Value>) -> i64 {
    supplied(value)
        .and_then(|v| match v {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        })
        .unwrap_or(DEFAULT_AGE)
}

/// Coerce a weight in kilograms
pub fn coerce_weight(value: Option<&Value>) -> f64 {
    coerce_real(value).unwrap_or(DEFAULT_WEIGHT_KG)
}

/// Coerce a height in centimeters
pub fn coerce_height(value: Option<&Value>) -> f64 {
    coerce_real(value).unwrap_or(DEFAULT_HEIGHT_CM)
}

/// Resolve the user's name
///
/// A non-empty string from the request wins and is trimmed (so a name of
/// only spaces becomes empty). Otherwise the login name is used, then
/// [`DEFAULT_NAME`].
pub fn coerce_name(value: Option<&Value>, login_name: Option<&str>) -> String {
    let raw = match value {
        Some(Value::String(s)) if !s.is_empty() => s.as_str(),
        _ => login_name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_NAME),
    };
    raw.trim().to_string()
}

/// Extract the question text; anything but a string is treated as empty
pub fn coerce_message(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn supplied(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !is_blank(v))
}

fn coerce_real(value: Option<&Value>) -> Option<f64> {
    supplied(value)
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|f| f.is_finite())
}
