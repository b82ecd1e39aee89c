/// Utility functions
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Extract number from JSON value
pub fn num(v: &Value) -> Option<f64> {
    if let Some(x) = v.as_f64() {
        return Some(x);
    }
    if let Some(s) = v.as_str() {
        return s.parse::<f64>().ok();
    }
    None
}

/// Clamp a value into an inclusive range
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Extract an epoch-milliseconds timestamp from a JSON value, accepting either
/// a numeric epoch (seconds or milliseconds) or an RFC 3339 string.
pub fn epoch_ms(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        // Values before ~2001 in milliseconds are assumed to be seconds.
        if n < 1_000_000_000_000 {
            return Some(n * 1000);
        }
        return Some(n);
    }
    if let Some(s) = v.as_str() {
        if let Ok(dt) = s.parse::<DateTime<Utc>>() {
            return Some(dt.timestamp_millis());
        }
    }
    None
}

/// Pick a numeric value from JSON by trying multiple keys
pub fn num_pick(v: &Value, keys: &[&str]) -> Option<f64> {
    for k in keys {
        if let Some(x) = v.get(*k) {
            if let Some(n) = num(x) {
                return Some(n);
            }
        }
    }
    None
}
