//! Parsing of the configured origin location.
//!
//! Two shapes are accepted:
//! - a JSON object with `latitude`/`longitude` (preferred) or `lat`/`lng`
//!   fields, whose values may be numbers or decimal-comma strings;
//! - a free-text `"lat, lng"` pair as produced by location pickers.

use serde_json::Value;
use thiserror::Error;

use crate::location::Origin;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OriginError {
    #[error("origin is not configured")]
    Missing,

    #[error("origin has an invalid format (expected \"lat, lng\" or a JSON object): {0}")]
    InvalidFormat(String),
}

/// Parse an origin from either of the supported shapes.
///
/// # Errors
///
/// Returns [`OriginError::Missing`] for blank input and
/// [`OriginError::InvalidFormat`] when neither shape yields two finite numbers.
pub fn parse_origin(raw: &str) -> Result<Origin, OriginError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(OriginError::Missing);
    }

    let parsed = if trimmed.starts_with('{') {
        parse_json_origin(trimmed)
    } else {
        parse_pair_origin(trimmed)
    };

    parsed.ok_or_else(|| OriginError::InvalidFormat(trimmed.to_string()))
}

fn parse_json_origin(raw: &str) -> Option<Origin> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let obj = value.as_object()?;

    let pick = |lat_key: &str, lng_key: &str| -> Option<(f64, f64)> {
        let lat = coordinate_from_value(obj.get(lat_key)?)?;
        let lng = coordinate_from_value(obj.get(lng_key)?)?;
        Some((lat, lng))
    };

    let (lat, lng) = pick("latitude", "longitude").or_else(|| pick("lat", "lng"))?;
    Some(Origin { lat, lng })
}

fn parse_pair_origin(raw: &str) -> Option<Origin> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();

    // "53,6053, 10,0746": both components written with a decimal comma.
    if parts.len() == 4 && !raw.contains('.') {
        let lat = join_decimal_comma(parts[0], parts[1])?;
        let lng = join_decimal_comma(parts[2], parts[3])?;
        return Some(Origin { lat, lng });
    }

    let lat = parse_coordinate(parts.first()?)?;
    let lng = parse_coordinate(parts.get(1)?)?;
    Some(Origin { lat, lng })
}

fn join_decimal_comma(whole: &str, fraction: &str) -> Option<f64> {
    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    parse_coordinate(&format!("{whole}.{fraction}"))
}

fn coordinate_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_coordinate(s),
        _ => None,
    }
}

/// Parse one coordinate, tolerating a decimal comma.
fn parse_coordinate(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
