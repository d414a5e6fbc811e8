use crate::app_config::{AppConfig, FuelKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the real environment so tests can
/// drive them with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_flag(&raw).ok_or_else(|| invalid(var, format!("'{raw}' is not a boolean")))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let stations_path = PathBuf::from(or_default("BFP_STATIONS_PATH", "./config/stations.yaml"));
    let fuel = or_default("BFP_FUEL", "Diesel")
        .parse::<FuelKind>()
        .map_err(|reason| invalid("BFP_FUEL", reason))?;
    let only_open = parse_bool("BFP_ONLY_OPEN", "true")?;

    let enable_distance = parse_bool("BFP_ENABLE_DISTANCE", "false")?;
    let write_distance = parse_bool("BFP_WRITE_DISTANCE", "true")?;
    let max_distance_km = parse_distance_km(&or_default("BFP_MAX_DISTANCE_KM", "5.0"))
        .map_err(|reason| invalid("BFP_MAX_DISTANCE_KM", reason))?;
    let distance_interval_minutes = parse_u64("BFP_DISTANCE_UPDATE_INTERVAL_MINUTES", "1440")?;
    let distance_ttl_secs = distance_interval_minutes.saturating_mul(60);
    let distance_cache_path =
        PathBuf::from(or_default("BFP_DISTANCE_CACHE_PATH", "./data/distances.json"));

    let origin = optional("BFP_ORIGIN");
    let maps_api_key = optional("BFP_MAPS_API_KEY");
    let maps_base_url = or_default("BFP_MAPS_BASE_URL", "https://maps.googleapis.com/");
    let maps_timeout_secs = parse_u64("BFP_MAPS_TIMEOUT_SECS", "30")?;
    let maps_max_retries = parse_u32("BFP_MAPS_MAX_RETRIES", "2")?;
    let log_level = or_default("BFP_LOG_LEVEL", "info");

    // Origin and API key stay optional here; a distance run checks them.
    Ok(AppConfig {
        stations_path,
        fuel,
        only_open,
        enable_distance,
        max_distance_km,
        distance_ttl_secs,
        write_distance,
        distance_cache_path,
        origin,
        maps_api_key,
        maps_base_url,
        maps_timeout_secs,
        maps_max_retries,
        log_level,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_distance_km(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|e| e.to_string())?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{raw}' must be a finite number >= 0"));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
