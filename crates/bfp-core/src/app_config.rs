use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which price field of a station counts as "the" price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelKind {
    Diesel,
    E5,
    E10,
}

impl FuelKind {
    /// Key under which the price is stored in a station's `prices` map.
    #[must_use]
    pub fn ident(self) -> &'static str {
        match self {
            FuelKind::Diesel => "Diesel",
            FuelKind::E5 => "E5",
            FuelKind::E10 => "E10",
        }
    }
}

impl std::fmt::Display for FuelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ident())
    }
}

impl FromStr for FuelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diesel" => Ok(FuelKind::Diesel),
            "e5" => Ok(FuelKind::E5),
            "e10" => Ok(FuelKind::E10),
            other => Err(format!(
                "unknown fuel '{other}'; expected Diesel, E5, or E10"
            )),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub stations_path: PathBuf,
    pub fuel: FuelKind,
    pub only_open: bool,
    pub enable_distance: bool,
    /// `0.0` disables the radius filter.
    pub max_distance_km: f64,
    /// `0` forces a recomputation on every run.
    pub distance_ttl_secs: u64,
    pub write_distance: bool,
    pub distance_cache_path: PathBuf,
    /// Raw origin source: a JSON object or a `"lat, lng"` string.
    pub origin: Option<String>,
    pub maps_api_key: Option<String>,
    pub maps_base_url: String,
    pub maps_timeout_secs: u64,
    pub maps_max_retries: u32,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("stations_path", &self.stations_path)
            .field("fuel", &self.fuel)
            .field("only_open", &self.only_open)
            .field("enable_distance", &self.enable_distance)
            .field("max_distance_km", &self.max_distance_km)
            .field("distance_ttl_secs", &self.distance_ttl_secs)
            .field("write_distance", &self.write_distance)
            .field("distance_cache_path", &self.distance_cache_path)
            .field("origin", &self.origin)
            .field(
                "maps_api_key",
                &self.maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("maps_base_url", &self.maps_base_url)
            .field("maps_timeout_secs", &self.maps_timeout_secs)
            .field("maps_max_retries", &self.maps_max_retries)
            .field("log_level", &self.log_level)
            .finish()
    }
}
