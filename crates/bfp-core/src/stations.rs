use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app_config::FuelKind;
use crate::candidates::{CandidateReading, OpenState, RawPrice};
use crate::ConfigError;

/// One station as listed in the stations file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_open: OpenState,
    /// Price per fuel kind, keyed by fuel ident (`Diesel`, `E5`, `E10`).
    #[serde(default)]
    pub prices: BTreeMap<String, RawPrice>,
    /// When the prices were last updated upstream.
    pub price_updated_at: Option<DateTime<Utc>>,
    /// HTML table describing the station's address.
    #[serde(default)]
    pub address_html: String,
}

impl StationConfig {
    /// Price for `fuel`, matching the map key case-insensitively.
    #[must_use]
    pub fn price_for(&self, fuel: FuelKind) -> Option<&RawPrice> {
        self.prices
            .iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(fuel.ident()))
            .map(|(_, price)| price)
    }
}

#[derive(Debug, Deserialize)]
pub struct StationsFile {
    pub stations: Vec<StationConfig>,
}

impl StationsFile {
    /// Build this cycle's candidate readings for `fuel`, ordered by station id.
    ///
    /// Stations that do not publish a price for `fuel` are left out. A missing
    /// `price_updated_at` falls back to `now`.
    #[must_use]
    pub fn candidates(&self, fuel: FuelKind, now: DateTime<Utc>) -> Vec<CandidateReading> {
        let mut readings: Vec<CandidateReading> = self
            .stations
            .iter()
            .filter_map(|station| {
                let raw_price = station.price_for(fuel)?.clone();
                Some(CandidateReading {
                    station_id: station.id.clone(),
                    station_name: station.name.clone(),
                    raw_price,
                    is_open: station.is_open,
                    price_timestamp: station.price_updated_at.unwrap_or(now),
                    raw_address_block: station.address_html.clone(),
                })
            })
            .collect();
        readings.sort_by(|a, b| a.station_id.cmp(&b.station_id));
        readings
    }
}

/// Load and validate the stations file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_stations(path: &Path) -> Result<StationsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StationsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_stations(&content)
}

/// Parse and validate stations YAML that is already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_stations(content: &str) -> Result<StationsFile, ConfigError> {
    let stations_file: StationsFile =
        serde_yaml::from_str(content).map_err(ConfigError::StationsFileParse)?;

    validate_stations(&stations_file)?;

    Ok(stations_file)
}

fn validate_stations(stations_file: &StationsFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for station in &stations_file.stations {
        let id = station.id.trim();
        if id.is_empty() {
            return Err(ConfigError::Validation(format!(
                "station '{}' has an empty id",
                station.name
            )));
        }

        if !seen_ids.insert(id.to_string()) {
            return Err(ConfigError::Validation(format!(
                "duplicate station id: '{id}'"
            )));
        }
    }

    Ok(())
}
