//! Shared domain types and configuration for the best-fuel-price workspace.

pub mod app_config;
pub mod candidates;
pub mod config;
pub mod location;
pub mod origin;
pub mod stations;

use thiserror::Error;

pub use app_config::{AppConfig, FuelKind};
pub use candidates::{BestCandidate, CandidateReading, OpenState, RawPrice};
pub use config::{load_app_config, load_app_config_from_env};
pub use location::{Address, DistanceRecord, Origin};
pub use origin::{parse_origin, OriginError};
pub use stations::{load_stations, parse_stations, StationConfig, StationsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read stations file {path}: {source}")]
    StationsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stations file: {0}")]
    StationsFileParse(#[from] serde_yaml::Error),

    #[error("stations validation error: {0}")]
    Validation(String),
}
