use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::location::Address;

/// A price exactly as the station repository reported it.
///
/// Upstream sources publish either a number or free text such as
/// `"1,789 €/l"`; both are accepted and normalized later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl From<f64> for RawPrice {
    fn from(value: f64) -> Self {
        RawPrice::Number(value)
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        RawPrice::Text(value.to_string())
    }
}

/// Opening state of a station. Serialized as `true`/`false`/`null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum OpenState {
    Open,
    Closed,
    #[default]
    Unknown,
}

impl From<Option<bool>> for OpenState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => OpenState::Open,
            Some(false) => OpenState::Closed,
            None => OpenState::Unknown,
        }
    }
}

impl From<OpenState> for Option<bool> {
    fn from(value: OpenState) -> Self {
        match value {
            OpenState::Open => Some(true),
            OpenState::Closed => Some(false),
            OpenState::Unknown => None,
        }
    }
}

/// One station's observation for a single evaluation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateReading {
    /// Stable across runs; keys the distance cache.
    pub station_id: String,
    /// Name the station is registered under, used when the address block
    /// carries no display name.
    pub station_name: String,
    pub raw_price: RawPrice,
    pub is_open: OpenState,
    pub price_timestamp: DateTime<Utc>,
    /// HTML-table-shaped location markup; may be empty.
    pub raw_address_block: String,
}

/// The winning station of an evaluation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestCandidate {
    pub station_id: String,
    pub price: f64,
    pub price_timestamp: DateTime<Utc>,
    pub distance_km: Option<f64>,
    pub address: Option<Address>,
    pub display_name: String,
}
