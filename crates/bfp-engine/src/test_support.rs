//! Fake collaborators shared by the engine's unit tests.

use std::cell::Cell;
use std::collections::HashMap;

use bfp_core::{Address, CandidateReading, OpenState, Origin, OriginError, RawPrice};
use chrono::{DateTime, TimeZone, Utc};

use crate::provider::{MapProvider, OriginProvider};

pub(crate) const ORIGIN: Origin = Origin {
    lat: 53.6,
    lng: 10.0,
};

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub(crate) fn address(street: &str, postal_city: &str) -> Address {
    Address {
        brand: "ARAL".to_string(),
        display_name: "Aral Nord".to_string(),
        street: street.to_string(),
        postal_city: postal_city.to_string(),
    }
}

/// Station markup for `street` in `postal_city`, named `display_name`.
pub(crate) fn address_block(display_name: &str, street: &str, postal_city: &str) -> String {
    format!(
        "<table><tr><td>BRAND</td></tr><tr><td>{display_name}</td></tr>\
         <tr><td>{street}</td></tr><tr><td>{postal_city}</td></tr></table>"
    )
}

pub(crate) fn reading(id: &str, price: impl Into<RawPrice>, block: &str) -> CandidateReading {
    CandidateReading {
        station_id: id.to_string(),
        station_name: format!("Station {id}"),
        raw_price: price.into(),
        is_open: OpenState::Open,
        price_timestamp: fixed_now(),
        raw_address_block: block.to_string(),
    }
}

/// Map provider answering from a fixed destination table.
#[derive(Default)]
pub(crate) struct FakeMaps {
    distances: HashMap<String, f64>,
    calls: Cell<usize>,
    fail_embed: bool,
}

impl FakeMaps {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_distance(mut self, destination: &str, km: f64) -> Self {
        self.distances.insert(destination.to_string(), km);
        self
    }

    pub(crate) fn failing_embed(mut self) -> Self {
        self.fail_embed = true;
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl MapProvider for FakeMaps {
    type Error = String;

    async fn distance_km(&self, _origin: Origin, destination: &str) -> Result<f64, String> {
        self.calls.set(self.calls.get() + 1);
        self.distances
            .get(destination)
            .copied()
            .ok_or_else(|| format!("NOT_FOUND: {destination}"))
    }

    fn embed_route_url(&self, origin: Origin, destination: &str) -> Result<String, String> {
        if self.fail_embed {
            return Err("REQUEST_DENIED <quota>".to_string());
        }
        Ok(format!(
            "https://maps.test/embed?origin={origin}&destination={destination}"
        ))
    }
}

/// Origin provider that always fails.
pub(crate) struct BrokenOrigin;

impl OriginProvider for BrokenOrigin {
    fn origin(&self) -> Result<Origin, OriginError> {
        Err(OriginError::InvalidFormat("nowhere".to_string()))
    }
}
