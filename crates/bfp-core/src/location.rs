//! Location-related value types: station addresses, the reference origin and
//! per-station cached distances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached distances at or below this value are treated as missing.
pub const MIN_VALID_DISTANCE_KM: f64 = 0.001;

/// Structured postal location of a station.
///
/// Only ever constructed with a non-empty `street`; extraction failures are
/// represented by the absence of an `Address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub brand: String,
    pub display_name: String,
    pub street: String,
    /// Postal code and locality joined by a single space. May be empty.
    pub postal_city: String,
}

impl Address {
    /// Destination string handed to the mapping provider: `"street , postal city"`.
    #[must_use]
    pub fn destination(&self) -> String {
        format!("{} , {}", self.street, self.postal_city)
            .trim()
            .to_string()
    }
}

/// Reference location distances are measured from.
///
/// Components are finite but not range-checked; the mapping provider
/// validates coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub lat: f64,
    pub lng: f64,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Distance from the origin to one station, as last computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub station_id: String,
    pub distance_km: Option<f64>,
    /// `None` means the distance was never computed.
    pub last_computed_at: Option<DateTime<Utc>>,
    /// `0` means "always recompute".
    pub ttl_seconds: u64,
}

impl DistanceRecord {
    /// A record for a station that has never had its distance computed.
    #[must_use]
    pub fn empty(station_id: &str, ttl_seconds: u64) -> Self {
        Self {
            station_id: station_id.to_string(),
            distance_km: None,
            last_computed_at: None,
            ttl_seconds,
        }
    }

    /// Whether the record's age alone requires a recomputation.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        if self.ttl_seconds == 0 {
            return true;
        }
        let Some(computed_at) = self.last_computed_at else {
            return true;
        };
        let elapsed = now.signed_duration_since(computed_at).num_seconds();
        // A timestamp in the future counts as fresh (elapsed < 0).
        u64::try_from(elapsed).is_ok_and(|secs| secs >= self.ttl_seconds)
    }

    /// The stored distance, if it is usable.
    #[must_use]
    pub fn valid_distance(&self) -> Option<f64> {
        self.distance_km
            .filter(|d| d.is_finite() && *d > MIN_VALID_DISTANCE_KM)
    }

    /// Stale, or fresh but holding an unusable distance.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.is_stale(now) || self.valid_distance().is_none()
    }
}
