//! Best-candidate selection.
//!
//! A single left-to-right pass keeps the current winner. Lower prices always
//! win; prices within [`PRICE_EPSILON`] of each other are decided by distance
//! when distance mode is on, otherwise the earlier candidate stays.

use bfp_core::{Address, BestCandidate, CandidateReading, OpenState};
use bfp_scraper::{extract_address, normalize_price};

use crate::distance::ResolveDistance;

/// Prices closer than this are considered equal for the distance tie-break.
pub const PRICE_EPSILON: f64 = 0.0005;

/// Absorbs binary rounding so decimal prices exactly `PRICE_EPSILON` apart
/// still compare as tied.
const PRICE_TOLERANCE: f64 = PRICE_EPSILON + 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectOptions {
    pub only_open: bool,
    pub distance_enabled: bool,
    /// `0.0` disables the radius filter.
    pub max_distance_km: f64,
}

/// Pick the best candidate, or `None` when every candidate is filtered out.
///
/// Candidates are visited strictly in the given order; `distances` is only
/// consulted when `options.distance_enabled` is set.
pub async fn select<R: ResolveDistance>(
    candidates: &[CandidateReading],
    options: &SelectOptions,
    distances: &mut R,
) -> Option<BestCandidate> {
    let mut best: Option<BestCandidate> = None;

    for candidate in candidates {
        let station_id = candidate.station_id.as_str();

        if options.only_open && candidate.is_open != OpenState::Open {
            tracing::debug!(station_id, state = ?candidate.is_open, "skipped: not open");
            continue;
        }

        let Some(price) = normalize_price(&candidate.raw_price) else {
            tracing::debug!(station_id, raw_price = ?candidate.raw_price, "skipped: unusable price");
            continue;
        };

        let address = extract_address(&candidate.raw_address_block);

        let distance_km = if options.distance_enabled {
            let Some(km) = distances.resolve(station_id, address.as_ref()).await else {
                tracing::debug!(station_id, "skipped: no distance");
                continue;
            };
            if !usable_distance(km) {
                tracing::debug!(station_id, distance_km = km, "skipped: invalid distance");
                continue;
            }
            if options.max_distance_km > 0.0 && km > options.max_distance_km {
                tracing::debug!(
                    station_id,
                    distance_km = km,
                    max_distance_km = options.max_distance_km,
                    "skipped: outside radius"
                );
                continue;
            }
            Some(km)
        } else {
            None
        };

        let replaces = match &best {
            None => true,
            Some(current) => beats(price, distance_km, current, options.distance_enabled),
        };
        if replaces {
            tracing::debug!(station_id, price, distance_km = ?distance_km, "new best candidate");
            best = Some(to_best(candidate, price, distance_km, address));
        }
    }

    best
}

fn usable_distance(km: f64) -> bool {
    km.is_finite() && km > bfp_core::location::MIN_VALID_DISTANCE_KM
}

fn beats(
    price: f64,
    distance_km: Option<f64>,
    current: &BestCandidate,
    distance_enabled: bool,
) -> bool {
    if price < current.price {
        return true;
    }
    if !distance_enabled || (price - current.price).abs() > PRICE_TOLERANCE {
        return false;
    }
    match (distance_km, current.distance_km) {
        (Some(candidate_km), Some(current_km)) => candidate_km < current_km,
        _ => false,
    }
}

fn to_best(
    candidate: &CandidateReading,
    price: f64,
    distance_km: Option<f64>,
    address: Option<Address>,
) -> BestCandidate {
    let display_name = address
        .as_ref()
        .map(|a| a.display_name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(candidate.station_name.as_str())
        .to_string();

    BestCandidate {
        station_id: candidate.station_id.clone(),
        price,
        price_timestamp: candidate.price_timestamp,
        distance_km,
        address,
        display_name,
    }
}

#[cfg(test)]
#[path = "select_test.rs"]
mod tests;
