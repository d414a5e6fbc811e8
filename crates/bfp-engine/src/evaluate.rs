//! Evaluation entry point and the values published from its result.

use bfp_core::{parse_origin, AppConfig, BestCandidate, CandidateReading, FuelKind};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::distance::{DistanceCache, DistanceStore, NoDistance};
use crate::error::{ConfigurationError, EvaluationError};
use crate::provider::MapProvider;
use crate::route::{describe, RouteView};
use crate::select::{select, SelectOptions};

const NO_CANDIDATE_TEXT: &str = "Kein passender Kandidat gefunden";
const INVALID_ORIGIN_ROUTE_HTML: &str =
    r#"<div style="padding:8px">Standort kann nicht gelesen werden.</div>"#;

/// Settings for one evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub only_open: bool,
    /// Fuel whose price the candidates carry. Applied when candidates are
    /// built, recorded here for logging.
    pub fuel: FuelKind,
    pub enable_distance: bool,
    pub max_distance_km: f64,
    pub distance_ttl_secs: u64,
    pub write_distance: bool,
    /// Raw origin source, parsed at the start of every distance-mode run.
    pub origin: Option<String>,
}

impl From<&AppConfig> for EvaluationConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            only_open: config.only_open,
            fuel: config.fuel,
            enable_distance: config.enable_distance,
            max_distance_km: config.max_distance_km,
            distance_ttl_secs: config.distance_ttl_secs,
            write_distance: config.write_distance,
            origin: config.origin.clone(),
        }
    }
}

impl EvaluationConfig {
    fn select_options(&self) -> SelectOptions {
        SelectOptions {
            only_open: self.only_open,
            distance_enabled: self.enable_distance,
            max_distance_km: self.max_distance_km,
        }
    }
}

/// Outcome of a completed evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Winner {
        best: BestCandidate,
        route: RouteView,
    },
    NoCandidate {
        reason: String,
    },
}

/// Run one evaluation over `candidates`.
///
/// With distance mode on, the origin is parsed and the mapping provider
/// checked before any candidate is scored. Distances are resolved through
/// `store`, which is only written when `config.write_distance` is set.
///
/// # Errors
///
/// Returns [`EvaluationError::Configuration`] when distance mode is on and
/// the origin is missing or malformed, or no mapping provider is given.
/// Candidate-level problems never produce an error.
pub async fn evaluate<M, S>(
    candidates: &[CandidateReading],
    config: &EvaluationConfig,
    maps: Option<&M>,
    store: &mut S,
    now: DateTime<Utc>,
) -> Result<Evaluation, EvaluationError>
where
    M: MapProvider,
    S: DistanceStore,
{
    let options = config.select_options();
    tracing::debug!(
        candidates = candidates.len(),
        fuel = %config.fuel,
        only_open = config.only_open,
        enable_distance = config.enable_distance,
        "evaluation started"
    );

    let evaluation = if config.enable_distance {
        let origin = parse_origin(config.origin.as_deref().unwrap_or_default())
            .map_err(ConfigurationError::from)?;
        let maps = maps.ok_or(ConfigurationError::MissingMapProvider)?;
        tracing::debug!(%origin, "origin resolved");

        let mut cache = DistanceCache::new(
            store,
            &origin,
            maps,
            config.distance_ttl_secs,
            config.write_distance,
            now,
        );
        match select(candidates, &options, &mut cache).await {
            Some(best) => {
                let route = best
                    .address
                    .as_ref()
                    .map_or(RouteView::Unavailable, |address| {
                        describe(address, origin, maps)
                    });
                Evaluation::Winner { best, route }
            }
            None => no_candidate(candidates.len()),
        }
    } else {
        match select(candidates, &options, &mut NoDistance).await {
            Some(best) => Evaluation::Winner {
                best,
                route: RouteView::Unavailable,
            },
            None => no_candidate(candidates.len()),
        }
    };

    match &evaluation {
        Evaluation::Winner { best, .. } => tracing::info!(
            station_id = %best.station_id,
            price = best.price,
            distance_km = ?best.distance_km,
            "best candidate selected"
        ),
        Evaluation::NoCandidate { reason } => tracing::info!(reason = %reason, "no candidate selected"),
    }

    Ok(evaluation)
}

fn no_candidate(total: usize) -> Evaluation {
    let reason = if total == 0 {
        "no candidates available".to_string()
    } else {
        format!("none of {total} candidates passed the filters")
    };
    Evaluation::NoCandidate { reason }
}

/// The values a host publishes after a run.
///
/// Every run yields one, so the previous output is always replaced with
/// either a winner or an explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Publication {
    /// Unix seconds of the winning price update; `0` without a winner.
    pub time: i64,
    pub price: f64,
    pub station: String,
    pub distance_km: f64,
    pub route_html: String,
    /// Why no winner was published: the no-candidate reason or the
    /// configuration error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Publication {
    #[must_use]
    pub fn from_evaluation(evaluation: &Evaluation) -> Self {
        match evaluation {
            Evaluation::Winner { best, route } => Self {
                time: best.price_timestamp.timestamp(),
                price: best.price,
                station: best.display_name.clone(),
                distance_km: best.distance_km.unwrap_or(0.0),
                route_html: route.to_html(),
                reason: None,
            },
            Evaluation::NoCandidate { reason } => Self::blank(
                NO_CANDIDATE_TEXT.to_string(),
                RouteView::Unavailable.to_html(),
                reason.clone(),
            ),
        }
    }

    #[must_use]
    pub fn from_error(error: &EvaluationError) -> Self {
        match error {
            EvaluationError::Configuration(ConfigurationError::Origin(e)) => Self::blank(
                format!("Standort ungültig: {e}"),
                INVALID_ORIGIN_ROUTE_HTML.to_string(),
                e.to_string(),
            ),
            EvaluationError::Configuration(e @ ConfigurationError::MissingMapProvider) => {
                Self::blank(
                    format!("Konfiguration unvollständig: {e}"),
                    RouteView::Unavailable.to_html(),
                    e.to_string(),
                )
            }
        }
    }

    fn blank(station: String, route_html: String, reason: String) -> Self {
        Self {
            time: 0,
            price: 0.0,
            station,
            distance_km: 0.0,
            route_html,
            reason: Some(reason),
        }
    }
}

#[cfg(test)]
#[path = "evaluate_test.rs"]
mod tests;
