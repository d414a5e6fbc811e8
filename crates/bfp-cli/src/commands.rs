//! Command handlers called from `main` once configuration is loaded.

use std::path::Path;

use anyhow::Context;
use bfp_core::{parse_origin, AppConfig, RawPrice};
use bfp_engine::{
    evaluate, EvaluationConfig, EvaluationError, JsonFileDistanceStore, MemoryDistanceStore,
    Publication,
};
use bfp_maps::MapsClient;
use chrono::{DateTime, Utc};

/// Load the station file, run one evaluation and print what a host would
/// publish.
///
/// An invalid origin or missing provider still prints the fallback
/// publication before the error is returned.
///
/// # Errors
///
/// Returns an error if the station file or distance store cannot be read,
/// the maps client cannot be built, or the run aborts on configuration.
pub(crate) async fn run_evaluate(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let (publication, failure) = build_publication(config, Utc::now()).await?;
    print_publication(&publication, json)?;

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Run one evaluation and turn its outcome into a [`Publication`].
///
/// The on-disk distance store is only opened for distance runs. A
/// configuration failure is returned next to its fallback publication.
pub(crate) async fn build_publication(
    config: &AppConfig,
    now: DateTime<Utc>,
) -> anyhow::Result<(Publication, Option<EvaluationError>)> {
    let stations = bfp_core::load_stations(&config.stations_path)?;
    let candidates = stations.candidates(config.fuel, now);
    tracing::info!(
        stations = stations.stations.len(),
        candidates = candidates.len(),
        fuel = %config.fuel,
        "stations loaded"
    );

    let maps = match (config.enable_distance, config.maps_api_key.as_deref()) {
        (true, Some(key)) => Some(
            MapsClient::with_base_url(key, config.maps_timeout_secs, &config.maps_base_url)
                .context("failed to build maps client")?
                .with_retries(config.maps_max_retries, 500),
        ),
        _ => None,
    };

    let eval_config = EvaluationConfig::from(config);
    let result = if config.enable_distance {
        let mut store = JsonFileDistanceStore::open(&config.distance_cache_path)?;
        evaluate(&candidates, &eval_config, maps.as_ref(), &mut store, now).await
    } else {
        let mut store = MemoryDistanceStore::new();
        evaluate(&candidates, &eval_config, maps.as_ref(), &mut store, now).await
    };

    Ok(match result {
        Ok(evaluation) => (Publication::from_evaluation(&evaluation), None),
        Err(e) => (Publication::from_error(&e), Some(e)),
    })
}

/// Print the address extracted from a markup file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no address.
pub(crate) fn run_address(path: &Path) -> anyhow::Result<()> {
    let markup = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let address = bfp_scraper::extract_address(&markup)
        .with_context(|| format!("no address found in {}", path.display()))?;

    println!("{}", serde_json::to_string_pretty(&address)?);
    println!("destination: {}", address.destination());
    Ok(())
}

/// Validate an origin value and print the parsed coordinates.
///
/// # Errors
///
/// Returns an error if the value is missing or malformed.
pub(crate) fn run_origin(value: Option<&str>) -> anyhow::Result<()> {
    let origin = parse_origin(value.unwrap_or_default())?;
    println!("lat={} lng={}", origin.lat, origin.lng);
    Ok(())
}

/// Normalize a raw price and print it.
///
/// # Errors
///
/// Returns an error if the text does not yield a positive price.
pub(crate) fn run_price(raw: &str) -> anyhow::Result<()> {
    let price = bfp_scraper::normalize_price(&RawPrice::from(raw))
        .ok_or_else(|| anyhow::anyhow!("'{raw}' is not a usable price"))?;
    println!("{}", format_price(price));
    Ok(())
}

fn print_publication(publication: &Publication, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(publication)?);
        return Ok(());
    }

    println!("station:  {}", publication.station);
    println!("price:    {}", format_price(publication.price));
    println!("updated:  {}", format_time(publication.time));
    println!("distance: {}", format_distance(publication.distance_km));
    println!("route:    {}", publication.route_html);
    if let Some(reason) = &publication.reason {
        println!("reason:   {reason}");
    }
    Ok(())
}

pub(crate) fn format_price(price: f64) -> String {
    format!("{price:.3} €/l")
}

pub(crate) fn format_distance(km: f64) -> String {
    format!("{km:.2} km")
}

/// RFC 3339 time of a unix timestamp; `"—"` for `0`.
pub(crate) fn format_time(unix_secs: i64) -> String {
    if unix_secs == 0 {
        return "\u{2014}".to_string();
    }
    DateTime::<Utc>::from_timestamp(unix_secs, 0)
        .map_or_else(|| "\u{2014}".to_string(), |t| t.to_rfc3339())
}
