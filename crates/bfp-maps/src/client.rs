//! HTTP client for the mapping provider.
//!
//! Wraps `reqwest` with provider status handling and typed response
//! deserialization. Every Distance Matrix call checks both the top-level
//! `"status"` and the status of the single route element.

use std::time::Duration;

use bfp_core::Origin;
use reqwest::{Client, Url};

use crate::error::MapsError;
use crate::retry::retry_with_backoff;
use crate::types::DistanceMatrixResponse;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/";
const DEFAULT_EMBED_BASE_URL: &str = "https://www.google.com/";
const DISTANCE_MATRIX_PATH: &str = "maps/api/distancematrix/json";
const EMBED_DIRECTIONS_PATH: &str = "maps/embed/v1/directions";

/// Route options sent with every request: drive, avoid ferries and tolls.
const TRAVEL_MODE: &str = "driving";
const AVOID: &str = "ferries|tolls";

const DEFAULT_BACKOFF_BASE_MS: u64 = 500;

/// Client for the Distance Matrix and Maps Embed APIs.
///
/// Use [`MapsClient::new`] for production or [`MapsClient::with_base_url`]
/// to point at a mock server in tests.
pub struct MapsClient {
    client: Client,
    api_key: String,
    base_url: Url,
    embed_base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl MapsClient {
    /// Creates a new client pointed at the production provider.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, MapsError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom API base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MapsError::InvalidBaseUrl`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("bfp/0.1 (best-fuel-price)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: normalise_base_url(base_url)?,
            embed_base_url: normalise_base_url(DEFAULT_EMBED_BASE_URL)?,
            max_retries: 0,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Retry transient failures up to `max_retries` times.
    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Driving distance in kilometers from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// - [`MapsError::EmptyDestination`] if `destination` is blank.
    /// - [`MapsError::Status`] / [`MapsError::ElementStatus`] for non-OK
    ///   provider statuses.
    /// - [`MapsError::MissingElement`] / [`MapsError::MissingDistance`] when
    ///   the response lacks the route element or its numeric distance.
    /// - [`MapsError::Http`] on network failure or non-2xx HTTP status.
    /// - [`MapsError::Deserialize`] if the body does not match the expected shape.
    pub async fn distance_km(&self, origin: Origin, destination: &str) -> Result<f64, MapsError> {
        let destination = checked_destination(destination)?;
        let url = self.distance_matrix_url(origin, destination)?;

        let response = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.request_matrix(&url)
        })
        .await?;

        let element = response.first_element().ok_or(MapsError::MissingElement)?;
        if element.status != "OK" {
            return Err(MapsError::ElementStatus(element.status.clone()));
        }
        let meters = element
            .distance
            .as_ref()
            .and_then(crate::types::Measure::numeric_value)
            .ok_or(MapsError::MissingDistance)?;

        let km = meters / 1000.0;
        tracing::debug!(%origin, destination, distance_km = km, "distance matrix lookup");
        Ok(km)
    }

    /// Embeddable directions URL from `origin` to `destination`.
    ///
    /// Built locally; no request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`MapsError::EmptyDestination`] if `destination` is blank.
    pub fn embed_route_url(&self, origin: Origin, destination: &str) -> Result<Url, MapsError> {
        let destination = checked_destination(destination)?;
        let origin = origin.to_string();
        build_url(
            &self.embed_base_url,
            EMBED_DIRECTIONS_PATH,
            &[
                ("key", self.api_key.as_str()),
                ("origin", origin.as_str()),
                ("destination", destination),
                ("mode", TRAVEL_MODE),
                ("avoid", AVOID),
            ],
        )
    }

    fn distance_matrix_url(&self, origin: Origin, destination: &str) -> Result<Url, MapsError> {
        let origin = origin.to_string();
        build_url(
            &self.base_url,
            DISTANCE_MATRIX_PATH,
            &[
                ("origins", origin.as_str()),
                ("destinations", destination),
                ("mode", TRAVEL_MODE),
                ("avoid", AVOID),
                ("units", "metric"),
                ("key", self.api_key.as_str()),
            ],
        )
    }

    /// Sends a GET request, asserts a 2xx HTTP status, parses the body and
    /// checks the top-level provider status.
    async fn request_matrix(&self, url: &Url) -> Result<DistanceMatrixResponse, MapsError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let parsed: DistanceMatrixResponse =
            serde_json::from_str(&body).map_err(|e| MapsError::Deserialize {
                context: DISTANCE_MATRIX_PATH.to_string(),
                source: e,
            })?;

        if parsed.status != "OK" {
            return Err(MapsError::Status {
                status: parsed.status,
                message: parsed.error_message,
            });
        }
        Ok(parsed)
    }
}

/// Ensures the base URL ends with exactly one slash so relative paths join
/// below it instead of replacing its last segment.
fn normalise_base_url(base_url: &str) -> Result<Url, MapsError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| MapsError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

fn build_url(base: &Url, path: &str, params: &[(&str, &str)]) -> Result<Url, MapsError> {
    let mut url = base.join(path).map_err(|e| MapsError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })?;
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}

fn checked_destination(destination: &str) -> Result<&str, MapsError> {
    let trimmed = destination.trim();
    if trimmed.is_empty() || trimmed == "," {
        return Err(MapsError::EmptyDestination);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> MapsClient {
        MapsClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    const ORIGIN: Origin = Origin {
        lat: 53.6,
        lng: 10.0,
    };

    #[test]
    fn distance_matrix_url_has_expected_query() {
        let client = test_client("https://maps.example.com");
        let url = client
            .distance_matrix_url(ORIGIN, "Hauptstr. 1 , 22041 Hamburg")
            .unwrap();
        assert_eq!(url.path(), "/maps/api/distancematrix/json");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("origins".into(), "53.6,10".into())));
        assert!(pairs.contains(&("destinations".into(), "Hauptstr. 1 , 22041 Hamburg".into())));
        assert!(pairs.contains(&("avoid".into(), "ferries|tolls".into())));
        assert!(pairs.contains(&("mode".into(), "driving".into())));
        assert!(pairs.contains(&("key".into(), "test-key".into())));
    }

    #[test]
    fn base_url_with_path_keeps_its_prefix() {
        let client = test_client("http://127.0.0.1:9999/proxy/");
        let url = client.distance_matrix_url(ORIGIN, "x").unwrap();
        assert_eq!(url.path(), "/proxy/maps/api/distancematrix/json");
    }

    #[test]
    fn embed_url_points_at_directions_endpoint() {
        let client = test_client("https://maps.example.com");
        let url = client.embed_route_url(ORIGIN, "Ring 2 , 10115 Berlin").unwrap();
        assert!(url
            .as_str()
            .starts_with("https://www.google.com/maps/embed/v1/directions?"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("origin".into(), "53.6,10".into())));
        assert!(pairs.contains(&("destination".into(), "Ring 2 , 10115 Berlin".into())));
    }

    #[test]
    fn embed_url_rejects_bare_comma_destination() {
        let client = test_client("https://maps.example.com");
        assert!(matches!(
            client.embed_route_url(ORIGIN, " , "),
            Err(MapsError::EmptyDestination)
        ));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = MapsClient::with_base_url("k", 5, "not a url");
        assert!(matches!(result, Err(MapsError::InvalidBaseUrl { .. })));
    }
}
