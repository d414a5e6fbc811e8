//! Retry with exponential back-off and jitter for mapping provider calls.
//!
//! This is the provider's own retry policy. Callers above the client (the
//! distance cache) never retry on their own.

use std::future::Future;
use std::time::Duration;

use crate::error::MapsError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection reset.
/// - HTTP 5xx responses.
/// - Provider status `UNKNOWN_ERROR`, which the provider documents as
///   "may succeed if you try again".
///
/// Everything else (quota, denied requests, unknown addresses, malformed
/// bodies) is returned immediately.
pub(crate) fn is_retriable(err: &MapsError) -> bool {
    match err {
        MapsError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        MapsError::Status { status, .. } => status == "UNKNOWN_ERROR",
        MapsError::ElementStatus(_)
        | MapsError::MissingElement
        | MapsError::MissingDistance
        | MapsError::Deserialize { .. }
        | MapsError::InvalidBaseUrl { .. }
        | MapsError::EmptyDestination => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The delay before retry `n` is `backoff_base_ms × 2ⁿ⁻¹ ± 25 %`, capped at 30 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, MapsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MapsError>>,
{
    const MAX_DELAY_MS: u64 = 30_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "maps provider transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
