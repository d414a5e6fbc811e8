use thiserror::Error;

/// Errors returned by the mapping provider client.
#[derive(Debug, Error)]
pub enum MapsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The top-level `"status"` of a response was not `OK`.
    #[error("DistanceMatrix status={status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Status {
        status: String,
        message: Option<String>,
    },

    /// The route element for the requested origin/destination pair was not `OK`
    /// (e.g. `NOT_FOUND`, `ZERO_RESULTS`).
    #[error("DistanceMatrix element status={0}")]
    ElementStatus(String),

    /// The response had no `rows[0].elements[0]`.
    #[error("DistanceMatrix response has no route element")]
    MissingElement,

    /// The route element carried no numeric `distance.value`.
    #[error("DistanceMatrix element has no numeric distance.value")]
    MissingDistance,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Destination address was blank.
    #[error("destination address is empty")]
    EmptyDestination,
}
