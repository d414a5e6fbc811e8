use bfp_core::OriginError;
use thiserror::Error;

/// Failure that aborts a whole evaluation before any candidate is scored.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("invalid origin: {0}")]
    Origin(#[from] OriginError),

    #[error("distance mode is enabled but no mapping provider is configured")]
    MissingMapProvider,
}

/// Errors from reading or writing the persisted distance records.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("distance store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("distance store JSON error at {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
