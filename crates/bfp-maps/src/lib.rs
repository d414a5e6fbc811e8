//! HTTP client for the mapping provider used to measure driving distances
//! and to build embeddable route views.
//!
//! Speaks the Google Maps Distance Matrix JSON contract and produces Maps
//! Embed `directions` URLs.

pub mod client;
pub mod error;
pub mod types;

mod retry;

pub use client::MapsClient;
pub use error::MapsError;
pub use types::{DistanceMatrixElement, DistanceMatrixResponse, DistanceMatrixRow};
