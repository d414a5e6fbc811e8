//! Collaborator seams consumed by the engine.

use std::fmt::Display;
use std::future::Future;

use bfp_core::{Origin, OriginError};
use bfp_maps::{MapsClient, MapsError};

/// Supplies the reference location distances are measured from.
pub trait OriginProvider {
    /// # Errors
    ///
    /// Returns [`OriginError`] when no usable origin is available.
    fn origin(&self) -> Result<Origin, OriginError>;
}

/// An already-parsed origin is its own provider.
impl OriginProvider for Origin {
    fn origin(&self) -> Result<Origin, OriginError> {
        Ok(*self)
    }
}

/// Distance and route lookups against a mapping service.
pub trait MapProvider {
    type Error: Display;

    /// Driving distance in kilometers.
    fn distance_km(
        &self,
        origin: Origin,
        destination: &str,
    ) -> impl Future<Output = Result<f64, Self::Error>>;

    /// URL of an embeddable route map.
    ///
    /// # Errors
    ///
    /// Returns the provider's error when the URL cannot be built.
    fn embed_route_url(&self, origin: Origin, destination: &str) -> Result<String, Self::Error>;
}

impl MapProvider for MapsClient {
    type Error = MapsError;

    fn distance_km(
        &self,
        origin: Origin,
        destination: &str,
    ) -> impl Future<Output = Result<f64, MapsError>> {
        MapsClient::distance_km(self, origin, destination)
    }

    fn embed_route_url(&self, origin: Origin, destination: &str) -> Result<String, MapsError> {
        MapsClient::embed_route_url(self, origin, destination).map(String::from)
    }
}
