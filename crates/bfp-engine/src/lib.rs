//! Evaluation engine: distance caching, best-candidate selection and route
//! description on top of the core domain types.

pub mod distance;
pub mod error;
pub mod evaluate;
pub mod provider;
pub mod route;
pub mod select;

#[cfg(test)]
mod test_support;

pub use distance::{
    DistanceCache, DistanceStore, JsonFileDistanceStore, MemoryDistanceStore, NoDistance,
    ResolveDistance,
};
pub use error::{ConfigurationError, EvaluationError, StoreError};
pub use evaluate::{evaluate, Evaluation, EvaluationConfig, Publication};
pub use provider::{MapProvider, OriginProvider};
pub use route::{describe, RouteView};
pub use select::{select, SelectOptions, PRICE_EPSILON};
