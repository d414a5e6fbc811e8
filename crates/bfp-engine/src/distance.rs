//! Per-station distance cache with time-to-live staleness.
//!
//! Records live in a [`DistanceStore`]; [`DistanceCache`] decides when a
//! stored distance can be reused and when the mapping provider must be asked
//! again. Provider failures never fall back to a stale value.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};

use bfp_core::{Address, DistanceRecord};
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::provider::{MapProvider, OriginProvider};

/// Key-value storage of distance records, keyed by station id.
pub trait DistanceStore {
    fn get(&self, station_id: &str) -> Option<DistanceRecord>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be persisted.
    fn put(&mut self, station_id: &str, record: DistanceRecord) -> Result<(), StoreError>;
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryDistanceStore {
    records: HashMap<String, DistanceRecord>,
}

impl MemoryDistanceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DistanceStore for MemoryDistanceStore {
    fn get(&self, station_id: &str) -> Option<DistanceRecord> {
        self.records.get(station_id).cloned()
    }

    fn put(&mut self, station_id: &str, record: DistanceRecord) -> Result<(), StoreError> {
        self.records.insert(station_id.to_string(), record);
        Ok(())
    }
}

/// Store backed by a pretty-printed JSON object on disk.
///
/// The file is read once on [`JsonFileDistanceStore::open`] and rewritten in
/// full on every [`DistanceStore::put`].
#[derive(Debug)]
pub struct JsonFileDistanceStore {
    path: PathBuf,
    records: BTreeMap<String, DistanceRecord>,
}

impl JsonFileDistanceStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if an existing file cannot be read and
    /// [`StoreError::Json`] if it does not hold a map of records.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| StoreError::Json {
                path: path.display().to_string(),
                source: e,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };
        Ok(Self { path, records })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        let io_err = |e| StoreError::Io {
            path: self.path.display().to_string(),
            source: e,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.records).map_err(|e| StoreError::Json {
            path: self.path.display().to_string(),
            source: e,
        })?;
        std::fs::write(&self.path, json).map_err(io_err)
    }
}

impl DistanceStore for JsonFileDistanceStore {
    fn get(&self, station_id: &str) -> Option<DistanceRecord> {
        self.records.get(station_id).cloned()
    }

    fn put(&mut self, station_id: &str, record: DistanceRecord) -> Result<(), StoreError> {
        self.records.insert(station_id.to_string(), record);
        self.save()
    }
}

/// Anything that can turn a station into a distance for the selector.
pub trait ResolveDistance {
    fn resolve(
        &mut self,
        station_id: &str,
        address: Option<&Address>,
    ) -> impl Future<Output = Option<f64>>;
}

/// Resolver for runs with distance mode off. Always yields `None`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDistance;

impl ResolveDistance for NoDistance {
    async fn resolve(&mut self, _station_id: &str, _address: Option<&Address>) -> Option<f64> {
        None
    }
}

/// Distance resolution for one evaluation run.
pub struct DistanceCache<'a, S, O, M> {
    store: &'a mut S,
    origin: &'a O,
    maps: &'a M,
    ttl_seconds: u64,
    persist: bool,
    now: DateTime<Utc>,
}

impl<'a, S, O, M> DistanceCache<'a, S, O, M>
where
    S: DistanceStore,
    O: OriginProvider,
    M: MapProvider,
{
    /// `persist = false` leaves the store untouched even after a successful
    /// recomputation.
    pub fn new(
        store: &'a mut S,
        origin: &'a O,
        maps: &'a M,
        ttl_seconds: u64,
        persist: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            store,
            origin,
            maps,
            ttl_seconds,
            persist,
            now,
        }
    }

    /// Distance in kilometers from the origin to the station.
    ///
    /// A fresh, valid stored record is returned without calling any
    /// provider. Otherwise the distance is recomputed from `address`; a
    /// missing address or any provider failure yields `None` and leaves the
    /// store unchanged.
    pub async fn resolve_distance(
        &mut self,
        station_id: &str,
        address: Option<&Address>,
    ) -> Option<f64> {
        let mut record = self
            .store
            .get(station_id)
            .unwrap_or_else(|| DistanceRecord::empty(station_id, self.ttl_seconds));
        record.ttl_seconds = self.ttl_seconds;

        if !record.needs_refresh(self.now) {
            tracing::debug!(station_id, distance_km = ?record.distance_km, "cached distance reused");
            return record.valid_distance();
        }

        let Some(address) = address else {
            tracing::debug!(station_id, "no address extracted, distance unresolved");
            return None;
        };

        let origin = match self.origin.origin() {
            Ok(origin) => origin,
            Err(e) => {
                tracing::warn!(station_id, error = %e, "origin unavailable");
                return None;
            }
        };

        let destination = address.destination();
        let distance_km = match self.maps.distance_km(origin, &destination).await {
            Ok(km) => km,
            Err(e) => {
                tracing::warn!(station_id, destination = %destination, error = %e, "distance lookup failed");
                return None;
            }
        };
        tracing::debug!(station_id, distance_km, "distance recomputed");

        if self.persist {
            record.distance_km = Some(distance_km);
            record.last_computed_at = Some(self.now);
            if let Err(e) = self.store.put(station_id, record) {
                tracing::warn!(station_id, error = %e, "failed to persist distance");
            }
        }

        Some(distance_km)
    }
}

impl<S, O, M> ResolveDistance for DistanceCache<'_, S, O, M>
where
    S: DistanceStore,
    O: OriginProvider,
    M: MapProvider,
{
    fn resolve(
        &mut self,
        station_id: &str,
        address: Option<&Address>,
    ) -> impl Future<Output = Option<f64>> {
        self.resolve_distance(station_id, address)
    }
}

#[cfg(test)]
#[path = "distance_test.rs"]
mod tests;
