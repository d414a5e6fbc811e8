use chrono::Duration;

use super::*;
use crate::test_support::{address, fixed_now, BrokenOrigin, FakeMaps, ORIGIN};

const DEST: &str = "Weg 1 , 22041 Hamburg";

fn stored(distance_km: Option<f64>, age_secs: i64, ttl_seconds: u64) -> DistanceRecord {
    DistanceRecord {
        station_id: "s1".to_string(),
        distance_km,
        last_computed_at: Some(fixed_now() - Duration::seconds(age_secs)),
        ttl_seconds,
    }
}

fn store_with(record: DistanceRecord) -> MemoryDistanceStore {
    let mut store = MemoryDistanceStore::new();
    store.put("s1", record).unwrap();
    store
}

#[tokio::test]
async fn fresh_record_is_reused_without_provider_call() {
    let mut store = store_with(stored(Some(3.5), 599, 600));
    let maps = FakeMaps::new().with_distance(DEST, 9.9);
    let addr = address("Weg 1", "22041 Hamburg");

    let mut cache = DistanceCache::new(&mut store, &ORIGIN, &maps, 600, true, fixed_now());
    let km = cache.resolve_distance("s1", Some(&addr)).await;

    assert_eq!(km, Some(3.5));
    assert_eq!(maps.calls(), 0);
}

#[tokio::test]
async fn stale_record_is_recomputed_and_persisted() {
    let mut store = store_with(stored(Some(3.5), 601, 600));
    let maps = FakeMaps::new().with_distance(DEST, 4.25);
    let addr = address("Weg 1", "22041 Hamburg");

    let mut cache = DistanceCache::new(&mut store, &ORIGIN, &maps, 600, true, fixed_now());
    let km = cache.resolve_distance("s1", Some(&addr)).await;

    assert_eq!(km, Some(4.25));
    assert_eq!(maps.calls(), 1);
    let record = store.get("s1").unwrap();
    assert_eq!(record.distance_km, Some(4.25));
    assert_eq!(record.last_computed_at, Some(fixed_now()));
}

#[tokio::test]
async fn zero_ttl_always_recomputes() {
    let mut store = store_with(stored(Some(3.5), 1, 0));
    let maps = FakeMaps::new().with_distance(DEST, 3.6);
    let addr = address("Weg 1", "22041 Hamburg");

    let mut cache = DistanceCache::new(&mut store, &ORIGIN, &maps, 0, true, fixed_now());
    assert_eq!(cache.resolve_distance("s1", Some(&addr)).await, Some(3.6));
    assert_eq!(cache.resolve_distance("s1", Some(&addr)).await, Some(3.6));
    assert_eq!(maps.calls(), 2);
}

#[tokio::test]
async fn unknown_station_is_computed_on_first_lookup() {
    let mut store = MemoryDistanceStore::new();
    let maps = FakeMaps::new().with_distance(DEST, 2.0);
    let addr = address("Weg 1", "22041 Hamburg");

    let mut cache = DistanceCache::new(&mut store, &ORIGIN, &maps, 600, true, fixed_now());
    assert_eq!(cache.resolve_distance("s1", Some(&addr)).await, Some(2.0));
    // Second lookup within the TTL hits the store.
    assert_eq!(cache.resolve_distance("s1", Some(&addr)).await, Some(2.0));
    assert_eq!(maps.calls(), 1);
}

#[tokio::test]
async fn fresh_but_invalid_distance_forces_recompute() {
    let mut store = store_with(stored(Some(0.0005), 10, 600));
    let maps = FakeMaps::new().with_distance(DEST, 1.2);
    let addr = address("Weg 1", "22041 Hamburg");

    let mut cache = DistanceCache::new(&mut store, &ORIGIN, &maps, 600, true, fixed_now());
    assert_eq!(cache.resolve_distance("s1", Some(&addr)).await, Some(1.2));
    assert_eq!(maps.calls(), 1);
}

#[tokio::test]
async fn provider_failure_does_not_reuse_stale_value() {
    let mut store = store_with(stored(Some(3.5), 601, 600));
    let maps = FakeMaps::new();
    let addr = address("Weg 1", "22041 Hamburg");

    let mut cache = DistanceCache::new(&mut store, &ORIGIN, &maps, 600, true, fixed_now());
    assert_eq!(cache.resolve_distance("s1", Some(&addr)).await, None);
    assert_eq!(maps.calls(), 1);
    assert_eq!(store.get("s1"), Some(stored(Some(3.5), 601, 600)));
}

#[tokio::test]
async fn missing_address_leaves_store_untouched() {
    let mut store = MemoryDistanceStore::new();
    let maps = FakeMaps::new().with_distance(DEST, 2.0);

    let mut cache = DistanceCache::new(&mut store, &ORIGIN, &maps, 600, true, fixed_now());
    assert_eq!(cache.resolve_distance("s1", None).await, None);
    assert_eq!(maps.calls(), 0);
    assert!(store.is_empty());
}

#[tokio::test]
async fn origin_failure_skips_distance_lookup() {
    let mut store = MemoryDistanceStore::new();
    let maps = FakeMaps::new().with_distance(DEST, 2.0);
    let addr = address("Weg 1", "22041 Hamburg");

    let mut cache = DistanceCache::new(&mut store, &BrokenOrigin, &maps, 600, true, fixed_now());
    assert_eq!(cache.resolve_distance("s1", Some(&addr)).await, None);
    assert_eq!(maps.calls(), 0);
}

#[tokio::test]
async fn write_back_disabled_returns_value_without_persisting() {
    let mut store = MemoryDistanceStore::new();
    let maps = FakeMaps::new().with_distance(DEST, 2.0);
    let addr = address("Weg 1", "22041 Hamburg");

    let mut cache = DistanceCache::new(&mut store, &ORIGIN, &maps, 600, false, fixed_now());
    assert_eq!(cache.resolve_distance("s1", Some(&addr)).await, Some(2.0));
    assert!(store.is_empty());
}

#[tokio::test]
async fn no_distance_resolver_yields_none() {
    let addr = address("Weg 1", "22041 Hamburg");
    assert_eq!(NoDistance.resolve("s1", Some(&addr)).await, None);
}

#[test]
fn json_store_starts_empty_when_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileDistanceStore::open(dir.path().join("distances.json")).unwrap();
    assert!(store.get("s1").is_none());
}

#[test]
fn json_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("distances.json");

    let mut store = JsonFileDistanceStore::open(&path).unwrap();
    store.put("s1", stored(Some(4.2), 30, 600)).unwrap();
    assert!(path.exists());

    let reopened = JsonFileDistanceStore::open(&path).unwrap();
    assert_eq!(reopened.get("s1"), Some(stored(Some(4.2), 30, 600)));
    assert_eq!(reopened.path(), path.as_path());
}

#[test]
fn json_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("distances.json");
    std::fs::write(&path, "not json").unwrap();

    let err = JsonFileDistanceStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Json { .. }));
}
