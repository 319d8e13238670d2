//! Integration tests for the history store over each storage backend

use chrono::{Duration, TimeZone, Utc};
use rate_gap::comparator::{compare, ComparisonResult};
use rate_gap::history::{export_csv, HistoryStore};
use rate_gap::storage::{FileStore, KeyValueStore, MemoryStore};
use rate_gap::types::{HISTORY_KEY, MAX_HISTORY_ENTRIES};
use tempfile::TempDir;

fn result(krw: f64, usd: f64) -> ComparisonResult {
    compare(Some(krw), Some(usd), Some(1350.0)).unwrap()
}

#[test]
fn test_append_51_keeps_newest_50() {
    let mut store = HistoryStore::new(MemoryStore::new());
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    let mut ids = Vec::new();

    for i in 0..51 {
        let entry = store
            .append_at(
                &result(100_000.0 + i as f64, 80.0),
                "2024-03-01",
                start + Duration::minutes(i),
            )
            .unwrap()
            .unwrap();
        ids.push(entry.id);
    }

    let entries = store.list();
    assert_eq!(entries.len(), MAX_HISTORY_ENTRIES);

    let expected: Vec<&String> = ids.iter().rev().take(50).collect();
    let actual: Vec<&String> = entries.iter().map(|e| &e.id).collect();
    assert_eq!(actual, expected);
    assert!(entries.iter().all(|e| e.id != ids[0]));
}

#[test]
fn test_round_trip_and_remove() {
    let mut store = HistoryStore::new(MemoryStore::new());
    let saved = result(135_000.0, 95.0);
    let entry = store.append(&saved, "2024-01-02").unwrap().unwrap();

    let listed = store.list();
    let found = listed.iter().find(|e| e.id == entry.id).unwrap();
    assert_eq!(found.krw_amount, saved.krw_amount);
    assert_eq!(found.usd_amount, saved.usd_amount);
    assert_eq!(found.effective_rate, saved.effective_rate);
    assert_eq!(found.published_rate, saved.published_rate);
    assert_eq!(found.delta_pct, saved.delta_pct);

    store.remove(&entry.id).unwrap();
    assert!(store.list().iter().all(|e| e.id != entry.id));
}

#[test]
fn test_clear_ten_entries() {
    let mut store = HistoryStore::new(MemoryStore::new());
    for i in 0..10 {
        store.append(&result(135_000.0, 90.0 + i as f64), "").unwrap();
    }
    assert_eq!(store.list().len(), 10);

    store.clear().unwrap();
    assert!(store.list().is_empty());
}

#[test]
fn test_ids_unique() {
    let mut store = HistoryStore::new(MemoryStore::new());
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
    for _ in 0..20 {
        store.append_at(&result(135_000.0, 100.0), "", at).unwrap();
    }

    let mut ids: Vec<String> = store.list().into_iter().map(|e| e.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn test_file_store_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    let id = {
        let mut store = HistoryStore::new(FileStore::open(temp_dir.path()).unwrap());
        store.append(&result(135_000.0, 95.0), "2024-01-02").unwrap().unwrap().id
    };

    let store = HistoryStore::new(FileStore::open(temp_dir.path()).unwrap());
    let entries = store.list();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, id);
    assert_eq!(entries[0].rate_as_of, "2024-01-02");
}

#[test]
fn test_corrupt_file_recovers_empty() {
    let temp_dir = TempDir::new().unwrap();
    let mut backing = FileStore::open(temp_dir.path()).unwrap();
    backing.set(HISTORY_KEY, "[{\"id\": 3").unwrap();

    let mut store = HistoryStore::new(backing);
    assert!(store.list().is_empty());
    assert!(store.load().is_err());

    store.append(&result(135_000.0, 95.0), "").unwrap();
    assert_eq!(store.load().unwrap().len(), 1);
}

#[cfg(feature = "rusqlite-support")]
#[test]
fn test_sqlite_store_survives_restart() {
    use rate_gap::storage::SqliteStore;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.db");

    {
        let mut store = HistoryStore::new(SqliteStore::open(&path).unwrap());
        store.append(&result(135_000.0, 95.0), "2024-01-02").unwrap();
        store.append(&result(135_000.0, 100.0), "2024-01-03").unwrap();
    }

    let store = HistoryStore::new(SqliteStore::open(&path).unwrap());
    let entries = store.list();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].rate_as_of, "2024-01-03");
}

#[test]
fn test_export_after_appends() {
    let mut store = HistoryStore::new(MemoryStore::new());
    store.append(&result(135_000.0, 95.0), "2024-01-02").unwrap();
    store.append(&result(130_000.0, 100.0), "2024-01-02").unwrap();

    let csv = export_csv(&store.list()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with(",lost"));
    assert!(lines[2].ends_with(",gained"));
}
