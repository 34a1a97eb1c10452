use bijou_core::db::{open_db, open_db_in_memory};
use bijou_core::{
    AccessoryDraft, Category, MemoryStorage, SqliteStorage, StorageAdapter, StorageError,
    StorageResult, Wardrobe, CATALOGUE_KEY, SCHEDULE_KEY,
};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const IMAGE_BLOB: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAAB";

fn day(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
}

#[test]
fn sqlite_store_survives_reopen_bit_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bijou.db");

    let original = {
        let storage = SqliteStorage::try_new(open_db(&path).unwrap()).unwrap();
        let mut wardrobe = Wardrobe::open(Box::new(storage));

        let mut pearl = AccessoryDraft::new("Pearl necklace", IMAGE_BLOB);
        pearl.category = Some(Category::Necklace);
        pearl.notes = "from the flea market".to_string();
        let record = wardrobe.add(pearl).unwrap();
        wardrobe.toggle_favorite(record.id);
        wardrobe.toggle_schedule(day("2024-05-01"), record.id);
        wardrobe.flush().unwrap();

        wardrobe.records().to_vec()
    };

    let storage = SqliteStorage::try_new(open_db(&path).unwrap()).unwrap();
    let reopened = Wardrobe::open(Box::new(storage));

    assert_eq!(reopened.records(), original.as_slice());
    assert_eq!(reopened.records()[0].image, IMAGE_BLOB);
    assert!(reopened.is_scheduled(day("2024-05-01"), original[0].id));
}

#[test]
fn json_round_trip_is_bit_identical_for_both_collections() {
    let mut wardrobe = Wardrobe::open(Box::new(MemoryStorage::new()));
    let record = wardrobe
        .add(AccessoryDraft::new("studs", IMAGE_BLOB))
        .unwrap();
    wardrobe.toggle_schedule(day("2024-05-01"), record.id);
    wardrobe.toggle_schedule(day("2024-06-02"), record.id);

    let catalogue = serde_json::to_string(wardrobe.records()).unwrap();
    let schedule = serde_json::to_string(wardrobe.schedule()).unwrap();

    let mut storage = MemoryStorage::new();
    storage.insert(CATALOGUE_KEY, catalogue.clone());
    storage.insert(SCHEDULE_KEY, schedule.clone());
    let restored = Wardrobe::open(Box::new(storage));

    assert_eq!(restored.records(), wardrobe.records());
    assert_eq!(restored.schedule(), wardrobe.schedule());
    assert_eq!(
        serde_json::to_string(restored.records()).unwrap(),
        catalogue
    );
    assert_eq!(serde_json::to_string(restored.schedule()).unwrap(), schedule);
}

#[test]
fn malformed_stored_values_fall_back_to_empty() {
    let mut storage = MemoryStorage::new();
    storage.insert(CATALOGUE_KEY, "{not json");
    storage.insert(SCHEDULE_KEY, "[\"wrong shape\"]");

    let wardrobe = Wardrobe::open(Box::new(storage));
    assert_eq!(wardrobe.records().len(), 0);
    assert!(wardrobe.schedule().is_empty());
}

#[test]
fn absent_keys_initialize_empty() {
    let wardrobe = Wardrobe::open(Box::new(MemoryStorage::new()));
    assert_eq!(wardrobe.records().len(), 0);
    assert!(wardrobe.schedule().is_empty());
}

#[test]
fn save_failures_are_swallowed_and_reported_to_the_hook() {
    struct FailingStorage;

    impl StorageAdapter for FailingStorage {
        fn load(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn save(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }
    }

    let failures = Arc::new(AtomicUsize::new(0));
    let observed = Arc::clone(&failures);

    let mut wardrobe = Wardrobe::open(Box::new(FailingStorage));
    wardrobe.set_persist_error_hook(Box::new(move |_err| {
        observed.fetch_add(1, Ordering::SeqCst);
    }));

    // The mutation itself succeeds; in-memory state stays authoritative.
    let record = wardrobe
        .add(AccessoryDraft::new("pearls", IMAGE_BLOB))
        .unwrap();
    assert_eq!(wardrobe.records().len(), 1);
    assert_eq!(failures.load(Ordering::SeqCst), 1);

    wardrobe.toggle_schedule(day("2024-05-01"), record.id);
    assert!(wardrobe.is_scheduled(day("2024-05-01"), record.id));
    assert_eq!(failures.load(Ordering::SeqCst), 2);

    // The explicit flush does surface the failure.
    assert!(wardrobe.flush().is_err());
}

#[test]
fn sqlite_storage_rejects_unmigrated_connections() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let err = SqliteStorage::try_new(conn).unwrap_err();
    assert!(matches!(
        err,
        StorageError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn sqlite_storage_upserts_values() {
    let mut storage = SqliteStorage::try_new(open_db_in_memory().unwrap()).unwrap();

    assert_eq!(storage.load("missing").unwrap(), None);
    storage.save("k", "v1").unwrap();
    storage.save("k", "v2").unwrap();
    assert_eq!(storage.load("k").unwrap().as_deref(), Some("v2"));
}
