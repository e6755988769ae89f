// SQLite document store: file persistence, type scoping, listing order.

use pubid_core::{Document, ExErrorKind};
use pubid_store::{DocumentStore, SqliteStore};
use tempfile::TempDir;

fn setup_test_env() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("nested").join("store.db");
    (temp_dir, db_path)
}

#[tokio::test]
async fn test_documents_survive_reopen() {
    let (_temp_dir, db_path) = setup_test_env();

    {
        let store = SqliteStore::open(&db_path).unwrap();
        store
            .upsert(&Document::new("event", "event.abc12345"))
            .unwrap();
        store
            .upsert(&Document::new("event", "drafts.event.xyz98765"))
            .unwrap();
    }

    let store = SqliteStore::open(&db_path).unwrap();
    let keys: Vec<String> = store
        .list_keys("event")
        .await
        .unwrap()
        .into_iter()
        .map(|k| k.key)
        .collect();
    assert_eq!(keys, vec!["event.abc12345", "drafts.event.xyz98765"]);
}

#[tokio::test]
async fn test_list_keys_unknown_type_is_empty() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.upsert(&Document::new("event", "event.a")).unwrap();

    assert!(store.list_keys("listing").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_by_key_is_exact_match() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.upsert(&Document::new("event", "event.abc12345")).unwrap();

    // No prefix or case folding at the store layer.
    assert!(store
        .get_by_key("event", "event.ABC12345")
        .await
        .unwrap()
        .is_none());
    assert!(store
        .get_by_key("event", "event.abc1")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_fields_round_trip_through_payload() {
    let store = SqliteStore::open_in_memory().unwrap();
    let doc = Document::new("service", "service.q1w2e3r4")
        .with_fields(serde_json::json!({"title": "Tyre change", "isActive": true}));
    store.upsert(&doc).unwrap();

    let fetched = store
        .get_by_key("service", "service.q1w2e3r4")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.fields["isActive"], serde_json::json!(true));
}

#[tokio::test]
async fn test_open_existing_missing_file_is_unavailable_and_creates_nothing() {
    let (_temp_dir, db_path) = setup_test_env();

    let err = SqliteStore::open_existing(&db_path).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::StoreUnavailable);
    assert!(!db_path.exists());
    assert!(!db_path.parent().unwrap().exists());
}

#[tokio::test]
async fn test_open_existing_rejects_uninitialised_file() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("empty.db");
    std::fs::write(&db_path, b"").unwrap();

    let err = SqliteStore::open_existing(&db_path).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::StoreUnavailable);
}

#[tokio::test]
async fn test_open_existing_reads_written_documents() {
    let (_temp_dir, db_path) = setup_test_env();
    SqliteStore::open(&db_path)
        .unwrap()
        .upsert(&Document::new("event", "event.abc12345"))
        .unwrap();

    let store = SqliteStore::open_existing(&db_path).unwrap();

    assert!(store
        .get_by_key("event", "event.abc12345")
        .await
        .unwrap()
        .is_some());
    assert_eq!(store.list_keys("event").await.unwrap().len(), 1);
    assert!(store.upsert(&Document::new("event", "event.other")).is_err());
}
