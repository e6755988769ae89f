// In-memory store used as the resolver's test double.

use pubid_core::{Document, ExErrorKind};
use pubid_store::{DocumentStore, MemoryStore};

#[tokio::test]
async fn test_clones_share_state_and_counters() {
    let store = MemoryStore::new();
    let handle = store.clone();
    handle.insert(Document::new("event", "event.abc12345"));

    assert!(store
        .get_by_key("event", "event.abc12345")
        .await
        .unwrap()
        .is_some());
    assert_eq!(handle.get_calls(), 1);

    handle.reset_counters();
    assert_eq!(store.get_calls(), 0);
}

#[tokio::test]
async fn test_fail_all_reports_backend_error_not_absence() {
    let store = MemoryStore::with_documents([Document::new("event", "event.a")]);
    store.fail_all(true);

    let err = store.get_by_key("event", "event.a").await.unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert!(store.list_keys("event").await.is_err());

    store.fail_all(false);
    assert!(store.get_by_key("event", "missing").await.unwrap().is_none());
}
