// The capture layer is process-global and tests run in parallel, so every
// assertion filters on an identifier unique to that test.

use std::sync::Arc;

use pubid_core::logging_facility::test_capture::{init_test_capture, CapturedEvent, TestCapture};
use pubid_core::Document;
use pubid_engine::Resolver;
use pubid_store::MemoryStore;

fn for_identifier(capture: &TestCapture, identifier: &str) -> Vec<CapturedEvent> {
    capture.find(|e| {
        e.op.as_deref() == Some("resolve") && e.field("identifier") == Some(identifier)
    })
}

fn count(events: &[CapturedEvent], event: &str) -> usize {
    events
        .iter()
        .filter(|e| e.event.as_deref() == Some(event))
        .count()
}

fn states(events: &[CapturedEvent]) -> Vec<String> {
    events
        .iter()
        .filter(|e| e.event.as_deref() == Some("transition"))
        .filter_map(|e| e.field("state").map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_probe_hit_logs_one_boundary() {
    let capture = init_test_capture();
    let store = MemoryStore::with_documents([Document::new("event", "event.log00001")]);
    let resolver = Resolver::new(Arc::new(store));

    resolver.resolve("event", "log00001").await.unwrap();

    let events = for_identifier(&capture, "log00001");
    assert_eq!(count(&events, "start"), 1);
    assert_eq!(count(&events, "end"), 1);
    assert_eq!(count(&events, "end_error"), 0);
    assert_eq!(states(&events), vec!["classified", "resolved"]);

    let end = events
        .iter()
        .find(|e| e.event.as_deref() == Some("end"))
        .unwrap();
    assert_eq!(end.field("canonical_key"), Some("event.log00001"));
    assert_eq!(end.field("via"), Some("probe"));
    assert!(end.field("duration_ms").is_some());
}

#[tokio::test]
async fn test_scan_path_logs_every_transition() {
    let capture = init_test_capture();
    let store = MemoryStore::with_documents([Document::new("event", "event.log00002-x")]);
    let resolver = Resolver::new(Arc::new(store));

    resolver.resolve("event", "log00002").await.unwrap();

    let events = for_identifier(&capture, "log00002");
    assert_eq!(
        states(&events),
        vec!["classified", "probed", "scanned", "resolved"]
    );
}

#[tokio::test]
async fn test_not_found_logs_end_error_with_code() {
    let capture = init_test_capture();
    let resolver = Resolver::new(Arc::new(MemoryStore::new()));

    resolver.resolve("event", "log00003").await.unwrap_err();

    let events = for_identifier(&capture, "log00003");
    assert_eq!(count(&events, "start"), 1);
    assert_eq!(count(&events, "end"), 0);
    let errors: Vec<_> = events
        .iter()
        .filter(|e| e.event.as_deref() == Some("end_error"))
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("err_code"), Some("ERR_NOT_FOUND"));
    assert_eq!(states(&events).last().map(String::as_str), Some("not_found"));
}

#[tokio::test]
async fn test_store_outage_logs_store_error_state() {
    let capture = init_test_capture();
    let store = MemoryStore::new();
    store.fail_all(true);
    let resolver = Resolver::new(Arc::new(store));

    resolver.resolve("event", "log00004").await.unwrap_err();

    let events = for_identifier(&capture, "log00004");
    assert_eq!(states(&events), vec!["classified", "store_error"]);
    let err = events
        .iter()
        .find(|e| e.event.as_deref() == Some("end_error"))
        .unwrap();
    assert_eq!(err.field("err_code"), Some("ERR_STORE_UNAVAILABLE"));
}
