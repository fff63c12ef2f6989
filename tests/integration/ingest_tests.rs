use chrono::{Duration, TimeZone, Utc};
use orderwatch_api::demo::DEMO_REFERENCE;
use orderwatch_api::{DemoSource, OrderSource};
use orderwatch_core::model::{RegistrationOrderDetails, RegistrationTask};
use orderwatch_core::{compare, DiffField, Order, OrderDetails, OrderSnapshot, RETENTION_LIMIT};
use orderwatch_store::{ingest_snapshots, HistoryStore, OrderStore};

fn make_store() -> (tempfile::TempDir, OrderStore) {
    let tmp = tempfile::tempdir().unwrap();
    let store = OrderStore::open(tmp.path()).unwrap();
    (tmp, store)
}

fn order(reference: &str, status: &str, vin: Option<&str>) -> OrderSnapshot {
    OrderSnapshot::new(
        Order {
            reference_number: reference.to_string(),
            order_status: status.to_string(),
            vin: vin.map(str::to_string),
            ..Order::default()
        },
        OrderDetails::default(),
    )
}

// === Test 1: booked order gets its VIN and is delivered ===
#[test]
fn test_booked_to_delivered_scenario() {
    let (_tmp, store) = make_store();
    let history = store.history();

    let first = history.append_snapshot(order("RN1", "BOOKED", None)).unwrap();
    assert!(first.is_empty());

    let diffs = history
        .append_snapshot(order("RN1", "DELIVERED", Some("5YJ3E1EA7KF000001")))
        .unwrap();
    assert_eq!(diffs.len(), 2);
    assert_eq!(diffs[0].field, "Order Status");
    assert_eq!(diffs[0].old_value, "BOOKED");
    assert_eq!(diffs[0].new_value, "DELIVERED");
    assert_eq!(diffs[1].field, "VIN");
    assert_eq!(diffs[1].old_value, "N/A");
    assert_eq!(diffs[1].new_value, "5YJ3E1EA7KF000001");

    let stored = history.load_history("RN1").unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(
        history.latest_snapshot("RN1").unwrap().unwrap().data.status(),
        "DELIVERED"
    );
}

// === Test 2: unknown orders have no latest snapshot ===
#[test]
fn test_latest_snapshot_of_unknown_order() {
    let (_tmp, store) = make_store();
    assert!(store.history().latest_snapshot("RN404").unwrap().is_none());
    assert!(store.history().load_history("RN404").unwrap().is_empty());
}

// === Test 3: ingesting the same data twice records it once ===
#[tokio::test]
async fn test_demo_ingest_is_idempotent() {
    let (_tmp, store) = make_store();
    let demo = DemoSource::new();

    let first = ingest_snapshots(&store.history(), demo.fetch_all().await.unwrap());
    assert_eq!(first.len(), 1);
    assert!(first[0].outcome.is_ok());
    assert!(first[0].diffs().is_empty());

    let record = store
        .layout()
        .history_dir()
        .join(format!("{DEMO_REFERENCE}.json"));
    let before = std::fs::read(&record).unwrap();

    let second = ingest_snapshots(&store.history(), demo.fetch_all().await.unwrap());
    assert!(second[0].diffs().is_empty());
    assert_eq!(std::fs::read(&record).unwrap(), before);
    assert_eq!(store.history().load_history(DEMO_REFERENCE).unwrap().len(), 1);
}

// === Test 4: a stored snapshot compares equal to the fetched one ===
#[tokio::test]
async fn test_stored_snapshot_matches_fetched() {
    let (_tmp, store) = make_store();
    let demo = DemoSource::new();
    let fetched = demo.fetch_all().await.unwrap().remove(0);
    store.history().append_snapshot(fetched.clone()).unwrap();

    let stored = store
        .history()
        .latest_snapshot(DEMO_REFERENCE)
        .unwrap()
        .unwrap();
    assert!(compare(&stored.data, &fetched).is_empty());
    for field in DiffField::ALL {
        assert_eq!(field.display_value(&stored.data), field.display_value(&fetched));
    }
    // raw task payloads are display-only and not persisted
    assert!(stored.data.details.raw_tasks.is_empty());
}

// === Test 5: retention keeps the newest snapshots in order ===
#[test]
fn test_retention_over_many_changes() {
    let (_tmp, store) = make_store();
    let history = store.history();
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    for i in 0..25 {
        let snapshot = order("RN1", &format!("STATUS_{i}"), None);
        history
            .append_snapshot_at(snapshot, start + Duration::hours(i))
            .unwrap();
    }

    let stored = history.load_history("RN1").unwrap();
    assert_eq!(stored.len(), RETENTION_LIMIT);
    assert_eq!(stored.snapshots[0].data.status(), "STATUS_5");
    assert_eq!(stored.latest().unwrap().data.status(), "STATUS_24");
    assert!(stored
        .snapshots
        .windows(2)
        .all(|pair| pair[0].timestamp < pair[1].timestamp));
}

// === Test 6: detail-only changes are detected ===
#[test]
fn test_registration_details_change() {
    let (_tmp, store) = make_store();
    let history = store.history();
    let with_location = |location: &str| {
        let mut snapshot = order("RN7", "BOOKED", None);
        snapshot.details.tasks.registration = Some(RegistrationTask {
            order_details: Some(RegistrationOrderDetails {
                vehicle_routing_location: Some(location.to_string()),
                ..RegistrationOrderDetails::default()
            }),
            ..RegistrationTask::default()
        });
        snapshot
    };

    history.append_snapshot(order("RN7", "BOOKED", None)).unwrap();
    let diffs = history.append_snapshot(with_location("Tilburg Factory")).unwrap();
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].field, "Vehicle Location");
    assert_eq!(diffs[0].old_value, "N/A");

    let diffs = history.append_snapshot(with_location("In Transit")).unwrap();
    assert_eq!(diffs[0].old_value, "Tilburg Factory");
    assert_eq!(diffs[0].new_value, "In Transit");
}

// === Test 7: orders are tracked independently ===
#[test]
fn test_orders_are_independent() {
    let (_tmp, store) = make_store();
    let history: HistoryStore = store.history();
    let results = ingest_snapshots(
        &history,
        vec![order("RN1", "BOOKED", None), order("RN2", "BOOKED", None)],
    );
    assert!(results.iter().all(|r| r.outcome.is_ok()));

    let results = ingest_snapshots(
        &history,
        vec![order("RN1", "BOOKED", None), order("RN2", "DELIVERED", None)],
    );
    assert!(results[0].diffs().is_empty());
    assert_eq!(results[1].diffs().len(), 1);
    assert_eq!(
        history.list_references().unwrap(),
        vec!["RN1".to_string(), "RN2".to_string()]
    );
}

// === Test 8: a demo history seed produces the expected changes ===
#[tokio::test]
async fn test_demo_seed_then_ingest() {
    let (_tmp, store) = make_store();
    let demo = DemoSource::new();
    let mut seeded = demo.seed_history(Utc::now());
    store.history().save_history(&mut seeded).unwrap();

    let results = ingest_snapshots(&store.history(), demo.fetch_all().await.unwrap());
    let fields: Vec<&str> = results[0].diffs().iter().map(|d| d.field.as_str()).collect();
    assert!(fields.contains(&"Vehicle Location"));
    assert!(fields.contains(&"License Plate"));
    assert!(!fields.contains(&"VIN"));
    assert_eq!(store.history().load_history(DEMO_REFERENCE).unwrap().len(), 3);

    let stored = store.history().load_history(DEMO_REFERENCE).unwrap();
    let value = serde_json::to_value(&stored).unwrap();
    assert_eq!(value["referenceNumber"], DEMO_REFERENCE);
    assert_eq!(value["snapshots"].as_array().unwrap().len(), 3);
}
