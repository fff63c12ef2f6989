use std::path::PathBuf;

use chrono::{DateTime, Utc};
use orderwatch_core::{
    compare, HistoricalSnapshot, OrderDiff, OrderHistory, OrderSnapshot, RETENTION_LIMIT,
};

use crate::fsutil::{read_if_exists, write_private};
use crate::layout::StoreLayout;
use crate::StoreError;

/// Per-order snapshot history, one JSON record per reference number.
///
/// Operations on one reference number are load-then-save and must not run
/// concurrently with each other.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
}

/// Reference numbers become file names, so anything that could leave the
/// history directory is refused.
pub(crate) fn validate_reference(reference: &str) -> Result<(), StoreError> {
    let bad = reference.is_empty()
        || reference == "."
        || reference == ".."
        || reference
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control());
    if bad {
        return Err(StoreError::InvalidReference(reference.to_string()));
    }
    Ok(())
}

impl HistoryStore {
    pub fn new(layout: &StoreLayout) -> Self {
        Self {
            dir: layout.history_dir(),
        }
    }

    fn record_path(&self, reference: &str) -> Result<PathBuf, StoreError> {
        validate_reference(reference)?;
        Ok(self.dir.join(format!("{reference}.json")))
    }

    /// Stored history for `reference`, or an empty one when nothing has been
    /// recorded yet.
    pub fn load_history(&self, reference: &str) -> Result<OrderHistory, StoreError> {
        let path = self.record_path(reference)?;
        let Some(data) = read_if_exists(&path)? else {
            return Ok(OrderHistory::new(reference));
        };
        serde_json::from_slice(&data).map_err(|source| StoreError::Decode { path, source })
    }

    /// Trim to the newest [`RETENTION_LIMIT`] snapshots and write the record.
    pub fn save_history(&self, history: &mut OrderHistory) -> Result<(), StoreError> {
        let path = self.record_path(&history.reference_number)?;
        let dropped = history.enforce_retention(RETENTION_LIMIT);
        if dropped > 0 {
            tracing::debug!(
                reference = %history.reference_number,
                dropped,
                "pruned old snapshots"
            );
        }
        let data = serde_json::to_vec_pretty(history)?;
        write_private(&path, &data)
    }

    /// Record `snapshot` if it differs from the latest stored one.
    ///
    /// The first snapshot of an order is always recorded and reports no
    /// diffs. An unchanged snapshot leaves the record untouched.
    pub fn append_snapshot(&self, snapshot: OrderSnapshot) -> Result<Vec<OrderDiff>, StoreError> {
        self.append_snapshot_at(snapshot, Utc::now())
    }

    pub fn append_snapshot_at(
        &self,
        snapshot: OrderSnapshot,
        timestamp: DateTime<Utc>,
    ) -> Result<Vec<OrderDiff>, StoreError> {
        let reference = snapshot.reference_number().to_string();
        let mut history = self.load_history(&reference)?;

        let diffs = match history.latest() {
            None => {
                tracing::debug!(reference = %reference, "recording first snapshot");
                Vec::new()
            }
            Some(last) => {
                let diffs = compare(&last.data, &snapshot);
                if diffs.is_empty() {
                    return Ok(diffs);
                }
                tracing::info!(
                    reference = %reference,
                    changes = diffs.len(),
                    "order changed since last snapshot"
                );
                diffs
            }
        };

        history.push(HistoricalSnapshot::new(timestamp, snapshot));
        self.save_history(&mut history)?;
        Ok(diffs)
    }

    pub fn latest_snapshot(&self, reference: &str) -> Result<Option<HistoricalSnapshot>, StoreError> {
        let mut history = self.load_history(reference)?;
        Ok(history.snapshots.pop())
    }

    /// Reference numbers with a stored record, sorted.
    pub fn list_references(&self) -> Result<Vec<String>, StoreError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let mut references = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                references.push(stem.to_string());
            }
        }
        references.sort();
        Ok(references)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use orderwatch_core::Order;

    fn make_store() -> (tempfile::TempDir, HistoryStore) {
        let tmp = tempfile::tempdir().unwrap();
        let layout = StoreLayout::new(tmp.path());
        layout.create_dirs().unwrap();
        let store = HistoryStore::new(&layout);
        (tmp, store)
    }

    fn snapshot(reference: &str, status: &str, vin: Option<&str>) -> OrderSnapshot {
        OrderSnapshot {
            order: Order {
                reference_number: reference.to_string(),
                order_status: status.to_string(),
                vin: vin.map(str::to_string),
                ..Order::default()
            },
            ..OrderSnapshot::default()
        }
    }

    fn base_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn missing_record_loads_empty() {
        let (_tmp, store) = make_store();
        let history = store.load_history("RN404").unwrap();
        assert_eq!(history.reference_number, "RN404");
        assert!(history.is_empty());
        assert!(store.latest_snapshot("RN404").unwrap().is_none());
    }

    #[test]
    fn first_snapshot_is_recorded_without_diffs() {
        let (_tmp, store) = make_store();
        let diffs = store.append_snapshot(snapshot("RN1", "BOOKED", None)).unwrap();
        assert!(diffs.is_empty());
        assert_eq!(store.load_history("RN1").unwrap().len(), 1);
    }

    #[test]
    fn unchanged_snapshot_does_not_touch_record() {
        let (_tmp, store) = make_store();
        store.append_snapshot(snapshot("RN1", "BOOKED", None)).unwrap();
        let path = store.record_path("RN1").unwrap();
        let before = std::fs::read(&path).unwrap();

        let diffs = store.append_snapshot(snapshot("RN1", "BOOKED", None)).unwrap();
        assert!(diffs.is_empty());
        assert_eq!(store.load_history("RN1").unwrap().len(), 1);
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[test]
    fn changed_snapshot_is_appended_with_diffs() {
        let (_tmp, store) = make_store();
        store.append_snapshot(snapshot("RN1", "BOOKED", None)).unwrap();
        let diffs = store
            .append_snapshot(snapshot("RN1", "DELIVERED", Some("5YJ3E1EA1LF123456")))
            .unwrap();

        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].field, "Order Status");
        assert_eq!(diffs[1].field, "VIN");
        assert_eq!(diffs[1].old_value, "N/A");

        let latest = store.latest_snapshot("RN1").unwrap().unwrap();
        assert_eq!(latest.data.order.order_status, "DELIVERED");
        assert_eq!(store.load_history("RN1").unwrap().len(), 2);
    }

    #[test]
    fn save_keeps_newest_twenty() {
        let (_tmp, store) = make_store();
        let mut history = OrderHistory::new("RN1");
        for i in 0..25 {
            history.push(HistoricalSnapshot::new(
                base_time() + Duration::minutes(i),
                snapshot("RN1", &format!("S{i}"), None),
            ));
        }
        store.save_history(&mut history).unwrap();

        let loaded = store.load_history("RN1").unwrap();
        assert_eq!(loaded.len(), RETENTION_LIMIT);
        let statuses: Vec<String> = loaded
            .snapshots
            .iter()
            .map(|s| s.data.order.order_status.clone())
            .collect();
        let expected: Vec<String> = (5..25).map(|i| format!("S{i}")).collect();
        assert_eq!(statuses, expected);
    }

    #[test]
    fn appending_past_limit_drops_oldest() {
        let (_tmp, store) = make_store();
        for i in 0..(RETENTION_LIMIT as i64 + 3) {
            store
                .append_snapshot_at(
                    snapshot("RN1", &format!("S{i}"), None),
                    base_time() + Duration::minutes(i),
                )
                .unwrap();
        }
        let history = store.load_history("RN1").unwrap();
        assert_eq!(history.len(), RETENTION_LIMIT);
        assert_eq!(history.snapshots[0].data.order.order_status, "S3");
        assert!(history
            .snapshots
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn corrupt_record_is_an_error_and_left_in_place() {
        let (_tmp, store) = make_store();
        let path = store.record_path("RN1").unwrap();
        std::fs::write(&path, b"{ not json").unwrap();

        let err = store
            .append_snapshot(snapshot("RN1", "BOOKED", None))
            .unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
        assert_eq!(std::fs::read(&path).unwrap(), b"{ not json");
    }

    #[test]
    fn rejects_path_like_references() {
        let (_tmp, store) = make_store();
        for bad in ["", ".", "..", "../escape", "a/b", "a\\b"] {
            assert!(matches!(
                store.load_history(bad),
                Err(StoreError::InvalidReference(_))
            ));
        }
    }

    #[test]
    fn lists_recorded_references() {
        let (_tmp, store) = make_store();
        store.append_snapshot(snapshot("RN2", "BOOKED", None)).unwrap();
        store.append_snapshot(snapshot("RN1", "BOOKED", None)).unwrap();
        assert_eq!(store.list_references().unwrap(), vec!["RN1", "RN2"]);
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(32))]

        #[test]
        fn save_keeps_the_most_recent_suffix(count in 0usize..45) {
            let (_tmp, store) = make_store();
            let mut history = OrderHistory::new("RN1");
            for i in 0..count {
                history.push(HistoricalSnapshot::new(
                    base_time() + Duration::minutes(i as i64),
                    snapshot("RN1", &format!("S{i}"), None),
                ));
            }
            let original = history.snapshots.clone();
            store.save_history(&mut history).unwrap();

            let loaded = store.load_history("RN1").unwrap();
            let kept = count.min(RETENTION_LIMIT);
            proptest::prop_assert_eq!(loaded.len(), kept);
            proptest::prop_assert_eq!(&loaded.snapshots[..], &original[count - kept..]);
        }
    }
}
