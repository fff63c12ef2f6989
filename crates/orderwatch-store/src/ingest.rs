use orderwatch_core::{OrderDiff, OrderSnapshot};

use crate::history::HistoryStore;
use crate::StoreError;

/// A freshly fetched order and what recording it produced.
#[derive(Debug)]
pub struct IngestResult {
    pub snapshot: OrderSnapshot,
    pub outcome: Result<Vec<OrderDiff>, StoreError>,
}

impl IngestResult {
    /// Changes detected against the stored history. Empty when recording
    /// failed.
    pub fn diffs(&self) -> &[OrderDiff] {
        match &self.outcome {
            Ok(diffs) => diffs,
            Err(_) => &[],
        }
    }
}

/// Record each snapshot in history.
///
/// Storage failures are logged and reported per order; they never drop the
/// fetched snapshot, so callers can still display current data.
pub fn ingest_snapshots(history: &HistoryStore, snapshots: Vec<OrderSnapshot>) -> Vec<IngestResult> {
    snapshots
        .into_iter()
        .map(|snapshot| {
            let outcome = history.append_snapshot(snapshot.clone());
            if let Err(e) = &outcome {
                tracing::warn!(
                    reference = %snapshot.reference_number(),
                    error = %e,
                    "failed to record snapshot"
                );
            }
            IngestResult { snapshot, outcome }
        })
        .collect()
}
