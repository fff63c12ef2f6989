use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::diff::{compare, OrderDiff};
use crate::model::OrderSnapshot;

/// Maximum number of snapshots kept per order.
pub const RETENTION_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSnapshot {
    pub timestamp: DateTime<Utc>,
    pub data: OrderSnapshot,
}

impl HistoricalSnapshot {
    pub fn new(timestamp: DateTime<Utc>, data: OrderSnapshot) -> Self {
        Self { timestamp, data }
    }

    pub fn now(data: OrderSnapshot) -> Self {
        Self::new(Utc::now(), data)
    }
}

/// Snapshots of one order, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistory {
    pub reference_number: String,
    #[serde(default)]
    pub snapshots: Vec<HistoricalSnapshot>,
}

impl OrderHistory {
    pub fn new(reference_number: impl Into<String>) -> Self {
        Self {
            reference_number: reference_number.into(),
            snapshots: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn latest(&self) -> Option<&HistoricalSnapshot> {
        self.snapshots.last()
    }

    pub fn push(&mut self, snapshot: HistoricalSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Drop the oldest snapshots until at most `limit` remain. Returns the
    /// number dropped.
    pub fn enforce_retention(&mut self, limit: usize) -> usize {
        let excess = self.snapshots.len().saturating_sub(limit);
        if excess > 0 {
            self.snapshots.drain(..excess);
        }
        excess
    }

    /// Each snapshot paired with the diffs against its predecessor. The first
    /// snapshot has none.
    pub fn changes(&self) -> Vec<(&HistoricalSnapshot, Vec<OrderDiff>)> {
        let mut out = Vec::with_capacity(self.snapshots.len());
        let mut previous: Option<&HistoricalSnapshot> = None;
        for snapshot in &self.snapshots {
            let diffs = match previous {
                Some(prev) => compare(&prev.data, &snapshot.data),
                None => Vec::new(),
            };
            out.push((snapshot, diffs));
            previous = Some(snapshot);
        }
        out
    }
}
