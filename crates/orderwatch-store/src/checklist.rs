use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::fsutil::{read_if_exists, write_private};
use crate::history::validate_reference;
use crate::layout::StoreLayout;
use crate::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecklistSection {
    pub title: &'static str,
    pub items: &'static [ChecklistItem],
}

/// Standard preparation steps before taking delivery.
pub static DELIVERY_CHECKLIST: &[ChecklistSection] = &[ChecklistSection {
    title: "Before Delivery",
    items: &[
        ChecklistItem {
            id: "finance_sorted",
            text: "Financing or payment method confirmed in the Tesla app",
        },
        ChecklistItem {
            id: "insured",
            text: "Vehicle added to insurance policy",
        },
        ChecklistItem {
            id: "home_charger",
            text: "Home charging setup ready (wall connector / outlet)",
        },
        ChecklistItem {
            id: "docs_reviewed",
            text: "Motor Vehicle Purchase Agreement reviewed and signed",
        },
        ChecklistItem {
            id: "tradein_ready",
            text: "Trade-in vehicle cleaned and paperwork prepared",
        },
        ChecklistItem {
            id: "pickup_route",
            text: "Route to delivery center or pickup location planned",
        },
    ],
}];

pub fn find_item(id: &str) -> Option<&'static ChecklistItem> {
    DELIVERY_CHECKLIST
        .iter()
        .flat_map(|section| section.items.iter())
        .find(|item| item.id == id)
}

/// `(completed, total)` over [`DELIVERY_CHECKLIST`]. Ids not in the list are
/// ignored.
pub fn count_completed(checked: &BTreeMap<String, bool>) -> (usize, usize) {
    DELIVERY_CHECKLIST
        .iter()
        .flat_map(|section| section.items.iter())
        .fold((0, 0), |(done, total), item| {
            let is_checked = checked.get(item.id).copied().unwrap_or(false);
            (done + usize::from(is_checked), total + 1)
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistState {
    pub reference_number: String,
    #[serde(default)]
    pub checked: BTreeMap<String, bool>,
}

impl ChecklistState {
    pub fn new(reference_number: impl Into<String>) -> Self {
        Self {
            reference_number: reference_number.into(),
            checked: BTreeMap::new(),
        }
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.get(id).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct ChecklistStore {
    dir: PathBuf,
}

impl ChecklistStore {
    pub fn new(layout: &StoreLayout) -> Self {
        Self {
            dir: layout.checklists_dir(),
        }
    }

    fn state_path(&self, reference: &str) -> Result<PathBuf, StoreError> {
        validate_reference(reference)?;
        Ok(self.dir.join(format!("{reference}.json")))
    }

    pub fn load_state(&self, reference: &str) -> Result<ChecklistState, StoreError> {
        let path = self.state_path(reference)?;
        let Some(data) = read_if_exists(&path)? else {
            return Ok(ChecklistState::new(reference));
        };
        serde_json::from_slice(&data).map_err(|source| StoreError::Decode { path, source })
    }

    pub fn save_state(&self, state: &ChecklistState) -> Result<(), StoreError> {
        let path = self.state_path(&state.reference_number)?;
        let data = serde_json::to_vec_pretty(state)?;
        write_private(&path, &data)
    }

    /// Flip one item and persist. Returns the new value.
    pub fn toggle_item(&self, reference: &str, item_id: &str) -> Result<bool, StoreError> {
        let mut state = self.load_state(reference)?;
        let value = !state.is_checked(item_id);
        state.checked.insert(item_id.to_string(), value);
        self.save_state(&state)?;
        tracing::debug!(reference, item = item_id, checked = value, "toggled checklist item");
        Ok(value)
    }
}
