pub mod checklist;
pub mod config;
pub mod error;
pub mod fsutil;
pub mod history;
pub mod ingest;
pub mod layout;
pub mod tokens;

pub use checklist::{
    count_completed, find_item, ChecklistItem, ChecklistSection, ChecklistState, ChecklistStore,
    DELIVERY_CHECKLIST,
};
pub use config::AppConfig;
pub use error::StoreError;
pub use history::HistoryStore;
pub use ingest::{ingest_snapshots, IngestResult};
pub use layout::StoreLayout;
pub use tokens::TokenVault;

use std::path::Path;

/// Everything persisted under one application home.
pub struct OrderStore {
    layout: StoreLayout,
}

impl OrderStore {
    /// Open the store rooted at `root`, creating its directories if needed.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let layout = StoreLayout::new(root);
        layout.create_dirs()?;
        Ok(Self { layout })
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }

    pub fn history(&self) -> HistoryStore {
        HistoryStore::new(&self.layout)
    }

    pub fn checklists(&self) -> ChecklistStore {
        ChecklistStore::new(&self.layout)
    }

    pub fn tokens(&self) -> TokenVault {
        TokenVault::new(&self.layout)
    }

    pub fn config(&self) -> Result<AppConfig, StoreError> {
        config::read_config_or_default(&self.layout)
    }
}
