use std::path::{Path, PathBuf};

use crate::fsutil::create_private_dir;
use crate::StoreError;

/// Paths under the application home directory.
#[derive(Debug, Clone)]
pub struct StoreLayout {
    root: PathBuf,
}

impl StoreLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn history_dir(&self) -> PathBuf {
        self.root.join("history")
    }

    pub fn checklists_dir(&self) -> PathBuf {
        self.root.join("checklists")
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn tokens_file(&self) -> PathBuf {
        self.root.join("tokens.enc")
    }

    pub fn key_file(&self) -> PathBuf {
        self.root.join("key")
    }

    /// Separate tree used by demo runs so canned data never mixes with real
    /// history.
    pub fn demo(&self) -> Self {
        Self::new(&self.root.join("demo"))
    }

    pub fn create_dirs(&self) -> Result<(), StoreError> {
        create_private_dir(&self.root)?;
        create_private_dir(&self.history_dir())?;
        create_private_dir(&self.checklists_dir())?;
        Ok(())
    }
}
