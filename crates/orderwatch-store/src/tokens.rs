use std::path::PathBuf;

use orderwatch_crypto::{generate_key, key_from_bytes, open_text, seal_to_text, KEY_LEN};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::fsutil::{read_if_exists, remove_if_exists, write_private};
use crate::layout::StoreLayout;
use crate::StoreError;

/// Credentials sealed at rest with a per-home key.
///
/// The key file holds the raw key bytes and the tokens file holds the sealed
/// JSON as base64 text. Both are owner read/write only.
#[derive(Debug, Clone)]
pub struct TokenVault {
    tokens_file: PathBuf,
    key_file: PathBuf,
}

impl TokenVault {
    pub fn new(layout: &StoreLayout) -> Self {
        Self {
            tokens_file: layout.tokens_file(),
            key_file: layout.key_file(),
        }
    }

    fn existing_key(&self) -> Result<Option<[u8; KEY_LEN]>, StoreError> {
        match read_if_exists(&self.key_file)? {
            Some(bytes) => Ok(Some(key_from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    fn key_or_create(&self) -> Result<[u8; KEY_LEN], StoreError> {
        if let Some(key) = self.existing_key()? {
            return Ok(key);
        }
        let key = generate_key();
        write_private(&self.key_file, &key)?;
        tracing::debug!(path = %self.key_file.display(), "created token key");
        Ok(key)
    }

    pub fn save<T: Serialize>(&self, value: &T) -> Result<(), StoreError> {
        let key = self.key_or_create()?;
        let plaintext = serde_json::to_vec(value)?;
        let sealed = seal_to_text(&key, &plaintext)?;
        write_private(&self.tokens_file, sealed.as_bytes())
    }

    /// Stored value, or `None` when nothing has been saved.
    pub fn load<T: DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
        let Some(sealed) = read_if_exists(&self.tokens_file)? else {
            return Ok(None);
        };
        let Some(key) = self.existing_key()? else {
            tracing::warn!("token file present without a key, ignoring it");
            return Ok(None);
        };
        let text = String::from_utf8_lossy(&sealed);
        let plaintext = open_text(&key, text.trim())?;
        let value = serde_json::from_slice(&plaintext).map_err(|source| StoreError::Decode {
            path: self.tokens_file.clone(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Remove stored credentials. Returns whether anything was removed.
    pub fn clear(&self) -> Result<bool, StoreError> {
        remove_if_exists(&self.tokens_file)
    }
}
