use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("invalid encoding: {0}")]
    Encoding(#[from] base64::DecodeError),
}
