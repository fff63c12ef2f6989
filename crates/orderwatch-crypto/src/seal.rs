use base64::prelude::*;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use rand::RngCore;

use crate::key::KEY_LEN;
use crate::CryptoError;

const NONCE_LEN: usize = 24;

/// Encrypt with XChaCha20-Poly1305. Output is `nonce || ciphertext`.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = XChaCha20Poly1305::new(key.into());
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = XNonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

pub fn open(key: &[u8; KEY_LEN], sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if sealed.len() < NONCE_LEN {
        return Err(CryptoError::DecryptionFailed("data too short".into()));
    }

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
    let nonce = XNonce::from_slice(nonce_bytes);

    let cipher = XChaCha20Poly1305::new(key.into());
    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))
}

/// [`seal`] followed by standard base64, for text files.
pub fn seal_to_text(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<String, CryptoError> {
    Ok(BASE64_STANDARD.encode(seal(key, plaintext)?))
}

pub fn open_text(key: &[u8; KEY_LEN], text: &str) -> Result<Vec<u8>, CryptoError> {
    let sealed = BASE64_STANDARD.decode(text.trim())?;
    open(key, &sealed)
}
