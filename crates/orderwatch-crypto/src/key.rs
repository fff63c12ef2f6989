use rand::RngCore;

use crate::CryptoError;

pub const KEY_LEN: usize = 32;

pub fn generate_key() -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    rand::thread_rng().fill_bytes(&mut key);
    key
}

pub fn key_from_bytes(bytes: &[u8]) -> Result<[u8; KEY_LEN], CryptoError> {
    bytes.try_into().map_err(|_| {
        CryptoError::InvalidKey(format!("expected {KEY_LEN} bytes, got {}", bytes.len()))
    })
}
