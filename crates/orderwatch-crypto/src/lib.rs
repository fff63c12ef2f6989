pub mod error;
pub mod key;
pub mod seal;

pub use error::CryptoError;
pub use key::{generate_key, key_from_bytes, KEY_LEN};
pub use seal::{open, open_text, seal, seal_to_text};
