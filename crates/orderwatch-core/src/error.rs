use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid order payload: {0}")]
    InvalidPayload(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
