use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authorized (log in again)")]
    Unauthorized,
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("authorization failed: {0}")]
    AuthFailed(String),
    #[error("authorization state does not match this login attempt")]
    StateMismatch,
    #[error("no authorization code found")]
    MissingCode,
    #[error("no refresh token stored")]
    MissingRefreshToken,
    #[error("unknown order: {0}")]
    UnknownOrder(String),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("core error: {0}")]
    Core(#[from] orderwatch_core::CoreError),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
