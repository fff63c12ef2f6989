pub mod auth;
pub mod client;
pub mod demo;
pub mod error;
pub mod source;

#[cfg(test)]
mod test_server;

pub use auth::{extract_code, AuthClient, AuthSession, Tokens};
pub use client::{ApiClient, Endpoints};
pub use demo::DemoSource;
pub use error::ApiError;
pub use source::OrderSource;
