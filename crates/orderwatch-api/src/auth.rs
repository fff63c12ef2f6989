use base64::prelude::*;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use crate::ApiError;

pub const CLIENT_ID: &str = "ownerapi";
pub const REDIRECT_URI: &str = "https://auth.tesla.com/void/callback";
pub const AUTHORIZE_URL: &str = "https://auth.tesla.com/oauth2/v3/authorize";
pub const TOKEN_URL: &str = "https://auth.tesla.com/oauth2/v3/token";
pub const SCOPE: &str = "openid email offline_access";

/// Access credentials as persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokens {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Tokens {
    /// Tokens without a known expiry are treated as valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

fn random_urlsafe(n: usize) -> String {
    let mut bytes = vec![0_u8; n];
    rand::thread_rng().fill_bytes(&mut bytes);
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

pub fn pkce_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    BASE64_URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// PKCE values for one login attempt.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub code_verifier: String,
    pub code_challenge: String,
    pub state: String,
}

impl AuthSession {
    pub fn new() -> Self {
        let code_verifier = random_urlsafe(32);
        let code_challenge = pkce_challenge(&code_verifier);
        Self {
            code_verifier,
            code_challenge,
            state: random_urlsafe(16),
        }
    }

    pub fn authorize_url(&self) -> String {
        format!(
            "{AUTHORIZE_URL}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}&code_challenge={}&code_challenge_method=S256",
            urlencoding::encode(CLIENT_ID),
            urlencoding::encode(REDIRECT_URI),
            urlencoding::encode(SCOPE),
            urlencoding::encode(&self.state),
            urlencoding::encode(&self.code_challenge),
        )
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the authorization code out of what the user pasted.
///
/// Accepts the full callback URL (code in the query or the fragment) or the
/// bare code. A state that is present must match `expected_state`.
pub fn extract_code(input: &str, expected_state: &str) -> Result<String, ApiError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ApiError::MissingCode);
    }

    let Ok(url) = Url::parse(input) else {
        return Ok(input.to_string());
    };

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    if let Some(fragment) = url.fragment() {
        pairs.extend(url::form_urlencoded::parse(fragment.as_bytes()).into_owned());
    }
    let param = |key: &str| {
        pairs
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.clone())
    };

    if let Some(error) = param("error") {
        return Err(ApiError::AuthFailed(error));
    }
    if let Some(state) = param("state") {
        if state != expected_state {
            return Err(ApiError::StateMismatch);
        }
    }
    param("code").ok_or(ApiError::MissingCode)
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_tokens(self, now: DateTime<Utc>, previous_refresh: Option<&str>) -> Tokens {
        let refresh_token = self
            .refresh_token
            .filter(|t| !t.is_empty())
            .or_else(|| previous_refresh.map(str::to_string));
        Tokens {
            access_token: self.access_token,
            refresh_token,
            expires_at: self.expires_in.map(|secs| now + Duration::seconds(secs)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Client for the token endpoint.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    token_url: String,
}

impl AuthClient {
    pub fn new() -> Self {
        Self::with_token_url(TOKEN_URL)
    }

    pub fn with_token_url(token_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url: token_url.into(),
        }
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<Tokens, ApiError> {
        let form = [
            ("grant_type", "authorization_code"),
            ("client_id", CLIENT_ID),
            ("code", code),
            ("redirect_uri", REDIRECT_URI),
            ("code_verifier", code_verifier),
        ];
        let response = self.post_form(&form).await?;
        Ok(response.into_tokens(Utc::now(), None))
    }

    /// Trade the refresh token for new tokens. The old refresh token is kept
    /// when the endpoint does not issue a new one.
    pub async fn refresh(&self, tokens: &Tokens) -> Result<Tokens, ApiError> {
        let refresh_token = tokens
            .refresh_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingRefreshToken)?;
        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", CLIENT_ID),
            ("refresh_token", refresh_token),
        ];
        let response = self.post_form(&form).await?;
        tracing::debug!("refreshed access token");
        Ok(response.into_tokens(Utc::now(), Some(refresh_token)))
    }

    async fn post_form(&self, form: &[(&str, &str)]) -> Result<TokenResponse, ApiError> {
        let response = self.http.post(&self.token_url).form(form).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let detail: TokenErrorResponse = serde_json::from_str(&body).unwrap_or_default();
            return Err(ApiError::AuthFailed(format!(
                "{} ({}): {}",
                status.as_u16(),
                detail.error,
                detail.error_description
            )));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl Default for AuthClient {
    fn default() -> Self {
        Self::new()
    }
}
