use async_trait::async_trait;
use orderwatch_core::model::OrdersResponse;
use orderwatch_core::{Order, OrderDetails};
use url::Url;

use crate::auth::{AuthClient, Tokens};
use crate::source::OrderSource;
use crate::ApiError;

pub const ORDERS_URL: &str = "https://owner-api.teslamotors.com/api/1/users/orders";
pub const TASKS_URL: &str = "https://akamai-apigateway-vfx.tesla.com/tasks";
pub const APP_VERSION: &str = "9.99.9-9999";

/// Remote endpoints, overridable for tests.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub orders_url: String,
    pub tasks_url: String,
    pub app_version: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            orders_url: ORDERS_URL.to_string(),
            tasks_url: TASKS_URL.to_string(),
            app_version: APP_VERSION.to_string(),
        }
    }
}

impl Endpoints {
    pub fn tasks_url_for(
        &self,
        reference: &str,
        device_language: &str,
        device_country: &str,
    ) -> Result<Url, ApiError> {
        let url = Url::parse_with_params(
            &self.tasks_url,
            &[
                ("deviceLanguage", device_language),
                ("deviceCountry", device_country),
                ("referenceNumber", reference),
                ("appVersion", self.app_version.as_str()),
            ],
        )?;
        Ok(url)
    }
}

/// Bearer-authenticated client for the order and task endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    auth: AuthClient,
    endpoints: Endpoints,
    tokens: Tokens,
    device_language: String,
    device_country: String,
}

impl ApiClient {
    pub fn new(tokens: Tokens) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth: AuthClient::new(),
            endpoints: Endpoints::default(),
            tokens,
            device_language: "en".to_string(),
            device_country: "US".to_string(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_auth(mut self, auth: AuthClient) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.auth = self.auth.with_http_client(http.clone());
        self.http = http;
        self
    }

    pub fn with_device(mut self, language: impl Into<String>, country: impl Into<String>) -> Self {
        self.device_language = language.into();
        self.device_country = country.into();
        self
    }

    pub fn tokens(&self) -> &Tokens {
        &self.tokens
    }

    /// Refresh the tokens when they have expired. Returns whether new tokens
    /// were obtained, in which case the caller should persist them.
    pub async fn refresh_if_expired(&mut self) -> Result<bool, ApiError> {
        if !self.tokens.is_expired() {
            return Ok(false);
        }
        self.tokens = self.auth.refresh(&self.tokens).await?;
        Ok(true)
    }

    async fn get_body(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.tokens.access_token)
            .send()
            .await?;
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl OrderSource for ApiClient {
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let body = self.get_body(&self.endpoints.orders_url).await?;
        let response: OrdersResponse = serde_json::from_slice(&body)?;
        Ok(response.response)
    }

    async fn fetch_order_details(&self, reference: &str) -> Result<OrderDetails, ApiError> {
        let url =
            self.endpoints
                .tasks_url_for(reference, &self.device_language, &self.device_country)?;
        let body = self.get_body(url.as_str()).await?;
        Ok(OrderDetails::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{local_http_client, serve_once};

    fn tokens() -> Tokens {
        Tokens {
            access_token: "access-123".into(),
            refresh_token: Some("refresh-456".into()),
            expires_at: None,
        }
    }

    fn client_for(base: &str) -> ApiClient {
        ApiClient::new(tokens())
            .with_endpoints(Endpoints {
                orders_url: format!("{base}/api/1/users/orders"),
                tasks_url: format!("{base}/tasks"),
                app_version: APP_VERSION.to_string(),
            })
            .with_http_client(local_http_client())
    }

    #[test]
    fn tasks_url_has_device_and_reference() {
        let url = Endpoints::default()
            .tasks_url_for("RN123", "nl", "NL")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://akamai-apigateway-vfx.tesla.com/tasks?deviceLanguage=nl&deviceCountry=NL&referenceNumber=RN123&appVersion=9.99.9-9999"
        );
    }

    #[tokio::test]
    async fn lists_orders_with_bearer_token() {
        let (base, request) = serve_once(
            200,
            r#"{"response":[{"referenceNumber":"RN1","orderStatus":"BOOKED","modelCode":"my"}],"count":1}"#,
        )
        .await;
        let orders = client_for(&base).list_orders().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].reference_number, "RN1");
        assert_eq!(orders[0].model_name(), "Model Y");

        let request = request.await.unwrap();
        assert_eq!(request.method, axum::http::Method::GET);
        assert_eq!(request.path, "/api/1/users/orders");
        assert_eq!(request.header("authorization"), Some("Bearer access-123"));
    }

    #[tokio::test]
    async fn fetches_task_details() {
        let (base, request) = serve_once(
            200,
            r#"{"tasks":{"scheduling":{"deliveryWindowDisplay":"June 1 - June 14"}}}"#,
        )
        .await;
        let client = client_for(&base).with_device("nl", "NL");
        let details = client.fetch_order_details("RN1").await.unwrap();
        assert_eq!(
            details
                .tasks
                .scheduling
                .and_then(|s| s.delivery_window_display)
                .as_deref(),
            Some("June 1 - June 14")
        );
        let request = request.await.unwrap();
        assert_eq!(request.path, "/tasks");
        assert_eq!(request.query("referenceNumber"), Some("RN1"));
        assert_eq!(request.query("deviceLanguage"), Some("nl"));
        assert_eq!(request.query("deviceCountry"), Some("NL"));
        assert_eq!(request.header("authorization"), Some("Bearer access-123"));
    }

    #[tokio::test]
    async fn unauthorized_is_distinguished() {
        let (base, _request) = serve_once(401, "{}").await;
        assert!(matches!(
            client_for(&base).list_orders().await,
            Err(ApiError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn other_failures_keep_status_and_body() {
        let (base, _request) = serve_once(503, r#"{"error":"down"}"#).await;
        match client_for(&base).list_orders().await {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert!(body.contains("down"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn valid_tokens_are_not_refreshed() {
        let mut client = ApiClient::new(tokens());
        assert!(!client.refresh_if_expired().await.unwrap());
        assert_eq!(client.tokens(), &tokens());
    }

    #[tokio::test]
    async fn expired_tokens_are_refreshed() {
        let (base, _request) =
            serve_once(200, r#"{"access_token":"fresh","expires_in":3600}"#).await;
        let mut expired = tokens();
        expired.expires_at = Some(chrono::Utc::now() - chrono::Duration::seconds(5));
        let mut client = ApiClient::new(expired)
            .with_auth(AuthClient::with_token_url(base))
            .with_http_client(local_http_client());
        assert!(client.refresh_if_expired().await.unwrap());
        assert_eq!(client.tokens().access_token, "fresh");
        assert_eq!(client.tokens().refresh_token.as_deref(), Some("refresh-456"));
        assert!(!client.tokens().is_expired());
    }
}
