//! One-shot axum responder for exercising the clients against localhost.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::Query;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// What the responder saw of the first request.
#[derive(Debug)]
pub(crate) struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub form: HashMap<String, String>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn form(&self, key: &str) -> Option<&str> {
        self.form.get(key).map(String::as_str)
    }
}

/// Client that never routes localhost through a proxy.
pub(crate) fn local_http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Answer every request with `status` and a JSON `body`. Returns the base URL
/// and the first request once it has been received.
pub(crate) async fn serve_once(
    status: u16,
    body: &str,
) -> (String, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let status = StatusCode::from_u16(status).unwrap();
    let body = body.to_string();
    let (tx, rx) = oneshot::channel();
    let tx = Arc::new(Mutex::new(Some(tx)));

    let app = Router::new().fallback(
        move |method: Method,
              uri: Uri,
              Query(query): Query<HashMap<String, String>>,
              headers: HeaderMap,
              payload: String| {
            let tx = tx.clone();
            let body = body.clone();
            async move {
                let form = url::form_urlencoded::parse(payload.as_bytes())
                    .into_owned()
                    .collect();
                let captured = CapturedRequest {
                    method,
                    path: uri.path().to_string(),
                    query,
                    headers,
                    form,
                };
                if let Some(tx) = tx.lock().unwrap().take() {
                    let _ = tx.send(captured);
                }
                (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
        },
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), rx)
}
