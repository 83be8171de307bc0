//! Mock ArmorIQ proxy for integration testing.
//!
//! Provides a configurable mock HTTP server that plays scripted responses
//! for the proxy routes the admin API forwards to, and records what it
//! received so tests can assert on the forwarded request.
//!
//! Note: each integration test crate compiles this module separately and
//! uses only a subset of it, hence the blanket `#[allow(dead_code)]`.

#![allow(dead_code)]

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Mock proxy server for testing.
///
/// Allows scripting, per `METHOD /path` route:
/// - a JSON, plain-text, or empty response body
/// - the status code to answer with
/// - an artificial delay (for timeout testing)
#[derive(Debug, Clone, Default)]
pub struct MockProxy {
    responses: HashMap<String, Scripted>,
    delays: HashMap<String, Duration>,
}

/// A scripted response for one route.
#[derive(Debug, Clone)]
struct Scripted {
    status: u16,
    body: Option<String>,
}

/// What the mock saw on the last request it served.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

/// Shared state for the mock server.
#[derive(Debug)]
struct MockState {
    responses: HashMap<String, Scripted>,
    delays: HashMap<String, Duration>,
    request_count: RwLock<u32>,
    last_request: RwLock<Option<CapturedRequest>>,
}

impl MockProxy {
    /// Create a new mock proxy with no scripted routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a JSON response for `METHOD /path`.
    #[must_use]
    pub fn with_json(mut self, method: &str, path: &str, status: u16, body: Value) -> Self {
        self.responses.insert(
            format!("{method} {path}"),
            Scripted {
                status,
                body: Some(body.to_string()),
            },
        );
        self
    }

    /// Script a raw text response for `METHOD /path` (for non-JSON bodies).
    #[must_use]
    pub fn with_text(mut self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            format!("{method} {path}"),
            Scripted {
                status,
                body: Some(body.to_string()),
            },
        );
        self
    }

    /// Script an empty-bodied response for `METHOD /path`.
    #[must_use]
    pub fn with_empty(mut self, method: &str, path: &str, status: u16) -> Self {
        self.responses.insert(
            format!("{method} {path}"),
            Scripted { status, body: None },
        );
        self
    }

    /// Add a delay before answering `METHOD /path`.
    #[must_use]
    pub fn with_delay(mut self, method: &str, path: &str, delay: Duration) -> Self {
        self.delays.insert(format!("{method} {path}"), delay);
        self
    }

    /// Start the mock server and return its address and handle.
    pub async fn start(self) -> (SocketAddr, MockProxyHandle) {
        let state = Arc::new(MockState {
            responses: self.responses,
            delays: self.delays,
            request_count: RwLock::new(0),
            last_request: RwLock::new(None),
        });

        let app = Router::new()
            .fallback(handle_request)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (
            addr,
            MockProxyHandle {
                state,
                _handle: handle,
            },
        )
    }
}

/// Handle to the running mock server.
pub struct MockProxyHandle {
    state: Arc<MockState>,
    _handle: JoinHandle<()>,
}

impl MockProxyHandle {
    /// Get the number of requests received.
    pub async fn request_count(&self) -> u32 {
        *self.state.request_count.read().await
    }

    /// Get the last request received.
    pub async fn last_request(&self) -> Option<CapturedRequest> {
        self.state.last_request.read().await.clone()
    }
}

/// Serve one request from the scripted routes.
async fn handle_request(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let key = format!("{} {}", method, uri.path());

    // Record what we saw before answering.
    {
        let mut count = state.request_count.write().await;
        *count += 1;
    }
    {
        let captured = CapturedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| {
                    (
                        k.as_str().to_string(),
                        v.to_str().unwrap_or_default().to_string(),
                    )
                })
                .collect(),
            body: if body.is_empty() {
                None
            } else {
                serde_json::from_slice(&body).ok()
            },
        };
        let mut last = state.last_request.write().await;
        *last = Some(captured);
    }

    if let Some(delay) = state.delays.get(&key) {
        tokio::time::sleep(*delay).await;
    }

    match state.responses.get(&key) {
        Some(scripted) => {
            let status = StatusCode::from_u16(scripted.status).unwrap();
            (status, scripted.body.clone().unwrap_or_default())
        }
        None => (
            StatusCode::NOT_FOUND,
            serde_json::json!({"error": "unscripted route"}).to_string(),
        ),
    }
}
