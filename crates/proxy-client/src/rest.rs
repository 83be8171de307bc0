//! REST implementation of [`ProxyProvider`].
//!
//! `RestProxyClient` wraps a `reqwest::Client` and translates every
//! trait method into the corresponding HTTP call against the ArmorIQ
//! proxy, checking the response status against the single expected code
//! for that route and passing the JSON body through untouched.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use aq_domain::config::ProxyConfig;
use aq_domain::error::{Error, Result};
use aq_domain::trace::TraceEvent;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use crate::provider::ProxyProvider;
use crate::types::{PolicyCreate, PolicyUpdate};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Expected status
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The status code a forwarded call must return to count as successful.
///
/// Any other upstream status becomes an [`Error::Upstream`] carrying the
/// proxy's code and error detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// 200 OK — reads and updates.
    Ok,
    /// 201 Created — policy creation.
    Created,
    /// 204 No Content — policy deletion.
    NoContent,
}

impl Expected {
    pub fn code(self) -> u16 {
        match self {
            Expected::Ok => 200,
            Expected::Created => 201,
            Expected::NoContent => 204,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A REST-based client for the ArmorIQ proxy.
///
/// Created once and reused for the lifetime of the server process.
/// The underlying `reqwest::Client` maintains a connection pool.
#[derive(Debug, Clone)]
pub struct RestProxyClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl RestProxyClient {
    /// The configured per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build a new client from the shared `ProxyConfig`.
    pub fn new(cfg: &ProxyConfig) -> Result<Self> {
        let timeout = Duration::from_millis(cfg.timeout_ms);
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        let base_url = cfg.base_url.trim_end_matches('/').to_owned();

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    // ── request helpers ──────────────────────────────────────────────

    /// Decorate a `RequestBuilder` with the standard admin headers.
    fn decorate(&self, rb: RequestBuilder) -> RequestBuilder {
        let trace_id = Uuid::new_v4().to_string();
        rb.header("X-Client-Type", "armoriq-admin")
            .header("X-Trace-Id", &trace_id)
    }

    /// Build the full URL for a path like `/api/policies`.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ── forward core ─────────────────────────────────────────────────

    /// Execute one forwarded call and decode the proxy's answer.
    ///
    /// * A status other than `expected` becomes [`Error::Upstream`] with
    ///   the proxy's code and error detail.
    /// * An expected 204, or an empty body, yields `Ok(None)`.
    /// * A body that fails JSON parsing despite the expected status
    ///   becomes [`Error::UpstreamProtocol`].
    /// * Emits a `TraceEvent::ProxyCall` for every attempt.
    async fn forward(
        &self,
        endpoint: &str,
        rb: RequestBuilder,
        expected: Expected,
    ) -> Result<Option<Value>> {
        let start = Instant::now();
        let result = self.decorate(rb).send().await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(endpoint = %endpoint, error = %e, "proxy request failed");
                TraceEvent::ProxyCall {
                    endpoint: endpoint.to_owned(),
                    status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                    duration_ms,
                }
                .emit();
                return Err(from_reqwest(e));
            }
        };

        let status = resp.status();
        TraceEvent::ProxyCall {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            duration_ms,
        }
        .emit();

        if status.as_u16() != expected.code() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                detail: error_detail(status, &body),
            });
        }

        let body = resp.text().await.map_err(from_reqwest)?;
        if expected == Expected::NoContent || body.is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| Error::UpstreamProtocol(e.to_string()))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
impl ProxyProvider for RestProxyClient {
    async fn health(&self) -> Result<Option<Value>> {
        let url = self.url("/health");
        self.forward("GET /health", self.http.get(&url), Expected::Ok)
            .await
    }

    async fn audit_logs(&self) -> Result<Option<Value>> {
        let url = self.url("/api/audit-logs");
        self.forward("GET /api/audit-logs", self.http.get(&url), Expected::Ok)
            .await
    }

    async fn endpoints(&self) -> Result<Option<Value>> {
        let url = self.url("/api/endpoints");
        self.forward("GET /api/endpoints", self.http.get(&url), Expected::Ok)
            .await
    }

    async fn list_policies(&self) -> Result<Option<Value>> {
        let url = self.url("/api/policies");
        self.forward("GET /api/policies", self.http.get(&url), Expected::Ok)
            .await
    }

    async fn policy(&self, agent_id: &str) -> Result<Option<Value>> {
        let url = self.url(&format!("/api/policies/{agent_id}"));
        self.forward(
            &format!("GET /api/policies/{agent_id}"),
            self.http.get(&url),
            Expected::Ok,
        )
        .await
    }

    async fn create_policy(&self, req: PolicyCreate) -> Result<Option<Value>> {
        let url = self.url("/api/policies");
        self.forward(
            "POST /api/policies",
            self.http.post(&url).json(&req),
            Expected::Created,
        )
        .await
    }

    async fn update_policy(&self, agent_id: &str, req: PolicyUpdate) -> Result<Option<Value>> {
        let url = self.url(&format!("/api/policies/{agent_id}"));
        self.forward(
            &format!("PUT /api/policies/{agent_id}"),
            self.http.put(&url).json(&req),
            Expected::Ok,
        )
        .await
    }

    async fn delete_policy(&self, agent_id: &str) -> Result<()> {
        let url = self.url(&format!("/api/policies/{agent_id}"));
        self.forward(
            &format!("DELETE /api/policies/{agent_id}"),
            self.http.delete(&url),
            Expected::NoContent,
        )
        .await?;
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Build the error-detail payload for an unexpected proxy status.
///
/// The proxy's body is used verbatim when it parses as JSON; otherwise
/// a `{"error": <raw text, or the status reason phrase>}` object is
/// synthesized.
fn error_detail(status: StatusCode, body: &str) -> Value {
    match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => {
            let text = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_owned()
            } else {
                body.to_owned()
            };
            serde_json::json!({ "error": text })
        }
    }
}

/// Convert a `reqwest::Error` into a domain `Error`.
///
/// Timeout errors become `Error::Timeout`; everything else becomes
/// `Error::Http`.
pub fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
