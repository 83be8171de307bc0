use serde::Serialize;

/// Structured trace events emitted across all ArmorIQ admin crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    ProxyCall {
        endpoint: String,
        status: u16,
        duration_ms: u64,
    },
    ServerStarted {
        addr: String,
        proxy_url: String,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "aq_event");
    }
}
