use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ArmorIQ proxy connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Connection settings for the upstream ArmorIQ proxy.
///
/// `base_url` can be overridden at startup with the `ARMORIQ_PROXY_URL`
/// environment variable (applied during config loading, never read on
/// the request path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "d_proxy_url")]
    pub base_url: String,
    /// Per-request timeout for forwarded calls.  A call that exceeds it
    /// is abandoned and reported as a gateway timeout; there is no retry.
    #[serde(default = "d_10000")]
    pub timeout_ms: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: d_proxy_url(),
            timeout_ms: 10_000,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_proxy_url() -> String {
    "http://localhost:5001".into()
}
fn d_10000() -> u64 {
    10_000
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
