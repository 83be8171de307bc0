/// Shared error type used across all ArmorIQ admin crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    /// The proxy answered with a status code outside the expected set.
    /// `detail` is the proxy's parsed JSON error body, or a synthesized
    /// `{"error": ...}` object when the body was not JSON.
    #[error("proxy returned {status}")]
    Upstream {
        status: u16,
        detail: serde_json::Value,
    },

    /// The proxy answered with the expected status but a body that is
    /// not valid JSON.
    #[error("invalid JSON from proxy: {0}")]
    UpstreamProtocol(String),

    /// Configuration rejected at startup.
    #[error("config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
