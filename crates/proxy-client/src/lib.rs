//! `aq-proxy-client` — HTTP client crate for the ArmorIQ proxy.
//!
//! Provides the [`ProxyProvider`] trait that abstracts over the proxy's
//! admin-facing API, a production REST implementation
//! ([`RestProxyClient`]), and the typed request DTOs forwarded on policy
//! writes.
//!
//! Every trait method is one HTTP round trip: the client validates the
//! proxy's status code against the single expected code for that route,
//! decodes the JSON body (if any), and maps failures onto the shared
//! `aq_domain::error::Error` taxonomy.  There are no retries.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use aq_domain::config::ProxyConfig;
//! use aq_proxy_client::{ProxyProvider, RestProxyClient};
//!
//! # async fn example() -> aq_domain::error::Result<()> {
//! let cfg = ProxyConfig::default();
//! let client = RestProxyClient::new(&cfg)?;
//!
//! let policies = client.list_policies().await?;
//! println!("policies: {policies:?}");
//! # Ok(())
//! # }
//! ```

pub mod provider;
pub mod rest;
pub mod types;

// ── Re-exports for ergonomic imports ─────────────────────────────────

pub use provider::ProxyProvider;
pub use rest::{from_reqwest, Expected, RestProxyClient};
pub use types::{Permissions, PolicyCreate, PolicyUpdate};

use std::sync::Arc;

use aq_domain::config::ProxyConfig;
use aq_domain::error::Result;

/// Build the REST-backed [`ProxyProvider`] used by the admin server.
///
/// The concrete client is returned behind `Arc<dyn ProxyProvider>` so
/// handlers and tests can swap in other implementations.
pub fn create_provider(cfg: &ProxyConfig) -> Result<Arc<dyn ProxyProvider>> {
    let client = RestProxyClient::new(cfg)?;
    Ok(Arc::new(client))
}
