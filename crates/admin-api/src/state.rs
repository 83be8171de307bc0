use std::sync::Arc;

use anyhow::Context;

use aq_domain::config::{Config, ConfigSeverity};
use aq_domain::error::Error;
use aq_proxy_client::{create_provider, ProxyProvider};

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub proxy: Arc<dyn ProxyProvider>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Validate the config and wire up the proxy client.
    ///
    /// Warnings are logged and tolerated; any validation error aborts
    /// startup.
    pub fn from_config(config: Arc<Config>) -> anyhow::Result<Self> {
        // ── Config validation ────────────────────────────────────────
        let issues = config.validate();
        for issue in &issues {
            match issue.severity {
                ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
                ConfigSeverity::Error => tracing::error!("config: {issue}"),
            }
        }
        let error_count = issues
            .iter()
            .filter(|i| i.severity == ConfigSeverity::Error)
            .count();
        if error_count > 0 {
            return Err(Error::Config(format!(
                "config validation failed with {error_count} error(s)"
            ))
            .into());
        }

        // ── Proxy client ─────────────────────────────────────────────
        let proxy = create_provider(&config.proxy).context("creating proxy client")?;
        tracing::info!(
            url = %config.proxy.base_url,
            timeout_ms = config.proxy.timeout_ms,
            "proxy client ready"
        );

        Ok(Self { config, proxy })
    }
}
