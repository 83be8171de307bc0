pub mod config;

use clap::{Parser, Subcommand};

/// ArmorIQ Admin API — administrative facade for the ArmorIQ proxy.
#[derive(Debug, Parser)]
#[command(name = "armoriq-admin", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the admin API server (default when no subcommand is given).
    Serve,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path specified by
/// `ARMORIQ_ADMIN_CONFIG` (or `config.toml` by default), then apply
/// environment overrides.  Returns the parsed [`Config`] and the path
/// that was used.
///
/// `ARMORIQ_PROXY_URL`, when set and non-empty, overrides
/// `proxy.base_url`.
pub fn load_config() -> anyhow::Result<(aq_domain::config::Config, String)> {
    let config_path =
        std::env::var("ARMORIQ_ADMIN_CONFIG").unwrap_or_else(|_| "config.toml".into());

    let mut config = if std::path::Path::new(&config_path).exists() {
        let raw = std::fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
        toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))?
    } else {
        aq_domain::config::Config::default()
    };

    if let Ok(url) = std::env::var("ARMORIQ_PROXY_URL") {
        if !url.is_empty() {
            config.proxy.base_url = url;
        }
    }

    Ok((config, config_path))
}
