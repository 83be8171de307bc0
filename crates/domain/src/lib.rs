//! `aq-domain` — shared types for the ArmorIQ admin facade.
//!
//! Home of the [`config`] tree loaded from `config.toml`, the shared
//! [`error::Error`] enum used across all crates, and the structured
//! [`trace::TraceEvent`]s emitted on the proxy hot path.

pub mod config;
pub mod error;
pub mod trace;
