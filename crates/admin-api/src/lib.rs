//! `aq-admin-api` — the ArmorIQ admin facade server.
//!
//! A thin administrative REST surface over the ArmorIQ proxy: every
//! endpoint forwards one call to the proxy via [`aq_proxy_client`] and
//! mirrors its response, including upstream error codes.  See [`api`]
//! for the routes and [`cli`] for the binary's command surface.

pub mod api;
pub mod cli;
pub mod state;
