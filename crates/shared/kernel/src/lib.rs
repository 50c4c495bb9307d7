//! Kernel utilities shared by the feature crates and the server.
//!
//! * [`config::load_config`] layers an optional config file with `MARCHE__*` environment overrides.
//! * [`security::AssetPolicy`] is the validated, immutable form of the asset serving configuration.
//! * [`server`] (feature `server`) holds the shared Axum state, the system routes and upload serving.
pub mod config;
pub mod prelude;
pub mod security;
#[cfg(feature = "server")]
pub mod server;

pub use marche_domain as domain;
