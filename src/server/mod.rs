//! HTTP service and daemon configuration.
//!
//! - `handler`: the axum router, player endpoint and health check
//! - `config`: TOML configuration and run mode

pub mod config;
pub mod handler;

pub use config::{Config, Mode};
pub use handler::{AppState, CacheStatus, Lookup, PLAYER_ROUTE, X_CACHE, lookup_player, router};
