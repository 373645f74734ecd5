//! Paimon - player profile lookups for a Genshin Impact companion site
//!
//! This crate fetches a player's public showcase from Enka.Network,
//! normalizes it into a fixed-shape record, and serves it over HTTP with
//! a short-lived cache in front of the upstream.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use paimon::server::{AppState, router};
//! use paimon::{CacheConfig, EnkaClient, MemoryPlayerCache};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CacheConfig::default();
//!     let cache = Arc::new(MemoryPlayerCache::with_sweeper(&config));
//!     let client = Arc::new(EnkaClient::builder().build()?);
//!
//!     let app = router(AppState::new(cache, client, config.ttl));
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod assets;
pub mod build_quality;
pub mod cache;
pub mod client;
pub mod error;
pub mod normalize;
pub mod server;
pub mod telemetry;
pub mod traits;
pub mod types;
mod version;

// Re-export main types at crate root
pub use assets::{AssetBundle, AssetsConfig};
pub use cache::{CacheConfig, MemoryPlayerCache, PlayerCache};
pub use client::{EnkaClient, EnkaClientBuilder};
pub use error::{CacheError, FetchError, PaimonError, Result};
pub use normalize::NormalizeOptions;
pub use traits::PlayerSource;
pub use types::{CharacterSummary, NormalizedPlayerData, PlayerId};
pub use version::{PKG_VERSION, version_string};
