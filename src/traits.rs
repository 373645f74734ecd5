//! Core PlayerSource trait

use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::{NormalizedPlayerData, PlayerId};

/// Something that can produce a normalized player record.
///
/// [`EnkaClient`](crate::EnkaClient) is the production implementation. The
/// request handler only sees this trait, so tests can swap in a scripted
/// source and count calls.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    /// Fetch and normalize one player. Must not touch any cache.
    async fn fetch_player(&self, player_id: &PlayerId) -> Result<NormalizedPlayerData, FetchError>;
}
