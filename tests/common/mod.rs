//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;

use paimon::server::{AppState, router};
use paimon::{
    CacheConfig, CacheError, CharacterSummary, FetchError, MemoryPlayerCache, NormalizedPlayerData,
    PlayerCache, PlayerId, PlayerSource,
};

pub const TTL: Duration = Duration::from_secs(300);

/// A normalized record resembling the upstream's answer for `player_id`.
pub fn sample_player(player_id: &str) -> NormalizedPlayerData {
    NormalizedPlayerData {
        username: "Traveler".to_string(),
        signature: "Ad astra abyssosque".to_string(),
        player_id: player_id.to_string(),
        adventure_rank: 55,
        world_level: 8,
        achievements: 812,
        spiral_abyss: "Floor 12-3".to_string(),
        namecard_id: 210001,
        profile_picture_id: 10000002,
        show_name_card_id_list: vec![210001],
        characters: vec![
            character("Kamisato Ayaka", "ayaka"),
            character("Diluc", "diluc"),
        ],
        ip: "N/A".to_string(),
    }
}

fn character(name: &str, icon: &str) -> CharacterSummary {
    CharacterSummary {
        name: name.to_string(),
        level: 90,
        constellation: 0,
        weapon: "Unknown".to_string(),
        build_quality: "N/A".to_string(),
        build_icon: String::new(),
        icon_url: Some(format!("/img/genshinchar/{icon}.webp")),
    }
}

/// Player source that replays a fixed outcome and counts calls.
pub struct ScriptedSource {
    outcome: Mutex<Result<NormalizedPlayerData, FetchError>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn ok(data: NormalizedPlayerData) -> Arc<Self> {
        Self::with(Ok(data))
    }

    pub fn failing(err: FetchError) -> Arc<Self> {
        Self::with(Err(err))
    }

    fn with(outcome: Result<NormalizedPlayerData, FetchError>) -> Arc<Self> {
        Arc::new(Self {
            outcome: Mutex::new(outcome),
            calls: AtomicUsize::new(0),
        })
    }

    /// Change what subsequent calls return.
    pub async fn set_outcome(&self, outcome: Result<NormalizedPlayerData, FetchError>) {
        *self.outcome.lock().await = outcome;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayerSource for ScriptedSource {
    async fn fetch_player(&self, _player_id: &PlayerId) -> Result<NormalizedPlayerData, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.lock().await.clone()
    }
}

/// Cache wrapper that counts operations on an inner cache.
pub struct CountingCache {
    inner: MemoryPlayerCache,
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl CountingCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryPlayerCache::new(&CacheConfig::default()),
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
        })
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlayerCache for CountingCache {
    async fn get(&self, key: &PlayerId) -> Result<Option<NormalizedPlayerData>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn set(
        &self,
        key: &PlayerId,
        value: NormalizedPlayerData,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, ttl).await
    }
}

/// Cache whose back-end is always unreachable.
pub struct UnreachableCache;

#[async_trait]
impl PlayerCache for UnreachableCache {
    async fn get(&self, _key: &PlayerId) -> Result<Option<NormalizedPlayerData>, CacheError> {
        Err(CacheError("connection refused".to_string()))
    }

    async fn set(
        &self,
        _key: &PlayerId,
        _value: NormalizedPlayerData,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        Err(CacheError("connection refused".to_string()))
    }
}

pub fn build_app(cache: Arc<dyn PlayerCache>, source: Arc<dyn PlayerSource>) -> Router {
    router(AppState::new(cache, source, TTL))
}

/// Issue a GET against the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn header<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
}
