//! HTTP handlers.
//!
//! `GET /api/enka-player?playerId=<digits>` walks a fixed sequence per
//! request: validate, probe the cache, fetch on miss, store on success.
//! The cache is the only state shared between requests.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::cache::PlayerCache;
use crate::error::FetchError;
use crate::telemetry;
use crate::traits::PlayerSource;
use crate::types::{NormalizedPlayerData, PlayerId};

/// Route of the player lookup endpoint.
pub const PLAYER_ROUTE: &str = "/api/enka-player";

/// Response header reporting whether the body came from cache.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

const INVALID_PLAYER_ID: &str = "Valid numeric Player ID is required";
const PLAYER_NOT_FOUND: &str = "Player not found or no public data available";
const FETCH_FAILED: &str = "Failed to fetch player data";

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<dyn PlayerCache>,
    pub source: Arc<dyn PlayerSource>,
    /// TTL applied to every cache write and advertised in `Cache-Control`.
    pub ttl: Duration,
}

impl AppState {
    pub fn new(cache: Arc<dyn PlayerCache>, source: Arc<dyn PlayerSource>, ttl: Duration) -> Self {
        Self { cache, source, ttl }
    }
}

/// Whether a lookup was served from cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub data: NormalizedPlayerData,
    pub cache_status: CacheStatus,
}

/// Cache-then-fetch for one validated identifier.
///
/// Cache failures degrade to a miss (on read) or a skipped write. Failed
/// fetches are never cached.
pub async fn lookup_player(state: &AppState, player_id: &PlayerId) -> Result<Lookup, FetchError> {
    match state.cache.get(player_id).await {
        Ok(Some(data)) => {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
            debug!(%player_id, "returning cached player data");
            return Ok(Lookup {
                data,
                cache_status: CacheStatus::Hit,
            });
        }
        Ok(None) => {
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
        }
        Err(e) => {
            metrics::counter!(telemetry::CACHE_ERRORS_TOTAL, "operation" => "get").increment(1);
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
            warn!(%player_id, error = %e, "cache read failed, treating as miss");
        }
    }

    info!(%player_id, "fetching fresh player data");
    let data = state.source.fetch_player(player_id).await?;

    if let Err(e) = state.cache.set(player_id, data.clone(), state.ttl).await {
        metrics::counter!(telemetry::CACHE_ERRORS_TOTAL, "operation" => "set").increment(1);
        warn!(%player_id, error = %e, "cache write failed, continuing");
    }

    Ok(Lookup {
        data,
        cache_status: CacheStatus::Miss,
    })
}

/// Error responses of the player endpoint.
#[derive(Debug)]
pub enum ApiError {
    InvalidPlayerId,
    Fetch(FetchError),
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        ApiError::Fetch(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidPlayerId => (StatusCode::BAD_REQUEST, json!({ "error": INVALID_PLAYER_ID })),
            ApiError::Fetch(FetchError::NotFound) => {
                (StatusCode::NOT_FOUND, json!({ "error": PLAYER_NOT_FOUND }))
            }
            ApiError::Fetch(FetchError::Upstream { status, message }) => {
                let status = status
                    .and_then(|code| StatusCode::from_u16(code).ok())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                error!(status = status.as_u16(), error = %message, "error fetching player data");
                (status, json!({ "error": FETCH_FAILED, "details": message }))
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Query parameter carrying the player identifier.
const PLAYER_ID_PARAM: &str = "playerId";

/// First `playerId` value of the query string; later repeats are ignored.
fn first_player_id(pairs: Vec<(String, String)>) -> Option<String> {
    pairs
        .into_iter()
        .find(|(key, _)| key == PLAYER_ID_PARAM)
        .map(|(_, value)| value)
}

/// GET /api/enka-player -- normalized player profile.
async fn enka_player(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let player_id = params
        .ok()
        .and_then(|Query(pairs)| first_player_id(pairs))
        .and_then(|raw| PlayerId::parse(&raw).ok())
        .ok_or(ApiError::InvalidPlayerId)?;

    let lookup = lookup_player(&state, &player_id).await?;

    let cache_control = HeaderValue::from_str(&format!("max-age={}", state.ttl.as_secs()))
        .unwrap_or_else(|_| HeaderValue::from_static("no-cache"));
    Ok((
        [
            (X_CACHE, HeaderValue::from_static(lookup.cache_status.as_str())),
            (header::CACHE_CONTROL, cache_control),
        ],
        Json(lookup.data),
    )
        .into_response())
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
}

/// GET /health -- liveness and build version.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::version::version_string(),
    })
}

/// Full application router with tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(PLAYER_ROUTE, get(enka_player))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
