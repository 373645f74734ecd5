//! Enka.Network player API client.
//!
//! [`EnkaClient`] performs the full fetch-and-normalize step for one player:
//! bootstrap assets (once per process), call the profile endpoint, reject
//! empty profiles, then normalize.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::assets::{self, AssetBundle, AssetsConfig};
use crate::error::FetchError;
use crate::normalize::{NormalizeOptions, normalize};
use crate::telemetry;
use crate::traits::PlayerSource;
use crate::types::{EnkaProfile, NormalizedPlayerData, PlayerId};
use crate::{PaimonError, Result};

/// Default base URL of the Enka.Network API.
pub const DEFAULT_BASE_URL: &str = "https://enka.network";

/// Default upstream request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Enka.Network profile API.
///
/// Holds the asset bundle behind a [`OnceCell`]: the first caller loads it,
/// concurrent first callers wait on that same load, and a failed load leaves
/// the cell empty so the next call retries.
pub struct EnkaClient {
    http: Client,
    base_url: String,
    assets_config: AssetsConfig,
    assets: OnceCell<AssetBundle>,
    options: NormalizeOptions,
}

impl EnkaClient {
    /// Create a new builder.
    pub fn builder() -> EnkaClientBuilder {
        EnkaClientBuilder::new()
    }

    /// Load reference assets unless a previous call already did.
    pub async fn ensure_assets(&self) -> Result<&AssetBundle> {
        self.assets
            .get_or_try_init(|| async {
                info!(url = %self.assets_config.url, "bootstrapping assets (first time only)");
                let (bundle, source) = assets::load(&self.http, &self.assets_config).await?;
                metrics::counter!(telemetry::ASSET_BOOTSTRAPS_TOTAL, "source" => source.as_str())
                    .increment(1);
                info!(
                    source = source.as_str(),
                    characters = bundle.characters.len(),
                    "assets ready"
                );
                Ok::<_, PaimonError>(bundle)
            })
            .await
    }

    /// Whether assets have been loaded in this process.
    pub fn assets_ready(&self) -> bool {
        self.assets.initialized()
    }

    /// Fetch the raw profile for `player_id`.
    pub async fn fetch_profile(&self, player_id: &PlayerId) -> std::result::Result<EnkaProfile, FetchError> {
        let url = format!("{}/api/uid/{}/", self.base_url, player_id);
        let started = Instant::now();

        let result = self.request_profile(&url).await;

        metrics::histogram!(telemetry::UPSTREAM_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());
        let status = match &result {
            Ok(_) => "ok",
            Err(FetchError::NotFound) => "not_found",
            Err(FetchError::Upstream { .. }) => "error",
        };
        metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL, "status" => status).increment(1);

        result
    }

    async fn request_profile(&self, url: &str) -> std::result::Result<EnkaProfile, FetchError> {
        let response = self.http.get(url).send().await?;
        handle_response_errors(&response)?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| FetchError::upstream(None, format!("malformed profile response: {e}")))
    }
}

/// Map Enka's documented status codes to fetch outcomes.
fn handle_response_errors(response: &reqwest::Response) -> std::result::Result<(), FetchError> {
    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    let reason = match status.as_u16() {
        404 => return Err(FetchError::NotFound),
        400 => "wrong UID format",
        424 => "game maintenance or everything is broken after the update",
        429 => "rate-limited",
        500 => "general server error",
        503 => "service temporarily unavailable",
        _ => "unexpected response",
    };
    Err(FetchError::upstream(
        Some(status.as_u16()),
        format!("Enka.Network returned HTTP {status}: {reason}"),
    ))
}

#[async_trait]
impl PlayerSource for EnkaClient {
    async fn fetch_player(&self, player_id: &PlayerId) -> std::result::Result<NormalizedPlayerData, FetchError> {
        let assets = self.ensure_assets().await.map_err(|e| {
            warn!(error = %e, "asset bootstrap failed");
            FetchError::from(e)
        })?;

        let profile = self.fetch_profile(player_id).await?;
        if !profile.has_public_data() {
            debug!(%player_id, "profile has no public data");
            return Err(FetchError::NotFound);
        }

        Ok(normalize(player_id, &profile, assets, &self.options))
    }
}

/// Builder for [`EnkaClient`].
pub struct EnkaClientBuilder {
    base_url: String,
    assets: AssetsConfig,
    timeout: Option<Duration>,
    user_agent: String,
    options: NormalizeOptions,
}

impl EnkaClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            assets: AssetsConfig::default(),
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: crate::version::user_agent(),
            options: NormalizeOptions::default(),
        }
    }

    /// Override the API base URL (for testing with wiremock).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Configure where reference assets come from.
    pub fn assets(mut self, config: AssetsConfig) -> Self {
        self.assets = config;
        self
    }

    /// Per-request timeout for upstream calls. `None` waits indefinitely.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Enable build rating in character summaries.
    pub fn evaluate_builds(mut self, enabled: bool) -> Self {
        self.options.evaluate_builds = enabled;
        self
    }

    pub fn build(self) -> Result<EnkaClient> {
        let mut http = Client::builder().user_agent(self.user_agent);
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http
            .build()
            .map_err(|e| PaimonError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(EnkaClient {
            http,
            base_url: self.base_url,
            assets_config: self.assets,
            assets: OnceCell::new(),
            options: self.options,
        })
    }

    /// The HTTP client this builder would use, for asset maintenance commands.
    pub fn http_client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| PaimonError::Configuration(format!("failed to build HTTP client: {e}")))
    }
}

impl Default for EnkaClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
