//! Configuration loading for paimond and the paimon CLI.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.paimon/config.toml` (user)
//! 3. `/etc/paimon/config.toml` (system)
//!
//! With no file present the built-in defaults apply. The run mode comes
//! from the `PAIMON_ENV` environment variable, not the file.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::assets::{AssetsConfig, DEFAULT_ASSETS_URL, default_cache_path};
use crate::cache::CacheConfig;
use crate::client::{DEFAULT_BASE_URL, EnkaClient, EnkaClientBuilder};
use crate::{PaimonError, Result};

/// Environment variable selecting the run mode.
pub const MODE_ENV_VAR: &str = "PAIMON_ENV";

/// Development or production.
///
/// Only affects whether bootstrap assets are persisted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Development,
    #[default]
    Production,
}

impl Mode {
    /// Read the mode from `PAIMON_ENV`; anything but `development`/`dev`
    /// is production.
    pub fn from_env() -> Self {
        Self::parse(std::env::var(MODE_ENV_VAR).ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("development") || v.eq_ignore_ascii_case("dev") => {
                Mode::Development
            }
            _ => Mode::Production,
        }
    }

    pub fn persists_assets(&self) -> bool {
        matches!(self, Mode::Development)
    }
}

/// Daemon configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub normalize: NormalizeSection,
    #[serde(default)]
    pub assets: AssetsSection,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000).
    #[serde(default = "default_address")]
    pub address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// Enka.Network endpoints and client behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_assets_url")]
    pub assets_url: String,
    /// Per-request timeout in seconds; 0 disables it (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            assets_url: default_assets_url(),
            timeout_secs: default_timeout(),
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_assets_url() -> String {
    DEFAULT_ASSETS_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// `[cache]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            max_entries: default_max_entries(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}

fn default_max_entries() -> u64 {
    10_000
}

fn default_sweep_interval() -> u64 {
    60
}

impl From<CacheSection> for CacheConfig {
    fn from(section: CacheSection) -> Self {
        CacheConfig::new()
            .ttl(Duration::from_secs(section.ttl_secs))
            .max_entries(section.max_entries)
            .sweep_interval(Duration::from_secs(section.sweep_interval_secs))
    }
}

/// `[normalize]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NormalizeSection {
    #[serde(default)]
    pub evaluate_builds: bool,
}

/// `[assets]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetsSection {
    /// Persisted bundle location (default: `~/.cache/paimon/assets.json`).
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path must exist. Without one, the user then system file
    /// is used, falling back to defaults when neither exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                info!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PaimonError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            PaimonError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(PaimonError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".paimon").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        let system_config = PathBuf::from("/etc/paimon/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// Asset settings for the given mode.
    pub fn assets_config(&self, mode: Mode) -> AssetsConfig {
        AssetsConfig {
            url: self.upstream.assets_url.clone(),
            cache_path: self
                .assets
                .cache_path
                .clone()
                .unwrap_or_else(default_cache_path),
            persist: mode.persists_assets(),
        }
    }

    /// Cache settings.
    pub fn cache_config(&self) -> CacheConfig {
        self.cache.clone().into()
    }

    /// Client builder populated from this configuration.
    pub fn client_builder(&self, mode: Mode) -> EnkaClientBuilder {
        let timeout = match self.upstream.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        let mut builder = EnkaClient::builder()
            .base_url(&self.upstream.base_url)
            .assets(self.assets_config(mode))
            .timeout(timeout)
            .evaluate_builds(self.normalize.evaluate_builds);
        if let Some(ref agent) = self.upstream.user_agent {
            builder = builder.user_agent(agent);
        }
        builder
    }
}
