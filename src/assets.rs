//! Reference assets used to name characters and items.
//!
//! The profile API identifies characters by avatar id and items by text-map
//! hash. Turning those into display names needs two tables from the Enka
//! asset store:
//!
//! - `characters.json`: avatar id (or `"{avatarId}-{skillDepotId}"` for the
//!   Traveler) → `NameTextMapHash`
//! - `loc.json`: per-language text-map hash → string; only `en` is kept
//!
//! # Persistence
//!
//! In development mode the fetched bundle is written to
//! `~/.cache/paimon/assets.json` and reused on the next cold start, so a
//! restart does not hit the asset store. Production always fetches.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::types::TextHash;
use crate::{PaimonError, Result};

/// Default base URL of the Enka asset store.
pub const DEFAULT_ASSETS_URL: &str =
    "https://raw.githubusercontent.com/EnkaNetwork/API-docs/master/store";

/// Current on-disk bundle format version.
const BUNDLE_VERSION: u32 = 1;

/// Where assets come from and whether they are persisted locally.
///
/// ```rust
/// # use paimon::AssetsConfig;
/// let config = AssetsConfig::default();
/// assert!(!config.persist);
/// assert!(config.cache_path.ends_with("assets.json"));
/// ```
#[derive(Debug, Clone)]
pub struct AssetsConfig {
    /// Base URL holding `characters.json` and `loc.json`.
    pub url: String,
    /// Local path of the persisted bundle.
    pub cache_path: PathBuf,
    /// Load from / save to `cache_path` during bootstrap.
    pub persist: bool,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ASSETS_URL.to_string(),
            cache_path: default_cache_path(),
            persist: false,
        }
    }
}

impl AssetsConfig {
    /// Create a config with a custom URL and default cache path.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Default cache path: `~/.cache/paimon/assets.json`.
pub fn default_cache_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("paimon")
        .join("assets.json")
}

/// Character table entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterAsset {
    #[serde(rename = "NameTextMapHash")]
    pub name_hash: TextHash,
}

/// Resolved reference data needed to name characters and weapons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetBundle {
    #[serde(default)]
    pub version: u32,
    /// Keyed by avatar id, or `"{avatarId}-{skillDepotId}"`.
    pub characters: HashMap<String, CharacterAsset>,
    /// English localization, keyed by text-map hash.
    pub names: HashMap<String, String>,
}

impl AssetBundle {
    /// English text for a text-map hash.
    pub fn text(&self, hash: &TextHash) -> Option<&str> {
        self.names.get(hash.as_str()).map(String::as_str)
    }

    /// English display name of a character.
    ///
    /// Tries the skill-depot-qualified key first so each Traveler element
    /// resolves to its own entry.
    pub fn character_name(&self, avatar_id: u32, skill_depot_id: Option<u32>) -> Option<&str> {
        let qualified = skill_depot_id
            .map(|depot| format!("{avatar_id}-{depot}"))
            .and_then(|key| self.characters.get(&key));
        qualified
            .or_else(|| self.characters.get(&avatar_id.to_string()))
            .and_then(|asset| self.text(&asset.name_hash))
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty() && self.names.is_empty()
    }
}

#[derive(Deserialize)]
struct LocTable {
    #[serde(default)]
    en: HashMap<String, String>,
}

// ============================================================================
// Local file cache
// ============================================================================

/// Load a persisted bundle from disk.
///
/// Returns `None` on missing or corrupt file (logs a warning on corrupt).
pub fn load_cached(path: &Path) -> Option<AssetBundle> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read cached assets");
            return None;
        }
    };
    match serde_json::from_str::<AssetBundle>(&content) {
        Ok(bundle) if bundle.version == BUNDLE_VERSION => Some(bundle),
        Ok(bundle) => {
            warn!(path = %path.display(), version = bundle.version, "unsupported cached asset version");
            None
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt cached assets");
            None
        }
    }
}

/// Save a bundle to the local cache (atomic write via tmp + rename).
pub fn save_cache(path: &Path, bundle: &AssetBundle) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            PaimonError::Asset(format!(
                "failed to create cache dir {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string(bundle)?;
    std::fs::write(&tmp_path, json).map_err(|e| {
        PaimonError::Asset(format!(
            "failed to write cache file {}: {e}",
            tmp_path.display()
        ))
    })?;
    std::fs::rename(&tmp_path, path).map_err(|e| {
        PaimonError::Asset(format!(
            "failed to rename cache file {} → {}: {e}",
            tmp_path.display(),
            path.display()
        ))
    })?;

    Ok(())
}

// ============================================================================
// Remote fetch
// ============================================================================

async fn fetch_json<T: serde::de::DeserializeOwned>(http: &reqwest::Client, url: &str) -> Result<T> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(PaimonError::Api {
            status: status.as_u16(),
            message: format!("asset fetch from {url} returned HTTP {status}"),
        });
    }
    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|e| PaimonError::Asset(format!("failed to parse {url}: {e}")))
}

/// Fetch both asset tables from the store at `base_url`.
pub async fn fetch_remote(http: &reqwest::Client, base_url: &str) -> Result<AssetBundle> {
    let base = base_url.trim_end_matches('/');
    let characters_url = format!("{base}/characters.json");
    let loc_url = format!("{base}/loc.json");

    let (characters, loc) = futures_util::future::try_join(
        fetch_json::<HashMap<String, CharacterAsset>>(http, &characters_url),
        fetch_json::<LocTable>(http, &loc_url),
    )
    .await?;

    if characters.is_empty() {
        return Err(PaimonError::Asset(format!(
            "{characters_url} contained no characters"
        )));
    }

    Ok(AssetBundle {
        version: BUNDLE_VERSION,
        characters,
        names: loc.en,
    })
}

/// Fetch assets and save them to the local cache regardless of mode.
///
/// This is the entrypoint used by `paimon update-assets`.
pub async fn update_assets(http: &reqwest::Client, config: &AssetsConfig) -> Result<AssetBundle> {
    info!(url = %config.url, "fetching asset store");
    let bundle = fetch_remote(http, &config.url).await?;
    save_cache(&config.cache_path, &bundle)?;
    info!(
        characters = bundle.characters.len(),
        names = bundle.names.len(),
        path = %config.cache_path.display(),
        "saved assets to cache"
    );
    Ok(bundle)
}

/// Where a bootstrapped bundle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSource {
    Disk,
    Remote,
}

impl AssetSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetSource::Disk => "disk",
            AssetSource::Remote => "remote",
        }
    }
}

/// Load assets for a cold start.
///
/// With `persist` set, a readable local bundle wins and a freshly fetched
/// one is written back; a failed write is logged, not returned.
pub async fn load(http: &reqwest::Client, config: &AssetsConfig) -> Result<(AssetBundle, AssetSource)> {
    if config.persist {
        if let Some(bundle) = load_cached(&config.cache_path) {
            return Ok((bundle, AssetSource::Disk));
        }
    }

    let bundle = fetch_remote(http, &config.url).await?;

    if config.persist {
        if let Err(e) = save_cache(&config.cache_path, &bundle) {
            warn!(path = %config.cache_path.display(), error = %e, "failed to persist assets");
        }
    }

    Ok((bundle, AssetSource::Remote))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bundle() -> AssetBundle {
        let mut characters = HashMap::new();
        characters.insert(
            "10000016".to_string(),
            CharacterAsset {
                name_hash: TextHash::new("1"),
            },
        );
        characters.insert(
            "10000007-704".to_string(),
            CharacterAsset {
                name_hash: TextHash::new("2"),
            },
        );
        characters.insert(
            "10000007".to_string(),
            CharacterAsset {
                name_hash: TextHash::new("3"),
            },
        );
        let names = HashMap::from([
            ("1".to_string(), "Diluc".to_string()),
            ("2".to_string(), "Lumine (Anemo)".to_string()),
            ("3".to_string(), "Lumine".to_string()),
        ]);
        AssetBundle {
            version: BUNDLE_VERSION,
            characters,
            names,
        }
    }

    #[test]
    fn resolves_plain_character() {
        assert_eq!(sample_bundle().character_name(10000016, None), Some("Diluc"));
    }

    #[test]
    fn skill_depot_key_takes_precedence() {
        let bundle = sample_bundle();
        assert_eq!(
            bundle.character_name(10000007, Some(704)),
            Some("Lumine (Anemo)")
        );
        assert_eq!(bundle.character_name(10000007, Some(999)), Some("Lumine"));
    }

    #[test]
    fn unknown_character_is_none() {
        assert_eq!(sample_bundle().character_name(1, None), None);
    }

    #[test]
    fn parses_store_character_table() {
        let json = r#"{"10000002": {"Element": "Ice", "NameTextMapHash": 3762437019, "SideIconName": "x"}}"#;
        let table: HashMap<String, CharacterAsset> = serde_json::from_str(json).unwrap();
        assert_eq!(table["10000002"].name_hash.as_str(), "3762437019");
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.json");

        save_cache(&path, &sample_bundle()).unwrap();
        let loaded = load_cached(&path).unwrap();
        assert_eq!(loaded.character_name(10000016, None), Some("Diluc"));
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("nested").join("assets.json");

        save_cache(&path, &sample_bundle()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn load_nonexistent_returns_none() {
        assert!(load_cached(Path::new("/nonexistent/path/assets.json")).is_none());
    }

    #[test]
    fn load_corrupt_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.json");
        std::fs::write(&path, "this is not valid json").unwrap();

        assert!(load_cached(&path).is_none());
    }

    #[test]
    fn load_wrong_version_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.json");
        std::fs::write(&path, r#"{"version": 99, "characters": {}, "names": {}}"#).unwrap();

        assert!(load_cached(&path).is_none());
    }

    #[test]
    fn default_config_does_not_persist() {
        let config = AssetsConfig::default();
        assert_eq!(config.url, DEFAULT_ASSETS_URL);
        assert!(!config.persist);
    }
}
