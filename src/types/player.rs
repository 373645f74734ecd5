//! Normalized player records served to the site.

use serde::{Deserialize, Serialize};

/// Fixed-shape player profile built from an upstream record.
///
/// Every scalar field carries a placeholder when the upstream omitted it,
/// so consumers never see a partially populated record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPlayerData {
    /// In-game nickname, or `"Unknown Player"`.
    pub username: String,
    /// Profile signature, or `""`.
    pub signature: String,
    /// The identifier that was looked up.
    pub player_id: String,
    pub adventure_rank: u32,
    pub world_level: u32,
    pub achievements: u32,
    /// `"Floor {floor}-{chamber}"`, or `"Not cleared"`.
    pub spiral_abyss: String,
    pub namecard_id: u32,
    pub profile_picture_id: u32,
    pub show_name_card_id_list: Vec<u32>,
    /// Characters in the player's public showcase.
    pub characters: Vec<CharacterSummary>,
    /// Always `"N/A"`; kept for the site's existing payload shape.
    pub ip: String,
}

/// One showcased character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSummary {
    /// English display name, or `"Unknown"`.
    pub name: String,
    pub level: u32,
    pub constellation: u32,
    /// English weapon name, or `"Unknown"`.
    pub weapon: String,
    /// `"N/A"` unless build evaluation is enabled.
    pub build_quality: String,
    /// `""` unless build evaluation is enabled.
    pub build_icon: String,
    /// Site-local portrait path derived from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}
