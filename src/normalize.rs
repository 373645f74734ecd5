//! Mapping raw upstream records into [`NormalizedPlayerData`].
//!
//! Any field the upstream omits (or sends empty) gets a fixed placeholder,
//! so the output shape never depends on what the player chose to show.

use crate::assets::AssetBundle;
use crate::build_quality::BuildQuality;
use crate::types::{AvatarInfo, CharacterSummary, EnkaProfile, NormalizedPlayerData, PlayerId};

pub const UNKNOWN_PLAYER: &str = "Unknown Player";
pub const UNKNOWN: &str = "Unknown";
pub const NOT_CLEARED: &str = "Not cleared";
pub const NOT_AVAILABLE: &str = "N/A";

/// Site directory holding character portraits.
pub const ICON_DIR: &str = "/img/genshinchar";

const ICON_EXTENSION: &str = "webp";

/// Knobs for normalization.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// Rate builds instead of emitting the `"N/A"` placeholder.
    pub evaluate_builds: bool,
}

/// Build the normalized record for `player_id`.
pub fn normalize(
    player_id: &PlayerId,
    profile: &EnkaProfile,
    assets: &AssetBundle,
    options: &NormalizeOptions,
) -> NormalizedPlayerData {
    let info = profile.player_info.clone().unwrap_or_default();

    let spiral_abyss = match info.tower_floor_index {
        Some(floor) if floor > 0 => {
            format!("Floor {floor}-{}", info.tower_level_index.unwrap_or(0))
        }
        _ => NOT_CLEARED.to_string(),
    };

    let characters = profile
        .avatar_info_list
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|avatar| summarize_character(avatar, assets, options))
        .collect();

    NormalizedPlayerData {
        username: non_empty(info.nickname).unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
        signature: info.signature.unwrap_or_default(),
        player_id: player_id.to_string(),
        adventure_rank: info.level.unwrap_or(0),
        world_level: info.world_level.unwrap_or(0),
        achievements: info.finish_achievement_num.unwrap_or(0),
        spiral_abyss,
        namecard_id: info.name_card_id.unwrap_or(0),
        profile_picture_id: info
            .profile_picture
            .as_ref()
            .and_then(|pic| pic.resolved_id())
            .unwrap_or(0),
        show_name_card_id_list: info.show_name_card_id_list.unwrap_or_default(),
        characters,
        ip: NOT_AVAILABLE.to_string(),
    }
}

fn summarize_character(
    avatar: &AvatarInfo,
    assets: &AssetBundle,
    options: &NormalizeOptions,
) -> CharacterSummary {
    let name = assets
        .character_name(avatar.avatar_id, avatar.skill_depot_id)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string();

    let weapon = avatar
        .weapon()
        .and_then(|equip| equip.flat.name_text_map_hash.as_ref())
        .and_then(|hash| assets.text(hash))
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string();

    let (build_quality, build_icon) = if options.evaluate_builds {
        let quality = BuildQuality::evaluate(avatar);
        (quality.label().to_string(), quality.icon().to_string())
    } else {
        (NOT_AVAILABLE.to_string(), String::new())
    };

    CharacterSummary {
        icon_url: Some(icon_url(&name)),
        name,
        level: avatar.level().unwrap_or(0),
        constellation: avatar.constellation(),
        weapon,
        build_quality,
        build_icon,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Portrait file name for a display name.
///
/// Multi-word names use their last word (`"Kamisato Ayaka"` → `ayaka.webp`);
/// single words are used whole (`"Diluc"` → `diluc.webp`). Titled names are
/// not special-cased.
pub fn icon_file_name(display_name: &str) -> String {
    let stem = match display_name.split_whitespace().next_back() {
        Some(last) => last.to_lowercase(),
        None => display_name.replace(' ', "").to_lowercase(),
    };
    format!("{stem}.{ICON_EXTENSION}")
}

/// Site-local portrait path for a display name.
pub fn icon_url(display_name: &str) -> String {
    format!("{ICON_DIR}/{}", icon_file_name(display_name))
}
