//! Raw Enka.Network records.
//!
//! Mirrors the subset of `GET /api/uid/{uid}/` that normalization reads.
//! Every field is optional or defaulted: the upstream omits whole sections
//! for private showcases, and unknown fields are ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `propMap` key holding the character level.
pub const PROP_LEVEL: &str = "4001";

/// `fightPropMap` key holding crit rate as a fraction.
pub const FIGHT_PROP_CRIT_RATE: &str = "20";

/// `flat.itemType` of an equipped weapon.
pub const ITEM_WEAPON: &str = "ITEM_WEAPON";

/// `flat.itemType` of an equipped artifact.
pub const ITEM_RELIQUARY: &str = "ITEM_RELIQUARY";

/// Top-level profile response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnkaProfile {
    #[serde(default)]
    pub player_info: Option<PlayerInfo>,
    #[serde(default)]
    pub avatar_info_list: Option<Vec<AvatarInfo>>,
}

impl EnkaProfile {
    /// Whether the upstream returned any public data at all.
    pub fn has_public_data(&self) -> bool {
        self.player_info.is_some() || self.avatar_info_list.is_some()
    }
}

/// Public profile card.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub nickname: Option<String>,
    pub signature: Option<String>,
    /// Adventure rank.
    pub level: Option<u32>,
    pub world_level: Option<u32>,
    pub name_card_id: Option<u32>,
    pub finish_achievement_num: Option<u32>,
    pub tower_floor_index: Option<u32>,
    pub tower_level_index: Option<u32>,
    pub show_name_card_id_list: Option<Vec<u32>>,
    pub profile_picture: Option<ProfilePicture>,
}

/// Profile picture reference. Older payloads carry `avatarId`, newer ones `id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePicture {
    pub avatar_id: Option<u32>,
    pub id: Option<u32>,
}

impl ProfilePicture {
    pub fn resolved_id(&self) -> Option<u32> {
        self.avatar_id.or(self.id)
    }
}

/// One showcased character.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarInfo {
    #[serde(default)]
    pub avatar_id: u32,
    /// Distinguishes the Traveler's elemental variants.
    pub skill_depot_id: Option<u32>,
    #[serde(default)]
    pub prop_map: HashMap<String, PropValue>,
    /// One entry per unlocked constellation.
    pub talent_id_list: Option<Vec<u32>>,
    #[serde(default)]
    pub equip_list: Vec<Equipment>,
    #[serde(default)]
    pub fight_prop_map: HashMap<String, f64>,
}

impl AvatarInfo {
    /// Character level from `propMap`, if present and numeric.
    pub fn level(&self) -> Option<u32> {
        self.prop_map
            .get(PROP_LEVEL)
            .and_then(|prop| prop.val.as_deref())
            .and_then(|val| val.parse().ok())
    }

    pub fn constellation(&self) -> u32 {
        self.talent_id_list
            .as_ref()
            .map_or(0, |list| list.len() as u32)
    }

    /// The equipped weapon, if any.
    pub fn weapon(&self) -> Option<&Equipment> {
        self.equip_list
            .iter()
            .find(|equip| equip.flat.item_type.as_deref() == Some(ITEM_WEAPON))
    }

    /// Number of equipped artifacts.
    pub fn artifact_count(&self) -> usize {
        self.equip_list
            .iter()
            .filter(|equip| equip.flat.item_type.as_deref() == Some(ITEM_RELIQUARY))
            .count()
    }

    pub fn crit_rate(&self) -> f64 {
        self.fight_prop_map
            .get(FIGHT_PROP_CRIT_RATE)
            .copied()
            .unwrap_or(0.0)
    }
}

/// `propMap` entry. Values arrive as decimal strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropValue {
    #[serde(rename = "type")]
    pub kind: Option<u32>,
    pub ival: Option<String>,
    pub val: Option<String>,
}

/// Weapon or artifact slot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(default)]
    pub item_id: u32,
    #[serde(default)]
    pub flat: EquipmentFlat,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentFlat {
    pub name_text_map_hash: Option<TextHash>,
    pub item_type: Option<String>,
}

/// Key into the localization table.
///
/// The profile API sends these as strings, the asset store as numbers;
/// both normalize to the decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawTextHash", into = "String")]
pub struct TextHash(String);

impl TextHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<TextHash> for String {
    fn from(hash: TextHash) -> Self {
        hash.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTextHash {
    Text(String),
    Number(u64),
}

impl From<RawTextHash> for TextHash {
    fn from(raw: RawTextHash) -> Self {
        match raw {
            RawTextHash::Text(s) => TextHash(s),
            RawTextHash::Number(n) => TextHash(n.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "playerInfo": {
            "nickname": "Traveler",
            "level": 55,
            "worldLevel": 8,
            "nameCardId": 210001,
            "finishAchievementNum": 812,
            "towerFloorIndex": 12,
            "towerLevelIndex": 3,
            "showNameCardIdList": [210001, 210042],
            "profilePicture": { "id": 1 }
        },
        "avatarInfoList": [{
            "avatarId": 10000016,
            "propMap": { "4001": { "type": 4001, "ival": "90", "val": "90" } },
            "talentIdList": [1601, 1602],
            "fightPropMap": { "20": 0.62 },
            "equipList": [
                { "itemId": 11502, "flat": { "nameTextMapHash": "1438974835", "itemType": "ITEM_WEAPON" } },
                { "itemId": 77544, "flat": { "nameTextMapHash": "123", "itemType": "ITEM_RELIQUARY" } }
            ]
        }],
        "ttl": 60,
        "uid": "800000000"
    }"#;

    #[test]
    fn parses_profile_subset() {
        let profile: EnkaProfile = serde_json::from_str(SAMPLE).unwrap();
        let info = profile.player_info.as_ref().unwrap();
        assert_eq!(info.nickname.as_deref(), Some("Traveler"));
        assert_eq!(info.level, Some(55));
        assert_eq!(info.profile_picture.as_ref().unwrap().resolved_id(), Some(1));

        let avatar = &profile.avatar_info_list.as_ref().unwrap()[0];
        assert_eq!(avatar.level(), Some(90));
        assert_eq!(avatar.constellation(), 2);
        assert_eq!(avatar.artifact_count(), 1);
        assert!((avatar.crit_rate() - 0.62).abs() < f64::EPSILON);
        assert_eq!(
            avatar.weapon().unwrap().flat.name_text_map_hash,
            Some(TextHash::new("1438974835"))
        );
    }

    #[test]
    fn empty_object_has_no_public_data() {
        let profile: EnkaProfile = serde_json::from_str("{}").unwrap();
        assert!(!profile.has_public_data());
    }

    #[test]
    fn text_hash_accepts_numbers() {
        let hash: TextHash = serde_json::from_str("3762437019").unwrap();
        assert_eq!(hash.as_str(), "3762437019");
    }

    #[test]
    fn missing_equipment_means_no_weapon() {
        let avatar: AvatarInfo = serde_json::from_str(r#"{"avatarId": 10000002}"#).unwrap();
        assert!(avatar.weapon().is_none());
        assert_eq!(avatar.level(), None);
        assert_eq!(avatar.constellation(), 0);
    }
}
