//! Coarse build rating for a showcased character.

use crate::types::AvatarInfo;

/// Rating derived from equipped artifacts and crit rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildQuality {
    WellBuilt,
    Average,
    NeedsImprovement,
}

impl BuildQuality {
    /// Rate a character: a full artifact set with over 50% crit rate is
    /// well built, three or more artifacts is average.
    pub fn evaluate(avatar: &AvatarInfo) -> Self {
        let artifacts = avatar.artifact_count();
        if artifacts >= 5 && avatar.crit_rate() > 0.5 {
            BuildQuality::WellBuilt
        } else if artifacts >= 3 {
            BuildQuality::Average
        } else {
            BuildQuality::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BuildQuality::WellBuilt => "Well Built",
            BuildQuality::Average => "Average",
            BuildQuality::NeedsImprovement => "Needs Improvement",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BuildQuality::WellBuilt => "✅",
            BuildQuality::Average => "⚠️",
            BuildQuality::NeedsImprovement => "❌",
        }
    }
}
