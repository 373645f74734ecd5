//! Public types for the paimon API.
//!
//! - [`PlayerId`]: validated numeric player identifier.
//! - [`NormalizedPlayerData`] / [`CharacterSummary`]: the fixed-shape
//!   records served to the site.
//! - [`enka`]: raw, loosely-structured upstream records.

pub mod enka;
mod player;
mod player_id;

pub use enka::{AvatarInfo, EnkaProfile, Equipment, PlayerInfo, TextHash};
pub use player::{CharacterSummary, NormalizedPlayerData};
pub use player_id::PlayerId;
