//! Save data types for Nomads
//!
//! This module defines the on-disk shape of a save. It is one flat JSON
//! document: the player's two pools, every world entity list and the
//! survival/clock scalars. Entities are stored as small plain structs
//! rather than as the runtime types, so the file format does not change
//! when runtime-only state (timers, AI state) does.

use crate::inventory::Pool;
use crate::item::ItemKind;
use crate::world::{Campfire, Cow, Lake, LooseItem, Rock, WaterTile};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current save file version
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// The root save file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    #[serde(default = "default_version")]
    pub version: u32,

    /// RFC 3339 timestamp, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,

    pub player: PositionData,
    pub inventory_slots: Pool,
    pub hotbar_slots: Pool,
    pub rocks: Vec<RockData>,
    pub items: Vec<ItemData>,
    pub campfires: Vec<PositionData>,
    pub lakes: Vec<Vec<TileData>>,
    pub camps: Vec<CampData>,
    pub cows: Vec<PositionData>,
    pub time_of_day: f64,
    pub hunger: f64,
    pub thirst: f64,
}

fn default_version() -> u32 {
    CURRENT_SAVE_VERSION
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionData {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileData {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RockData {
    pub x: i32,
    pub y: i32,
    pub mined: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemData {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: ItemKind,
}

/// A camp and its chest
///
/// Older saves have no `loot`; those camps get fresh loot on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampData {
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loot: Option<Pool>,
}

/// Error types for save/load operations
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid save version: {0}")]
    InvalidVersion(u32),

    #[error("Corrupted save data: {0}")]
    CorruptedData(String),
}

impl From<&Rock> for RockData {
    fn from(rock: &Rock) -> Self {
        RockData {
            x: rock.x,
            y: rock.y,
            mined: rock.is_mined(),
        }
    }
}

impl From<RockData> for Rock {
    fn from(data: RockData) -> Self {
        Rock::with_mined(data.x, data.y, data.mined)
    }
}

impl From<&LooseItem> for ItemData {
    fn from(item: &LooseItem) -> Self {
        ItemData {
            x: item.x,
            y: item.y,
            kind: item.kind,
        }
    }
}

impl From<ItemData> for LooseItem {
    fn from(data: ItemData) -> Self {
        LooseItem::new(data.x, data.y, data.kind)
    }
}

impl From<&Cow> for PositionData {
    fn from(cow: &Cow) -> Self {
        PositionData { x: cow.x, y: cow.y }
    }
}

impl From<&Campfire> for PositionData {
    fn from(fire: &Campfire) -> Self {
        PositionData {
            x: fire.x as f64,
            y: fire.y as f64,
        }
    }
}

impl From<&Lake> for Vec<TileData> {
    fn from(lake: &Lake) -> Self {
        lake.tiles
            .iter()
            .map(|tile| TileData { x: tile.x, y: tile.y })
            .collect()
    }
}

impl TileData {
    pub fn into_tile(self, grid_size: i32) -> WaterTile {
        WaterTile::new(self.x, self.y, grid_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Stack;

    #[test]
    fn test_item_data_uses_type_key() {
        let data = ItemData {
            x: 1.5,
            y: 2.0,
            kind: ItemKind::Wood,
        };
        let json = serde_json::to_value(data).unwrap();
        assert_eq!(json["type"], "Wood");
    }

    #[test]
    fn test_camp_without_loot_key() {
        let camp: CampData = serde_json::from_str(r#"{"x": 64, "y": 128}"#).unwrap();
        assert_eq!(camp.loot, None);
    }

    #[test]
    fn test_camp_loot_is_slot_array() {
        let camp = CampData {
            x: 0,
            y: 0,
            loot: Some(Pool::from_slots(vec![Some(Stack::new(ItemKind::Meat, 2)), None])),
        };
        let json = serde_json::to_value(&camp).unwrap();
        assert_eq!(json["loot"][0]["item"], "Meat");
        assert_eq!(json["loot"][0]["count"], 2);
        assert!(json["loot"][1].is_null());
    }

    #[test]
    fn test_rock_conversion_keeps_mined_flag() {
        let rock = Rock::with_mined(64, 128, true);
        let back: Rock = RockData::from(&rock).into();
        assert_eq!(back, rock);
    }
}
