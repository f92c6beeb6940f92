use serde::{Deserialize, Serialize};
use std::fmt;

/// Every kind of item that exists in the game
///
/// The serialized form is the human-readable name ("Wooden Pickaxe"), which
/// is also what the save file stores in each slot's `item` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    Wood,
    Stone,
    Plank,
    Meat,
    Leather,
    Water,
    #[serde(rename = "Wooden Pickaxe")]
    WoodenPickaxe,
    #[serde(rename = "Stone Sword")]
    StoneSword,
    Campfire,
}

/// Tool classes used to gate world interactions
///
/// Gating checks the class, never the concrete kind, so a future
/// stone pickaxe only needs a new `ItemKind` arm in `tool_class`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolClass {
    /// Mines rocks
    Pickaxe,
    /// Damages wildlife
    Sword,
    /// Placed into the world (campfire)
    Placeable,
}

impl ItemKind {
    /// All kinds in declaration order
    #[cfg(test)]
    pub const ALL: [ItemKind; 9] = [
        ItemKind::Wood,
        ItemKind::Stone,
        ItemKind::Plank,
        ItemKind::Meat,
        ItemKind::Leather,
        ItemKind::Water,
        ItemKind::WoodenPickaxe,
        ItemKind::StoneSword,
        ItemKind::Campfire,
    ];

    /// Display name, identical to the save-file name
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Wood => "Wood",
            ItemKind::Stone => "Stone",
            ItemKind::Plank => "Plank",
            ItemKind::Meat => "Meat",
            ItemKind::Leather => "Leather",
            ItemKind::Water => "Water",
            ItemKind::WoodenPickaxe => "Wooden Pickaxe",
            ItemKind::StoneSword => "Stone Sword",
            ItemKind::Campfire => "Campfire",
        }
    }

    /// Which tool class this item belongs to, if any
    pub fn tool_class(&self) -> Option<ToolClass> {
        match self {
            ItemKind::WoodenPickaxe => Some(ToolClass::Pickaxe),
            ItemKind::StoneSword => Some(ToolClass::Sword),
            ItemKind::Campfire => Some(ToolClass::Placeable),
            _ => None,
        }
    }

    pub fn is_tool_class(&self, class: ToolClass) -> bool {
        self.tool_class() == Some(class)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ItemKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
            assert_eq!(serde_json::from_str::<ItemKind>(&json).unwrap(), kind);
        }
        assert!(serde_json::from_str::<ItemKind>("\"Diamond\"").is_err());
    }

    #[test]
    fn test_serialized_name_matches_display_name() {
        let json = serde_json::to_string(&ItemKind::WoodenPickaxe).unwrap();
        assert_eq!(json, "\"Wooden Pickaxe\"");

        let kind: ItemKind = serde_json::from_str("\"Stone Sword\"").unwrap();
        assert_eq!(kind, ItemKind::StoneSword);
    }

    #[test]
    fn test_tool_classes() {
        assert!(ItemKind::WoodenPickaxe.is_tool_class(ToolClass::Pickaxe));
        assert!(ItemKind::StoneSword.is_tool_class(ToolClass::Sword));
        assert!(ItemKind::Campfire.is_tool_class(ToolClass::Placeable));
        assert_eq!(ItemKind::Wood.tool_class(), None);
    }
}
