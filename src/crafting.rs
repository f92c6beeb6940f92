//! Crafting system - recipes that turn gathered materials into items
//!
//! Recipes are keyed by their output (one recipe per output kind).
//! Affordability is checked against the combined contents of the player's
//! inventory and hotbar; ingredients are taken from the inventory first.
//!
//! # Rust Learning Notes
//!
//! `craft` works on a clone of the player's pools and only writes the
//! clone back once every step has succeeded. That makes the whole craft
//! all-or-nothing without any undo bookkeeping: on error the clone is
//! simply dropped.

use crate::inventory::{to_count_map, InventoryError, PlayerInventory, Pool};
use crate::item::ItemKind;
use tracing::{debug, info};

/// A crafting recipe that transforms input items into one output item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Items required as input (item kind and count)
    pub inputs: Vec<(ItemKind, u32)>,
    /// Item produced as output
    pub output: ItemKind,
}

impl Recipe {
    pub fn new(output: ItemKind, inputs: Vec<(ItemKind, u32)>) -> Self {
        Recipe { inputs, output }
    }

    /// Check if the recipe can be crafted from the given pools
    pub fn is_affordable(&self, pools: &[&Pool]) -> bool {
        let available = to_count_map(pools);
        self.inputs.iter().all(|(kind, required)| {
            available.get(kind).copied().unwrap_or(0) >= *required
        })
    }
}

/// The static recipe table
#[derive(Debug, Clone)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    /// The game's recipes:
    /// - Plank: 2 wood
    /// - Wooden Pickaxe: 3 wood + 2 planks
    /// - Stone Sword: 2 stone + 1 plank
    /// - Campfire: 4 stone + 3 wood
    pub fn standard() -> Self {
        RecipeBook {
            recipes: vec![
                Recipe::new(ItemKind::Plank, vec![(ItemKind::Wood, 2)]),
                Recipe::new(
                    ItemKind::WoodenPickaxe,
                    vec![(ItemKind::Wood, 3), (ItemKind::Plank, 2)],
                ),
                Recipe::new(
                    ItemKind::StoneSword,
                    vec![(ItemKind::Stone, 2), (ItemKind::Plank, 1)],
                ),
                Recipe::new(
                    ItemKind::Campfire,
                    vec![(ItemKind::Stone, 4), (ItemKind::Wood, 3)],
                ),
            ],
        }
    }

    /// Looks up the recipe producing `output`
    pub fn get(&self, output: ItemKind) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.output == output)
    }

    /// All recipes in display order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// True iff a recipe for `output` exists and every ingredient is covered
    pub fn can_craft(&self, output: ItemKind, pools: &[&Pool]) -> bool {
        self.get(output)
            .is_some_and(|recipe| recipe.is_affordable(pools))
    }

    /// Crafts one `output`, consuming ingredients from the player
    ///
    /// Ingredients are drained from the inventory pool before the hotbar;
    /// the output goes hotbar-first. On any error the player is unchanged.
    pub fn craft(
        &self,
        output: ItemKind,
        player: &mut PlayerInventory,
    ) -> Result<ItemKind, InventoryError> {
        let recipe = self
            .get(output)
            .ok_or(InventoryError::UnknownRecipe(output))?;

        if !self.can_craft(output, &[&player.inventory, &player.hotbar]) {
            debug!("Cannot craft {}: missing materials", output);
            return Err(InventoryError::InsufficientMaterials(output));
        }

        let mut scratch = player.clone();
        for (kind, amount) in &recipe.inputs {
            if !scratch.remove_item(*kind, *amount) {
                return Err(InventoryError::InsufficientMaterials(output));
            }
        }
        scratch.add_item(output, 1)?;

        *player = scratch;
        info!("Crafted {}", output);
        Ok(output)
    }
}

impl Default for RecipeBook {
    fn default() -> Self {
        Self::standard()
    }
}
