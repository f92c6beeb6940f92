use super::error::InventoryError;
use super::pool::{self, Pool, PoolId};
use crate::item::{ItemKind, Stack, ToolClass};

pub const INVENTORY_SLOTS: usize = 24;
pub const HOTBAR_SLOTS: usize = 8;

/// Player-specific storage: the inventory grid plus the hotbar
///
/// Everything the player gains goes hotbar-first (see `add_item`);
/// everything the player spends comes out of the inventory first.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInventory {
    /// Main inventory (6 x 4)
    pub inventory: Pool,

    /// Hotbar (8 slots, the selected one is the held tool)
    pub hotbar: Pool,

    /// Currently selected hotbar slot (0-7)
    pub selected_hotbar_slot: usize,
}

impl PlayerInventory {
    /// Creates an empty player inventory
    pub fn new() -> Self {
        PlayerInventory {
            inventory: Pool::new(INVENTORY_SLOTS),
            hotbar: Pool::new(HOTBAR_SLOTS),
            selected_hotbar_slot: 0,
        }
    }

    /// Rebuilds from saved pools
    pub fn from_pools(inventory: Pool, hotbar: Pool) -> Self {
        PlayerInventory {
            inventory,
            hotbar,
            selected_hotbar_slot: 0,
        }
    }

    /// Sets the selected hotbar slot (0-7)
    pub fn set_hotbar_slot(&mut self, slot: usize) -> Result<(), InventoryError> {
        if slot >= self.hotbar.capacity() {
            return Err(InventoryError::InvalidSlot {
                pool: PoolId::Hotbar,
                index: slot,
            });
        }
        self.selected_hotbar_slot = slot;
        Ok(())
    }

    /// Gets the currently selected hotbar stack
    pub fn selected_stack(&self) -> Option<&Stack> {
        self.hotbar.slot(self.selected_hotbar_slot)
    }

    /// The kind held in the selected hotbar slot
    pub fn selected_tool(&self) -> Option<ItemKind> {
        self.selected_stack().map(|stack| stack.kind)
    }

    /// True if the held item belongs to the given tool class
    pub fn holds_tool(&self, class: ToolClass) -> bool {
        self.selected_tool()
            .is_some_and(|kind| kind.is_tool_class(class))
    }

    /// Uses up one of the held item (placing a campfire)
    pub fn consume_selected(&mut self) -> Option<ItemKind> {
        self.hotbar.decrement_slot(self.selected_hotbar_slot)
    }

    /// Total of a kind across both pools
    pub fn count_item(&self, kind: ItemKind) -> u32 {
        self.inventory.count_item(kind).saturating_add(self.hotbar.count_item(kind))
    }

    /// Checks if the player has at least `quantity` of an item
    pub fn has_item(&self, kind: ItemKind, quantity: u32) -> bool {
        self.count_item(kind) >= quantity
    }

    /// Quick-add (tries hotbar first, then inventory, then consolidates)
    pub fn add_item(&mut self, kind: ItemKind, quantity: u32) -> Result<(), InventoryError> {
        pool::add_with_fallback(&mut self.hotbar, &mut self.inventory, kind, quantity)
    }

    /// Removes items, draining the inventory before the hotbar
    ///
    /// Returns false (after draining everything) if there were fewer than
    /// `quantity`; callers check `has_item` first.
    pub fn remove_item(&mut self, kind: ItemKind, quantity: u32) -> bool {
        let from_inventory = quantity.min(self.inventory.count_item(kind));
        self.inventory.remove_amount(kind, from_inventory);
        self.hotbar.remove_amount(kind, quantity - from_inventory)
    }

    pub fn pool_mut(&mut self, id: PoolId) -> Option<&mut Pool> {
        match id {
            PoolId::Inventory => Some(&mut self.inventory),
            PoolId::Hotbar => Some(&mut self.hotbar),
            PoolId::Chest(_) => None,
        }
    }
}

impl Default for PlayerInventory {
    fn default() -> Self {
        Self::new()
    }
}
