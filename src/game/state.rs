//! The whole game, minus the window
//!
//! `GameState` owns every pool and entity list and is the only thing that
//! mutates them. The loop calls `tick` once per frame and the discrete
//! actions (hotbar keys, eat/drink, crafting clicks, drags) in between.

use super::types::{FrameInput, Panels};
use crate::config::GameConfig;
use crate::crafting::RecipeBook;
use crate::day_night::DayNightCycle;
use crate::interaction::{InteractionEvent, Interactions, Reach, TickReport};
use crate::inventory::player::{HOTBAR_SLOTS, INVENTORY_SLOTS};
use crate::inventory::transfer::DraggedStack;
use crate::inventory::{DragSession, InventoryError, PlayerInventory, Pool, PoolId, PoolSet, SlotRef};
use crate::item::ItemKind;
use crate::player::{Player, PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::save::{CampData, PositionData, SaveError, SaveFile, CURRENT_SAVE_VERSION};
use crate::survival::{Survival, CAMPFIRE_WARMTH_RADIUS};
use crate::world::{generation, Camp, Campfire, Cow, Lake, World};
use rand::rngs::StdRng;
use tracing::{debug, info};

pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub inventory: PlayerInventory,
    pub world: World,
    pub interactions: Interactions,
    pub drag: DragSession,
    pub recipes: RecipeBook,
    pub survival: Survival,
    pub clock: DayNightCycle,
    pub panels: Panels,
    rng: StdRng,
}

/// Pools a drag can reach right now: the player's two plus the open chest
fn pool_set<'a>(inventory: &'a mut PlayerInventory, world: &'a mut World) -> PoolSet<'a> {
    let chest = world
        .camps
        .iter_mut()
        .enumerate()
        .find(|(_, camp)| camp.is_open)
        .map(|(index, camp)| (index, &mut camp.chest));
    PoolSet::new(inventory, chest)
}

/// Puts a held stack back into a snapshot of its origin pool
fn write_back_held(pool: &mut Pool, held: &DraggedStack) {
    let index = pool.release().unwrap_or(held.origin.index);
    if let Some(rejected) = pool.merge_into_slot(index, held.stack) {
        debug!("Origin slot {} taken in snapshot, stowing held stack", index);
        let _ = pool.add_stack(rejected.kind, rejected.count);
    }
}

impl GameState {
    /// A freshly generated world with the player at the map centre
    pub fn new_world(config: GameConfig, mut rng: StdRng) -> Self {
        let world = generation::generate(&config, &mut rng);
        let player = Player::new(
            (config.map_width / 2) as f64 - PLAYER_WIDTH as f64 / 2.0,
            (config.map_height / 2) as f64 - PLAYER_HEIGHT as f64 / 2.0,
        );

        GameState {
            config,
            player,
            inventory: PlayerInventory::new(),
            world,
            interactions: Interactions::new(),
            drag: DragSession::new(),
            recipes: RecipeBook::standard(),
            survival: Survival::new(),
            clock: DayNightCycle::new(),
            panels: Panels::default(),
            rng,
        }
    }

    /// Rebuilds a game from a save, replacing everything
    ///
    /// Campfires restart their burn timer, cows come back at full health
    /// and camps saved without loot get fresh loot.
    pub fn from_save_file(save: SaveFile, config: GameConfig, mut rng: StdRng) -> Result<Self, SaveError> {
        if save.inventory_slots.capacity() != INVENTORY_SLOTS {
            return Err(SaveError::CorruptedData(format!(
                "inventory has {} slots, expected {}",
                save.inventory_slots.capacity(),
                INVENTORY_SLOTS
            )));
        }
        if save.hotbar_slots.capacity() != HOTBAR_SLOTS {
            return Err(SaveError::CorruptedData(format!(
                "hotbar has {} slots, expected {}",
                save.hotbar_slots.capacity(),
                HOTBAR_SLOTS
            )));
        }

        let grid = config.grid_size;
        let mut world = World::empty(config.map_width, config.map_height, grid);

        world.lakes = save
            .lakes
            .into_iter()
            .map(|tiles| Lake::new(tiles.into_iter().map(|tile| tile.into_tile(grid)).collect()))
            .collect();
        world.rocks = save.rocks.into_iter().map(Into::into).collect();
        world.items = save.items.into_iter().map(Into::into).collect();
        world.cows = save.cows.iter().map(|pos| Cow::new(pos.x, pos.y)).collect();
        world.campfires = save
            .campfires
            .iter()
            .map(|pos| Campfire::new(pos.x as i32, pos.y as i32, config.campfire_burn_ms))
            .collect();

        for camp in save.camps {
            let chest = match camp.loot {
                Some(loot) => loot,
                None => {
                    debug!("Camp at ({}, {}) has no saved loot, rolling new", camp.x, camp.y);
                    Camp::roll_loot(&mut rng)
                }
            };
            world.camps.push(Camp::new(camp.x, camp.y, grid, chest));
        }

        info!(
            "Restored world: {} rocks, {} items, {} camps, {} cows",
            world.rocks.len(),
            world.items.len(),
            world.camps.len(),
            world.cows.len()
        );

        Ok(GameState {
            player: Player::new(save.player.x, save.player.y),
            inventory: PlayerInventory::from_pools(save.inventory_slots, save.hotbar_slots),
            world,
            interactions: Interactions::new(),
            drag: DragSession::new(),
            recipes: RecipeBook::standard(),
            survival: Survival::from_values(save.hunger, save.thirst),
            clock: DayNightCycle::from_time_of_day(save.time_of_day),
            panels: Panels::default(),
            config,
            rng,
        })
    }

    /// Snapshot for the save manager
    ///
    /// A stack in hand is written back to its origin slot in the snapshot,
    /// so saving mid-drag loses nothing.
    pub fn to_save_file(&self) -> SaveFile {
        let mut inventory_slots = self.inventory.inventory.clone();
        let mut hotbar_slots = self.inventory.hotbar.clone();
        let mut held_in_chest = None;

        if let Some(held) = self.drag.held() {
            match held.origin.pool {
                PoolId::Inventory => write_back_held(&mut inventory_slots, held),
                PoolId::Hotbar => write_back_held(&mut hotbar_slots, held),
                PoolId::Chest(camp) => held_in_chest = Some((camp, held)),
            }
        }

        let camps = self
            .world
            .camps
            .iter()
            .enumerate()
            .map(|(index, camp)| {
                let mut loot = camp.chest.clone();
                if let Some((held_camp, held)) = held_in_chest {
                    if held_camp == index {
                        write_back_held(&mut loot, held);
                    }
                }
                CampData {
                    x: camp.x,
                    y: camp.y,
                    loot: Some(loot),
                }
            })
            .collect();

        SaveFile {
            version: CURRENT_SAVE_VERSION,
            saved_at: None,
            player: PositionData {
                x: self.player.x,
                y: self.player.y,
            },
            inventory_slots,
            hotbar_slots,
            rocks: self.world.rocks.iter().map(Into::into).collect(),
            items: self.world.items.iter().map(Into::into).collect(),
            campfires: self.world.campfires.iter().map(Into::into).collect(),
            lakes: self.world.lakes.iter().map(Into::into).collect(),
            camps,
            cows: self.world.cows.iter().map(Into::into).collect(),
            time_of_day: self.clock.time_of_day(),
            hunger: self.survival.hunger,
            thirst: self.survival.thirst,
        }
    }

    pub fn reach(&self) -> Reach {
        Reach {
            cursor: self.player.cursor_rect(self.config.grid_size),
            body: self.player.bounds(),
            position: self.player.center(),
        }
    }

    /// One frame: movement, world actions, meters and clock, world upkeep
    pub fn tick(&mut self, input: &FrameInput, dt_ms: f64) -> TickReport {
        self.player.update(&input.movement, dt_ms, &self.config, &self.world);

        let reach = self.reach();
        let report = self.interactions.update(
            &mut self.world,
            &mut self.inventory,
            &input.actions,
            &reach,
            dt_ms,
            &self.config,
        );

        let opened_chest = report
            .events
            .iter()
            .any(|event| matches!(event, InteractionEvent::ChestOpened { .. }));
        if opened_chest {
            self.panels.inventory_open = true;
        } else if input.actions.interact_pressed && !report.interact_consumed {
            self.toggle_inventory();
        }

        let (cx, cy) = self.player.center();
        let near_fire = self.world.near_burning_campfire(cx, cy, CAMPFIRE_WARMTH_RADIUS);
        self.survival.update(self.player.gait, near_fire, dt_ms);
        self.clock.update(dt_ms);
        self.world.update(dt_ms, &mut self.rng);

        report
    }

    pub fn select_hotbar(&mut self, slot: usize) {
        if let Err(e) = self.inventory.set_hotbar_slot(slot) {
            debug!("Hotbar selection ignored: {}", e);
        }
    }

    pub fn toggle_inventory(&mut self) {
        self.panels.inventory_open = !self.panels.inventory_open;
        if !self.panels.inventory_open {
            self.return_drag();
        }
    }

    pub fn toggle_crafting(&mut self) {
        self.panels.crafting_open = !self.panels.crafting_open;
    }

    pub fn eat(&mut self) -> bool {
        self.survival.eat(&mut self.inventory)
    }

    pub fn drink(&mut self) -> bool {
        self.survival.drink(&mut self.inventory)
    }

    pub fn craft(&mut self, output: ItemKind) -> Result<ItemKind, InventoryError> {
        let result = self.recipes.craft(output, &mut self.inventory);
        if let Err(e) = &result {
            debug!("Craft of {} failed: {}", output, e);
        }
        result
    }

    /// Escape: drop anything in hand back home, close chests and panels
    pub fn cancel(&mut self) {
        self.return_drag();
        self.world.close_all_chests();
        self.panels = Panels::default();
    }

    /// True if slots of `pool` are on screen and can be dragged from/to
    pub fn is_pool_visible(&self, pool: PoolId) -> bool {
        match pool {
            PoolId::Hotbar => true,
            PoolId::Inventory => self.panels.inventory_open,
            PoolId::Chest(camp) => self.world.open_chest() == Some(camp),
        }
    }

    /// Pointer down over `slot`
    pub fn begin_drag(&mut self, slot: SlotRef) -> bool {
        if !self.is_pool_visible(slot.pool) {
            return false;
        }
        let mut pools = pool_set(&mut self.inventory, &mut self.world);
        self.drag.begin(slot, &mut pools)
    }

    /// Split-drag pointer down over `slot`
    pub fn begin_split(&mut self, slot: SlotRef) -> bool {
        if !self.is_pool_visible(slot.pool) {
            return false;
        }
        let mut pools = pool_set(&mut self.inventory, &mut self.world);
        self.drag.begin_split(slot, &mut pools)
    }

    /// Pointer up over `target` (None when the pointer is over no slot)
    pub fn end_drag(&mut self, target: Option<SlotRef>) -> Result<SlotRef, InventoryError> {
        let target = target.filter(|slot| self.is_pool_visible(slot.pool));
        let mut pools = pool_set(&mut self.inventory, &mut self.world);
        let result = self.drag.drop_at(target, &mut pools);
        if let Err(e) = &result {
            debug!("Drag ended without a target: {}", e);
        }
        result
    }

    fn return_drag(&mut self) {
        if self.drag.is_dragging() {
            let mut pools = pool_set(&mut self.inventory, &mut self.world);
            self.drag.cancel(&mut pools);
            debug!("Drag interrupted, stack returned to its slot");
        }
    }
}
