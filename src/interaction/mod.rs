//! Interaction system - gated world actions
//!
//! Each tick the interaction system looks at what the player is holding,
//! where the cursor tile is and which action keys are down, and decides
//! which world actions go through this tick:
//!
//! - **Chests**: open with an interact press, navigate, withdraw one unit per press
//! - **Pickups**: walk over loose items (or gather them with the cursor)
//! - **Water**: hold gather over water to fill up
//! - **Rocks**: hold use with a pickaxe to mine
//! - **Cows**: hold use with a sword to hit
//! - **Campfires**: hold use with a campfire to place one
//!
//! Every failure is local: a blocked action is a no-op this tick and is
//! re-evaluated from scratch on the next one.

pub mod error;
pub mod timer;

pub use timer::{ProgressTimer, RepeatGate};

use crate::collision::{overlapping_indices, Collidable};
use crate::config::GameConfig;
use crate::inventory::transfer::{pickup, withdraw_one};
use crate::inventory::PlayerInventory;
use crate::item::{ItemKind, ToolClass};
use crate::world::{Campfire, HitOutcome, LooseItem, RockState, World};
use sdl2::rect::Rect;
use tracing::{debug, info, warn};

/// Action inputs for one tick, already resolved from raw key state
///
/// `*_held` flags are level-triggered; `*_pressed` flags are true only on
/// the tick the key went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    /// Use the held tool (mine, hit, place)
    pub use_held: bool,
    /// Gather water / loose items under the cursor
    pub gather_held: bool,
    /// Open a chest or take from it
    pub interact_pressed: bool,
    pub nav_left_held: bool,
    pub nav_right_held: bool,
}

/// Where the player is, as far as interactions care
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reach {
    /// Grid tile the player is facing
    pub cursor: Rect,
    /// Player hit-box (for walking over items)
    pub body: Rect,
    /// Player position (cows flee from here)
    pub position: (f64, f64),
}

/// Something that happened this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    ChestOpened { camp: usize },
    ChestWithdrawn { camp: usize, kind: ItemKind },
    ItemPickedUp(ItemKind),
    WaterGathered,
    RockMined { rock: usize },
    CowHit { cow: usize },
    CowKilled,
    CampfirePlaced { x: i32, y: i32 },
}

/// Interaction state that is not owned by any single entity
#[derive(Debug, Clone, Default)]
pub struct Interactions {
    water_timer: ProgressTimer,
}

/// Outcome of one interaction tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub events: Vec<InteractionEvent>,
    /// The interact press was used by a chest and must not do anything else
    pub interact_consumed: bool,
}

impl Interactions {
    pub fn new() -> Self {
        Interactions::default()
    }

    /// Water gathering progress (for the HUD)
    pub fn water_progress(&self, config: &GameConfig) -> f64 {
        self.water_timer.fraction(config.water_gather_ms)
    }

    /// Runs every world action for one tick
    pub fn update(
        &mut self,
        world: &mut World,
        player: &mut PlayerInventory,
        input: &InputFrame,
        reach: &Reach,
        dt_ms: f64,
        config: &GameConfig,
    ) -> TickReport {
        let mut report = TickReport::default();

        report.interact_consumed = update_chests(world, player, input, reach, dt_ms, config, &mut report.events);
        update_pickups(world, player, input, reach, &mut report.events);
        self.update_water(world, player, input, reach, dt_ms, config, &mut report.events);
        update_rocks(world, player, input, reach, dt_ms, config, &mut report.events);
        update_cows(world, player, input, reach, config, &mut report.events);
        place_campfire(world, player, input, reach, config, &mut report.events);

        report
    }

    #[allow(clippy::too_many_arguments)]
    fn update_water(
        &mut self,
        world: &World,
        player: &mut PlayerInventory,
        input: &InputFrame,
        reach: &Reach,
        dt_ms: f64,
        config: &GameConfig,
        events: &mut Vec<InteractionEvent>,
    ) {
        if !input.gather_held || !world.overlaps_water(&reach.cursor) {
            self.water_timer.reset();
            return;
        }

        if let Err(e) = self.water_timer.advance(dt_ms, config.water_gather_ms) {
            debug!("Gathering water: {}", e);
            return;
        }

        // A full inventory keeps the timer at full and retries next tick
        if player.add_item(ItemKind::Water, 1).is_ok() {
            self.water_timer.reset();
            events.push(InteractionEvent::WaterGathered);
        }
    }
}

/// Opens, navigates and loots chests
///
/// Returns true if the interact press was used here.
fn update_chests(
    world: &mut World,
    player: &mut PlayerInventory,
    input: &InputFrame,
    reach: &Reach,
    dt_ms: f64,
    config: &GameConfig,
    events: &mut Vec<InteractionEvent>,
) -> bool {
    let Some(index) = world.open_chest() else {
        if !input.interact_pressed {
            return false;
        }

        let hovered = world
            .camps
            .iter()
            .position(|camp| crate::collision::aabb_intersect(&camp.chest_rect(), &reach.cursor));

        return match hovered {
            Some(camp) => {
                world.camps[camp].open();
                info!("Opened chest at camp {}", camp);
                events.push(InteractionEvent::ChestOpened { camp });
                true
            }
            None => false,
        };
    };

    let camp = &mut world.camps[index];

    let nav_held = input.nav_left_held || input.nav_right_held;
    if camp.nav_gate.tick(nav_held, dt_ms, config.chest_nav_repeat_ms) {
        camp.move_selection(if input.nav_right_held { 1 } else { -1 });
    }

    if !input.interact_pressed {
        return false;
    }

    match withdraw_one(&mut camp.chest, camp.selected_index, &mut player.inventory) {
        Ok(Some(kind)) => {
            camp.clamp_selection();
            debug!("Took {} from chest {}", kind, index);
            events.push(InteractionEvent::ChestWithdrawn { camp: index, kind });
        }
        Ok(None) => {}
        Err(e) => warn!("Chest withdrawal failed: {}", e),
    }
    true
}

fn update_pickups(
    world: &mut World,
    player: &mut PlayerInventory,
    input: &InputFrame,
    reach: &Reach,
    events: &mut Vec<InteractionEvent>,
) {
    world.items.retain(|item| {
        let touching =
            item.overlaps(&reach.body) || (input.gather_held && item.overlaps(&reach.cursor));
        if touching && pickup(item.kind, 1, player) {
            events.push(InteractionEvent::ItemPickedUp(item.kind));
            return false;
        }
        true
    });
}

fn update_rocks(
    world: &mut World,
    player: &mut PlayerInventory,
    input: &InputFrame,
    reach: &Reach,
    dt_ms: f64,
    config: &GameConfig,
    events: &mut Vec<InteractionEvent>,
) {
    let has_pickaxe = player.holds_tool(ToolClass::Pickaxe);

    for (index, rock) in world.rocks.iter_mut().enumerate() {
        if rock.is_mined() {
            continue;
        }

        let engaged = input.use_held && has_pickaxe && rock.overlaps(&reach.cursor);
        if !engaged {
            rock.state = RockState::Unmined;
            continue;
        }

        let mut timer = match rock.state {
            RockState::Mining(timer) => timer,
            _ => ProgressTimer::new(),
        };

        if timer.advance(dt_ms, config.mining_ms).is_ok() && player.add_item(ItemKind::Stone, 1).is_ok() {
            rock.state = RockState::Mined;
            info!("Rock {} mined", index);
            events.push(InteractionEvent::RockMined { rock: index });
        } else {
            rock.state = RockState::Mining(timer);
        }
    }
}

fn update_cows(
    world: &mut World,
    player: &mut PlayerInventory,
    input: &InputFrame,
    reach: &Reach,
    config: &GameConfig,
    events: &mut Vec<InteractionEvent>,
) {
    if !input.use_held || !player.holds_tool(ToolClass::Sword) {
        return;
    }

    let mut killed = Vec::new();
    for index in overlapping_indices(&reach.cursor, &world.cows) {
        match world.cows[index].hit(reach.position, config.cow_invincible_ms) {
            HitOutcome::Ignored => {}
            HitOutcome::Hurt => events.push(InteractionEvent::CowHit { cow: index }),
            HitOutcome::Killed => killed.push(index),
        }
    }

    for index in killed.into_iter().rev() {
        let cow = world.cows.remove(index);
        for kind in [ItemKind::Meat, ItemKind::Leather] {
            if player.add_item(kind, 1).is_err() {
                debug!("No room for {}, dropped where the cow fell", kind);
                world.items.push(LooseItem::new(cow.x, cow.y, kind));
            }
        }
        info!("Cow killed");
        events.push(InteractionEvent::CowKilled);
    }
}

fn place_campfire(
    world: &mut World,
    player: &mut PlayerInventory,
    input: &InputFrame,
    reach: &Reach,
    config: &GameConfig,
    events: &mut Vec<InteractionEvent>,
) {
    if !input.use_held || !player.holds_tool(ToolClass::Placeable) {
        return;
    }

    let (x, y) = (reach.cursor.x(), reach.cursor.y());
    if !world.can_place_campfire(&Campfire::footprint(x, y)) {
        return;
    }

    if player.consume_selected().is_some() {
        world.campfires.push(Campfire::new(x, y, config.campfire_burn_ms));
        info!("Placed campfire at ({}, {})", x, y);
        events.push(InteractionEvent::CampfirePlaced { x, y });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Pool;
    use crate::item::Stack;
    use crate::world::{Camp, Cow, Lake, LooseItem, Rock, WaterTile};

    const TICK: f64 = 100.0;

    fn reach_at(x: i32, y: i32) -> Reach {
        Reach {
            cursor: Rect::new(x, y, 64, 64),
            body: Rect::new(-500, -500, 24, 40),
            position: (x as f64 - 64.0, y as f64),
        }
    }

    fn holding(kind: ItemKind) -> PlayerInventory {
        let mut player = PlayerInventory::new();
        player.hotbar.put_slot(0, Some(Stack::new(kind, 1)));
        player
    }

    fn use_key() -> InputFrame {
        InputFrame {
            use_held: true,
            ..InputFrame::default()
        }
    }

    fn world_with_rock() -> World {
        let mut world = World::empty(4000, 3000, 64);
        world.rocks.push(Rock::new(128, 128));
        world
    }

    fn run(
        ticks: usize,
        interactions: &mut Interactions,
        world: &mut World,
        player: &mut PlayerInventory,
        input: &InputFrame,
        reach: &Reach,
    ) -> Vec<InteractionEvent> {
        let config = GameConfig::default();
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(interactions.update(world, player, input, reach, TICK, &config).events);
        }
        events
    }

    #[test]
    fn test_mining_takes_two_seconds() {
        let mut interactions = Interactions::new();
        let mut world = world_with_rock();
        let mut player = holding(ItemKind::WoodenPickaxe);
        let reach = reach_at(128, 128);

        run(19, &mut interactions, &mut world, &mut player, &use_key(), &reach);
        assert!(matches!(world.rocks[0].state, RockState::Mining(_)));
        assert_eq!(player.count_item(ItemKind::Stone), 0);

        let events = run(1, &mut interactions, &mut world, &mut player, &use_key(), &reach);
        assert_eq!(events, vec![InteractionEvent::RockMined { rock: 0 }]);
        assert!(world.rocks[0].is_mined());
        assert_eq!(player.count_item(ItemKind::Stone), 1);
    }

    #[test]
    fn test_releasing_restarts_mining() {
        let mut interactions = Interactions::new();
        let mut world = world_with_rock();
        let mut player = holding(ItemKind::WoodenPickaxe);
        let reach = reach_at(128, 128);

        run(10, &mut interactions, &mut world, &mut player, &use_key(), &reach);
        run(1, &mut interactions, &mut world, &mut player, &InputFrame::default(), &reach);
        assert_eq!(world.rocks[0].state, RockState::Unmined);

        // 1000 ms more is not enough after the restart
        run(10, &mut interactions, &mut world, &mut player, &use_key(), &reach);
        assert!(!world.rocks[0].is_mined());
        run(10, &mut interactions, &mut world, &mut player, &use_key(), &reach);
        assert!(world.rocks[0].is_mined());
    }

    #[test]
    fn test_mining_needs_pickaxe() {
        let mut interactions = Interactions::new();
        let mut world = world_with_rock();
        let mut player = holding(ItemKind::StoneSword);

        run(30, &mut interactions, &mut world, &mut player, &use_key(), &reach_at(128, 128));

        assert_eq!(world.rocks[0].state, RockState::Unmined);
    }

    #[test]
    fn test_mining_with_full_pools_keeps_rock() {
        let mut interactions = Interactions::new();
        let mut world = world_with_rock();
        let mut player = holding(ItemKind::WoodenPickaxe);
        for i in 1..8 {
            player.hotbar.put_slot(i, Some(Stack::new(ItemKind::Meat, 1)));
        }
        for i in 0..24 {
            player.inventory.put_slot(i, Some(Stack::new(ItemKind::Leather, 1)));
        }

        run(25, &mut interactions, &mut world, &mut player, &use_key(), &reach_at(128, 128));

        assert!(matches!(world.rocks[0].state, RockState::Mining(_)));
        assert_eq!(world.rocks[0].mining_progress(2000.0), Some(1.0));
    }

    #[test]
    fn test_water_gathering_repeats() {
        let mut interactions = Interactions::new();
        let mut world = World::empty(4000, 3000, 64);
        world.lakes.push(Lake::new(vec![WaterTile::new(256, 256, 64)]));
        let mut player = PlayerInventory::new();
        let gather = InputFrame {
            gather_held: true,
            ..InputFrame::default()
        };

        run(40, &mut interactions, &mut world, &mut player, &gather, &reach_at(256, 256));

        assert_eq!(player.count_item(ItemKind::Water), 2);
        assert_eq!(interactions.water_progress(&GameConfig::default()), 0.0);
    }

    #[test]
    fn test_water_progress_resets_off_water() {
        let mut interactions = Interactions::new();
        let mut world = World::empty(4000, 3000, 64);
        world.lakes.push(Lake::new(vec![WaterTile::new(256, 256, 64)]));
        let mut player = PlayerInventory::new();
        let gather = InputFrame {
            gather_held: true,
            ..InputFrame::default()
        };

        run(15, &mut interactions, &mut world, &mut player, &gather, &reach_at(256, 256));
        run(1, &mut interactions, &mut world, &mut player, &gather, &reach_at(512, 256));
        run(15, &mut interactions, &mut world, &mut player, &gather, &reach_at(256, 256));

        assert_eq!(player.count_item(ItemKind::Water), 0);
    }

    fn world_with_camp() -> World {
        let mut world = World::empty(4000, 3000, 64);
        let loot = Pool::from_slots(vec![
            Some(Stack::new(ItemKind::Plank, 1)),
            Some(Stack::new(ItemKind::Meat, 2)),
        ]);
        world.camps.push(Camp::new(0, 0, 64, loot));
        world
    }

    #[test]
    fn test_open_press_does_not_withdraw() {
        let mut interactions = Interactions::new();
        let mut world = world_with_camp();
        let mut player = PlayerInventory::new();
        let press = InputFrame {
            interact_pressed: true,
            ..InputFrame::default()
        };

        let events = run(1, &mut interactions, &mut world, &mut player, &press, &reach_at(32, 64));

        assert_eq!(events, vec![InteractionEvent::ChestOpened { camp: 0 }]);
        assert!(world.camps[0].is_open);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn test_withdraw_until_slot_collapses() {
        let mut interactions = Interactions::new();
        let mut world = world_with_camp();
        world.camps[0].open();
        world.camps[0].selected_index = 1;
        let mut player = PlayerInventory::new();
        let press = InputFrame {
            interact_pressed: true,
            ..InputFrame::default()
        };
        let reach = reach_at(1000, 1000);

        run(2, &mut interactions, &mut world, &mut player, &press, &reach);

        assert_eq!(player.inventory.slot(0), Some(&Stack::new(ItemKind::Meat, 2)));
        assert_eq!(world.camps[0].chest.capacity(), 1);
        assert_eq!(world.camps[0].selected_index, 0);

        run(1, &mut interactions, &mut world, &mut player, &press, &reach);
        assert!(world.camps[0].chest.capacity() == 0);
        assert_eq!(player.inventory.count_item(ItemKind::Plank), 1);
        // Withdrawals go to the inventory pool only
        assert!(player.hotbar.is_empty());
    }

    #[test]
    fn test_chest_navigation_repeat() {
        let mut interactions = Interactions::new();
        let mut world = world_with_camp();
        world.camps[0].chest = Pool::from_slots(vec![Some(Stack::new(ItemKind::Stone, 1)); 5]);
        world.camps[0].open();
        let mut player = PlayerInventory::new();
        let right = InputFrame {
            nav_right_held: true,
            ..InputFrame::default()
        };
        let reach = reach_at(1000, 1000);
        let config = GameConfig::default();

        // First tick acts immediately, then once per 120 ms
        interactions.update(&mut world, &mut player, &right, &reach, 16.0, &config);
        assert_eq!(world.camps[0].selected_index, 1);
        for _ in 0..7 {
            interactions.update(&mut world, &mut player, &right, &reach, 16.0, &config);
        }
        assert_eq!(world.camps[0].selected_index, 1);
        interactions.update(&mut world, &mut player, &right, &reach, 16.0, &config);
        assert_eq!(world.camps[0].selected_index, 2);
    }

    #[test]
    fn test_pickup_on_walk_over() {
        let mut interactions = Interactions::new();
        let mut world = World::empty(4000, 3000, 64);
        world.items.push(LooseItem::new(10.0, 10.0, ItemKind::Wood));
        world.items.push(LooseItem::new(900.0, 900.0, ItemKind::Wood));
        let mut player = PlayerInventory::new();
        let mut reach = reach_at(1000, 1000);
        reach.body = Rect::new(0, 0, 24, 40);

        run(1, &mut interactions, &mut world, &mut player, &InputFrame::default(), &reach);

        assert_eq!(world.items.len(), 1);
        assert_eq!(player.hotbar.slot(0), Some(&Stack::new(ItemKind::Wood, 1)));
    }

    #[test]
    fn test_pickup_with_cursor_needs_gather_key() {
        let mut interactions = Interactions::new();
        let mut world = World::empty(4000, 3000, 64);
        world.items.push(LooseItem::new(520.0, 520.0, ItemKind::Wood));
        let mut player = PlayerInventory::new();
        let reach = reach_at(512, 512);

        run(1, &mut interactions, &mut world, &mut player, &InputFrame::default(), &reach);
        assert_eq!(world.items.len(), 1);

        let gather = InputFrame {
            gather_held: true,
            ..InputFrame::default()
        };
        run(1, &mut interactions, &mut world, &mut player, &gather, &reach);
        assert!(world.items.is_empty());
    }

    #[test]
    fn test_killing_a_cow_drops_meat_and_leather() {
        let mut interactions = Interactions::new();
        let mut world = World::empty(4000, 3000, 64);
        world.cows.push(Cow::new(520.0, 520.0));
        let mut player = holding(ItemKind::StoneSword);
        let reach = reach_at(512, 512);
        let config = GameConfig::default();

        for _ in 0..3 {
            interactions.update(&mut world, &mut player, &use_key(), &reach, TICK, &config);
            // Let the cow stop fleeing and put it back under the cursor
            if let Some(cow) = world.cows.first_mut() {
                cow.state = crate::world::cow::CowState::Wandering { dir: (0, 0), remaining_ms: 1000.0 };
                cow.x = 520.0;
                cow.y = 520.0;
            }
        }

        assert!(world.cows.is_empty());
        assert_eq!(player.count_item(ItemKind::Meat), 1);
        assert_eq!(player.count_item(ItemKind::Leather), 1);
    }

    #[test]
    fn test_cow_drops_fall_to_ground_when_pools_are_full() {
        let mut interactions = Interactions::new();
        let mut world = World::empty(4000, 3000, 64);
        world.cows.push(Cow::new(520.0, 520.0));
        let mut player = holding(ItemKind::StoneSword);
        for i in 1..player.hotbar.capacity() {
            player.hotbar.put_slot(i, Some(Stack::new(ItemKind::Wood, 1)));
        }
        for i in 0..player.inventory.capacity() {
            player.inventory.put_slot(i, Some(Stack::new(ItemKind::Stone, 1)));
        }
        let reach = reach_at(512, 512);
        let config = GameConfig::default();

        for _ in 0..3 {
            interactions.update(&mut world, &mut player, &use_key(), &reach, TICK, &config);
            if let Some(cow) = world.cows.first_mut() {
                cow.state = crate::world::cow::CowState::Wandering { dir: (0, 0), remaining_ms: 1000.0 };
                cow.x = 520.0;
                cow.y = 520.0;
            }
        }

        assert!(world.cows.is_empty());
        assert_eq!(player.count_item(ItemKind::Meat), 0);
        assert_eq!(
            world.items,
            vec![
                LooseItem::new(520.0, 520.0, ItemKind::Meat),
                LooseItem::new(520.0, 520.0, ItemKind::Leather),
            ]
        );
    }

    #[test]
    fn test_campfire_placement() {
        let mut interactions = Interactions::new();
        let mut world = World::empty(4000, 3000, 64);
        let mut player = holding(ItemKind::Campfire);

        let events = run(1, &mut interactions, &mut world, &mut player, &use_key(), &reach_at(640, 640));

        assert_eq!(events, vec![InteractionEvent::CampfirePlaced { x: 640, y: 640 }]);
        assert_eq!(world.campfires.len(), 1);
        assert_eq!(player.selected_stack(), None);
    }

    #[test]
    fn test_campfire_rejected_on_water() {
        let mut interactions = Interactions::new();
        let mut world = World::empty(4000, 3000, 64);
        world.lakes.push(Lake::new(vec![WaterTile::new(640, 640, 64)]));
        let mut player = holding(ItemKind::Campfire);

        run(1, &mut interactions, &mut world, &mut player, &use_key(), &reach_at(640, 640));

        assert!(world.campfires.is_empty());
        assert_eq!(player.count_item(ItemKind::Campfire), 1);
    }
}
