// World module
//
// Everything that lives on the map besides the player:
// - Rocks (minable), lakes of water tiles, loose items
// - Camps with lootable chests, wandering cows, placed campfires
// - Procedural generation of a fresh world

pub mod camp;
pub mod campfire;
pub mod cow;
pub mod generation;
pub mod loose_item;
pub mod rock;
pub mod water;

pub use camp::Camp;
pub use campfire::Campfire;
pub use cow::{Cow, HitOutcome};
pub use loose_item::LooseItem;
pub use rock::{Rock, RockState};
pub use water::{Lake, WaterTile};

use crate::collision::{aabb_intersect, Collidable};
use rand::Rng;
use sdl2::rect::Rect;

/// Borrowed view of any world entity
///
/// Lets the renderer and collision queries treat every kind of entity
/// uniformly without a trait object per entity.
#[derive(Debug, Clone, Copy)]
pub enum WorldEntity<'a> {
    Water(&'a WaterTile),
    Rock(&'a Rock),
    Item(&'a LooseItem),
    Camp(&'a Camp),
    Campfire(&'a Campfire),
    Cow(&'a Cow),
}

impl WorldEntity<'_> {
    pub fn bounds(&self) -> Rect {
        match self {
            WorldEntity::Water(tile) => tile.get_bounds(),
            WorldEntity::Rock(rock) => rock.get_bounds(),
            WorldEntity::Item(item) => item.get_bounds(),
            WorldEntity::Camp(camp) => camp.get_bounds(),
            WorldEntity::Campfire(fire) => fire.get_bounds(),
            WorldEntity::Cow(cow) => cow.get_bounds(),
        }
    }

    /// Mined rocks and burnt-out campfires are not drawn
    pub fn is_visible(&self) -> bool {
        match self {
            WorldEntity::Rock(rock) => !rock.is_mined(),
            WorldEntity::Campfire(fire) => fire.is_burning(),
            _ => true,
        }
    }
}

/// All entity lists of the map
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub width: i32,
    pub height: i32,
    pub grid_size: i32,
    pub lakes: Vec<Lake>,
    pub rocks: Vec<Rock>,
    pub items: Vec<LooseItem>,
    pub camps: Vec<Camp>,
    pub cows: Vec<Cow>,
    pub campfires: Vec<Campfire>,
}

impl World {
    pub fn empty(width: i32, height: i32, grid_size: i32) -> Self {
        World {
            width,
            height,
            grid_size,
            lakes: Vec::new(),
            rocks: Vec::new(),
            items: Vec::new(),
            camps: Vec::new(),
            cows: Vec::new(),
            campfires: Vec::new(),
        }
    }

    pub fn water_tiles(&self) -> impl Iterator<Item = &WaterTile> {
        self.lakes.iter().flat_map(|lake| lake.tiles.iter())
    }

    /// Every entity, in draw order (ground first)
    pub fn entities(&self) -> Vec<WorldEntity<'_>> {
        let mut entities: Vec<WorldEntity<'_>> = self.water_tiles().map(WorldEntity::Water).collect();
        entities.extend(self.camps.iter().map(WorldEntity::Camp));
        entities.extend(self.items.iter().map(WorldEntity::Item));
        entities.extend(self.rocks.iter().map(WorldEntity::Rock));
        entities.extend(self.campfires.iter().map(WorldEntity::Campfire));
        entities.extend(self.cows.iter().map(WorldEntity::Cow));
        entities
    }

    pub fn overlaps_water(&self, rect: &Rect) -> bool {
        self.lakes.iter().any(|lake| lake.overlaps(rect))
    }

    /// True if `rect` hits water or an unmined rock
    pub fn blocks_movement(&self, rect: &Rect) -> bool {
        blocked_by(&self.lakes, &self.rocks, rect)
    }

    /// A campfire may not overlap water, unmined rocks, camps or other campfires
    pub fn can_place_campfire(&self, rect: &Rect) -> bool {
        !self.overlaps_water(rect)
            && !self.rocks.iter().any(|rock| rock.blocks_movement() && rock.overlaps(rect))
            && !self.camps.iter().any(|camp| camp.overlaps(rect))
            && !self.campfires.iter().any(|fire| fire.overlaps(rect))
    }

    /// Index of the open chest's camp, if any
    pub fn open_chest(&self) -> Option<usize> {
        self.camps.iter().position(|camp| camp.is_open)
    }

    pub fn close_all_chests(&mut self) {
        for camp in self.camps.iter_mut() {
            camp.close();
        }
    }

    /// Moves cows and burns down campfires; expired campfires are removed
    pub fn update(&mut self, dt_ms: f64, rng: &mut impl Rng) {
        let map_size = (self.width, self.height);
        let World { lakes, rocks, cows, campfires, .. } = self;
        let (lakes, rocks) = (&*lakes, &*rocks);

        for cow in cows.iter_mut() {
            cow.update(dt_ms, rng, map_size, |rect| blocked_by(lakes, rocks, rect));
        }

        for fire in campfires.iter_mut() {
            fire.update(dt_ms);
        }
        campfires.retain(|fire| fire.is_burning());
    }

    /// True if a burning campfire's centre is within `radius` of `(x, y)`
    pub fn near_burning_campfire(&self, x: f64, y: f64, radius: f64) -> bool {
        self.campfires.iter().any(|fire| {
            let (cx, cy) = fire.center();
            fire.is_burning() && ((cx - x).powi(2) + (cy - y).powi(2)).sqrt() <= radius
        })
    }
}

fn blocked_by(lakes: &[Lake], rocks: &[Rock], rect: &Rect) -> bool {
    lakes.iter().any(|lake| lake.overlaps(rect))
        || rocks
            .iter()
            .any(|rock| rock.blocks_movement() && aabb_intersect(&rock.get_bounds(), rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Pool;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_world() -> World {
        let mut world = World::empty(4000, 3000, 64);
        world.lakes.push(Lake::new(vec![WaterTile::new(0, 0, 64)]));
        world.rocks.push(Rock::new(200, 0));
        world.rocks.push(Rock::with_mined(400, 0, true));
        world.camps.push(Camp::new(640, 0, 64, Pool::new(2)));
        world
    }

    #[test]
    fn test_blocks_movement() {
        let world = small_world();

        assert!(world.blocks_movement(&Rect::new(10, 10, 10, 10)));
        assert!(world.blocks_movement(&Rect::new(210, 10, 10, 10)));
        // Mined rock and camps do not block
        assert!(!world.blocks_movement(&Rect::new(410, 10, 10, 10)));
        assert!(!world.blocks_movement(&Rect::new(650, 10, 10, 10)));
    }

    #[test]
    fn test_campfire_placement_rules() {
        let mut world = small_world();

        assert!(!world.can_place_campfire(&Campfire::footprint(0, 0)));
        assert!(!world.can_place_campfire(&Campfire::footprint(192, 0)));
        assert!(world.can_place_campfire(&Campfire::footprint(384, 0)));
        assert!(!world.can_place_campfire(&Campfire::footprint(640, 64)));

        world.campfires.push(Campfire::new(1024, 1024, 1000.0));
        assert!(!world.can_place_campfire(&Campfire::footprint(1030, 1030)));
    }

    #[test]
    fn test_update_removes_expired_campfires() {
        let mut world = small_world();
        let mut rng = StdRng::seed_from_u64(3);
        world.campfires.push(Campfire::new(1024, 1024, 100.0));

        world.update(50.0, &mut rng);
        assert_eq!(world.campfires.len(), 1);
        assert!(world.near_burning_campfire(1048.0, 1148.0, 150.0));

        world.update(50.0, &mut rng);
        assert!(world.campfires.is_empty());
    }

    #[test]
    fn test_entities_cover_every_list() {
        let world = small_world();
        let entities = world.entities();

        assert_eq!(entities.len(), 4);
        assert_eq!(entities.iter().filter(|e| e.is_visible()).count(), 3);
    }
}
