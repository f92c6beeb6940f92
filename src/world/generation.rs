//! Procedural world generation
//!
//! Scatters lakes, rocks, wood, cows and camps over the map, keeping a
//! square safe zone around the map centre (where the player spawns)
//! clear of anything that blocks movement.

use super::rock::ROCK_SIZE;
use super::{Camp, Cow, Lake, LooseItem, Rock, WaterTile, World};
use crate::collision::{aabb_intersect, point_in_rect, snap_to_grid};
use crate::config::GameConfig;
use crate::item::ItemKind;
use rand::Rng;
use sdl2::rect::Rect;
use std::collections::HashSet;
use tracing::info;

const LAKE_SIZE: i32 = 4;
const SAFE_ZONE_SIZE: u32 = 128;
const CAMP_SPACING: i32 = 128;
const MAX_CAMP_ATTEMPTS: usize = 500;

/// The square around the spawn point that generation keeps clear
pub fn safe_zone(config: &GameConfig) -> Rect {
    let half = SAFE_ZONE_SIZE as i32 / 2;
    Rect::new(
        config.map_width / 2 - half,
        config.map_height / 2 - half,
        SAFE_ZONE_SIZE,
        SAFE_ZONE_SIZE,
    )
}

/// Builds a fresh world from the configured counts
pub fn generate(config: &GameConfig, rng: &mut impl Rng) -> World {
    let mut world = World::empty(config.map_width, config.map_height, config.grid_size);
    let safe = safe_zone(config);
    let mut occupied: HashSet<(i32, i32)> = HashSet::new();

    spawn_lakes(&mut world, config, &safe, rng);
    spawn_rocks(&mut world, config, &safe, &mut occupied, rng);
    spawn_wood(&mut world, config, &safe, &mut occupied, rng);
    spawn_cows(&mut world, config, rng);
    spawn_camps(&mut world, config, &safe, rng);

    info!(
        "Generated world: {} lakes, {} rocks, {} items, {} cows, {} camps",
        world.lakes.len(),
        world.rocks.len(),
        world.items.len(),
        world.cows.len(),
        world.camps.len()
    );
    world
}

/// Diamond-ish clusters: tiles further from the centre are less likely
fn spawn_lakes(world: &mut World, config: &GameConfig, safe: &Rect, rng: &mut impl Rng) {
    let grid = config.grid_size;

    for _ in 0..config.world.lakes {
        let base_x = rng.gen_range(100..=config.map_width - 100);
        let base_y = rng.gen_range(100..=config.map_height - 100);
        let mut tiles = Vec::new();

        for i in 0..LAKE_SIZE {
            for j in 0..LAKE_SIZE {
                let dist = (LAKE_SIZE / 2 - i).abs() + (LAKE_SIZE / 2 - j).abs();
                if rng.gen_bool((1.0 - dist as f64 * 0.2).clamp(0.0, 1.0)) {
                    tiles.push(WaterTile::new(base_x + i * grid, base_y + j * grid, grid));
                }
            }
        }

        let hits_safe_zone = tiles.iter().any(|tile| {
            aabb_intersect(&Rect::new(tile.x, tile.y, tile.size, tile.size), safe)
        });
        if !tiles.is_empty() && !hits_safe_zone {
            world.lakes.push(Lake::new(tiles));
        }
    }
}

fn spawn_rocks(
    world: &mut World,
    config: &GameConfig,
    safe: &Rect,
    occupied: &mut HashSet<(i32, i32)>,
    rng: &mut impl Rng,
) {
    let grid = config.grid_size;

    for _ in 0..config.world.rocks {
        let x = rng.gen_range(0..=config.map_width / grid) * grid;
        let y = rng.gen_range(0..=config.map_height / grid) * grid;
        let footprint = Rect::new(x, y, ROCK_SIZE, ROCK_SIZE);
        if occupied.contains(&(x, y)) || aabb_intersect(&footprint, safe) {
            continue;
        }
        world.rocks.push(Rock::new(x, y));
        occupied.insert((x, y));
    }
}

fn spawn_wood(
    world: &mut World,
    config: &GameConfig,
    safe: &Rect,
    occupied: &mut HashSet<(i32, i32)>,
    rng: &mut impl Rng,
) {
    let grid = config.grid_size;

    for _ in 0..config.world.wood {
        let x = snap_to_grid(rng.gen_range(50..=config.map_width - 50), grid);
        let y = snap_to_grid(rng.gen_range(50..=config.map_height - 50), grid);
        if occupied.contains(&(x, y)) || point_in_rect(x, y, safe) {
            continue;
        }
        occupied.insert((x, y));

        let jitter_x: f64 = rng.gen_range(1.0..30.0);
        let jitter_y: f64 = rng.gen_range(1.0..30.0);
        world
            .items
            .push(LooseItem::new(x as f64 + jitter_x, y as f64 + jitter_y, ItemKind::Wood));
    }
}

fn spawn_cows(world: &mut World, config: &GameConfig, rng: &mut impl Rng) {
    for _ in 0..config.world.cows {
        let x = rng.gen_range(100..=config.map_width - 100);
        let y = rng.gen_range(100..=config.map_height - 100);
        world.cows.push(Cow::new(x as f64, y as f64));
    }
}

fn spawn_camps(world: &mut World, config: &GameConfig, safe: &Rect, rng: &mut impl Rng) {
    let grid = config.grid_size;
    let size = (grid * 2) as u32;

    for _ in 0..MAX_CAMP_ATTEMPTS {
        if world.camps.len() >= config.world.camps {
            break;
        }

        let x = rng.gen_range(0..=(config.map_width - grid * 2) / grid) * grid;
        let y = rng.gen_range(0..=(config.map_height - grid * 2) / grid) * grid;
        let rect = Rect::new(x, y, size, size);
        if aabb_intersect(&rect, safe) {
            continue;
        }

        let spaced = Rect::new(
            x - CAMP_SPACING,
            y - CAMP_SPACING,
            size + CAMP_SPACING as u32 * 2,
            size + CAMP_SPACING as u32 * 2,
        );
        if world
            .camps
            .iter()
            .any(|camp| aabb_intersect(&Rect::new(camp.x, camp.y, size, size), &spaced))
        {
            continue;
        }

        let loot = Camp::roll_loot(rng);
        world.camps.push(Camp::new(x, y, grid, loot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Collidable;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_counts_within_limits() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(42);

        let world = generate(&config, &mut rng);

        assert!(world.lakes.len() <= 5);
        assert!(world.rocks.len() <= 30);
        assert!(world.items.len() <= 550);
        assert_eq!(world.cows.len(), 10);
        assert!(world.camps.len() <= 6);
        assert!(world.items.iter().all(|item| item.kind == ItemKind::Wood));
    }

    #[test]
    fn test_safe_zone_stays_clear() {
        let config = GameConfig::default();
        let safe = safe_zone(&config);

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let world = generate(&config, &mut rng);

            assert!(!world.blocks_movement(&safe));
            assert!(world.camps.iter().all(|camp| !camp.overlaps(&safe)));
        }
    }

    #[test]
    fn test_camps_do_not_overlap() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let world = generate(&config, &mut rng);

        for (i, a) in world.camps.iter().enumerate() {
            for b in world.camps.iter().skip(i + 1) {
                assert!(!a.overlaps(&b.get_bounds()));
            }
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let config = GameConfig::default();
        let a = generate(&config, &mut StdRng::seed_from_u64(5));
        let b = generate(&config, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
