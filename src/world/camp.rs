use crate::collision::Collidable;
use crate::interaction::RepeatGate;
use crate::inventory::Pool;
use crate::item::{ItemKind, Stack};
use rand::Rng;
use sdl2::rect::Rect;

/// Kinds that can turn up in a chest
pub const LOOT_KINDS: [ItemKind; 5] = [
    ItemKind::Plank,
    ItemKind::Water,
    ItemKind::Meat,
    ItemKind::Stone,
    ItemKind::Leather,
];

/// An abandoned camp (2x2 tiles) with a lootable chest
#[derive(Debug, Clone, PartialEq)]
pub struct Camp {
    pub x: i32,
    pub y: i32,
    pub grid_size: i32,

    /// Chest contents; depleted slots are removed, so this shrinks
    pub chest: Pool,

    pub is_open: bool,

    /// Chest UI selection, always `< chest.capacity()` (or 0 when empty)
    pub selected_index: usize,

    pub(crate) nav_gate: RepeatGate,
}

impl Camp {
    pub fn new(x: i32, y: i32, grid_size: i32, chest: Pool) -> Self {
        Camp {
            x,
            y,
            grid_size,
            chest,
            is_open: false,
            selected_index: 0,
            nav_gate: RepeatGate::new(),
        }
    }

    /// 2-6 slots of random loot, 1-3 of each
    pub fn roll_loot(rng: &mut impl Rng) -> Pool {
        let slots = rng.gen_range(2..=6);
        Pool::from_slots(
            (0..slots)
                .map(|_| {
                    let kind = LOOT_KINDS[rng.gen_range(0..LOOT_KINDS.len())];
                    Some(Stack::new(kind, rng.gen_range(1..=3)))
                })
                .collect(),
        )
    }

    /// Hit-rectangle of the chest inside the camp
    pub fn chest_rect(&self) -> Rect {
        let size = self.grid_size as u32;
        Rect::new(self.x + self.grid_size / 2, self.y + self.grid_size, size, size)
    }

    pub fn open(&mut self) {
        self.is_open = true;
        self.clamp_selection();
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.nav_gate = RepeatGate::new();
        self.chest.release();
    }

    /// Moves the selection by `step`, wrapping around the chest
    pub fn move_selection(&mut self, step: i32) {
        let len = self.chest.capacity();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index as i64 + step as i64).rem_euclid(len as i64) as usize;
    }

    /// Keeps the selection inside the (possibly shrunk) chest
    pub fn clamp_selection(&mut self) {
        let last = self.chest.capacity().saturating_sub(1);
        self.selected_index = self.selected_index.min(last);
    }
}

impl Collidable for Camp {
    fn get_bounds(&self) -> Rect {
        let size = (self.grid_size * 2) as u32;
        Rect::new(self.x, self.y, size, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn camp_with(slots: usize) -> Camp {
        let loot = vec![Some(Stack::new(ItemKind::Meat, 1)); slots];
        Camp::new(0, 0, 64, Pool::from_slots(loot))
    }

    #[test]
    fn test_chest_rect_position() {
        let camp = camp_with(2);
        assert_eq!(camp.chest_rect(), Rect::new(32, 64, 64, 64));
    }

    #[test]
    fn test_selection_wraps() {
        let mut camp = camp_with(3);

        camp.move_selection(-1);
        assert_eq!(camp.selected_index, 2);
        camp.move_selection(1);
        assert_eq!(camp.selected_index, 0);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut camp = camp_with(3);
        camp.selected_index = 2;
        camp.chest.remove_slot(2);

        camp.clamp_selection();

        assert_eq!(camp.selected_index, 1);
    }

    #[test]
    fn test_empty_chest_selection_stays_zero() {
        let mut camp = camp_with(0);
        camp.move_selection(1);
        camp.clamp_selection();
        assert_eq!(camp.selected_index, 0);
    }

    #[test]
    fn test_rolled_loot_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let loot = Camp::roll_loot(&mut rng);
            assert!((2..=6).contains(&loot.capacity()));
            for stack in loot.iter_stacks() {
                assert!(LOOT_KINDS.contains(&stack.kind));
                assert!((1..=3).contains(&stack.count));
            }
        }
    }
}
