use crate::collision::Collidable;
use crate::item::ItemKind;
use sdl2::rect::Rect;

pub const LOOSE_ITEM_SIZE: u32 = 30;

/// An item lying in the world, waiting to be picked up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LooseItem {
    pub x: f64,
    pub y: f64,
    pub kind: ItemKind,
}

impl LooseItem {
    pub fn new(x: f64, y: f64, kind: ItemKind) -> Self {
        LooseItem { x, y, kind }
    }
}

impl Collidable for LooseItem {
    fn get_bounds(&self) -> Rect {
        Rect::new(self.x as i32, self.y as i32, LOOSE_ITEM_SIZE, LOOSE_ITEM_SIZE)
    }
}
