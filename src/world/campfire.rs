use crate::collision::Collidable;
use sdl2::rect::Rect;

pub const CAMPFIRE_SIZE: u32 = 48;

/// A placed campfire; it burns down and is then removed from the world
#[derive(Debug, Clone, PartialEq)]
pub struct Campfire {
    pub x: i32,
    pub y: i32,
    remaining_ms: f64,
}

impl Campfire {
    pub fn new(x: i32, y: i32, burn_ms: f64) -> Self {
        Campfire {
            x,
            y,
            remaining_ms: burn_ms,
        }
    }

    /// Candidate rectangle for a campfire placed at `(x, y)`
    pub fn footprint(x: i32, y: i32) -> Rect {
        Rect::new(x, y, CAMPFIRE_SIZE, CAMPFIRE_SIZE)
    }

    pub fn update(&mut self, dt_ms: f64) {
        self.remaining_ms = (self.remaining_ms - dt_ms).max(0.0);
    }

    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms
    }

    pub fn is_burning(&self) -> bool {
        self.remaining_ms > 0.0
    }

    pub fn center(&self) -> (f64, f64) {
        let half = CAMPFIRE_SIZE as f64 / 2.0;
        (self.x as f64 + half, self.y as f64 + half)
    }
}

impl Collidable for Campfire {
    fn get_bounds(&self) -> Rect {
        Campfire::footprint(self.x, self.y)
    }
}
