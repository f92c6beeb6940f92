use crate::collision::Collidable;
use crate::interaction::ProgressTimer;
use sdl2::rect::Rect;

pub const ROCK_SIZE: u32 = 48;

/// Rock lifecycle: `Unmined -> Mining -> Mined` (terminal)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RockState {
    Unmined,
    Mining(ProgressTimer),
    Mined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rock {
    pub x: i32,
    pub y: i32,
    pub state: RockState,
}

impl Rock {
    pub fn new(x: i32, y: i32) -> Self {
        Rock {
            x,
            y,
            state: RockState::Unmined,
        }
    }

    /// Rebuilds a rock from a save (mining progress is never persisted)
    pub fn with_mined(x: i32, y: i32, mined: bool) -> Self {
        Rock {
            x,
            y,
            state: if mined { RockState::Mined } else { RockState::Unmined },
        }
    }

    pub fn is_mined(&self) -> bool {
        self.state == RockState::Mined
    }

    /// Mining progress for the progress bar, if mining is under way
    pub fn mining_progress(&self, required_ms: f64) -> Option<f64> {
        match &self.state {
            RockState::Mining(timer) => Some(timer.fraction(required_ms)),
            _ => None,
        }
    }

    /// Mined rocks neither draw nor collide
    pub fn blocks_movement(&self) -> bool {
        !self.is_mined()
    }
}

impl Collidable for Rock {
    fn get_bounds(&self) -> Rect {
        Rect::new(self.x, self.y, ROCK_SIZE, ROCK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mined_rock_does_not_block() {
        assert!(Rock::new(0, 0).blocks_movement());
        assert!(!Rock::with_mined(0, 0, true).blocks_movement());
    }

    #[test]
    fn test_progress_only_while_mining() {
        let mut rock = Rock::new(0, 0);
        assert_eq!(rock.mining_progress(2000.0), None);

        let mut timer = ProgressTimer::new();
        let _ = timer.advance(500.0, 2000.0);
        rock.state = RockState::Mining(timer);

        assert_eq!(rock.mining_progress(2000.0), Some(0.25));
    }
}
