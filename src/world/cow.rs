use crate::collision::Collidable;
use rand::Rng;
use sdl2::rect::Rect;

pub const COW_WIDTH: u32 = 56;
pub const COW_HEIGHT: u32 = 40;
pub const COW_MAX_HEALTH: u8 = 3;

const WALK_SPEED: f64 = 78.0;
const FLEE_SPEED: f64 = 300.0;

/// What the cow is doing this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CowState {
    /// Ambling in a grid direction until the timer runs out
    Wandering { dir: (i8, i8), remaining_ms: f64 },
    /// Just got hit: invincible and running away
    Fleeing { dir: (f64, f64), remaining_ms: f64 },
}

/// Result of swinging at a cow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Still fleeing from the last hit
    Ignored,
    Hurt,
    Killed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cow {
    pub x: f64,
    pub y: f64,
    pub health: u8,
    pub state: CowState,
    pub facing_right: bool,
}

impl Cow {
    pub fn new(x: f64, y: f64) -> Self {
        Cow {
            x,
            y,
            health: COW_MAX_HEALTH,
            state: CowState::Wandering {
                dir: (0, 0),
                remaining_ms: 0.0,
            },
            facing_right: true,
        }
    }

    pub fn is_invincible(&self) -> bool {
        matches!(self.state, CowState::Fleeing { .. })
    }

    /// Takes one hit from a player standing at `from`
    ///
    /// The cow flees along the normalised vector from the player to the
    /// cow; if both stand on the same spot it runs right.
    pub fn hit(&mut self, from: (f64, f64), invincible_ms: f64) -> HitOutcome {
        if self.is_invincible() {
            return HitOutcome::Ignored;
        }

        self.health = self.health.saturating_sub(1);

        let dx = self.x - from.0;
        let dy = self.y - from.1;
        let dist = (dx * dx + dy * dy).sqrt();
        let dir = if dist > 0.0 { (dx / dist, dy / dist) } else { (1.0, 0.0) };

        self.state = CowState::Fleeing {
            dir,
            remaining_ms: invincible_ms,
        };

        if self.health == 0 {
            HitOutcome::Killed
        } else {
            HitOutcome::Hurt
        }
    }

    /// Moves the cow for one tick
    ///
    /// The move is clamped to the map and reverted if the new rectangle is
    /// `blocked` (unmined rocks and water).
    pub fn update(
        &mut self,
        dt_ms: f64,
        rng: &mut impl Rng,
        map_size: (i32, i32),
        blocked: impl Fn(&Rect) -> bool,
    ) {
        let mut flee_over = false;
        let (dx, dy) = match &mut self.state {
            CowState::Fleeing { dir, remaining_ms } => {
                *remaining_ms -= dt_ms;
                flee_over = *remaining_ms <= 0.0;
                (dir.0 * FLEE_SPEED * dt_ms / 1000.0, dir.1 * FLEE_SPEED * dt_ms / 1000.0)
            }
            CowState::Wandering { dir, remaining_ms } => {
                if *remaining_ms <= 0.0 {
                    *dir = (rng.gen_range(-1..=1), rng.gen_range(-1..=1));
                    *remaining_ms = rng.gen_range(500.0..=1500.0);
                } else {
                    *remaining_ms -= dt_ms;
                }
                (
                    dir.0 as f64 * WALK_SPEED * dt_ms / 1000.0,
                    dir.1 as f64 * WALK_SPEED * dt_ms / 1000.0,
                )
            }
        };

        if flee_over {
            self.state = CowState::Wandering {
                dir: (0, 0),
                remaining_ms: 0.0,
            };
        }

        let (old_x, old_y) = (self.x, self.y);
        let max_x = (map_size.0 - COW_WIDTH as i32) as f64;
        let max_y = (map_size.1 - COW_HEIGHT as i32) as f64;
        self.x = (self.x + dx).clamp(0.0, max_x);
        self.y = (self.y + dy).clamp(0.0, max_y);

        if dx != 0.0 {
            self.facing_right = dx > 0.0;
        }

        if blocked(&self.get_bounds()) {
            self.x = old_x;
            self.y = old_y;
        }
    }
}

impl Collidable for Cow {
    fn get_bounds(&self) -> Rect {
        Rect::new(self.x as i32, self.y as i32, COW_WIDTH, COW_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_three_hits_kill() {
        let mut cow = Cow::new(100.0, 100.0);

        assert_eq!(cow.hit((0.0, 100.0), 500.0), HitOutcome::Hurt);
        // Invincible while fleeing
        assert_eq!(cow.hit((0.0, 100.0), 500.0), HitOutcome::Ignored);
        assert_eq!(cow.health, 2);

        cow.state = CowState::Wandering { dir: (0, 0), remaining_ms: 0.0 };
        assert_eq!(cow.hit((0.0, 100.0), 500.0), HitOutcome::Hurt);
        cow.state = CowState::Wandering { dir: (0, 0), remaining_ms: 0.0 };
        assert_eq!(cow.hit((0.0, 100.0), 500.0), HitOutcome::Killed);
    }

    #[test]
    fn test_flees_away_from_player() {
        let mut cow = Cow::new(100.0, 100.0);
        cow.hit((100.0, 200.0), 500.0);

        assert_eq!(
            cow.state,
            CowState::Fleeing { dir: (0.0, -1.0), remaining_ms: 500.0 }
        );
    }

    #[test]
    fn test_zero_distance_flees_right() {
        let mut cow = Cow::new(50.0, 50.0);
        cow.hit((50.0, 50.0), 500.0);

        assert!(matches!(cow.state, CowState::Fleeing { dir: (1.0, 0.0), .. }));
    }

    #[test]
    fn test_fleeing_moves_and_expires() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut cow = Cow::new(100.0, 100.0);
        cow.hit((0.0, 100.0), 500.0);

        cow.update(100.0, &mut rng, (4000, 3000), |_| false);
        assert_eq!(cow.x, 130.0);
        assert!(cow.is_invincible());

        for _ in 0..4 {
            cow.update(100.0, &mut rng, (4000, 3000), |_| false);
        }
        assert!(!cow.is_invincible());
    }

    #[test]
    fn test_blocked_move_is_reverted() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut cow = Cow::new(100.0, 100.0);
        cow.hit((0.0, 100.0), 500.0);

        cow.update(100.0, &mut rng, (4000, 3000), |_| true);

        assert_eq!((cow.x, cow.y), (100.0, 100.0));
    }

    #[test]
    fn test_clamped_to_map() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut cow = Cow::new(3990.0, 10.0);
        cow.hit((3900.0, 10.0), 500.0);

        cow.update(100.0, &mut rng, (4000, 3000), |_| false);

        assert_eq!(cow.x, (4000 - COW_WIDTH as i32) as f64);
    }
}
