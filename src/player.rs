use crate::collision::snap_to_grid;
use crate::config::GameConfig;
use crate::world::World;
use sdl2::rect::Rect;

pub const PLAYER_WIDTH: u32 = 24;
pub const PLAYER_HEIGHT: u32 = 40;

/// The direction the player last moved in; decides the cursor tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Grid offset of the tile in front of the player
    pub fn offset(self, grid_size: i32) -> (i32, i32) {
        match self {
            Facing::Up => (0, -grid_size),
            Facing::Down => (0, grid_size),
            Facing::Left => (-grid_size, 0),
            Facing::Right => (grid_size, 0),
        }
    }
}

/// How the player moved this tick (drives hunger/thirst drain)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gait {
    #[default]
    Idle,
    Walking,
    Sprinting,
    Crouching,
}

/// Movement keys for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
    pub crouch: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: u32,
    pub height: u32,
    pub facing: Facing,
    pub gait: Gait,
}

impl Player {
    pub fn new(x: f64, y: f64) -> Self {
        Player {
            x,
            y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            facing: Facing::Down,
            gait: Gait::Idle,
        }
    }

    /// Moves the player for one tick
    ///
    /// Sprint wins over crouch. The move is clamped to the map, then
    /// reverted entirely if the player would stand in water or on an
    /// unmined rock.
    pub fn update(&mut self, input: &MoveInput, dt_ms: f64, config: &GameConfig, world: &World) {
        let speed = if input.sprint {
            config.sprint_speed
        } else if input.crouch {
            config.crouch_speed
        } else {
            config.walk_speed
        };

        let mut dir_x = 0.0;
        let mut dir_y = 0.0;

        // Left/right and up/down each resolve to one key, like the facing
        if input.left {
            dir_x = -1.0;
            self.facing = Facing::Left;
        } else if input.right {
            dir_x = 1.0;
            self.facing = Facing::Right;
        }

        if input.up {
            dir_y = -1.0;
            self.facing = Facing::Up;
        } else if input.down {
            dir_y = 1.0;
            self.facing = Facing::Down;
        }

        if dir_x == 0.0 && dir_y == 0.0 {
            self.gait = Gait::Idle;
            return;
        }

        self.gait = if input.sprint {
            Gait::Sprinting
        } else if input.crouch {
            Gait::Crouching
        } else {
            Gait::Walking
        };

        // Normalize diagonal movement to maintain consistent speed
        if dir_x != 0.0 && dir_y != 0.0 {
            dir_x *= std::f64::consts::FRAC_1_SQRT_2;
            dir_y *= std::f64::consts::FRAC_1_SQRT_2;
        }

        let (old_x, old_y) = (self.x, self.y);
        let step = speed * dt_ms / 1000.0;
        self.x = (self.x + dir_x * step).clamp(0.0, (config.map_width - self.width as i32) as f64);
        self.y = (self.y + dir_y * step).clamp(0.0, (config.map_height - self.height as i32) as f64);

        if world.blocks_movement(&self.bounds()) {
            self.x = old_x;
            self.y = old_y;
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x as i32, self.y as i32, self.width, self.height)
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x + self.width as f64 / 2.0,
            self.y + self.height as f64 / 2.0,
        )
    }

    /// The grid tile one tile ahead of the player's centre
    pub fn cursor_rect(&self, grid_size: i32) -> Rect {
        let (cx, cy) = self.center();
        let (dx, dy) = self.facing.offset(grid_size);
        Rect::new(
            snap_to_grid(cx as i32 + dx, grid_size),
            snap_to_grid(cy as i32 + dy, grid_size),
            grid_size as u32,
            grid_size as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Lake, WaterTile};

    fn open_world() -> World {
        World::empty(4000, 3000, 64)
    }

    #[test]
    fn test_walk_speed() {
        let config = GameConfig::default();
        let mut player = Player::new(100.0, 100.0);
        let input = MoveInput {
            right: true,
            ..MoveInput::default()
        };

        player.update(&input, 1000.0, &config, &open_world());

        assert_eq!(player.x, 280.0);
        assert_eq!(player.facing, Facing::Right);
        assert_eq!(player.gait, Gait::Walking);
    }

    #[test]
    fn test_sprint_beats_crouch() {
        let config = GameConfig::default();
        let mut player = Player::new(100.0, 100.0);
        let input = MoveInput {
            down: true,
            sprint: true,
            crouch: true,
            ..MoveInput::default()
        };

        player.update(&input, 1000.0, &config, &open_world());

        assert_eq!(player.y, 400.0);
        assert_eq!(player.gait, Gait::Sprinting);
    }

    #[test]
    fn test_idle_keeps_facing() {
        let config = GameConfig::default();
        let mut player = Player::new(100.0, 100.0);
        player.facing = Facing::Left;

        player.update(&MoveInput::default(), 16.0, &config, &open_world());

        assert_eq!(player.facing, Facing::Left);
        assert_eq!(player.gait, Gait::Idle);
    }

    #[test]
    fn test_clamped_to_map() {
        let config = GameConfig::default();
        let mut player = Player::new(5.0, 5.0);
        let input = MoveInput {
            left: true,
            up: true,
            ..MoveInput::default()
        };

        player.update(&input, 1000.0, &config, &open_world());

        assert_eq!((player.x, player.y), (0.0, 0.0));
    }

    #[test]
    fn test_water_blocks_movement() {
        let config = GameConfig::default();
        let mut world = open_world();
        world.lakes.push(Lake::new(vec![WaterTile::new(128, 0, 64)]));
        let mut player = Player::new(90.0, 10.0);
        let input = MoveInput {
            right: true,
            ..MoveInput::default()
        };

        player.update(&input, 100.0, &config, &world);

        assert_eq!(player.x, 90.0);
        // Still turns to face the water
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_cursor_is_tile_ahead() {
        let mut player = Player::new(100.0, 100.0);
        // Centre is (112, 120), tile (64, 64)

        player.facing = Facing::Right;
        assert_eq!(player.cursor_rect(64), Rect::new(128, 64, 64, 64));

        player.facing = Facing::Up;
        assert_eq!(player.cursor_rect(64), Rect::new(64, 0, 64, 64));
    }
}
