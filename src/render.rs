//! Flat-colour world rendering with depth sorting
//!
//! Entities are drawn as coloured rectangles in painter's order: ground
//! layers (water, camps) first, then everything standing on the map
//! sorted by the Y of its base, so things lower on the screen cover
//! things behind them.
//!
//! # Layers
//!
//! 1. Ground: water tiles, camp floors
//! 2. Depth-sorted: loose items, rocks, campfires, cows, the player
//! 3. Cursor outline and mining progress
//! 4. Night overlay
//! 5. HUD (meters, water progress, clock)

use crate::collision::Collidable;
use crate::game::GameState;
use crate::item::ItemKind;
use crate::player::Player;
use crate::text::draw_simple_text;
use crate::world::WorldEntity;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const GRASS: Color = Color::RGB(74, 125, 58);
const HUD_BAR_WIDTH: u32 = 160;
const HUD_BAR_HEIGHT: u32 = 12;

/// Display colour of an item kind (slots, loose items, dragged stack)
pub fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Wood => Color::RGB(133, 94, 66),
        ItemKind::Stone => Color::RGB(130, 130, 130),
        ItemKind::Plank => Color::RGB(196, 154, 108),
        ItemKind::Meat => Color::RGB(190, 60, 60),
        ItemKind::Leather => Color::RGB(150, 90, 40),
        ItemKind::Water => Color::RGB(70, 130, 220),
        ItemKind::WoodenPickaxe => Color::RGB(210, 180, 80),
        ItemKind::StoneSword => Color::RGB(200, 200, 220),
        ItemKind::Campfire => Color::RGB(240, 120, 30),
    }
}

fn entity_color(entity: &WorldEntity) -> Color {
    match entity {
        WorldEntity::Water(_) => Color::RGB(52, 101, 164),
        WorldEntity::Rock(_) => Color::RGB(105, 105, 110),
        WorldEntity::Item(item) => item_color(item.kind),
        WorldEntity::Camp(_) => Color::RGB(120, 100, 70),
        WorldEntity::Campfire(_) => Color::RGB(230, 110, 20),
        WorldEntity::Cow(cow) if cow.is_invincible() => Color::RGB(255, 200, 200),
        WorldEntity::Cow(_) => Color::RGB(235, 235, 225),
    }
}

fn is_ground(entity: &WorldEntity) -> bool {
    matches!(entity, WorldEntity::Water(_) | WorldEntity::Camp(_))
}

/// Viewport into the map, clamped so it never shows past the map edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Camera {
    /// Centres the view on `target`, clamped to a `map_width` x `map_height` map
    pub fn follow(target: (f64, f64), map_width: i32, map_height: i32, width: u32, height: u32) -> Self {
        let max_x = (map_width - width as i32).max(0);
        let max_y = (map_height - height as i32).max(0);
        Camera {
            x: (target.0 as i32 - width as i32 / 2).clamp(0, max_x),
            y: (target.1 as i32 - height as i32 / 2).clamp(0, max_y),
            width,
            height,
        }
    }

    pub fn to_screen(&self, rect: Rect) -> Rect {
        Rect::new(rect.x() - self.x, rect.y() - self.y, rect.width(), rect.height())
    }

    pub fn is_visible(&self, rect: &Rect) -> bool {
        rect.has_intersection(Rect::new(self.x, self.y, self.width, self.height))
    }
}

/// Something drawn in the depth-sorted layer
enum Renderable<'a> {
    Entity(WorldEntity<'a>),
    Player(&'a Player),
}

impl Renderable<'_> {
    fn bounds(&self) -> Rect {
        match self {
            Renderable::Entity(entity) => entity.bounds(),
            Renderable::Player(player) => player.bounds(),
        }
    }

    /// Y of the base, used as the sort key
    fn depth_y(&self) -> i32 {
        self.bounds().bottom()
    }

    fn color(&self) -> Color {
        match self {
            Renderable::Entity(entity) => entity_color(entity),
            Renderable::Player(_) => Color::RGB(40, 60, 160),
        }
    }
}

/// Draws the map, the player and every visible entity
pub fn render_world(canvas: &mut Canvas<Window>, game: &GameState, camera: &Camera) -> Result<(), String> {
    canvas.set_draw_color(GRASS);
    canvas.clear();

    let entities: Vec<WorldEntity> = game
        .world
        .entities()
        .into_iter()
        .filter(|entity| entity.is_visible() && camera.is_visible(&entity.bounds()))
        .collect();

    for entity in entities.iter().filter(|entity| is_ground(entity)) {
        canvas.set_draw_color(entity_color(entity));
        canvas.fill_rect(camera.to_screen(entity.bounds()))?;
        if let WorldEntity::Camp(camp) = entity {
            canvas.set_draw_color(Color::RGB(90, 60, 30));
            canvas.fill_rect(camera.to_screen(camp.chest_rect()))?;
        }
    }

    let mut renderables: Vec<Renderable> = entities
        .into_iter()
        .filter(|entity| !is_ground(entity))
        .map(Renderable::Entity)
        .collect();
    renderables.push(Renderable::Player(&game.player));

    // Stable sort keeps list order for equal depths
    renderables.sort_by_key(|r| r.depth_y());

    for renderable in &renderables {
        canvas.set_draw_color(renderable.color());
        canvas.fill_rect(camera.to_screen(renderable.bounds()))?;
    }

    render_mining_progress(canvas, game, camera)?;
    render_campfire_fuel(canvas, game, camera)?;

    canvas.set_draw_color(Color::RGBA(255, 255, 255, 120));
    canvas.draw_rect(camera.to_screen(game.reach().cursor))?;

    Ok(())
}

/// Progress bar above every rock currently being mined
fn render_mining_progress(canvas: &mut Canvas<Window>, game: &GameState, camera: &Camera) -> Result<(), String> {
    for rock in &game.world.rocks {
        let Some(progress) = rock.mining_progress(game.config.mining_ms) else {
            continue;
        };
        let bounds = camera.to_screen(rock.get_bounds());
        let back = Rect::new(bounds.x(), bounds.y() - 8, bounds.width(), 5);
        draw_bar(canvas, back, progress, Color::RGB(240, 220, 80))?;
    }
    Ok(())
}

/// Fuel left in every visible campfire
fn render_campfire_fuel(canvas: &mut Canvas<Window>, game: &GameState, camera: &Camera) -> Result<(), String> {
    for fire in game.world.campfires.iter().filter(|fire| fire.is_burning()) {
        let bounds = fire.get_bounds();
        if !camera.is_visible(&bounds) {
            continue;
        }
        let bounds = camera.to_screen(bounds);
        let back = Rect::new(bounds.x(), bounds.y() - 8, bounds.width(), 4);
        let fuel = fire.remaining_ms() / game.config.campfire_burn_ms;
        draw_bar(canvas, back, fuel, Color::RGB(255, 140, 40))?;
    }
    Ok(())
}

fn draw_bar(canvas: &mut Canvas<Window>, rect: Rect, fraction: f64, fill: Color) -> Result<(), String> {
    canvas.set_draw_color(Color::RGBA(0, 0, 0, 180));
    canvas.fill_rect(rect)?;

    let filled = (rect.width() as f64 * fraction.clamp(0.0, 1.0)) as u32;
    if filled > 0 {
        canvas.set_draw_color(fill);
        canvas.fill_rect(Rect::new(rect.x(), rect.y(), filled, rect.height()))?;
    }
    Ok(())
}

/// Darkens the whole screen by the clock's darkness level
pub fn render_night(canvas: &mut Canvas<Window>, game: &GameState) -> Result<(), String> {
    let darkness = game.clock.darkness();
    if darkness == 0 {
        return Ok(());
    }
    let (width, height) = canvas.output_size()?;
    canvas.set_draw_color(Color::RGBA(0, 0, 20, darkness));
    canvas.fill_rect(Rect::new(0, 0, width, height))
}

/// Hunger/thirst meters, water progress and the clock
pub fn render_hud(canvas: &mut Canvas<Window>, game: &GameState) -> Result<(), String> {
    let (width, _) = canvas.output_size()?;
    let x = width as i32 - HUD_BAR_WIDTH as i32 - 20;
    let white = Color::RGB(255, 255, 255);

    draw_simple_text(canvas, "HUNGER", x, 20, white, 1)?;
    draw_bar(
        canvas,
        Rect::new(x, 30, HUD_BAR_WIDTH, HUD_BAR_HEIGHT),
        game.survival.hunger / crate::survival::MAX_METER,
        Color::RGB(200, 120, 60),
    )?;

    draw_simple_text(canvas, "THIRST", x, 50, white, 1)?;
    draw_bar(
        canvas,
        Rect::new(x, 60, HUD_BAR_WIDTH, HUD_BAR_HEIGHT),
        game.survival.thirst / crate::survival::MAX_METER,
        Color::RGB(70, 130, 220),
    )?;

    let water = game.interactions.water_progress(&game.config);
    if water > 0.0 {
        draw_simple_text(canvas, "GATHERING", x, 80, white, 1)?;
        draw_bar(canvas, Rect::new(x, 90, HUD_BAR_WIDTH, 6), water, Color::RGB(120, 180, 255))?;
    }

    let phase = if game.clock.is_night() { "NIGHT" } else { "DAY" };
    draw_simple_text(canvas, phase, x, 104, white, 1)?;

    if let Some(kind) = game.inventory.selected_tool() {
        draw_simple_text(canvas, kind.name(), x, 118, white, 1)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{LooseItem, Rock};

    #[test]
    fn test_camera_centres_on_target() {
        let camera = Camera::follow((2000.0, 1500.0), 4000, 3000, 1280, 720);
        assert_eq!((camera.x, camera.y), (1360, 1140));
    }

    #[test]
    fn test_camera_clamped_to_map() {
        let top_left = Camera::follow((10.0, 10.0), 4000, 3000, 1280, 720);
        assert_eq!((top_left.x, top_left.y), (0, 0));

        let bottom_right = Camera::follow((3990.0, 2990.0), 4000, 3000, 1280, 720);
        assert_eq!((bottom_right.x, bottom_right.y), (2720, 2280));

        // A map smaller than the screen pins to the origin
        let small = Camera::follow((100.0, 100.0), 640, 360, 1280, 720);
        assert_eq!((small.x, small.y), (0, 0));
    }

    #[test]
    fn test_to_screen_and_culling() {
        let camera = Camera::follow((2000.0, 1500.0), 4000, 3000, 1280, 720);
        let rect = Rect::new(1400, 1200, 10, 10);

        assert_eq!(camera.to_screen(rect), Rect::new(40, 60, 10, 10));
        assert!(camera.is_visible(&rect));
        assert!(!camera.is_visible(&Rect::new(0, 0, 10, 10)));
    }

    #[test]
    fn test_depth_order_uses_base() {
        let item = LooseItem::new(100.0, 150.0, ItemKind::Wood);
        let rock = Rock::new(100, 100);
        let player = Player::new(100.0, 90.0);

        let mut renderables = vec![
            Renderable::Entity(WorldEntity::Item(&item)),
            Renderable::Player(&player),
            Renderable::Entity(WorldEntity::Rock(&rock)),
        ];
        renderables.sort_by_key(|r| r.depth_y());

        // Player base 130, rock base 148, item base 180
        assert!(matches!(renderables[0], Renderable::Player(_)));
        assert!(matches!(renderables[1], Renderable::Entity(WorldEntity::Rock(_))));
        assert!(matches!(renderables[2], Renderable::Entity(WorldEntity::Item(_))));
    }

    #[test]
    fn test_item_colors_are_distinct() {
        for (i, a) in ItemKind::ALL.iter().enumerate() {
            for b in ItemKind::ALL.iter().skip(i + 1) {
                assert_ne!(item_color(*a), item_color(*b));
            }
        }
    }
}
