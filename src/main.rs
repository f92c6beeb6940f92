use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use sdl2::render::BlendMode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod collision;
mod config;
mod crafting;
mod day_night;
mod game;
mod gui;
mod input_system;
mod interaction;
mod inventory;
mod item;
mod player;
mod render;
mod save;
mod survival;
mod text;
mod world;

use config::{GameConfig, DEFAULT_CONFIG_PATH};
use game::GameState;
use gui::{InventoryUI, VisiblePools};
use input_system::{GameAction, InputSystem};
use render::{render_hud, render_night, render_world, Camera};
use save::SaveManager;

const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Longest step a single tick may take (after a stall, e.g. window drag)
const MAX_TICK_MS: f64 = 100.0;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Loads the save if there is a usable one, otherwise generates a world
///
/// The flag is true when a save exists but could not be used. That file
/// must stay on disk untouched until the player saves explicitly.
fn load_or_generate(save_manager: &SaveManager, config: &GameConfig) -> (GameState, bool) {
    let broken = match save_manager.load_game() {
        Ok(Some(save)) => match GameState::from_save_file(save, config.clone(), StdRng::from_entropy()) {
            Ok(game) => {
                info!("Loaded existing save");
                return (game, false);
            }
            Err(e) => {
                warn!("Save is unusable ({}), starting a new world", e);
                true
            }
        },
        Ok(None) => {
            info!("No existing save found, starting a new world");
            false
        }
        Err(e) => {
            warn!("Could not read save ({}), starting a new world", e);
            true
        }
    };
    (GameState::new_world(config.clone(), StdRng::from_entropy()), broken)
}

fn save_game(game: &GameState, save_manager: &SaveManager) {
    if let Err(e) = save_manager.save_game(&game.to_save_file()) {
        warn!("Save failed: {}", e);
    }
}

/// Applies one discrete action; returns false when the game should exit
fn handle_action(
    action: GameAction,
    game: &mut GameState,
    ui: &InventoryUI,
    mouse: &mut (i32, i32),
    save_manager: &SaveManager,
) -> bool {
    match action {
        GameAction::Quit => return false,
        GameAction::SelectHotbarSlot(slot) => game.select_hotbar(slot),
        GameAction::ToggleCrafting => game.toggle_crafting(),
        GameAction::Eat => {
            game.eat();
        }
        GameAction::Drink => {
            game.drink();
        }
        GameAction::SaveGame => save_game(game, save_manager),
        GameAction::Cancel => game.cancel(),
        GameAction::MouseMove(x, y) => *mouse = (x, y),
        GameAction::PointerDown(x, y) => {
            *mouse = (x, y);
            let recipe = if game.panels.crafting_open {
                ui.layout.recipe_at(x, y, game.recipes.recipes().len())
            } else {
                None
            };

            if let Some(index) = recipe {
                let output = game.recipes.recipes()[index].output;
                let _ = game.craft(output);
            } else if let Some(slot) = ui.layout.slot_at(x, y, &VisiblePools::of(game)) {
                game.begin_drag(slot);
            }
        }
        GameAction::SplitDown(x, y) => {
            *mouse = (x, y);
            if let Some(slot) = ui.layout.slot_at(x, y, &VisiblePools::of(game)) {
                game.begin_split(slot);
            }
        }
        GameAction::PointerUp(x, y) => {
            *mouse = (x, y);
            if game.drag.is_dragging() {
                let target = ui.layout.slot_at(x, y, &VisiblePools::of(game));
                let _ = game.end_drag(target);
            }
        }
    }
    true
}

fn main() -> Result<(), String> {
    init_tracing();

    let config = GameConfig::load_or_default(DEFAULT_CONFIG_PATH);

    let save_manager = SaveManager::new(config.save_dir())
        .map_err(|e| format!("Failed to create save manager: {}", e))?;
    let (mut game, mut keep_old_save) = load_or_generate(&save_manager, &config);

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;

    let window = video_subsystem
        .window("Nomads", config.window_width, config.window_height)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    canvas.set_blend_mode(BlendMode::Blend);

    let mut event_pump = sdl_context.event_pump()?;
    let mut input = InputSystem::new();
    let ui = InventoryUI::new(config.window_width, config.window_height);
    let mut mouse = (0, 0);

    let mut last_frame = Instant::now();
    'running: loop {
        let now = Instant::now();
        let dt_ms = (now.duration_since(last_frame).as_secs_f64() * 1000.0).min(MAX_TICK_MS);
        last_frame = now;

        for action in input.poll_events(&mut event_pump) {
            if action == GameAction::SaveGame {
                keep_old_save = false;
            }
            if !handle_action(action, &mut game, &ui, &mut mouse, &save_manager) {
                break 'running;
            }
        }

        let frame = input.frame_input(&event_pump.keyboard_state());
        game.tick(&frame, dt_ms);

        let camera = Camera::follow(
            game.player.center(),
            game.config.map_width,
            game.config.map_height,
            config.window_width,
            config.window_height,
        );

        render_world(&mut canvas, &game, &camera)?;
        render_night(&mut canvas, &game)?;
        render_hud(&mut canvas, &game)?;
        ui.render(&mut canvas, &game, mouse.0, mouse.1)?;

        canvas.present();

        std::thread::sleep(FRAME_TIME);
    }

    if game.config.autosave_on_exit && !keep_old_save {
        save_game(&game, &save_manager);
    }
    info!("Goodbye");

    Ok(())
}
