use sdl2::event::Event;
use sdl2::keyboard::{KeyboardState, Keycode, Scancode};
use sdl2::mouse::MouseButton;
use sdl2::EventPump;

use crate::game::FrameInput;
use crate::interaction::InputFrame;
use crate::player::MoveInput;

/// Discrete actions the player can trigger
///
/// Held keys (movement, use, gather, chest navigation) are not actions;
/// they are read from the keyboard state once per frame into a
/// `FrameInput`. Only edge-triggered input turns into a `GameAction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    // === Inventory ===
    SelectHotbarSlot(usize), // 0-7 for keys 1-8
    ToggleCrafting,
    Eat,
    Drink,

    // === Mouse (screen coordinates) ===
    PointerDown(i32, i32),
    SplitDown(i32, i32), // right button: lift half a stack
    PointerUp(i32, i32),
    MouseMove(i32, i32),

    // === System ===
    SaveGame,
    Cancel,
    Quit,
}

/// Maps a pressed key to its action
///
/// `E` is missing on purpose: the interact press feeds the frame input.
fn key_action(key: Keycode) -> Option<GameAction> {
    let action = match key {
        Keycode::Num1 => GameAction::SelectHotbarSlot(0),
        Keycode::Num2 => GameAction::SelectHotbarSlot(1),
        Keycode::Num3 => GameAction::SelectHotbarSlot(2),
        Keycode::Num4 => GameAction::SelectHotbarSlot(3),
        Keycode::Num5 => GameAction::SelectHotbarSlot(4),
        Keycode::Num6 => GameAction::SelectHotbarSlot(5),
        Keycode::Num7 => GameAction::SelectHotbarSlot(6),
        Keycode::Num8 => GameAction::SelectHotbarSlot(7),
        Keycode::C => GameAction::ToggleCrafting,
        Keycode::H => GameAction::Eat,
        Keycode::J => GameAction::Drink,
        Keycode::O => GameAction::SaveGame,
        Keycode::Escape => GameAction::Cancel,
        _ => return None,
    };
    Some(action)
}

/// Builds one frame's held-key input
///
/// `is_down` answers "is this scancode held right now"; in the game it
/// is backed by SDL's keyboard state.
pub fn frame_input(is_down: impl Fn(Scancode) -> bool, interact_pressed: bool) -> FrameInput {
    FrameInput {
        movement: MoveInput {
            up: is_down(Scancode::W) || is_down(Scancode::Up),
            down: is_down(Scancode::S) || is_down(Scancode::Down),
            left: is_down(Scancode::A) || is_down(Scancode::Left),
            right: is_down(Scancode::D) || is_down(Scancode::Right),
            sprint: is_down(Scancode::LShift),
            crouch: is_down(Scancode::LCtrl),
        },
        actions: InputFrame {
            use_held: is_down(Scancode::R),
            gather_held: is_down(Scancode::F),
            interact_pressed,
            nav_left_held: is_down(Scancode::Left),
            nav_right_held: is_down(Scancode::Right),
        },
    }
}

/// InputSystem processes SDL2 events and produces GameActions
///
/// Input processing happens in two steps each frame:
/// 1. `poll_events` drains the SDL2 queue into discrete `GameAction`s and
///    latches the interact press
/// 2. `frame_input` samples held keys and hands the latched press over
pub struct InputSystem {
    interact_pressed: bool,
}

impl InputSystem {
    pub fn new() -> Self {
        InputSystem {
            interact_pressed: false,
        }
    }

    /// Process SDL2 events and return list of actions to handle
    pub fn poll_events(&mut self, event_pump: &mut EventPump) -> Vec<GameAction> {
        let mut actions = Vec::new();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => actions.push(GameAction::Quit),
                Event::KeyDown {
                    keycode: Some(key),
                    repeat,
                    ..
                } => self.handle_keydown(key, repeat, &mut actions),
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Left,
                    x,
                    y,
                    ..
                } => actions.push(GameAction::PointerDown(x, y)),
                Event::MouseButtonDown {
                    mouse_btn: MouseButton::Right,
                    x,
                    y,
                    ..
                } => actions.push(GameAction::SplitDown(x, y)),
                Event::MouseButtonUp {
                    mouse_btn: MouseButton::Left | MouseButton::Right,
                    x,
                    y,
                    ..
                } => actions.push(GameAction::PointerUp(x, y)),
                Event::MouseMotion { x, y, .. } => actions.push(GameAction::MouseMove(x, y)),
                _ => {}
            }
        }

        actions
    }

    fn handle_keydown(&mut self, key: Keycode, repeat: bool, actions: &mut Vec<GameAction>) {
        // Key repeat must not re-trigger presses (chest withdrawal is one unit per press)
        if repeat {
            return;
        }

        if key == Keycode::E {
            self.interact_pressed = true;
        } else if let Some(action) = key_action(key) {
            actions.push(action);
        }
    }

    /// Held keys for this frame; clears the latched interact press
    pub fn frame_input(&mut self, keyboard: &KeyboardState) -> FrameInput {
        let pressed = std::mem::take(&mut self.interact_pressed);
        frame_input(|code| keyboard.is_scancode_pressed(code), pressed)
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys_select_hotbar() {
        assert_eq!(key_action(Keycode::Num1), Some(GameAction::SelectHotbarSlot(0)));
        assert_eq!(key_action(Keycode::Num8), Some(GameAction::SelectHotbarSlot(7)));
        // The hotbar has 8 slots
        assert_eq!(key_action(Keycode::Num9), None);
    }

    #[test]
    fn test_interact_is_not_a_discrete_action() {
        assert_eq!(key_action(Keycode::E), None);
        assert_eq!(key_action(Keycode::Escape), Some(GameAction::Cancel));
    }

    #[test]
    fn test_interact_press_latches_once() {
        let mut input = InputSystem::new();
        let mut actions = Vec::new();

        input.handle_keydown(Keycode::E, false, &mut actions);
        assert!(actions.is_empty());
        assert!(input.interact_pressed);

        // Auto-repeat while held does nothing more
        input.interact_pressed = false;
        input.handle_keydown(Keycode::E, true, &mut actions);
        assert!(!input.interact_pressed);
    }

    #[test]
    fn test_frame_input_from_held_keys() {
        let held = [Scancode::W, Scancode::D, Scancode::LShift, Scancode::R, Scancode::Right];
        let frame = frame_input(|code| held.contains(&code), true);

        assert!(frame.movement.up && frame.movement.right && frame.movement.sprint);
        assert!(!frame.movement.left && !frame.movement.crouch);
        assert!(frame.actions.use_held && frame.actions.interact_pressed);
        assert!(frame.actions.nav_right_held && !frame.actions.nav_left_held);
    }

    #[test]
    fn test_side_arrows_move_and_navigate() {
        let held = [Scancode::Left];
        let frame = frame_input(|code| held.contains(&code), false);

        assert!(frame.actions.nav_left_held);
        assert!(frame.movement.left);
        // WASD does not navigate chests
        let frame = frame_input(|code| code == Scancode::A, false);
        assert!(!frame.actions.nav_left_held);
    }
}
