// Shared structs passed between the front end and the game state

use crate::interaction::InputFrame;
use crate::player::MoveInput;

/// Everything the game state needs from the keyboard for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    pub movement: MoveInput,
    pub actions: InputFrame,
}

/// Which screen-space panels are open
///
/// The hotbar is always visible; an open chest is tracked by its camp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Panels {
    pub inventory_open: bool,
    pub crafting_open: bool,
}
