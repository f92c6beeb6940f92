// Game module
//
// Owns the running game: every pool, the world and the per-tick order.
// The SDL front end in main.rs drives it; nothing in here opens a window.

pub mod state;
pub mod types;

pub use state::GameState;
pub use types::{FrameInput, Panels};
