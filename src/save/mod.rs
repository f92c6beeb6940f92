//! Save/Load system for Nomads
//!
//! This module provides a single-file save system:
//! - JSON save file (human-readable, debuggable)
//! - Absent file means "generate a new world"
//! - Plain data structs per entity kind, converted with `From`
//!
//! # Architecture
//!
//! - `types`: Save data structures and error types
//! - `manager`: SaveManager for file operations
//!
//! # Example Usage
//!
//! ```ignore
//! let manager = SaveManager::new(config.save_dir())?;
//!
//! manager.save_game(&state.to_save_file())?;
//!
//! match manager.load_game()? {
//!     Some(save) => GameState::from_save_file(save, &config, &mut rng)?,
//!     None => GameState::new_world(&config, &mut rng),
//! }
//! ```

pub mod manager;
pub mod types;

// Re-export commonly used types
pub use manager::SaveManager;
pub use types::*;
