//! Save manager for handling save/load operations
//!
//! This module provides the SaveManager struct which handles:
//! - Saving game state to the save file
//! - Loading game state (a missing file is not an error)
//! - Version checking

use super::types::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SAVE_FILE_NAME: &str = "savegame.json";

pub struct SaveManager {
    save_directory: PathBuf,
}

impl SaveManager {
    /// Creates a new SaveManager with the given save directory
    ///
    /// The save directory will be created if it doesn't exist.
    pub fn new(save_directory: impl AsRef<Path>) -> Result<Self, SaveError> {
        let save_dir = save_directory.as_ref().to_path_buf();

        // Create save directory if it doesn't exist
        if !save_dir.exists() {
            fs::create_dir_all(&save_dir)?;
        }

        Ok(SaveManager {
            save_directory: save_dir,
        })
    }

    pub fn save_path(&self) -> PathBuf {
        self.save_directory.join(SAVE_FILE_NAME)
    }

    pub fn save_exists(&self) -> bool {
        self.save_path().exists()
    }

    /// Save the game state, overwriting any previous save
    pub fn save_game(&self, save_file: &SaveFile) -> Result<PathBuf, SaveError> {
        let filepath = self.save_path();

        let mut stamped = save_file.clone();
        stamped.version = CURRENT_SAVE_VERSION;
        stamped.saved_at = Some(chrono::Local::now().to_rfc3339());

        // Serialize to JSON (pretty format for readability/debugging)
        let json = serde_json::to_string_pretty(&stamped)?;
        fs::write(&filepath, json)?;

        info!("Game saved to: {}", filepath.display());

        Ok(filepath)
    }

    /// Load the save file
    ///
    /// Returns `Ok(None)` when there is no save yet.
    pub fn load_game(&self) -> Result<Option<SaveFile>, SaveError> {
        if !self.save_exists() {
            return Ok(None);
        }

        let filepath = self.save_path();

        let json = fs::read_to_string(&filepath)?;
        let save_file: SaveFile = serde_json::from_str(&json)?;

        // Version check
        if save_file.version > CURRENT_SAVE_VERSION {
            return Err(SaveError::InvalidVersion(save_file.version));
        }

        info!("Loaded save from: {}", filepath.display());

        Ok(Some(save_file))
    }
}
