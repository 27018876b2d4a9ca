//! Editor preferences persisted between sessions

mod file;

pub use file::{PreferencesError, PreferencesFile};

use bevy::prelude::*;
use led_core::{DEFAULT_SIDEBAR_WIDTH, DEFAULT_TILESET_GRID_SIZE, DEFAULT_TILESET_PATH, DEFAULT_WORLD_PATH};
use serde::{Deserialize, Serialize};

/// User-level settings, stored as JSON in the platform config directory
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// World document opened on startup and written by Save
    pub world_path: String,
    /// Sprite sheet used for new tile layers
    pub tileset_path: String,
    pub tileset_grid_size: u32,
    pub sidebar_width: f32,
    pub window_width: u32,
    pub window_height: u32,
    /// Load `world_path` when the editor starts
    pub open_world_on_startup: bool,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            world_path: DEFAULT_WORLD_PATH.to_string(),
            tileset_path: DEFAULT_TILESET_PATH.to_string(),
            tileset_grid_size: DEFAULT_TILESET_GRID_SIZE,
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            window_width: 1280,
            window_height: 720,
            open_world_on_startup: true,
        }
    }
}
