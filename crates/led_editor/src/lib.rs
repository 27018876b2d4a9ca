//! led_editor - Bevy front end for the led level editor
//!
//! Wires [`led_core::Editor`] into a Bevy app:
//! - pointer, key and wheel input forwarded to the editing core
//! - the world painted with egui on the background layer
//! - a sidebar for the world, the active level and its layers
//! - a tileset palette to pick the paint stamp
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use led_editor::EditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(EditorPlugin::default())
//!         .run();
//! }
//! ```

pub mod input;
pub mod preferences;
pub mod render;
pub mod ui;

pub use led_core;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use led_core::{Camera, Editor, Point, Vec2, DEFAULT_VIEWPORT};
use std::path::{Path, PathBuf};

use input::EditorInputPlugin;
use preferences::EditorPreferences;
use render::WorldRenderPlugin;
use ui::EditorUiPlugin;

/// Convert a filesystem path to one Bevy's AssetServer can load.
/// Relative paths are resolved against the working directory, the same
/// base the core uses when it decodes the sheet.
pub fn to_asset_path(path: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|dir| dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    absolute.to_string_lossy().replace('\\', "/")
}

/// Overrides applied on top of the saved preferences
#[derive(Clone, Default)]
struct EditorConfig {
    world_path: Option<PathBuf>,
    tileset: Option<(String, u32)>,
    sidebar_width: Option<f32>,
    open_world_on_startup: Option<bool>,
}

/// Main editor plugin
///
/// ```rust,ignore
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         EditorPlugin::default()
///             .with_world_path("levels/dungeon.json")
///             .with_tileset("tilesets/dungeon.png", 16),
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct EditorPlugin {
    config: EditorConfig,
}

impl EditorPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// World document used by Save and Load
    pub fn with_world_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.world_path = Some(path.into());
        self
    }

    /// Sprite sheet offered for new tile layers
    pub fn with_tileset(mut self, path: impl Into<String>, grid_size: u32) -> Self {
        self.config.tileset = Some((path.into(), grid_size.max(1)));
        self
    }

    pub fn with_sidebar_width(mut self, width: f32) -> Self {
        self.config.sidebar_width = Some(width.max(0.0));
        self
    }

    /// Whether the world document is loaded at startup (default: true)
    pub fn with_open_world_on_startup(mut self, open: bool) -> Self {
        self.config.open_world_on_startup = Some(open);
        self
    }

    /// Saved preferences with this plugin's overrides applied
    fn resolve(&self, mut preferences: EditorPreferences) -> EditorPreferences {
        if let Some(path) = &self.config.world_path {
            preferences.world_path = path.to_string_lossy().to_string();
        }
        if let Some((path, grid_size)) = &self.config.tileset {
            preferences.tileset_path = path.clone();
            preferences.tileset_grid_size = *grid_size;
        }
        if let Some(width) = self.config.sidebar_width {
            preferences.sidebar_width = width;
        }
        if let Some(open) = self.config.open_world_on_startup {
            preferences.open_world_on_startup = open;
        }
        preferences
    }
}

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        let preferences = self.resolve(EditorPreferences::load());
        bevy::log::info!("EditorPlugin: world document {:?}", preferences.world_path);

        let editor_state = EditorState::from_preferences(&preferences);

        app.add_plugins(EguiPlugin::default())
            .add_plugins(EditorUiPlugin)
            .add_plugins(WorldRenderPlugin)
            .add_plugins(EditorInputPlugin)
            .insert_resource(editor_state)
            .insert_resource(preferences)
            .add_systems(Startup, (setup_editor_camera, open_world_on_startup));
    }
}

/// Spawns the editor camera if one doesn't exist
fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

fn open_world_on_startup(
    mut editor_state: ResMut<EditorState>,
    preferences: Res<EditorPreferences>,
) {
    if !preferences.open_world_on_startup || !editor_state.editor.world_path.exists() {
        return;
    }
    editor_state.load_world();
}

/// Global editor state
#[derive(Resource)]
pub struct EditorState {
    pub editor: Editor,
    /// Tileset path typed in the sidebar, used by "Add Tiles"
    pub tileset_path: String,
    pub tileset_grid_size: u32,
    /// Tileset cell where a palette drag started
    pub palette_drag_start: Option<Point>,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::from_preferences(&EditorPreferences::default())
    }
}

impl EditorState {
    pub fn from_preferences(preferences: &EditorPreferences) -> Self {
        let viewport = Vec2::new(
            preferences.window_width as f32,
            preferences.window_height as f32,
        );
        let viewport = if viewport.min_element() > 0.0 {
            viewport
        } else {
            DEFAULT_VIEWPORT
        };
        let mut editor =
            Editor::new(Camera::new(viewport)).with_world_path(&preferences.world_path);
        editor.sidebar_width = preferences.sidebar_width;

        Self {
            editor,
            tileset_path: preferences.tileset_path.clone(),
            tileset_grid_size: preferences.tileset_grid_size.max(1),
            palette_drag_start: None,
            error_message: None,
            status_message: None,
        }
    }

    pub fn save_world(&mut self) {
        match self.editor.save() {
            Ok(()) => {
                self.status_message =
                    Some(format!("Saved {}", self.editor.world_path.display()));
            }
            Err(e) => {
                bevy::log::error!("Failed to save world: {}", e);
                self.error_message = Some(format!("Failed to save: {}", e));
            }
        }
    }

    pub fn load_world(&mut self) {
        match self.editor.load() {
            Ok(()) => {
                self.palette_drag_start = None;
                self.status_message =
                    Some(format!("Loaded {}", self.editor.world_path.display()));
            }
            Err(e) => {
                bevy::log::error!("Failed to load world: {}", e);
                self.error_message = Some(format!("Failed to load: {}", e));
            }
        }
    }

    /// Attach the sidebar's tileset to the active level
    pub fn add_tile_layer(&mut self) {
        let path = PathBuf::from(self.tileset_path.trim());
        match self.editor.add_tile_layer(&path, self.tileset_grid_size) {
            Ok(true) => {
                self.palette_drag_start = None;
                self.status_message = Some(format!("Added tile layer from {}", path.display()));
            }
            Ok(false) => {
                self.error_message = Some(self.layer_refusal("tile"));
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to load tileset: {}", e));
            }
        }
    }

    pub fn add_entity_layer(&mut self) {
        if !self.editor.add_entity_layer() {
            self.error_message = Some(self.layer_refusal("entity"));
        }
    }

    fn layer_refusal(&self, kind: &str) -> String {
        if self.editor.world.active_level().is_some() {
            format!("Cannot add {} layer: the active level already has one", kind)
        } else {
            format!("Cannot add {} layer: no active level", kind)
        }
    }

    /// Remember the current session settings in `preferences`
    pub fn store_preferences(&self, preferences: &mut EditorPreferences) {
        preferences.world_path = self.editor.world_path.to_string_lossy().to_string();
        preferences.tileset_path = self.tileset_path.clone();
        preferences.tileset_grid_size = self.tileset_grid_size;
        preferences.sidebar_width = self.editor.sidebar_width;
    }
}
