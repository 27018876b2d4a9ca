//! Editor session: the world plus everything needed to edit it
//!
//! [`Editor`] forwards input to [`WorldInput`] and applies the side effects
//! of a change of active level: the camera frames the new level and the
//! rename buffer is reset to its name.

use crate::input::{EditorKey, InputAction, PointerButton};
use crate::level::LevelId;
use crate::persistence::{PersistenceError, DEFAULT_WORLD_PATH};
use crate::render::{Color, Painter, RenderStyle};
use crate::tileset::TilesetError;
use crate::{Camera, Level, Point, TileSelection, Tileset, World, WorldInput};
use glam::Vec2;
use std::path::{Path, PathBuf};

/// Screen width reserved on the left for the sidebar
pub const DEFAULT_SIDEBAR_WIDTH: f32 = 300.0;
pub const DEFAULT_TILESET_PATH: &str = "tilesets/paper-pixels8.png";
pub const DEFAULT_TILESET_GRID_SIZE: u32 = 8;

const STAMP_TINT: Color = Color::rgba(1.0, 1.0, 1.0, 0.5);

#[derive(Debug, Clone)]
pub struct Editor {
    pub world: World,
    pub camera: Camera,
    pub input: WorldInput,
    pub selection: TileSelection,
    /// Text being edited in the level name field
    pub level_name_buffer: String,
    pub sidebar_width: f32,
    pub world_path: PathBuf,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl Editor {
    pub fn new(camera: Camera) -> Self {
        Self {
            world: World::default(),
            camera,
            input: WorldInput::new(),
            selection: TileSelection::new(),
            level_name_buffer: String::new(),
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            world_path: PathBuf::from(DEFAULT_WORLD_PATH),
        }
    }

    pub fn with_world_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.world_path = path.into();
        self
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, pointer_screen: Vec2) {
        self.input.update(
            &mut self.world,
            &mut self.camera,
            &self.selection,
            pointer_screen,
        );
        self.camera.update(dt);
    }

    pub fn button_down(&mut self, button: PointerButton, screen: Vec2) {
        let action = self.input.button_down(
            button,
            screen,
            &mut self.world,
            &mut self.camera,
            &self.selection,
        );
        self.apply(action);
    }

    pub fn button_up(&mut self, button: PointerButton) {
        self.input
            .button_up(button, &mut self.world, &mut self.camera);
    }

    pub fn key_pressed(&mut self, key: EditorKey) {
        let action = self.input.key_pressed(key, &mut self.world);
        self.apply(action);
    }

    pub fn scroll(&mut self, amount: f32, slow: bool) -> bool {
        self.camera.scroll(amount, slow)
    }

    fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::None => {}
            InputAction::ActiveLevelChanged => self.on_active_level_changed(),
            InputAction::Recenter => self.center_on_active_level(),
        }
    }

    fn on_active_level_changed(&mut self) {
        self.center_on_active_level();
        self.level_name_buffer = self
            .world
            .active_level()
            .map(|level| level.name.clone())
            .unwrap_or_default();
    }

    pub fn center_on_active_level(&mut self) {
        if let Some(bounds) = self.world.active_level().map(Level::bounds) {
            self.camera.center_on(bounds, self.sidebar_width);
        }
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.camera.set_viewport(viewport);
    }

    /// Add a level and make it active
    pub fn add_level(&mut self, level: Level) -> LevelId {
        let id = self.world.add_level(level);
        self.on_active_level_changed();
        id
    }

    /// Add a default-sized level at a world position
    pub fn add_level_at(&mut self, pos: Point) -> LevelId {
        let level = Level::new_at(self.world.next_level_name(), pos);
        self.add_level(level)
    }

    pub fn make_active(&mut self, id: LevelId) -> bool {
        let changed = self.world.make_active(id);
        if changed {
            self.on_active_level_changed();
        }
        changed
    }

    pub fn delete_active_level(&mut self) -> Option<Level> {
        let removed = self.world.delete_active_level()?;
        self.on_active_level_changed();
        Some(removed)
    }

    /// Accept the new-level prompt
    pub fn confirm_new_level(&mut self) -> Option<LevelId> {
        let id = self
            .input
            .confirm_new_level(&mut self.world, &mut self.camera)?;
        self.on_active_level_changed();
        Some(id)
    }

    pub fn dismiss_new_level_prompt(&mut self) {
        self.input.hide_prompt(&mut self.camera);
    }

    /// Copy the rename buffer into the active level's name. Blank names are ignored.
    pub fn rename_active_level(&mut self) -> bool {
        let name = self.level_name_buffer.trim();
        if name.is_empty() {
            return false;
        }
        let name = name.to_string();
        match self.world.active_level_mut() {
            Some(level) => {
                level.set_name(name);
                true
            }
            None => false,
        }
    }

    /// Load a tileset and attach it as the active level's tile layer.
    /// Returns `Ok(false)` if there is no active level or it already has one.
    pub fn add_tile_layer(&mut self, path: &Path, grid_size: u32) -> Result<bool, TilesetError> {
        let Some(level) = self.world.active_level_mut() else {
            return Ok(false);
        };
        if level.tile_layer().is_some() {
            return Ok(false);
        }
        let mut tileset = Tileset::new();
        tileset.load(path, grid_size)?;
        let added = level.add_tile_layer(tileset, crate::layer::DEFAULT_GRID_SIZE);
        self.selection.clear();
        Ok(added)
    }

    pub fn add_entity_layer(&mut self) -> bool {
        self.world
            .active_level_mut()
            .is_some_and(|level| level.add_entity_layer())
    }

    /// Tileset of the active level's tile layer
    pub fn active_tileset(&self) -> Option<&Tileset> {
        self.world
            .active_level()
            .and_then(|level| level.tile_layer())
            .and_then(|layer| layer.tileset())
            .filter(|tileset| tileset.is_loaded())
    }

    /// Select a rectangle of the active tileset, from and to given as (col, row)
    pub fn select_tiles(&mut self, from: Point, to: Point) {
        let tileset = self
            .world
            .active_level()
            .and_then(|level| level.tile_layer())
            .and_then(|layer| layer.tileset())
            .filter(|tileset| tileset.is_loaded());
        if let Some(tileset) = tileset {
            self.selection.select_region(tileset, from, to);
        }
    }

    pub fn save(&self) -> Result<(), PersistenceError> {
        self.world.save(&self.world_path)
    }

    /// Replace the world with the saved document; nothing changes on error
    pub fn load(&mut self) -> Result<(), PersistenceError> {
        let path = self.world_path.clone();
        self.world.load(&path)?;
        self.input = WorldInput::new();
        self.selection.clear();
        self.on_active_level_changed();
        Ok(())
    }

    /// Draw every level, the active one with its handles and labels
    pub fn render(&self, painter: &mut dyn Painter, style: &RenderStyle) {
        let style = RenderStyle {
            zoom: self.camera.zoom,
            ..style.clone()
        };
        for level in self.world.levels() {
            level.render(painter, &style, self.world.is_active(level.id()));
        }
        self.render_stamp_preview(painter);
    }

    /// Selected tiles drawn translucent over the cell under the pointer
    fn render_stamp_preview(&self, painter: &mut dyn Painter) {
        if self.selection.is_empty() || self.input.active_drag().is_some() {
            return;
        }
        let Some(level) = self.world.active_level() else {
            return;
        };
        let (Some(layer), Some(cell)) = (
            level.tile_layer(),
            level.tile_cell_at(self.input.pointer_world()),
        ) else {
            return;
        };
        let Some(tileset) = layer.tileset() else {
            return;
        };

        let bounds = level.bounds();
        let grid = layer.grid_size() as f32;
        let size = Vec2::splat(grid);
        painter.push_clip(bounds);
        for tile in self.selection.stamp(tileset) {
            let target = cell + tile.offset;
            let min = Vec2::new(
                bounds.x as f32 + target.x as f32 * grid,
                bounds.y as f32 + target.y as f32 * grid,
            );
            if let Some(region) = tileset.get(tile.index) {
                painter.tile_image(tileset, region, min, size, STAMP_TINT);
            }
        }
        painter.pop_clip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, RecordingPainter};
    use crate::RectI;

    fn editor() -> Editor {
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));
        camera.position = Vec2::ZERO;
        camera.zoom = 1.0;
        Editor::new(camera)
    }

    #[test]
    fn test_activation_side_effects() {
        let mut editor = editor();
        let first = editor.add_level(Level::with_bounds("One".to_string(), RectI::new(0, 0, 160, 96)));
        assert_eq!(editor.level_name_buffer, "One");
        let framed_zoom = editor.camera.target_zoom();
        assert!(framed_zoom > 0.0);

        editor.add_level(Level::with_bounds("Two".to_string(), RectI::new(1000, 0, 800, 600)));
        assert_eq!(editor.level_name_buffer, "Two");
        assert!(editor.camera.target_zoom() > framed_zoom);

        assert!(editor.make_active(first));
        assert_eq!(editor.level_name_buffer, "One");
        assert!(!editor.make_active(first));
    }

    #[test]
    fn test_click_activation_centers_camera() {
        let mut editor = editor();
        let first = editor.add_level(Level::with_bounds("One".to_string(), RectI::new(0, 0, 50, 50)));
        editor.add_level(Level::with_bounds("Two".to_string(), RectI::new(300, 0, 50, 50)));

        // screen for world (10, 10) with the camera at the origin
        editor.button_down(PointerButton::Left, Vec2::new(410.0, 290.0));
        assert!(editor.world.is_active(first));
        assert_eq!(editor.level_name_buffer, "One");
        assert_eq!(editor.camera.target_position().y, 25.0);
    }

    #[test]
    fn test_rename_active_level() {
        let mut editor = editor();
        editor.add_level_at(Point::ZERO);
        editor.level_name_buffer = "  Caves ".to_string();
        assert!(editor.rename_active_level());
        assert_eq!(editor.world.active_level().unwrap().name, "Caves");

        editor.level_name_buffer.clear();
        assert!(!editor.rename_active_level());
        assert_eq!(editor.world.active_level().unwrap().name, "Caves");
    }

    #[test]
    fn test_delete_active_level() {
        let mut editor = editor();
        editor.add_level_at(Point::ZERO);
        editor.add_level_at(Point::new(500, 0));
        let removed = editor.delete_active_level().unwrap();
        assert_eq!(removed.name, "Level 2");
        assert_eq!(editor.level_name_buffer, "Level 1");
        editor.delete_active_level();
        assert!(editor.world.is_empty());
        assert_eq!(editor.level_name_buffer, "");
        assert!(editor.delete_active_level().is_none());
    }

    #[test]
    fn test_layers_need_active_level() {
        let mut editor = editor();
        assert!(!editor.add_entity_layer());
        assert!(!editor
            .add_tile_layer(Path::new("missing.png"), 8)
            .unwrap());

        editor.add_level_at(Point::ZERO);
        assert!(editor.add_entity_layer());
        assert!(!editor.add_entity_layer());
        assert!(matches!(
            editor.add_tile_layer(Path::new("missing.png"), 8),
            Err(TilesetError::IoError(_))
        ));
        assert!(editor.world.active_level().unwrap().tile_layer().is_none());
    }

    #[test]
    fn test_add_tile_layer_and_select() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        image::RgbaImage::new(32, 32).save(&path).unwrap();

        let mut editor = editor();
        editor.add_level_at(Point::ZERO);
        assert!(editor.add_tile_layer(&path, 8).unwrap());
        assert_eq!(editor.active_tileset().unwrap().tile_count(), 16);

        editor.select_tiles(Point::new(0, 0), Point::new(1, 0));
        assert_eq!(editor.selection.indices(), &[0, 1]);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut saved = editor().with_world_path(dir.path().join("world.json"));
        saved.add_level_at(Point::new(10, 10));
        saved.add_level_at(Point::new(400, 10));
        saved.save().unwrap();

        let mut other = editor().with_world_path(dir.path().join("world.json"));
        other.load().unwrap();
        assert_eq!(other.world.levels().len(), 2);
        assert_eq!(other.level_name_buffer, "Level 2");

        let mut broken = editor().with_world_path(dir.path().join("nope.json"));
        broken.add_level_at(Point::ZERO);
        assert!(broken.load().is_err());
        assert_eq!(broken.world.levels().len(), 1);
    }

    #[test]
    fn test_stamp_preview_follows_pointer() {
        let mut editor = editor();
        editor.add_level(Level::with_bounds("L".to_string(), RectI::new(0, 0, 160, 96)));
        let tileset = Tileset::from_image("sheet.png", 32, 32, 8).unwrap();
        editor
            .world
            .active_level_mut()
            .unwrap()
            .add_tile_layer(tileset, 16);
        editor.select_tiles(Point::new(0, 0), Point::new(1, 0));
        assert_eq!(editor.selection.len(), 2);

        // camera still at the origin with zoom 1: world (20, 20)
        editor.input.update(
            &mut editor.world,
            &mut editor.camera,
            &editor.selection,
            Vec2::new(420.0, 280.0),
        );
        let mut painter = RecordingPainter::default();
        editor.render(&mut painter, &RenderStyle::default());
        assert!(painter.commands.contains(&DrawCommand::Image(0, Vec2::new(16.0, 16.0))));
        assert!(painter.commands.contains(&DrawCommand::Image(1, Vec2::new(32.0, 16.0))));
        assert_eq!(painter.clip_depth, 0);
    }

    #[test]
    fn test_render_marks_only_active_level() {
        let mut editor = editor();
        editor.add_level_at(Point::ZERO);
        editor.add_level_at(Point::new(400, 0));
        let mut painter = RecordingPainter::default();
        editor.render(&mut painter, &RenderStyle::default());

        let labels = painter
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text(..)))
            .count();
        assert_eq!(labels, 2);
    }
}
