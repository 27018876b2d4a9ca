//! Pointer and keyboard handling for the world view
//!
//! [`WorldInput`] turns button edges, key presses and the per-frame pointer
//! position into level edits. It never touches the camera target directly
//! except through [`Camera::pan`]; side effects that involve more than the
//! world (re-centering, resetting the rename buffer) are reported back as an
//! [`InputAction`] for the caller to apply.

use crate::layer::LayerKind;
use crate::level::{HandleDir, LevelId};
use crate::{Camera, Level, Point, TileSelection, World};
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKey {
    /// Delete or Backspace
    Delete,
    /// Space or Enter
    Confirm,
}

/// What the caller has to do after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputAction {
    #[default]
    None,
    /// A different level (or none) is now active
    ActiveLevelChanged,
    /// Frame the active level again
    Recenter,
}

/// Handle drag in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveDrag {
    pub level: LevelId,
    pub dir: HandleDir,
    /// Handle center when the drag started
    pub anchor: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct WorldInput {
    pub left_down: bool,
    pub middle_down: bool,
    pub right_down: bool,
    /// Anchor of the "new level" prompt, `Some` while it is shown
    new_level_prompt: Option<Point>,
    /// Screen position the prompt was opened at
    prompt_screen: Vec2,
    active_drag: Option<ActiveDrag>,
    pub painting: bool,
    pub erasing: bool,
    pointer_screen: Vec2,
    pointer_world: Vec2,
    /// Screen position of the last middle-drag sample
    last_pan_screen: Option<Vec2>,
}

impl WorldInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_world(&self) -> Vec2 {
        self.pointer_world
    }

    pub fn pointer_screen(&self) -> Vec2 {
        self.pointer_screen
    }

    pub fn active_drag(&self) -> Option<ActiveDrag> {
        self.active_drag
    }

    pub fn is_prompt_shown(&self) -> bool {
        self.new_level_prompt.is_some()
    }

    /// World anchor and screen position of the new-level prompt
    pub fn prompt(&self) -> Option<(Point, Vec2)> {
        self.new_level_prompt.map(|anchor| (anchor, self.prompt_screen))
    }

    /// Hide the prompt; returns whether it was shown
    pub fn hide_prompt(&mut self, camera: &mut Camera) -> bool {
        let was_shown = self.new_level_prompt.take().is_some();
        camera.pan_enabled = true;
        camera.zoom_enabled = true;
        was_shown
    }

    fn show_prompt(&mut self, anchor: Point, screen: Vec2, camera: &mut Camera) {
        self.new_level_prompt = Some(anchor);
        self.prompt_screen = screen;
        camera.pan_enabled = false;
        camera.zoom_enabled = false;
    }

    /// Create a default-sized level at the prompt anchor and hide the prompt
    pub fn confirm_new_level(&mut self, world: &mut World, camera: &mut Camera) -> Option<LevelId> {
        let anchor = self.new_level_prompt?;
        let id = world.add_level(Level::new_at(world.next_level_name(), anchor));
        self.hide_prompt(camera);
        Some(id)
    }

    /// Per-frame update with the current pointer position in screen pixels
    pub fn update(
        &mut self,
        world: &mut World,
        camera: &mut Camera,
        selection: &TileSelection,
        pointer_screen: Vec2,
    ) {
        if self.middle_down {
            if let Some(last) = self.last_pan_screen {
                let delta = pointer_screen - last;
                if delta != Vec2::ZERO {
                    camera.pan(delta);
                }
            }
            self.last_pan_screen = Some(pointer_screen);
        }

        self.pointer_screen = pointer_screen;
        self.pointer_world = camera.unproject(pointer_screen);
        let pointer = self.pointer_world;
        let prompt_shown = self.is_prompt_shown();

        let Some(level) = world.active_level_mut() else {
            return;
        };

        let dragging = self
            .active_drag
            .filter(|drag| drag.level == level.id())
            .map(|drag| drag.dir);
        level.set_handle_zoom(camera.zoom);
        level.refresh_hover(pointer, dragging);
        level.update_handles();

        if let Some(dir) = dragging {
            if self.left_down && !prompt_shown {
                level.drag_handle(dir, pointer);
            }
        }

        if self.painting && self.left_down && !selection.is_empty() {
            Self::paint_stamp(level, selection, pointer);
        }

        if self.erasing && self.right_down && selection.is_empty() {
            if let Some(cell) = level.tile_cell_at(pointer) {
                if let Some(layer) = level.tile_layer_mut() {
                    layer.erase(cell.x, cell.y);
                }
            }
        }
    }

    /// Paint the selection with its top-left tile on the cell under the pointer
    fn paint_stamp(level: &mut Level, selection: &TileSelection, pointer: Vec2) {
        let Some(cell) = level.tile_cell_at(pointer) else {
            return;
        };
        let Some(layer) = level.layer_mut(LayerKind::Tiles) else {
            return;
        };
        let stamp = match layer.tileset() {
            Some(tileset) => selection.stamp(tileset),
            None => return,
        };
        for tile in stamp {
            let target = cell + tile.offset;
            layer.paint(target.x, target.y, tile.index);
        }
    }

    pub fn button_down(
        &mut self,
        button: PointerButton,
        screen: Vec2,
        world: &mut World,
        camera: &mut Camera,
        selection: &TileSelection,
    ) -> InputAction {
        let touch = camera.unproject(screen);
        self.pointer_screen = screen;
        self.pointer_world = touch;

        match button {
            PointerButton::Left => self.left_down = true,
            PointerButton::Middle => self.middle_down = true,
            PointerButton::Right => self.right_down = true,
        }

        match button {
            PointerButton::Right => {
                let on_tile = world
                    .active_level()
                    .and_then(|level| level.tile_cell_at(touch))
                    .is_some();
                if on_tile {
                    self.erasing = true;
                } else if self.is_prompt_shown() {
                    self.hide_prompt(camera);
                } else {
                    self.show_prompt(Point::from_world(touch), screen, camera);
                }
                InputAction::None
            }
            PointerButton::Middle => {
                self.hide_prompt(camera);
                self.last_pan_screen = Some(screen);
                InputAction::None
            }
            PointerButton::Left => {
                if self.hide_prompt(camera) {
                    return InputAction::None;
                }
                self.left_button_down(touch, world, selection)
            }
        }
    }

    fn left_button_down(
        &mut self,
        touch: Vec2,
        world: &mut World,
        selection: &TileSelection,
    ) -> InputAction {
        if let Some(level) = world.active_level_mut() {
            if level.tile_cell_at(touch).is_some() && !selection.is_empty() {
                self.painting = true;
                return InputAction::None;
            }

            if let Some(dir) = level.handle_at(touch) {
                self.active_drag = Some(ActiveDrag {
                    level: level.id(),
                    dir,
                    anchor: level.handle(dir).center,
                });
                level.begin_drag();
                return InputAction::None;
            }
        }

        match world.pick_level_at(touch) {
            Some(id) if !world.is_active(id) => {
                world.make_active(id);
                InputAction::ActiveLevelChanged
            }
            _ => InputAction::None,
        }
    }

    pub fn button_up(&mut self, button: PointerButton, world: &mut World, camera: &mut Camera) {
        match button {
            PointerButton::Left => {
                self.left_down = false;
                self.painting = false;
                if let Some(drag) = self.active_drag.take() {
                    if let Some(level) = world.level_mut(drag.level) {
                        level.reconcile();
                    }
                }
            }
            PointerButton::Middle => {
                self.middle_down = false;
                self.last_pan_screen = None;
                camera.pan_stop();
            }
            PointerButton::Right => {
                self.right_down = false;
                self.erasing = false;
            }
        }
    }

    pub fn key_pressed(&mut self, key: EditorKey, world: &mut World) -> InputAction {
        match key {
            EditorKey::Delete => {
                // a drag on the deleted level cannot be finished
                self.active_drag = None;
                match world.delete_active_level() {
                    Some(_) => InputAction::ActiveLevelChanged,
                    None => InputAction::None,
                }
            }
            EditorKey::Confirm => {
                if world.active_level().is_some() {
                    InputAction::Recenter
                } else {
                    InputAction::None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RectI, Tileset};

    struct Fixture {
        input: WorldInput,
        world: World,
        camera: Camera,
        selection: TileSelection,
    }

    /// Camera at the world origin with zoom 1 on an 800x600 viewport
    fn fixture() -> Fixture {
        let mut camera = Camera::new(Vec2::new(800.0, 600.0));
        camera.position = Vec2::ZERO;
        camera.zoom = 1.0;
        Fixture {
            input: WorldInput::new(),
            world: World::default(),
            camera,
            selection: TileSelection::new(),
        }
    }

    fn screen(x: f32, y: f32) -> Vec2 {
        Vec2::new(400.0 + x, 300.0 - y)
    }

    impl Fixture {
        fn down(&mut self, button: PointerButton, x: f32, y: f32) -> InputAction {
            self.input.button_down(
                button,
                screen(x, y),
                &mut self.world,
                &mut self.camera,
                &self.selection,
            )
        }

        fn up(&mut self, button: PointerButton) {
            self.input.button_up(button, &mut self.world, &mut self.camera);
        }

        fn move_to(&mut self, x: f32, y: f32) {
            self.input
                .update(&mut self.world, &mut self.camera, &self.selection, screen(x, y));
        }

        fn add_level(&mut self, bounds: RectI) -> LevelId {
            let name = self.world.next_level_name();
            self.world.add_level(Level::with_bounds(name, bounds))
        }

        fn add_painted_layer(&mut self) {
            let tileset = Tileset::from_image("sheet.png", 32, 32, 8).unwrap();
            let level = self.world.active_level_mut().unwrap();
            level.add_tile_layer(tileset, 16);
        }

        fn tile_index(&self, col: i32, row: i32) -> i32 {
            let level = self.world.active_level().unwrap();
            level.tile_data().unwrap().tile(col, row).unwrap().tileset_index
        }
    }

    #[test]
    fn test_pointer_is_unprojected() {
        let mut f = fixture();
        f.move_to(12.5, -40.0);
        assert_eq!(f.input.pointer_world(), Vec2::new(12.5, -40.0));
        assert_eq!(f.input.pointer_screen(), screen(12.5, -40.0));
    }

    #[test]
    fn test_right_click_toggles_prompt() {
        let mut f = fixture();
        f.down(PointerButton::Right, 30.7, 20.2);
        f.up(PointerButton::Right);
        assert_eq!(f.input.prompt().map(|p| p.0), Some(Point::new(30, 20)));
        assert!(!f.camera.pan_enabled);
        assert!(!f.camera.zoom_enabled);

        f.down(PointerButton::Right, 0.0, 0.0);
        assert!(!f.input.is_prompt_shown());
        assert!(f.camera.pan_enabled);
    }

    #[test]
    fn test_confirm_new_level() {
        let mut f = fixture();
        f.down(PointerButton::Right, 30.0, 20.0);
        let id = f
            .input
            .confirm_new_level(&mut f.world, &mut f.camera)
            .unwrap();
        assert!(f.world.is_active(id));
        let level = f.world.active_level().unwrap();
        assert_eq!(level.name, "Level 1");
        assert_eq!(level.bounds(), RectI::new(30, 20, 160, 96));
        assert!(!f.input.is_prompt_shown());
        assert!(f.input.confirm_new_level(&mut f.world, &mut f.camera).is_none());
    }

    #[test]
    fn test_left_click_only_dismisses_prompt() {
        let mut f = fixture();
        let first = f.add_level(RectI::new(0, 0, 50, 50));
        let _second = f.add_level(RectI::new(100, 0, 50, 50));
        f.down(PointerButton::Right, 300.0, 300.0);
        f.up(PointerButton::Right);

        let action = f.down(PointerButton::Left, 10.0, 10.0);
        assert_eq!(action, InputAction::None);
        assert!(!f.input.is_prompt_shown());
        assert!(!f.world.is_active(first));
    }

    #[test]
    fn test_left_click_activates_other_level() {
        let mut f = fixture();
        let first = f.add_level(RectI::new(0, 0, 50, 50));
        f.add_level(RectI::new(100, 0, 50, 50));
        let action = f.down(PointerButton::Left, 10.0, 10.0);
        assert_eq!(action, InputAction::ActiveLevelChanged);
        assert!(f.world.is_active(first));
    }

    #[test]
    fn test_drag_right_handle() {
        let mut f = fixture();
        f.add_level(RectI::new(0, 0, 160, 96));
        f.move_to(0.0, 0.0);

        f.down(PointerButton::Left, 165.0, 48.0);
        let drag = f.input.active_drag().unwrap();
        assert_eq!(drag.dir, HandleDir::Right);
        assert_eq!(drag.anchor, Vec2::new(165.0, 48.0));

        f.move_to(200.4, 10.0);
        assert_eq!(f.world.active_level().unwrap().bounds(), RectI::new(0, 0, 200, 96));
        assert!(f.world.active_level().unwrap().handle(HandleDir::Right).hovered);

        f.up(PointerButton::Left);
        assert!(f.input.active_drag().is_none());

        // moving after release changes nothing
        f.move_to(300.0, 10.0);
        assert_eq!(f.world.active_level().unwrap().bounds(), RectI::new(0, 0, 200, 96));
    }

    #[test]
    fn test_drag_past_opposite_edge_normalizes_on_release() {
        let mut f = fixture();
        f.add_level(RectI::new(0, 0, 160, 96));
        f.down(PointerButton::Left, 165.0, 48.0);
        f.move_to(-40.0, 48.0);
        assert_eq!(f.world.active_level().unwrap().bounds().w, -40);
        f.up(PointerButton::Left);
        assert_eq!(f.world.active_level().unwrap().bounds(), RectI::new(-40, 0, 40, 96));
    }

    #[test]
    fn test_drag_center_moves_level() {
        let mut f = fixture();
        f.add_level(RectI::new(0, 0, 160, 96));
        f.down(PointerButton::Left, 80.0, 48.0);
        assert_eq!(f.input.active_drag().unwrap().dir, HandleDir::Center);
        f.move_to(180.0, 148.0);
        f.up(PointerButton::Left);
        assert_eq!(f.world.active_level().unwrap().bounds(), RectI::new(100, 100, 160, 96));
    }

    #[test]
    fn test_paint_with_selection() {
        let mut f = fixture();
        f.add_level(RectI::new(0, 0, 160, 96));
        f.add_painted_layer();
        f.selection.select(5);

        f.down(PointerButton::Left, 20.0, 20.0);
        assert!(f.input.painting);
        assert!(f.input.active_drag().is_none());
        f.move_to(20.0, 20.0);
        f.move_to(40.0, 20.0);
        f.up(PointerButton::Left);
        assert!(!f.input.painting);

        assert_eq!(f.tile_index(1, 1), 5);
        assert_eq!(f.tile_index(2, 1), 5);
        assert_eq!(f.tile_index(3, 1), -1);
    }

    #[test]
    fn test_paint_multi_tile_stamp() {
        let mut f = fixture();
        f.add_level(RectI::new(0, 0, 160, 96));
        f.add_painted_layer();
        let tileset = Tileset::from_image("sheet.png", 32, 32, 8).unwrap();
        f.selection
            .select_region(&tileset, Point::new(1, 1), Point::new(2, 2));

        f.down(PointerButton::Left, 40.0, 40.0);
        f.move_to(40.0, 40.0);
        assert_eq!(f.tile_index(2, 2), 5);
        assert_eq!(f.tile_index(3, 2), 6);
        assert_eq!(f.tile_index(2, 1), 9);
        assert_eq!(f.tile_index(3, 1), 10);
    }

    #[test]
    fn test_erase_without_selection() {
        let mut f = fixture();
        f.add_level(RectI::new(0, 0, 160, 96));
        f.add_painted_layer();
        f.world
            .active_level_mut()
            .unwrap()
            .tile_layer_mut()
            .unwrap()
            .paint(1, 1, 3);

        f.down(PointerButton::Right, 20.0, 20.0);
        assert!(f.input.erasing);
        assert!(!f.input.is_prompt_shown());
        f.move_to(20.0, 20.0);
        assert_eq!(f.tile_index(1, 1), -1);

        f.up(PointerButton::Right);
        assert!(!f.input.erasing);
    }

    #[test]
    fn test_middle_drag_pans() {
        let mut f = fixture();
        f.down(PointerButton::Middle, 0.0, 0.0);
        f.input
            .update(&mut f.world, &mut f.camera, &f.selection, screen(10.0, 0.0));
        assert_eq!(f.camera.target_position(), Vec2::new(-10.0, 0.0));
        assert!(f.camera.panning);
        f.up(PointerButton::Middle);
        assert!(!f.camera.panning);
    }

    #[test]
    fn test_keys() {
        let mut f = fixture();
        assert_eq!(f.input.key_pressed(EditorKey::Confirm, &mut f.world), InputAction::None);
        f.add_level(RectI::new(0, 0, 50, 50));
        assert_eq!(f.input.key_pressed(EditorKey::Confirm, &mut f.world), InputAction::Recenter);
        assert_eq!(
            f.input.key_pressed(EditorKey::Delete, &mut f.world),
            InputAction::ActiveLevelChanged
        );
        assert!(f.world.is_empty());
        assert_eq!(f.input.key_pressed(EditorKey::Delete, &mut f.world), InputAction::None);
    }
}
