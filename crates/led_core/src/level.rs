//! Level: a rectangular editable region of the world
//!
//! A level owns its pixel bounds, its layers and five drag handles. Bounds
//! only change through the methods here, and every one of them recomputes
//! the handle positions so hit-testing on the next frame sees the new shape.

use crate::layer::{grid_cell_count, grid_dims, LayerKind, TileData, DEFAULT_GRID_SIZE};
use crate::render::{rect_min, rect_size, Color, Painter, RenderStyle};
use crate::{Layer, Point, RectI, Tileset};
use glam::Vec2;
use std::ops::{Index, IndexMut};
use uuid::Uuid;

/// Identifier of a level inside a world
pub type LevelId = Uuid;

pub const DEFAULT_HANDLE_RADIUS: f32 = 5.0;
/// New levels are 10 x 6 cells of the default grid size
pub const DEFAULT_LEVEL_SIZE: Point = Point::new(
    10 * DEFAULT_GRID_SIZE as i32,
    6 * DEFAULT_GRID_SIZE as i32,
);

const OUTLINE: Color = Color::hex(0xffd700ff);
const OUTLINE_DIM: Color = Color::hex(0xaf770033);
const HIGHLIGHT: Color = Color::hex(0xdaa5203f);
const HIGHLIGHT_DIM: Color = Color::hex(0xca951033);
const HANDLE: Color = Color::rgba(100.0 / 255.0, 1.0, 100.0 / 255.0, 0.8);
const HANDLE_DIM: Color = Color::rgba(150.0 / 255.0, 150.0 / 255.0, 150.0 / 255.0, 0.33);
const CENTER_HANDLE: Color = Color::rgba(1.0, 1.0, 0.0, 0.1);
const CENTER_HANDLE_DIM: Color = Color::rgba(0.1, 0.1, 0.1, 0.1);

/// Which part of the level a handle manipulates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleDir {
    Left,
    Right,
    Up,
    Down,
    /// Moves the whole level without resizing it
    Center,
}

impl HandleDir {
    pub const ALL: [HandleDir; 5] = [
        HandleDir::Left,
        HandleDir::Right,
        HandleDir::Up,
        HandleDir::Down,
        HandleDir::Center,
    ];

    fn index(self) -> usize {
        match self {
            HandleDir::Left => 0,
            HandleDir::Right => 1,
            HandleDir::Up => 2,
            HandleDir::Down => 3,
            HandleDir::Center => 4,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    /// Left or bottom: moves the origin and grows/shrinks the extent
    Min,
    /// Right or top: only the extent changes
    Max,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragHandle {
    pub dir: HandleDir,
    pub center: Vec2,
    /// Effective radius in world units, scaled by the camera zoom
    pub radius: f32,
    /// Radius at zoom 1.0
    pub world_radius: f32,
    pub hovered: bool,
}

impl DragHandle {
    fn new(dir: HandleDir) -> Self {
        Self {
            dir,
            center: Vec2::ZERO,
            radius: DEFAULT_HANDLE_RADIUS,
            world_radius: DEFAULT_HANDLE_RADIUS,
            hovered: false,
        }
    }

    /// Circle containment test
    pub fn contains(&self, pos: Vec2) -> bool {
        self.center.distance_squared(pos) <= self.radius * self.radius
    }
}

/// The five handles of a level, indexed by direction
#[derive(Debug, Clone, PartialEq)]
pub struct DragHandles([DragHandle; 5]);

impl DragHandles {
    fn new() -> Self {
        Self(HandleDir::ALL.map(DragHandle::new))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DragHandle> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DragHandle> {
        self.0.iter_mut()
    }
}

impl Index<HandleDir> for DragHandles {
    type Output = DragHandle;

    fn index(&self, dir: HandleDir) -> &DragHandle {
        &self.0[dir.index()]
    }
}

impl IndexMut<HandleDir> for DragHandles {
    fn index_mut(&mut self, dir: HandleDir) -> &mut DragHandle {
        &mut self.0[dir.index()]
    }
}

/// A level: bounds, layers and drag handles
#[derive(Debug, Clone)]
pub struct Level {
    id: LevelId,
    pub name: String,
    pixel_bounds: RectI,
    layers: Vec<Layer>,
    handles: DragHandles,
    /// Size at the start of the current drag, used to decide whether tile paint survives
    drag_start_size: Option<Point>,
}

impl Level {
    /// Create a default-sized level with its bottom-left corner at `pos`
    pub fn new_at(name: String, pos: Point) -> Self {
        Self::with_bounds(name, RectI::from_origin_size(pos, DEFAULT_LEVEL_SIZE))
    }

    /// Create a level with explicit bounds
    pub fn with_bounds(name: String, bounds: RectI) -> Self {
        let mut level = Self {
            id: Uuid::new_v4(),
            name,
            pixel_bounds: bounds,
            layers: Vec::new(),
            handles: DragHandles::new(),
            drag_start_size: None,
        };
        level.update_handles();
        level
    }

    pub fn id(&self) -> LevelId {
        self.id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn bounds(&self) -> RectI {
        self.pixel_bounds
    }

    pub fn set_bounds(&mut self, bounds: RectI) {
        self.pixel_bounds = bounds;
        self.update_handles();
    }

    /// Move the origin to `(x, y)` without resizing
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.pixel_bounds.set_position(x, y);
        self.update_handles();
    }

    pub fn set_left_bound(&mut self, x: i32) {
        self.move_edge(Axis::X, Edge::Min, x);
    }

    pub fn set_right_bound(&mut self, x: i32) {
        self.move_edge(Axis::X, Edge::Max, x);
    }

    pub fn set_down_bound(&mut self, y: i32) {
        self.move_edge(Axis::Y, Edge::Min, y);
    }

    pub fn set_up_bound(&mut self, y: i32) {
        self.move_edge(Axis::Y, Edge::Max, y);
    }

    /// Center the level on a world position, keeping its size
    pub fn set_center_bound(&mut self, pos: Vec2) {
        let x = (pos.x - self.pixel_bounds.w as f32 / 2.0).floor() as i32;
        let y = (pos.y - self.pixel_bounds.h as f32 / 2.0).floor() as i32;
        self.set_position(x, y);
    }

    fn move_edge(&mut self, axis: Axis, edge: Edge, value: i32) {
        let RectI { x, y, w, h } = &mut self.pixel_bounds;
        let (origin, extent) = match axis {
            Axis::X => (x, w),
            Axis::Y => (y, h),
        };
        match edge {
            Edge::Min => {
                *extent += *origin - value;
                *origin = value;
            }
            Edge::Max => {
                *extent = value - *origin;
            }
        }
        self.update_handles();
    }

    /// Apply a pointer position to the bounds according to the dragged handle
    pub fn drag_handle(&mut self, dir: HandleDir, pointer: Vec2) {
        let p = Point::from_world(pointer);
        match dir {
            HandleDir::Left => self.set_left_bound(p.x),
            HandleDir::Right => self.set_right_bound(p.x),
            HandleDir::Down => self.set_down_bound(p.y),
            HandleDir::Up => self.set_up_bound(p.y),
            HandleDir::Center => self.set_center_bound(pointer),
        }
    }

    /// Recompute handle positions from the bounds and the current effective radius
    pub fn update_handles(&mut self) {
        let b = self.pixel_bounds;
        let offset = self.handles[HandleDir::Left].radius;
        let mid_x = b.x as f32 + b.w as f32 / 2.0;
        let mid_y = b.y as f32 + b.h as f32 / 2.0;

        self.handles[HandleDir::Left].center = Vec2::new(b.x as f32 - offset, mid_y);
        self.handles[HandleDir::Right].center = Vec2::new((b.x + b.w) as f32 + offset, mid_y);
        self.handles[HandleDir::Up].center = Vec2::new(mid_x, (b.y + b.h) as f32 + offset);
        self.handles[HandleDir::Down].center = Vec2::new(mid_x, b.y as f32 - offset);

        let center = &mut self.handles[HandleDir::Center];
        center.center = Vec2::new(mid_x, mid_y);
        center.radius = (b.w.abs() as f32 / 2.0).min(b.h.abs() as f32 / 2.0);
    }

    /// Scale the edge handles so they keep a constant size on screen
    pub fn set_handle_zoom(&mut self, zoom: f32) {
        for handle in self.handles.iter_mut() {
            if handle.dir != HandleDir::Center {
                handle.radius = handle.world_radius * zoom;
            }
        }
        self.update_handles();
    }

    pub fn handles(&self) -> &DragHandles {
        &self.handles
    }

    pub fn handle(&self, dir: HandleDir) -> &DragHandle {
        &self.handles[dir]
    }

    /// Whether the pointer hits the given handle. The center handle covers the whole bounds.
    pub fn handle_contains(&self, dir: HandleDir, pos: Vec2) -> bool {
        match dir {
            HandleDir::Center => self.pixel_bounds.contains(pos),
            _ => self.handles[dir].contains(pos),
        }
    }

    /// First handle under the pointer; edge handles win over the center
    pub fn handle_at(&self, pos: Vec2) -> Option<HandleDir> {
        HandleDir::ALL
            .into_iter()
            .find(|&dir| self.handle_contains(dir, pos))
    }

    /// Refresh hover flags; the handle being dragged stays highlighted
    pub fn refresh_hover(&mut self, pos: Vec2, dragging: Option<HandleDir>) {
        for dir in HandleDir::ALL {
            let hovered = self.handle_contains(dir, pos) || dragging == Some(dir);
            self.handles[dir].hovered = hovered;
        }
    }

    /// Start of a handle drag: tile paint is hidden until [`Level::reconcile`]
    pub fn begin_drag(&mut self) {
        self.drag_start_size = Some(self.pixel_bounds.size());
        self.set_tiles_visible(false);
    }

    /// End of a handle drag. Flips inverted bounds back to positive extents
    /// and rebuilds tile layers if the level changed size. Returns true if
    /// the tile grids were regenerated.
    pub fn reconcile(&mut self) -> bool {
        if self.pixel_bounds.is_inverted() {
            log::debug!("Normalizing inverted bounds {} of '{}'", self.pixel_bounds, self.name);
            self.pixel_bounds = self.pixel_bounds.normalized();
            self.update_handles();
        }

        let resized = self
            .drag_start_size
            .take()
            .is_none_or(|size| size != self.pixel_bounds.size());

        let bounds = self.pixel_bounds;
        let mut regenerated = false;
        for layer in &mut self.layers {
            if layer.kind() == LayerKind::Tiles && resized {
                layer.regenerate(bounds);
                regenerated = true;
            }
        }
        self.set_tiles_visible(true);
        regenerated
    }

    pub fn set_tiles_visible(&mut self, visible: bool) {
        for layer in &mut self.layers {
            if let Some(data) = layer.tile_data_mut() {
                data.visible = visible;
            }
        }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Add a layer. Tile layers whose grid does not match the bounds are regenerated.
    pub fn add_layer(&mut self, mut layer: Layer) {
        let expected = match grid_cell_count(self.pixel_bounds, layer.grid_size()) {
            Some(_) => grid_dims(self.pixel_bounds, layer.grid_size()),
            None => (0, 0),
        };
        let fits = layer
            .tile_data()
            .is_none_or(|data| (data.cols(), data.rows()) == expected);
        if !fits {
            layer.regenerate(self.pixel_bounds);
        }
        self.layers.push(layer);
    }

    /// Add a tile layer unless one exists already
    pub fn add_tile_layer(&mut self, tileset: Tileset, grid_size: u32) -> bool {
        if self.has_layer(LayerKind::Tiles) {
            return false;
        }
        let name = format!("Tiles{}", self.count_layers(LayerKind::Tiles));
        let layer = Layer::new_tile_layer(name, self.pixel_bounds, grid_size, tileset);
        self.layers.push(layer);
        true
    }

    /// Add an entity layer unless one exists already
    pub fn add_entity_layer(&mut self) -> bool {
        if self.has_layer(LayerKind::Entities) {
            return false;
        }
        let name = format!("Entities{}", self.count_layers(LayerKind::Entities));
        self.layers.push(Layer::new_entity_layer(name));
        true
    }

    fn count_layers(&self, kind: LayerKind) -> usize {
        self.layers.iter().filter(|l| l.kind() == kind).count()
    }

    pub fn remove_layer(&mut self, index: usize) -> Option<Layer> {
        if index < self.layers.len() {
            Some(self.layers.remove(index))
        } else {
            None
        }
    }

    pub fn has_layer(&self, kind: LayerKind) -> bool {
        self.layers.iter().any(|l| l.kind() == kind)
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind() == kind)
    }

    pub fn layer_mut(&mut self, kind: LayerKind) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.kind() == kind)
    }

    pub fn tile_layer(&self) -> Option<&Layer> {
        self.layer(LayerKind::Tiles)
    }

    pub fn tile_layer_mut(&mut self) -> Option<&mut Layer> {
        self.layer_mut(LayerKind::Tiles)
    }

    pub fn tile_data(&self) -> Option<&TileData> {
        self.tile_layer().and_then(|l| l.tile_data())
    }

    /// Tile cell of the tile layer under a world position
    pub fn tile_cell_at(&self, pos: Vec2) -> Option<Point> {
        self.tile_layer()?.cell_at(self.pixel_bounds, pos)
    }

    pub fn render(&self, painter: &mut dyn Painter, style: &RenderStyle, is_active: bool) {
        let b = self.pixel_bounds;
        let min = rect_min(b);
        let size = rect_size(b);

        painter.fill_rect(min, size, if is_active { HIGHLIGHT } else { HIGHLIGHT_DIM });
        painter.stroke_rect(min, size, 2.0 * style.zoom, if is_active { OUTLINE } else { OUTLINE_DIM });

        for layer in &self.layers {
            layer.render(painter, b);
        }

        if !is_active {
            return;
        }

        for handle in self.handles.iter() {
            if handle.dir == HandleDir::Center {
                let color = if handle.hovered { CENTER_HANDLE } else { CENTER_HANDLE_DIM };
                painter.fill_rect(min, size, color);
            } else {
                let color = if handle.hovered { HANDLE } else { HANDLE_DIM };
                painter.fill_circle(handle.center, handle.radius, color);
            }
        }

        let offset = style.label_offset * style.zoom;
        painter.text(
            Vec2::new(b.x as f32 + b.w as f32 / 2.0, b.y as f32 - offset),
            &format!("{} px", b.w),
            style.font_size,
            style.text_color,
            0.0,
        );
        painter.text(
            Vec2::new(b.x as f32 - offset, b.y as f32 + b.h as f32 / 2.0),
            &format!("{} px", b.h),
            style.font_size,
            style.text_color,
            std::f32::consts::FRAC_PI_2,
        );
    }
}
