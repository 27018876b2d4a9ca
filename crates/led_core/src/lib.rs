//! Editing core for the led level editor
//!
//! This crate holds everything that does not depend on a window or a GPU:
//! - `World` / `Level` - levels placed in a world, one of them active
//! - `Layer` - tile grids and entity lists attached to a level
//! - `Tileset` - sprite sheet slicing and index lookup
//! - `Camera` - eased pan/zoom and screen/world transforms
//! - `WorldInput` - pointer and key handling (drag handles, painting, picking)
//! - `Editor` - the session tying the above together, plus save/load
//!
//! Drawing goes through the [`Painter`] trait, implemented by the host.

mod camera;
mod editor;
mod entity;
mod geometry;
mod input;
mod layer;
mod level;
mod persistence;
mod render;
mod selection;
mod tile;
mod tileset;
mod world;

pub use camera::{
    exp_out, lerp_exp, Camera, CAMERA_MAX, CAMERA_MIN, DEFAULT_VIEWPORT, DEFAULT_ZOOM, PAN_SPEED,
    ZOOM_MAX, ZOOM_MIN, ZOOM_SPEED,
};
pub use editor::{Editor, DEFAULT_SIDEBAR_WIDTH, DEFAULT_TILESET_GRID_SIZE, DEFAULT_TILESET_PATH};
pub use entity::Entity;
pub use geometry::{Point, RectI};
pub use input::{ActiveDrag, EditorKey, InputAction, PointerButton, WorldInput};
pub use layer::{
    grid_cell_count, grid_dims, Attribute, AttributeKind, EntityData, Layer, LayerData, LayerKind,
    TileData, DEFAULT_GRID_SIZE, MAX_TILE_CELLS,
};
pub use level::{
    DragHandle, DragHandles, HandleDir, Level, LevelId, DEFAULT_HANDLE_RADIUS, DEFAULT_LEVEL_SIZE,
};
pub use persistence::{
    LayerInfo, LevelInfo, PersistenceError, TileInfo, TilesetInfo, WorldInfo, DEFAULT_WORLD_PATH,
};
pub use render::{Color, EntityDraw, LayerDrawList, Painter, RenderStyle, TileDraw};
pub use selection::{StampTile, TileSelection};
pub use tile::{Tile, EMPTY_TILE};
pub use tileset::{TileRegion, Tileset, TilesetError, TilesetImage};
pub use world::{World, DEFAULT_WORLD_NAME};

/// Re-exported so hosts use the same vector type as the core
pub use glam::Vec2;
