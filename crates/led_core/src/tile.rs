//! A single cell of a tile layer

use crate::Point;
use serde::{Deserialize, Serialize};

/// Tileset index stored in cells that have nothing painted
pub const EMPTY_TILE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Column and row inside the owning layer's grid
    pub grid: Point,
    pub tileset_index: i32,
}

impl Tile {
    pub fn new(col: i32, row: i32) -> Self {
        Self {
            grid: Point::new(col, row),
            tileset_index: EMPTY_TILE,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tileset_index < 0
    }

    pub fn paint(&mut self, tileset_index: i32) {
        self.tileset_index = tileset_index.max(EMPTY_TILE);
    }

    pub fn erase(&mut self) {
        self.tileset_index = EMPTY_TILE;
    }
}
