//! Tileset selection used as the paint brush

use crate::{Point, Tileset};

/// One tile of a stamp, offset from the stamp's anchor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampTile {
    /// Offset in layer cells; `y` grows upward like the world
    pub offset: Point,
    pub index: i32,
}

/// Selected tileset indices, kept sorted and unique
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileSelection {
    indices: Vec<u32>,
}

impl TileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn contains(&self, index: u32) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Replace the selection with a single tile
    pub fn select(&mut self, index: u32) {
        self.indices.clear();
        self.indices.push(index);
    }

    /// Add or remove one tile
    pub fn toggle(&mut self, index: u32) {
        match self.indices.binary_search(&index) {
            Ok(pos) => {
                self.indices.remove(pos);
            }
            Err(pos) => self.indices.insert(pos, index),
        }
    }

    /// Replace the selection with the inclusive rectangle spanned by two
    /// tileset cells, dragged in any direction. Cells outside the tileset are skipped.
    pub fn select_region(&mut self, tileset: &Tileset, from: Point, to: Point) {
        self.indices.clear();
        let (c0, c1) = (from.x.min(to.x), from.x.max(to.x));
        let (r0, r1) = (from.y.min(to.y), from.y.max(to.y));
        for row in r0..=r1 {
            for col in c0..=c1 {
                if let Some(region) = tileset.get_at(col, row) {
                    self.indices.push(region.index);
                }
            }
        }
        self.indices.sort_unstable();
        self.indices.dedup();
    }

    /// Offsets of every selected tile relative to the selection's top-left
    /// tile. Tileset rows count down from the top of the image, so they are
    /// negated to become layer rows.
    pub fn stamp(&self, tileset: &Tileset) -> Vec<StampTile> {
        let cols = tileset.cols();
        if cols == 0 {
            return Vec::new();
        }
        let cells: Vec<(i32, i32, u32)> = self
            .indices
            .iter()
            .map(|&i| ((i % cols) as i32, (i / cols) as i32, i))
            .collect();
        let Some(min_col) = cells.iter().map(|c| c.0).min() else {
            return Vec::new();
        };
        let min_row = cells.iter().map(|c| c.1).min().unwrap_or(0);

        cells
            .into_iter()
            .map(|(col, row, index)| StampTile {
                offset: Point::new(col - min_col, -(row - min_row)),
                index: index as i32,
            })
            .collect()
    }
}
