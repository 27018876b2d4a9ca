//! Layer types for tile and entity layers
//!
//! A layer carries a small set of attributes (name, grid size, tileset) and
//! its content, which is either a dense tile grid sized from the owning
//! level's bounds or a list of entities.

use crate::render::{rect_min, rect_size, Color, EntityDraw, LayerDrawList, Painter, TileDraw};
use crate::{Entity, Point, RectI, Tile, Tileset};
use glam::Vec2;

pub const DEFAULT_GRID_SIZE: u32 = 16;

/// Largest tile grid a layer allocates, in cells
pub const MAX_TILE_CELLS: u32 = 1 << 22;

const TILE_FILL: Color = Color::rgba(1.0, 160.0 / 255.0, 0.0, 0.5);
const TILE_OUTLINE: Color = Color::rgba(139.0 / 255.0, 69.0 / 255.0, 19.0 / 255.0, 0.8);
const ENTITY_ORIGIN_RADIUS: f32 = 3.0;

/// Kinds of attribute a layer can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Name,
    GridSize,
    Tileset,
}

#[derive(Debug, Clone)]
pub enum Attribute {
    Name(String),
    GridSize(u32),
    Tileset(Tileset),
}

impl Attribute {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::Name(_) => AttributeKind::Name,
            Attribute::GridSize(_) => AttributeKind::GridSize,
            Attribute::Tileset(_) => AttributeKind::Tileset,
        }
    }
}

/// The type of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Tiles,
    Entities,
}

/// Dense grid of tiles covering the owning level
#[derive(Debug, Clone)]
pub struct TileData {
    /// Hidden while the owning level is being resized
    pub visible: bool,
    cols: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

/// Grid shape `ceil(w / grid) x ceil(h / grid)` covering `bounds`
pub fn grid_dims(bounds: RectI, grid_size: u32) -> (u32, u32) {
    let grid = grid_size.max(1);
    (
        (bounds.w.max(0) as u32).div_ceil(grid),
        (bounds.h.max(0) as u32).div_ceil(grid),
    )
}

/// Cells needed to cover `bounds`, `None` past [`MAX_TILE_CELLS`]
pub fn grid_cell_count(bounds: RectI, grid_size: u32) -> Option<u32> {
    let (cols, rows) = grid_dims(bounds, grid_size);
    cols.checked_mul(rows).filter(|&n| n <= MAX_TILE_CELLS)
}

impl TileData {
    /// Allocate an all-empty grid of `ceil(w / grid) x ceil(h / grid)` cells.
    /// A grid over [`MAX_TILE_CELLS`] is left empty (0 x 0).
    pub fn new(bounds: RectI, grid_size: u32) -> Self {
        let (cols, rows) = match grid_cell_count(bounds, grid_size) {
            Some(_) => grid_dims(bounds, grid_size),
            None => {
                log::warn!(
                    "Tile grid for {} at grid size {} exceeds {} cells, leaving it empty",
                    bounds,
                    grid_size,
                    MAX_TILE_CELLS
                );
                (0, 0)
            }
        };

        let mut tiles = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                tiles.push(Tile::new(col as i32, row as i32));
            }
        }

        Self {
            visible: true,
            cols,
            rows,
            tiles,
        }
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as u32 >= self.cols || row as u32 >= self.rows {
            return None;
        }
        Some(row as usize * self.cols as usize + col as usize)
    }

    pub fn tile(&self, col: i32, row: i32) -> Option<&Tile> {
        self.index(col, row).map(|i| &self.tiles[i])
    }

    /// Out-of-range coordinates are ignored
    pub fn paint(&mut self, col: i32, row: i32, tileset_index: i32) {
        if let Some(i) = self.index(col, row) {
            self.tiles[i].paint(tileset_index);
        }
    }

    /// Out-of-range coordinates are ignored
    pub fn erase(&mut self, col: i32, row: i32) {
        if let Some(i) = self.index(col, row) {
            self.tiles[i].erase();
        }
    }

    pub fn painted_cells(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|tile| !tile.is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntityData {
    pub entities: Vec<Entity>,
}

/// The data contained in a layer
#[derive(Debug, Clone)]
pub enum LayerData {
    Tiles(TileData),
    Entities(EntityData),
}

/// A layer (tiles or entities)
#[derive(Debug, Clone)]
pub struct Layer {
    attributes: Vec<Attribute>,
    pub data: LayerData,
}

impl Layer {
    /// Create a tile layer covering `bounds`
    pub fn new_tile_layer(name: String, bounds: RectI, grid_size: u32, tileset: Tileset) -> Self {
        Self {
            attributes: vec![
                Attribute::Name(name),
                Attribute::Tileset(tileset),
                Attribute::GridSize(grid_size),
            ],
            data: LayerData::Tiles(TileData::new(bounds, grid_size)),
        }
    }

    /// Create an empty entity layer
    pub fn new_entity_layer(name: String) -> Self {
        Self {
            attributes: vec![
                Attribute::Name(name),
                Attribute::GridSize(DEFAULT_GRID_SIZE),
            ],
            data: LayerData::Entities(EntityData::default()),
        }
    }

    pub fn kind(&self) -> LayerKind {
        match &self.data {
            LayerData::Tiles(_) => LayerKind::Tiles,
            LayerData::Entities(_) => LayerKind::Entities,
        }
    }

    pub fn attribute(&self, kind: AttributeKind) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.kind() == kind)
    }

    pub fn attribute_mut(&mut self, kind: AttributeKind) -> Option<&mut Attribute> {
        self.attributes.iter_mut().find(|a| a.kind() == kind)
    }

    /// Insert an attribute, replacing any existing one of the same kind
    pub fn set_attribute(&mut self, attribute: Attribute) {
        match self.attribute_mut(attribute.kind()) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    pub fn name(&self) -> &str {
        match self.attribute(AttributeKind::Name) {
            Some(Attribute::Name(name)) => name,
            _ => "[no name attribute]",
        }
    }

    pub fn grid_size(&self) -> u32 {
        match self.attribute(AttributeKind::GridSize) {
            Some(Attribute::GridSize(size)) => *size,
            _ => DEFAULT_GRID_SIZE,
        }
    }

    pub fn tileset(&self) -> Option<&Tileset> {
        match self.attribute(AttributeKind::Tileset) {
            Some(Attribute::Tileset(tileset)) => Some(tileset),
            _ => None,
        }
    }

    pub fn tileset_mut(&mut self) -> Option<&mut Tileset> {
        match self.attribute_mut(AttributeKind::Tileset) {
            Some(Attribute::Tileset(tileset)) => Some(tileset),
            _ => None,
        }
    }

    pub fn tile_data(&self) -> Option<&TileData> {
        match &self.data {
            LayerData::Tiles(data) => Some(data),
            LayerData::Entities(_) => None,
        }
    }

    pub fn tile_data_mut(&mut self) -> Option<&mut TileData> {
        match &mut self.data {
            LayerData::Tiles(data) => Some(data),
            LayerData::Entities(_) => None,
        }
    }

    pub fn entity_data(&self) -> Option<&EntityData> {
        match &self.data {
            LayerData::Entities(data) => Some(data),
            LayerData::Tiles(_) => None,
        }
    }

    pub fn entity_data_mut(&mut self) -> Option<&mut EntityData> {
        match &mut self.data {
            LayerData::Entities(data) => Some(data),
            LayerData::Tiles(_) => None,
        }
    }

    /// Rebuild the tile grid for the owning level's current bounds.
    /// All painted tiles are discarded. Entity layers are left untouched.
    pub fn regenerate(&mut self, bounds: RectI) {
        let grid_size = self.grid_size();
        if let LayerData::Tiles(data) = &mut self.data {
            *data = TileData::new(bounds, grid_size);
        }
    }

    pub fn paint(&mut self, col: i32, row: i32, tileset_index: i32) {
        if let Some(data) = self.tile_data_mut() {
            data.paint(col, row, tileset_index);
        }
    }

    pub fn erase(&mut self, col: i32, row: i32) {
        if let Some(data) = self.tile_data_mut() {
            data.erase(col, row);
        }
    }

    /// The grid cell under a world position, if it lies inside the level and the grid
    pub fn cell_at(&self, bounds: RectI, pos: Vec2) -> Option<Point> {
        let data = self.tile_data()?;
        if !bounds.contains(pos) {
            return None;
        }
        let grid = self.grid_size().max(1) as f32;
        let col = ((pos.x - bounds.x as f32) / grid).floor() as i32;
        let row = ((pos.y - bounds.y as f32) / grid).floor() as i32;
        data.tile(col, row).map(|tile| tile.grid)
    }

    /// Geometry for the renderer; tile cells are expressed in world space
    pub fn draw_list(&self, bounds: RectI) -> LayerDrawList {
        match &self.data {
            LayerData::Tiles(data) => {
                let grid = self.grid_size() as i32;
                let tileset = self.tileset();
                let cells = data
                    .tiles
                    .iter()
                    .map(|tile| TileDraw {
                        grid: tile.grid,
                        rect: RectI::new(
                            bounds.x + tile.grid.x * grid,
                            bounds.y + tile.grid.y * grid,
                            grid,
                            grid,
                        ),
                        region: if tile.is_empty() {
                            None
                        } else {
                            tileset.and_then(|t| t.get(tile.tileset_index))
                        },
                    })
                    .collect();
                LayerDrawList::Tiles {
                    visible: data.visible,
                    clip: bounds,
                    cells,
                }
            }
            LayerData::Entities(data) => LayerDrawList::Entities(
                data.entities
                    .iter()
                    .map(|entity| EntityDraw {
                        bounds: entity.bounds,
                        origin: entity.origin_world(),
                    })
                    .collect(),
            ),
        }
    }

    pub fn render(&self, painter: &mut dyn Painter, bounds: RectI) {
        match self.draw_list(bounds) {
            LayerDrawList::Tiles {
                visible,
                clip,
                cells,
            } => {
                if !visible {
                    return;
                }
                // tiles can extend past the level bounds after the ceil division
                painter.push_clip(clip);
                for cell in &cells {
                    let min = rect_min(cell.rect);
                    let size = rect_size(cell.rect);
                    painter.fill_rect(min, size, TILE_FILL);
                    painter.stroke_rect(min, size, 1.0, TILE_OUTLINE);
                    if let (Some(region), Some(tileset)) = (cell.region, self.tileset()) {
                        painter.tile_image(tileset, region, min, size, Color::WHITE);
                    }
                }
                painter.pop_clip();
            }
            LayerDrawList::Entities(entities) => {
                for entity in &entities {
                    let min = rect_min(entity.bounds);
                    let size = rect_size(entity.bounds);
                    painter.fill_rect(min, size, Color::TEAL);
                    painter.stroke_rect(min, size, 1.0, Color::SKY);
                    painter.fill_circle(entity.origin, ENTITY_ORIGIN_RADIUS, Color::ORANGE);
                }
            }
        }
    }
}

impl EntityData {
    pub fn add(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Topmost entity containing the point
    pub fn entity_at(&self, pos: Vec2) -> Option<&Entity> {
        self.entities.iter().rev().find(|e| e.bounds.contains(pos))
    }

    /// Remove the topmost entity containing the point
    pub fn remove_at(&mut self, pos: Vec2) -> Option<Entity> {
        let index = self.entities.iter().rposition(|e| e.bounds.contains(pos))?;
        Some(self.entities.remove(index))
    }
}
