//! World document save/load
//!
//! The document is plain JSON. `name` plus each level's `name` and
//! `pixel_bounds` form the required core; `active` and per-level `layers`
//! are optional so documents written without them still load.

use crate::layer::{grid_cell_count, LayerData, LayerKind, MAX_TILE_CELLS};
use crate::{Entity, Layer, Level, RectI, Tileset, World};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the world document, relative to the working directory
pub const DEFAULT_WORLD_PATH: &str = "levels/world-test.json";

#[derive(Debug)]
pub enum PersistenceError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::IoError(e) => write!(f, "IO error: {}", e),
            PersistenceError::ParseError(e) => write!(f, "Parse error: {}", e),
            PersistenceError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for PersistenceError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldInfo {
    pub name: String,
    /// Index into `levels` of the active level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<usize>,
    pub levels: Vec<LevelInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub name: String,
    pub pixel_bounds: RectI,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<LayerInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerInfo {
    Tiles {
        name: String,
        grid_size: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tileset: Option<TilesetInfo>,
        /// Painted cells only
        #[serde(default)]
        tiles: Vec<TileInfo>,
    },
    Entities {
        name: String,
        #[serde(default)]
        entities: Vec<Entity>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetInfo {
    pub path: PathBuf,
    pub grid_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileInfo {
    pub col: i32,
    pub row: i32,
    pub index: i32,
}

impl LayerInfo {
    pub fn kind(&self) -> LayerKind {
        match self {
            LayerInfo::Tiles { .. } => LayerKind::Tiles,
            LayerInfo::Entities { .. } => LayerKind::Entities,
        }
    }
}

impl Layer {
    pub fn info(&self) -> LayerInfo {
        match &self.data {
            LayerData::Tiles(data) => LayerInfo::Tiles {
                name: self.name().to_string(),
                grid_size: self.grid_size(),
                tileset: self.tileset().and_then(|tileset| {
                    tileset.path().map(|path| TilesetInfo {
                        path: path.to_path_buf(),
                        grid_size: tileset.grid_size(),
                    })
                }),
                tiles: data
                    .painted_cells()
                    .map(|tile| TileInfo {
                        col: tile.grid.x,
                        row: tile.grid.y,
                        index: tile.tileset_index,
                    })
                    .collect(),
            },
            LayerData::Entities(data) => LayerInfo::Entities {
                name: self.name().to_string(),
                entities: data.entities.clone(),
            },
        }
    }

    /// Rebuild a layer for a level with the given bounds. A tileset image
    /// that can no longer be read is logged and left unloaded.
    pub fn from_info(info: &LayerInfo, bounds: RectI) -> Self {
        match info {
            LayerInfo::Tiles {
                name,
                grid_size,
                tileset,
                tiles,
            } => {
                let mut loaded = Tileset::new();
                if let Some(tileset) = tileset {
                    if let Err(e) = loaded.load(&tileset.path, tileset.grid_size) {
                        log::warn!("Could not load tileset {:?}: {}", tileset.path, e);
                    }
                }
                let mut layer = Layer::new_tile_layer(name.clone(), bounds, *grid_size, loaded);
                for tile in tiles {
                    layer.paint(tile.col, tile.row, tile.index);
                }
                layer
            }
            LayerInfo::Entities { name, entities } => {
                let mut layer = Layer::new_entity_layer(name.clone());
                if let Some(data) = layer.entity_data_mut() {
                    data.entities = entities.clone();
                }
                layer
            }
        }
    }
}

impl LevelInfo {
    /// Reject bounds whose edges overflow and tile grids too large to allocate
    fn check(&self) -> Result<(), PersistenceError> {
        let bounds = self.pixel_bounds.normalized();
        if bounds.x.checked_add(bounds.w).is_none() || bounds.y.checked_add(bounds.h).is_none() {
            return Err(PersistenceError::ParseError(format!(
                "level '{}': bounds {} out of range",
                self.name, self.pixel_bounds
            )));
        }
        for layer in &self.layers {
            if let LayerInfo::Tiles { name, grid_size, .. } = layer {
                if grid_cell_count(bounds, *grid_size).is_none() {
                    return Err(PersistenceError::ParseError(format!(
                        "level '{}' layer '{}': {} at grid size {} needs more than {} tiles",
                        self.name, name, bounds, grid_size, MAX_TILE_CELLS
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Level {
    /// Snapshot for persistence
    pub fn info(&self) -> LevelInfo {
        LevelInfo {
            name: self.name.clone(),
            pixel_bounds: self.bounds(),
            layers: self.layers().iter().map(Layer::info).collect(),
        }
    }

    /// Rebuild a level from a snapshot. Inverted bounds are normalized.
    pub fn from_info(info: &LevelInfo) -> Self {
        let bounds = info.pixel_bounds.normalized();
        let mut level = Level::with_bounds(info.name.clone(), bounds);
        for layer in &info.layers {
            level.add_layer(Layer::from_info(layer, bounds));
        }
        level
    }
}

impl World {
    pub fn info(&self) -> WorldInfo {
        WorldInfo {
            name: self.name.clone(),
            active: self
                .active_id()
                .and_then(|id| self.levels().iter().position(|l| l.id() == id)),
            levels: self.levels().iter().map(Level::info).collect(),
        }
    }

    /// Build a world from a document. Without an `active` index the last
    /// level becomes active, matching what adding them one by one does.
    /// Levels with out-of-range bounds or tile layers needing more than
    /// [`MAX_TILE_CELLS`] cells are rejected.
    pub fn from_info(info: &WorldInfo) -> Result<Self, PersistenceError> {
        for level in &info.levels {
            level.check()?;
        }

        let mut world = World::new(info.name.clone());
        for level in &info.levels {
            world.add_level(Level::from_info(level));
        }
        if let Some(id) = info
            .active
            .and_then(|index| world.levels().get(index))
            .map(Level::id)
        {
            world.make_active(id);
        }
        Ok(world)
    }

    /// Serialize the world as pretty-printed JSON, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(&self.info())
            .map_err(|e| PersistenceError::SerializeError(e.to_string()))?;

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| PersistenceError::IoError(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| PersistenceError::IoError(e.to_string()))?;

        log::info!("Saved world '{}' ({} levels) to {:?}", self.name, self.levels().len(), path);
        Ok(())
    }

    /// Read a world document into a new world
    pub fn read(path: &Path) -> Result<Self, PersistenceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PersistenceError::IoError(e.to_string()))?;

        let info: WorldInfo = serde_json::from_str(&content)
            .map_err(|e| PersistenceError::ParseError(e.to_string()))?;

        World::from_info(&info)
    }

    /// Replace this world with the document at `path`.
    /// On error the world is left untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), PersistenceError> {
        let world = World::read(path)?;
        log::info!("Loaded world '{}' ({} levels) from {:?}", world.name, world.levels().len(), path);
        *self = world;
        Ok(())
    }
}
