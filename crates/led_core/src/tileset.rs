//! Tileset: a sprite sheet sliced into a square grid of sub-images

use crate::RectI;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum TilesetError {
    IoError(String),
    DecodeError(String),
    InvalidGridSize(u32),
}

impl std::fmt::Display for TilesetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TilesetError::IoError(e) => write!(f, "IO error: {}", e),
            TilesetError::DecodeError(e) => write!(f, "Image decode error: {}", e),
            TilesetError::InvalidGridSize(size) => write!(f, "Invalid grid size: {}", size),
        }
    }
}

impl std::error::Error for TilesetError {}

/// Source image backing a tileset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// One sub-image of a tileset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRegion {
    /// Linear row-major index, 0 at the top-left of the image
    pub index: u32,
    pub col: u32,
    pub row: u32,
    /// Pixel rect inside the source image, y measured from the top
    pub rect: RectI,
}

#[derive(Debug, Clone, Default)]
pub struct Tileset {
    image: Option<TilesetImage>,
    grid_size: u32,
    cols: u32,
    rows: u32,
}

impl Tileset {
    /// Create an empty tileset with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tileset from an image whose dimensions are already known
    pub fn from_image(
        path: impl Into<PathBuf>,
        width: u32,
        height: u32,
        grid_size: u32,
    ) -> Result<Self, TilesetError> {
        let mut tileset = Self::new();
        tileset.set_image(
            TilesetImage {
                path: path.into(),
                width,
                height,
            },
            grid_size,
        )?;
        Ok(tileset)
    }

    /// Load the image header at `path` and slice it into `grid_size` squares.
    /// Any previously loaded image is released first.
    pub fn load(&mut self, path: impl AsRef<Path>, grid_size: u32) -> Result<(), TilesetError> {
        let path = path.as_ref();
        if grid_size == 0 {
            return Err(TilesetError::InvalidGridSize(grid_size));
        }

        self.dispose();

        let (width, height) = image::image_dimensions(path).map_err(|e| match e {
            image::ImageError::IoError(io) => TilesetError::IoError(io.to_string()),
            other => TilesetError::DecodeError(other.to_string()),
        })?;

        self.set_image(
            TilesetImage {
                path: path.to_path_buf(),
                width,
                height,
            },
            grid_size,
        )?;

        log::info!(
            "Loaded tileset {:?}: {}x{} px, {}x{} tiles of {} px",
            path,
            width,
            height,
            self.cols,
            self.rows,
            grid_size
        );
        Ok(())
    }

    fn set_image(&mut self, image: TilesetImage, grid_size: u32) -> Result<(), TilesetError> {
        if grid_size == 0 {
            return Err(TilesetError::InvalidGridSize(grid_size));
        }
        self.cols = image.width / grid_size;
        self.rows = image.height / grid_size;
        self.grid_size = grid_size;
        self.image = Some(image);
        Ok(())
    }

    /// Release the current image
    pub fn dispose(&mut self) {
        if let Some(image) = self.image.take() {
            log::debug!("Disposing tileset image {:?}", image.path);
        }
        self.cols = 0;
        self.rows = 0;
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&TilesetImage> {
        self.image.as_ref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.image.as_ref().map(|image| image.path.as_path())
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn tile_count(&self) -> u32 {
        self.cols * self.rows
    }

    /// Sub-image by linear index, `None` when out of range
    pub fn get(&self, index: i32) -> Option<TileRegion> {
        if index < 0 || self.cols == 0 {
            return None;
        }
        let index = index as u32;
        self.get_at((index % self.cols) as i32, (index / self.cols) as i32)
    }

    /// Sub-image by column and row, `None` when outside `[0, cols) x [0, rows)`
    pub fn get_at(&self, col: i32, row: i32) -> Option<TileRegion> {
        if col < 0 || row < 0 || col as u32 >= self.cols || row as u32 >= self.rows {
            return None;
        }
        let (col, row) = (col as u32, row as u32);
        let size = self.grid_size as i32;
        Some(TileRegion {
            index: row * self.cols + col,
            col,
            row,
            rect: RectI::new(col as i32 * size, row as i32 * size, size, size),
        })
    }

    /// Every sub-image in index order
    pub fn regions(&self) -> impl Iterator<Item = TileRegion> + '_ {
        (0..self.tile_count() as i32).filter_map(move |index| self.get(index))
    }
}
