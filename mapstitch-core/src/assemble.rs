//! Tile grid assembly.
//!
//! Tiles are placed row-major: tile 1 in the top-left cell, increasing left
//! to right, then top to bottom. The source assets are numbered in exactly
//! this order, so the traversal is part of the contract. Optionally the grid
//! is centred on a square canvas whose size satisfies the power-of-two rule
//! of the downstream texture format.

use std::path::{Path, PathBuf};

use image::{imageops, Rgb, RgbImage};

use crate::error::{AssembleError, ConfigError};
use crate::store::ImageStore;
use crate::tileset::{OutputFormat, TileSet};

/// Shared per-batch layout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub tile_size: u32,
    pub target_size: Option<u32>,
    pub background: Rgb<u8>,
    pub format: OutputFormat,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            tile_size: crate::tileset::schema::DEFAULT_TILE_SIZE,
            target_size: Some(crate::tileset::schema::DEFAULT_TARGET_SIZE),
            background: Rgb([0, 0, 0]),
            format: OutputFormat::Png,
        }
    }
}

impl Layout {
    /// Everything that can be wrong with `set` before a tile is opened:
    /// its shape, pixel overflow, and a target too small to hold the grid.
    pub fn check(&self, set: &TileSet) -> Result<(), ConfigError> {
        set.validate()?;
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        let (width, height) = set.grid_size(self.tile_size)?;
        if let Some(target) = self.target_size {
            if target < width || target < height {
                return Err(ConfigError::TargetTooSmall { name: set.name.clone(), target, width, height });
            }
        }
        Ok(())
    }

    /// Final canvas size for `set`.
    pub fn output_size(&self, set: &TileSet) -> Result<(u32, u32), ConfigError> {
        let (width, height) = set.grid_size(self.tile_size)?;
        Ok(match self.target_size {
            Some(target) if target > width || target > height => (target, target),
            _ => (width, height),
        })
    }
}

pub fn tile_path(dir: &Path, name: &str, index: u32) -> PathBuf {
    dir.join(format!("{}{}.png", name, index))
}

pub fn output_path(dir: &Path, name: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}.{}", name, format.extension()))
}

/// Pixel origin of the 0-based tile `index` on a grid `columns` wide.
pub fn tile_origin(index: u32, columns: u32, tile_size: u32) -> (u32, u32) {
    ((index % columns) * tile_size, (index / columns) * tile_size)
}

/// Offset that centres a `width x height` image on a `size x size` square.
/// Odd remainders round towards the top-left.
pub fn center_offset(size: u32, width: u32, height: u32) -> (u32, u32) {
    ((size - width) / 2, (size - height) / 2)
}

/// Copy `tiles` onto a fresh background-filled canvas sized for `set`.
pub fn compose_grid(
    tiles: &[RgbImage],
    set: &TileSet,
    tile_size: u32,
    background: Rgb<u8>,
) -> Result<RgbImage, ConfigError> {
    let (width, height) = set.grid_size(tile_size)?;
    let mut canvas = RgbImage::from_pixel(width, height, background);
    for (idx, tile) in tiles.iter().enumerate() {
        let (x, y) = tile_origin(idx as u32, set.columns, tile_size);
        imageops::replace(&mut canvas, tile, x as i64, y as i64);
    }
    Ok(canvas)
}

/// Centre `base` on a `size x size` background square. `size` must cover
/// both dimensions of `base`.
pub fn pad_to_square(base: &RgbImage, size: u32, background: Rgb<u8>) -> RgbImage {
    let (x, y) = center_offset(size, base.width(), base.height());
    log::debug!("padding {}x{} to {}x{} at ({}, {})", base.width(), base.height(), size, size, x, y);
    let mut square = RgbImage::from_pixel(size, size, background);
    imageops::replace(&mut square, base, x as i64, y as i64);
    square
}

/// Resolve, decode and check every tile of `set` without touching any
/// canvas. The first problem found aborts the whole set.
pub fn load_tiles<S: ImageStore + ?Sized>(
    store: &S,
    dir: &Path,
    set: &TileSet,
    tile_size: u32,
) -> Result<Vec<RgbImage>, AssembleError> {
    let paths: Vec<PathBuf> = (1..=set.tile_count).map(|i| tile_path(dir, &set.name, i)).collect();
    for (i, path) in paths.iter().enumerate() {
        if !store.exists(path) {
            return Err(AssembleError::MissingTile { set: set.name.clone(), index: i as u32 + 1, path: path.clone() });
        }
    }

    let mut tiles = Vec::with_capacity(paths.len());
    for (i, path) in paths.into_iter().enumerate() {
        let index = i as u32 + 1;
        let tile = match store.open(&path) {
            Ok(img) => img.to_rgb8(),
            Err(source) => return Err(AssembleError::Decode { set: set.name.clone(), index, path, source }),
        };
        if tile.dimensions() != (tile_size, tile_size) {
            return Err(AssembleError::DimensionMismatch {
                set: set.name.clone(),
                index,
                expected: tile_size,
                actual: tile.dimensions(),
            });
        }
        tiles.push(tile);
    }
    Ok(tiles)
}

/// Build the canvas for `set` in memory.
pub fn render<S: ImageStore + ?Sized>(
    store: &S,
    dir: &Path,
    set: &TileSet,
    layout: &Layout,
) -> Result<RgbImage, AssembleError> {
    layout.check(set)?;
    let tiles = load_tiles(store, dir, set, layout.tile_size)?;

    let (width, height) = set.grid_size(layout.tile_size)?;
    log::info!("{}: assembling {} tiles ({}x{})", set.name, tiles.len(), width, height);
    let grid = compose_grid(&tiles, set, layout.tile_size, layout.background)?;
    drop(tiles);

    Ok(match layout.target_size {
        Some(target) if target > width || target > height => pad_to_square(&grid, target, layout.background),
        _ => grid,
    })
}

/// Assemble `set` from the tiles in `dir` and write `{dir}/{name}.{ext}`.
/// Nothing is written unless every tile resolved and validated.
pub fn assemble<S: ImageStore + ?Sized>(
    store: &S,
    dir: &Path,
    set: &TileSet,
    layout: &Layout,
) -> Result<PathBuf, AssembleError> {
    let canvas = render(store, dir, set, layout)?;
    let out = output_path(dir, &set.name, layout.format);
    store
        .save(&canvas, &out, layout.format)
        .map_err(|source| AssembleError::Persist { set: set.name.clone(), path: out.clone(), source })?;
    log::info!("{}: wrote {} ({}x{})", set.name, out.display(), canvas.width(), canvas.height());
    Ok(out)
}
