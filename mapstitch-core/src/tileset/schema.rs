use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One named map: tiles `{name}1.png ..= {name}{tile_count}.png` laid out
/// row-major on a `columns x rows` grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSet {
    pub name: String,
    pub columns: u32,
    pub rows: u32,
    pub tile_count: u32,
}

impl TileSet {
    pub fn new(name: impl Into<String>, columns: u32, rows: u32, tile_count: u32) -> Self {
        Self { name: name.into(), columns, rows, tile_count }
    }

    /// Full grid with one tile per cell. The count saturates at `u32::MAX`.
    pub fn full(name: impl Into<String>, columns: u32, rows: u32) -> Self {
        Self::new(name, columns, rows, columns.saturating_mul(rows))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidTileSet { name: self.name.clone(), reason };
        if self.name.is_empty() {
            return Err(invalid("name is empty".into()));
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(invalid(format!("grid {}x{} has no cells", self.columns, self.rows)));
        }
        if self.tile_count == 0 {
            return Err(invalid("tile_count must be at least 1".into()));
        }
        let cells = self.columns as u64 * self.rows as u64;
        if self.tile_count as u64 > cells {
            return Err(invalid(format!(
                "tile_count {} exceeds {}x{} grid",
                self.tile_count, self.columns, self.rows
            )));
        }
        Ok(())
    }

    /// Pixel size of the unpadded grid.
    pub fn grid_size(&self, tile_size: u32) -> Result<(u32, u32), ConfigError> {
        match (self.columns.checked_mul(tile_size), self.rows.checked_mul(tile_size)) {
            (Some(width), Some(height)) => Ok((width, height)),
            _ => Err(ConfigError::InvalidTileSet {
                name: self.name.clone(),
                reason: format!(
                    "{}x{} grid of {}px tiles overflows u32 pixels",
                    self.columns, self.rows, tile_size
                ),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Tga,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Tga => "tga",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self { OutputFormat::Png }
}

/// Everything one batch run needs: the shared layout plus the tile-set list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    pub tile_size: u32,
    // Square power-of-two canvas for BLP; `None` keeps the bare grid.
    pub target_size: Option<u32>,
    pub background: [u8; 3],
    pub format: OutputFormat,
    pub tile_sets: Vec<TileSet>,
}

pub const DEFAULT_TILE_SIZE: u32 = 256;
pub const DEFAULT_TARGET_SIZE: u32 = 1024;

const CITY_MAPS: [&str; 8] = [
    "Stormwind",
    "Ironforge",
    "Darnassis",
    "TheExodar",
    "Ogrimmar",
    "Undercity",
    "ThunderBluff",
    "SilvermoonCity",
];

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            target_size: Some(DEFAULT_TARGET_SIZE),
            background: [0, 0, 0],
            format: OutputFormat::Png,
            tile_sets: CITY_MAPS.iter().map(|name| TileSet::full(*name, 4, 3)).collect(),
        }
    }
}

impl StitchConfig {
    /// Checks that apply to the whole batch. Per-set problems are left to
    /// the batch driver, which skips the offending set and carries on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if let Some(target) = self.target_size {
            if !target.is_power_of_two() {
                log::warn!("target size {} is not a power of two; BLP conversion will reject it", target);
            }
        }
        Ok(())
    }

    pub fn layout(&self) -> crate::assemble::Layout {
        crate::assemble::Layout {
            tile_size: self.tile_size,
            target_size: self.target_size,
            background: image::Rgb(self.background),
            format: self.format,
        }
    }
}
