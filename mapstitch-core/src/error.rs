use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tile set {name:?} is invalid: {reason}")] InvalidTileSet { name: String, reason: String },
    #[error("tile size must be at least 1 pixel")] ZeroTileSize,
    #[error("target size {target} is smaller than the {width}x{height} grid of {name:?}")]
    TargetTooSmall { name: String, target: u32, width: u32, height: u32 },
}

/// Failure of a single tile-set job. The batch driver records it and moves on.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error(transparent)] Config(#[from] ConfigError),
    #[error("{set}: missing tile {index} ({})", .path.display())]
    MissingTile { set: String, index: u32, path: PathBuf },
    #[error("{set}: cannot decode tile {index} ({}): {source}", .path.display())]
    Decode { set: String, index: u32, path: PathBuf, #[source] source: image::ImageError },
    #[error("{set}: tile {index} is {}x{}, expected {expected}x{expected}", .actual.0, .actual.1)]
    DimensionMismatch { set: String, index: u32, expected: u32, actual: (u32, u32) },
    #[error("{set}: cannot write {}: {source}", .path.display())]
    Persist { set: String, path: PathBuf, #[source] source: image::ImageError },
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("directory not found: {}", .0.display())] MissingDir(PathBuf),
    #[error("cannot list {}: {source}", .path.display())]
    ReadDir { path: PathBuf, #[source] source: std::io::Error },
    #[error("cannot convert {}: {source}", .path.display())]
    Image { path: PathBuf, #[source] source: image::ImageError },
}
