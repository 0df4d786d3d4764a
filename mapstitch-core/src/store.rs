//! Imaging capability used by the assembler: existence checks, decoding and
//! persistence. The assembler only ever copies pixels between buffers.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, ImageResult, RgbImage};

use crate::tileset::OutputFormat;

pub trait ImageStore {
    fn exists(&self, path: &Path) -> bool;
    fn open(&self, path: &Path) -> ImageResult<DynamicImage>;
    fn save(&self, image: &RgbImage, path: &Path, format: OutputFormat) -> ImageResult<()>;
}

/// Reads and writes real files through the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Tga => ImageFormat::Tga,
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

impl ImageStore for FsStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn open(&self, path: &Path) -> ImageResult<DynamicImage> {
        image::open(path)
    }

    // Encode next to the target and rename over it, so a failed encode never
    // leaves a truncated file where a good one used to be.
    fn save(&self, image: &RgbImage, path: &Path, format: OutputFormat) -> ImageResult<()> {
        let staging = staging_path(path);
        if let Err(e) = image.save_with_format(&staging, format.into()) {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }
        if let Err(e) = fs::rename(&staging, path) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        Ok(())
    }
}
