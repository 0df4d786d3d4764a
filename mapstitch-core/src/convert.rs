//! TGA -> PNG fallback conversion plus guidance for the external BLP step.
//!
//! BLP encoding is done by an external converter; the game client of the
//! targeted version usually refuses PNG textures, so the PNG output here is
//! a last resort.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;

pub const BLP_GUIDE: &str = "\
Automatic BLP conversion is not available; convert the map images by hand.

Recommended: BLPConverter (https://www.wowinterface.com/downloads/info8127)
  1. Run BLPConverter.exe
  2. Drag the TGA or PNG map files into its window
  3. Click 'Convert to BLP'
  4. Save the BLP files in the addon's Media/Maps folder

Alternative: Warcraft Art Tools for Photoshop
  Open the TGA in Photoshop and use Save As -> BLP.";

pub const NEXT_STEPS: &str = "\
Next steps:
  1. Convert the PNG files to BLP with BLPConverter:
       BLPConverter.exe /FBLP_DXT1_A0 /N /M *.png
  2. Copy the BLP files to CitySiege\\Media\\Maps\\";

#[derive(Debug, Default)]
pub struct ConversionReport {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<ConvertError>,
}

impl ConversionReport {
    pub fn total(&self) -> usize { self.converted.len() + self.failed.len() }
}

fn is_tga(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("tga"))
        .unwrap_or(false)
}

/// All `*.tga` files directly inside `dir`, sorted by path.
pub fn find_tga_files(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    if !dir.is_dir() {
        return Err(ConvertError::MissingDir(dir.to_path_buf()));
    }
    let read_err = |source| ConvertError::ReadDir { path: dir.to_path_buf(), source };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && is_tga(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Decode `tga`, drop any alpha channel and write the sibling `.png`.
pub fn tga_to_png(tga: &Path) -> Result<PathBuf, ConvertError> {
    let image_err = |source| ConvertError::Image { path: tga.to_path_buf(), source };
    let rgb = image::open(tga).map_err(image_err)?.to_rgb8();
    let png = tga.with_extension("png");
    rgb.save_with_format(&png, image::ImageFormat::Png).map_err(image_err)?;
    log::info!("converted {} -> {}", tga.display(), png.display());
    Ok(png)
}

/// Convert every TGA in `dir`, carrying on past individual failures.
pub fn convert_dir(dir: &Path) -> Result<ConversionReport, ConvertError> {
    let files = find_tga_files(dir)?;
    log::info!("found {} TGA files in {}", files.len(), dir.display());
    let mut report = ConversionReport::default();
    for tga in files {
        match tga_to_png(&tga) {
            Ok(png) => report.converted.push(png),
            Err(e) => {
                log::warn!("{}", e);
                report.failed.push(e);
            }
        }
    }
    Ok(report)
}
