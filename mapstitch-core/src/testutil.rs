use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

/// Fresh, empty directory under the system temp dir, unique per test name
/// and process.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mapstitch-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Non-black colour for tile `index`, distinct for every index below 65536.
pub fn tile_color(index: u32) -> Rgb<u8> {
    let [lo, hi, ..] = index.to_le_bytes();
    Rgb([lo, hi, 0x80])
}

pub fn write_tiles(dir: &Path, name: &str, count: u32, size: u32) {
    for i in 1..=count {
        RgbImage::from_pixel(size, size, tile_color(i))
            .save(dir.join(format!("{}{}.png", name, i)))
            .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_colors_stay_distinct_past_small_fixtures() {
        let colors: std::collections::HashSet<_> = (1..=1024).map(|i| tile_color(i).0).collect();
        assert_eq!(colors.len(), 1024);
        assert!(!colors.contains(&[0, 0, 0]));
        assert_eq!(tile_color(300), Rgb([44, 1, 0x80]));
    }
}
