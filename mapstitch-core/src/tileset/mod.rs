pub mod schema;

use anyhow::Result;
pub use schema::{OutputFormat, StitchConfig, TileSet};

pub fn load_from_yaml_str(s: &str) -> Result<StitchConfig> {
    let config: StitchConfig = serde_yaml::from_str(s)?;
    config.validate()?;
    Ok(config)
}

pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<StitchConfig> {
    let data = std::fs::read_to_string(path)?;
    load_from_yaml_str(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn default_table_is_the_eight_city_maps() {
        let config = StitchConfig::default();
        assert_eq!(config.tile_sets.len(), 8);
        assert_eq!(config.tile_size, 256);
        assert_eq!(config.target_size, Some(1024));
        assert!(config.tile_sets.iter().all(|s| s.columns == 4 && s.rows == 3 && s.tile_count == 12));
        assert_eq!(config.tile_sets[0].name, "Stormwind");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn yaml_fills_missing_fields_with_defaults() {
        let yaml = r#"
tile_sets:
  - { name: Dalaran, columns: 2, rows: 2, tile_count: 4 }
  - { name: Shattrath, columns: 3, rows: 2, tile_count: 5 }
"#;
        let config = load_from_yaml_str(yaml).unwrap();
        assert_eq!(config.tile_size, 256);
        assert_eq!(config.target_size, Some(1024));
        assert_eq!(config.format, OutputFormat::Png);
        assert_eq!(config.tile_sets[1], TileSet::new("Shattrath", 3, 2, 5));
    }

    #[test]
    fn yaml_can_disable_padding_and_pick_tga() {
        let yaml = "tile_size: 64\ntarget_size: null\nformat: tga\nbackground: [10, 20, 30]\ntile_sets: []\n";
        let config = load_from_yaml_str(yaml).unwrap();
        assert_eq!(config.tile_size, 64);
        assert_eq!(config.target_size, None);
        assert_eq!(config.format, OutputFormat::Tga);
        assert_eq!(config.background, [10, 20, 30]);
    }

    #[test]
    fn too_many_tiles_loads_but_fails_its_own_check() {
        let yaml = "tile_sets:\n  - { name: Bad, columns: 2, rows: 2, tile_count: 5 }\n";
        let config = load_from_yaml_str(yaml).unwrap();
        let err = config.tile_sets[0].validate().unwrap_err();
        assert!(format!("{}", err).contains("exceeds 2x2 grid"));
    }

    #[test]
    fn overflowing_grid_loads_and_is_rejected_per_set() {
        let yaml = "tile_size: 65536\ntile_sets:\n  - { name: Huge, columns: 65536, rows: 1, tile_count: 1 }\n";
        let config = load_from_yaml_str(yaml).unwrap();
        let set = &config.tile_sets[0];
        assert!(matches!(set.grid_size(config.tile_size), Err(ConfigError::InvalidTileSet { .. })));
        assert!(matches!(config.layout().check(set), Err(ConfigError::InvalidTileSet { .. })));
    }

    #[test]
    fn full_grid_count_saturates() {
        assert_eq!(TileSet::full("Wide", u32::MAX, 2).tile_count, u32::MAX);
    }

    #[test]
    fn empty_grid_is_rejected() {
        let set = TileSet::new("Empty", 0, 3, 1);
        assert!(matches!(set.validate(), Err(ConfigError::InvalidTileSet { .. })));
        let set = TileSet::new("NoTiles", 2, 2, 0);
        assert!(matches!(set.validate(), Err(ConfigError::InvalidTileSet { .. })));
    }

    #[test]
    fn target_smaller_than_grid_fails_only_that_set() {
        let mut config = StitchConfig::default();
        config.target_size = Some(512);
        assert!(config.validate().is_ok());
        match config.layout().check(&config.tile_sets[0]) {
            Err(ConfigError::TargetTooSmall { name, target, width, height }) => {
                assert_eq!(name, "Stormwind");
                assert_eq!((target, width, height), (512, 1024, 768));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn zero_tile_size_is_rejected() {
        let mut config = StitchConfig::default();
        config.tile_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTileSize)));
    }

    #[test]
    fn non_power_of_two_target_is_only_a_warning() {
        let mut config = StitchConfig::default();
        config.target_size = Some(1100);
        assert!(config.validate().is_ok());
    }
}
