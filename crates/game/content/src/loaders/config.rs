//! Encounter rules loader.

use std::path::Path;

use siege_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for encounter rules from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Every table is optional; omitted values keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.grid.slice_count == 0 || config.grid.ring_count == 0 {
            anyhow::bail!(
                "Grid must have at least one slice and one ring (got {}x{})",
                config.grid.slice_count,
                config.grid.ring_count
            );
        }

        if config.grid.checked_cell_count().is_none() {
            anyhow::bail!(
                "Grid of {}x{} cells does not fit a cell index",
                config.grid.slice_count,
                config.grid.ring_count
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siege_core::KnockbackDirection;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            knockback_distance = 2

            [defender]
            damage = 7
            knockback = "anti_clockwise"
            "#,
        )
        .unwrap();

        assert_eq!(config.knockback_distance, 2);
        assert_eq!(config.defender.damage, 7);
        assert_eq!(config.defender.knockback, KnockbackDirection::AntiClockwise);
        assert_eq!(config.grid.slice_count, 12);
        assert_eq!(config.boss, GameConfig::default().boss);
    }

    #[test]
    fn empty_grid_is_rejected() {
        let error = ConfigLoader::parse("[grid]\nslice_count = 0\n").unwrap_err();

        assert!(error.to_string().contains("at least one slice"));
    }

    #[test]
    fn overflowing_grid_is_rejected() {
        let error =
            ConfigLoader::parse("[grid]\nslice_count = 65536\nring_count = 65536\n").unwrap_err();

        assert!(error.to_string().contains("does not fit a cell index"));
    }
}
