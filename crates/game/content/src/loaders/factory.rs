//! Content factory for loading encounter data from a directory.

use std::path::{Path, PathBuf};

use siege_core::{GameConfig, MonsterArchetype};

use crate::loaders::{ArchetypeLoader, ConfigLoader, LoadResult, WaveLoader, WaveSpec};

/// Content factory that loads all encounter content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── archetypes.ron
/// └── waves.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load encounter rules from `config.toml`.
    ///
    /// A missing file is not an error; the default rules apply.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the archetype catalog from `archetypes.ron`.
    pub fn load_archetypes(&self) -> LoadResult<Vec<MonsterArchetype>> {
        let path = self.data_dir.join("archetypes.ron");
        ArchetypeLoader::load(&path)
    }

    /// Load every wave from `waves.ron`.
    pub fn load_waves(&self) -> LoadResult<Vec<WaveSpec>> {
        let path = self.data_dir.join("waves.ron");
        WaveLoader::load(&path)
    }

    /// Load a single wave by name.
    pub fn load_wave(&self, name: &str) -> LoadResult<WaveSpec> {
        self.load_waves()?
            .into_iter()
            .find(|wave| wave.name == name)
            .ok_or_else(|| {
                anyhow::anyhow!("Wave '{}' not found in {}", name, self.data_dir.display())
            })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
