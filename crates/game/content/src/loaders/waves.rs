//! Spawn wave loader.
//!
//! A wave lists which archetype appears on which cell, and how long after the
//! wave starts its appearance begins.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use siege_core::{CellIndex, TemplateId};

use crate::loaders::{LoadResult, read_file};

/// One monster placement inside a wave.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnSpec {
    pub template: TemplateId,
    pub cell: CellIndex,
    /// Delay before the appearance starts, in milliseconds.
    #[serde(default)]
    pub interval_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub name: String,
    pub spawns: Vec<SpawnSpec>,
}

impl WaveSpec {
    pub fn new(name: impl Into<String>, spawns: Vec<SpawnSpec>) -> Self {
        Self {
            name: name.into(),
            spawns,
        }
    }
}

/// Loader for wave definitions from RON files.
pub struct WaveLoader;

impl WaveLoader {
    /// Load waves from a RON file. RON format: `Vec<WaveSpec>`.
    pub fn load(path: &Path) -> LoadResult<Vec<WaveSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid waves in {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<WaveSpec>> {
        let waves: Vec<WaveSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse wave RON: {}", e))?;

        for wave in &waves {
            let mut cells = HashSet::new();
            for spawn in &wave.spawns {
                if !cells.insert(spawn.cell) {
                    anyhow::bail!("Wave '{}' places two monsters on {}", wave.name, spawn.cell);
                }
            }
        }

        Ok(waves)
    }
}
