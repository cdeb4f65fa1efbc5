//! Monster archetype catalog loader.

use std::collections::HashSet;
use std::path::Path;

use siege_core::MonsterArchetype;

use crate::loaders::{LoadResult, read_file};

/// Loader for monster archetypes from RON files.
pub struct ArchetypeLoader;

impl ArchetypeLoader {
    /// Load the archetype catalog from a RON file.
    ///
    /// RON format: `Vec<MonsterArchetype>`. `special_ability` is the numeric
    /// variant code; unknown codes fail the whole load.
    pub fn load(path: &Path) -> LoadResult<Vec<MonsterArchetype>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid archetypes in {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<MonsterArchetype>> {
        let archetypes: Vec<MonsterArchetype> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse archetype catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for archetype in &archetypes {
            if !seen.insert(archetype.template_id) {
                anyhow::bail!(
                    "Duplicate archetype {} ('{}')",
                    archetype.template_id,
                    archetype.name
                );
            }
            if archetype.hp == 0 {
                anyhow::bail!("Archetype '{}' must have positive hp", archetype.name);
            }
        }

        Ok(archetypes)
    }
}
