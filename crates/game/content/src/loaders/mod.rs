//! Content loaders for reading encounter data from files.
//!
//! Each loader turns one RON/TOML file into siege-core types and validates
//! what serde alone cannot (duplicate ids, overlapping spawn cells).

pub mod archetypes;
pub mod config;
pub mod factory;
pub mod waves;

pub use archetypes::ArchetypeLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use waves::{SpawnSpec, WaveLoader, WaveSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
