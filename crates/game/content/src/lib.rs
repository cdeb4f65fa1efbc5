//! Data-driven content definitions and loaders.
//!
//! This crate houses static encounter content and provides loaders for
//! RON/TOML data files:
//! - Monster archetypes (data-driven via RON)
//! - Spawn waves (data-driven via RON)
//! - Encounter rules (data-driven via TOML)
//!
//! Content is consumed by runtime oracles and never appears in encounter
//! state except as the archetype copy a monster takes at spawn.
//!
//! All loaders use siege-core types directly with serde for RON/TOML
//! deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ArchetypeLoader, ConfigLoader, ContentFactory, LoadResult, SpawnSpec, WaveLoader, WaveSpec,
};
