//! Traits describing read-only content.
//!
//! Archetype data is static for the lifetime of an encounter and never
//! appears in mutable state except as the copy taken at spawn time.
mod archetype;

pub use archetype::{ArchetypeOracle, MonsterArchetype, SpecialAbility, UnknownAbility};
