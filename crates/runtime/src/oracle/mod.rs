//! Runtime wrappers around static encounter content.
//!
//! The catalog is immutable while the runtime is up; monsters copy their
//! archetype at spawn time.
mod archetypes;

pub use archetypes::ArchetypeOracleImpl;
