//! Runtime orchestration for the ring siege encounter.
//!
//! This crate wires the deterministic [`siege_core`] engine to a tokio worker
//! that owns the encounter, paces presentation beats with timers, and runs
//! the cooperative turn loop. Consumers embed [`Runtime`] to drive turns,
//! subscribe to events, and interact with monsters through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] adapts the loaded archetype catalog
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{
    DefenderProvider, PassiveDefender, Result, RuntimeError, RuntimeHandle, ScriptedDefender,
    Strike,
};
pub use events::{EncounterOutcome, Event, EventBus, Topic, TurnEvent};
pub use oracle::ArchetypeOracleImpl;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, TurnReport};
pub use workers::PresentationTimings;
