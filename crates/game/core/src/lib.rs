//! Deterministic monster turn logic for the ring siege.
//!
//! `siege-core` defines the canonical rules (grid, monster records, ability
//! wiring, turn decisions, combat) and exposes pure APIs that the runtime and
//! offline tools share. All state mutation flows through
//! [`engine::CombatEngine`]; observable changes are reported as
//! [`events::EncounterEvent`]s, never logged or rendered here.
pub mod ability;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod events;
pub mod grid;
pub mod state;

pub use ability::{AbilityBinding, Effect, Trigger};
pub use combat::{DamageSource, KnockbackDirection, KnockbackOutcome, StrikeOutcome};
pub use config::GameConfig;
pub use engine::{AttackStart, CombatEngine, EncounterError, TurnDecision};
pub use env::{ArchetypeOracle, MonsterArchetype, SpecialAbility, UnknownAbility};
pub use error::{ErrorSeverity, GameError};
pub use events::{EncounterEvent, EventSink, NullSink};
pub use grid::{CellIndex, GridError, GridTopology, Heading, PositionalIndex, RingGrid};
pub use state::{
    AttackPhase, BossState, CreatureState, DeathCause, DeathRecord, DefenderState,
    EncounterState, Facing, MonsterFlags, MonsterId, MonsterState, StageRewards, TemplateId,
};
