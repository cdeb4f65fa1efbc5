//! Notifications emitted by the engine.
//!
//! The engine never renders or schedules anything itself. Every observable
//! change is reported as an [`EncounterEvent`] through an [`EventSink`]; the
//! runtime turns these into presentation timers and bus messages.

use crate::combat::{DamageSource, KnockbackOutcome};
use crate::grid::CellIndex;
use crate::state::{AttackPhase, CreatureState, DeathCause, MonsterId, TemplateId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterEvent {
    /// A monster was placed and started its appearance.
    MonsterSpawned {
        monster: MonsterId,
        template: TemplateId,
        cell: CellIndex,
        /// Delay before the appearance begins, in milliseconds.
        appear_after_ms: u64,
    },
    /// A forward move was committed; the monster travels until it arrives.
    MonsterMoved {
        monster: MonsterId,
        from: CellIndex,
        to: CellIndex,
    },
    StateChanged {
        monster: MonsterId,
        from: CreatureState,
        to: CreatureState,
    },
    AttackPhaseChanged {
        monster: MonsterId,
        phase: AttackPhase,
    },
    /// A hit landed on a monster standing on `cell`.
    DamageApplied {
        monster: MonsterId,
        cell: CellIndex,
        amount: u32,
        source: DamageSource,
    },
    DefenderDamaged {
        monster: MonsterId,
        amount: u32,
        remaining: u32,
    },
    Knockback {
        monster: MonsterId,
        outcome: KnockbackOutcome,
    },
    /// A knocked-back monster slammed into the occupant of `at`.
    ChainCollision {
        source: MonsterId,
        target: Option<MonsterId>,
        at: CellIndex,
    },
    MonsterDied {
        monster: MonsterId,
        template: TemplateId,
        cause: DeathCause,
        /// Living monsters left after this death.
        remaining: usize,
    },
    CoinDropped {
        cell: CellIndex,
        amount: u32,
    },
    BossHealed {
        monster: MonsterId,
        amount: u32,
        hp: u32,
    },
    BossDamaged {
        monster: MonsterId,
        amount: u32,
        hp: u32,
    },
    SelectionChanged {
        monster: MonsterId,
        selected: bool,
    },
    MonsterDiscarded {
        monster: MonsterId,
    },
}

impl EncounterEvent {
    /// Monster the event is about, if any.
    pub fn monster(&self) -> Option<MonsterId> {
        match *self {
            Self::MonsterSpawned { monster, .. }
            | Self::MonsterMoved { monster, .. }
            | Self::StateChanged { monster, .. }
            | Self::AttackPhaseChanged { monster, .. }
            | Self::DamageApplied { monster, .. }
            | Self::DefenderDamaged { monster, .. }
            | Self::Knockback { monster, .. }
            | Self::MonsterDied { monster, .. }
            | Self::BossHealed { monster, .. }
            | Self::BossDamaged { monster, .. }
            | Self::SelectionChanged { monster, .. }
            | Self::MonsterDiscarded { monster } => Some(monster),
            Self::ChainCollision { source, .. } => Some(source),
            Self::CoinDropped { .. } => None,
        }
    }
}

/// Receiver of engine notifications.
pub trait EventSink {
    fn emit(&mut self, event: EncounterEvent);
}

impl EventSink for Vec<EncounterEvent> {
    fn emit(&mut self, event: EncounterEvent) {
        self.push(event);
    }
}

/// Sink that drops everything. Useful for queries that must not report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: EncounterEvent) {}
}
