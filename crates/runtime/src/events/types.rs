//! Event types for the turn topic.

use serde::{Deserialize, Serialize};
use siege_core::{MonsterId, TurnDecision};

/// How an encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterOutcome {
    /// Every monster is dead.
    Victory,
    /// The defender ran out of hp.
    Defeat,
    /// The turn limit was reached with both sides standing.
    Stalemate,
}

/// Events related to turn orchestration (lightweight)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TurnEvent {
    TurnStarted {
        turn: u64,
    },
    /// A monster made its turn decision.
    DecisionMade {
        monster: MonsterId,
        decision: TurnDecision,
    },
    /// A monster could not take its turn; `error` is the engine's error code.
    TurnSkipped {
        monster: MonsterId,
        error: String,
    },
    TurnEnded {
        turn: u64,
        remaining: usize,
        defender_hp: u32,
    },
    EncounterFinished {
        outcome: EncounterOutcome,
        turns: u64,
    },
}
