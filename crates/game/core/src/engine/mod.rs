//! Monster turn logic and combat resolution.
//!
//! The [`CombatEngine`] is the only writer of [`EncounterState`]. It borrows
//! the state, the positional index, the rules and an event sink for the
//! duration of one operation; nothing is global. Operations are grouped by
//! concern:
//!
//! - `turns`: the per-monster turn decision
//! - `attack`: the attack trigger and its phase machine
//! - `strike`: incoming damage and the knockback chain
//! - `lifecycle`: spawn, arrival, end of turn, death and discard

mod attack;
mod errors;
mod lifecycle;
mod strike;
mod turns;

pub use attack::AttackStart;
pub use errors::EncounterError;
pub use turns::TurnDecision;

use crate::config::GameConfig;
use crate::events::{EncounterEvent, EventSink};
use crate::grid::PositionalIndex;
use crate::state::{CreatureState, EncounterState, MonsterId, MonsterState};

/// Applies monster rules to a borrowed encounter.
pub struct CombatEngine<'a> {
    state: &'a mut EncounterState,
    grid: &'a mut dyn PositionalIndex,
    config: &'a GameConfig,
    events: &'a mut dyn EventSink,
}

impl<'a> CombatEngine<'a> {
    pub fn new(
        state: &'a mut EncounterState,
        grid: &'a mut dyn PositionalIndex,
        config: &'a GameConfig,
        events: &'a mut dyn EventSink,
    ) -> Self {
        Self {
            state,
            grid,
            config,
            events,
        }
    }

    pub fn state(&self) -> &EncounterState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.config
    }

    /// Moves a monster to `to`, reporting the transition when it changes.
    fn transition(&mut self, id: MonsterId, to: CreatureState) -> Result<(), EncounterError> {
        let monster = find_mut(self.state, id)?;
        let from = monster.state;
        if from == to {
            return Ok(());
        }
        monster.state = to;
        self.events.emit(EncounterEvent::StateChanged {
            monster: id,
            from,
            to,
        });
        Ok(())
    }
}

fn find(state: &EncounterState, id: MonsterId) -> Result<&MonsterState, EncounterError> {
    state.monster(id).ok_or(EncounterError::MonsterNotFound(id))
}

fn find_mut(state: &mut EncounterState, id: MonsterId) -> Result<&mut MonsterState, EncounterError> {
    state
        .monster_mut(id)
        .ok_or(EncounterError::MonsterNotFound(id))
}
