use crate::events::EncounterEvent;
use crate::grid::CellIndex;
use crate::state::{CreatureState, Facing, MonsterId};

use super::{CombatEngine, EncounterError, find_mut};

/// What a monster chose to do with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnDecision {
    /// Still cooling down; `remaining` turns left before it may act.
    Wait { remaining: u32 },
    /// In range; the attack sequence starts in the attack phase of the turn.
    Attack,
    /// Committed a forward move and is travelling.
    Move { from: CellIndex, to: CellIndex },
    /// Wanted to advance but the way was shut. The cooldown restarts.
    Blocked,
}

impl TurnDecision {
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. })
    }
}

/// Turn decision methods for CombatEngine.
impl CombatEngine<'_> {
    /// Runs one turn decision for a monster.
    ///
    /// Never yields both a move and an attack. The occupancy change of a move
    /// is committed before this returns, so the next monster decides against
    /// the updated grid.
    pub fn take_turn(&mut self, id: MonsterId) -> Result<TurnDecision, EncounterError> {
        let topology = *self.grid.topology();
        let monster = find_mut(self.state, id)?;
        if monster.is_dead() {
            return Err(EncounterError::MonsterDead(id));
        }
        if monster.is_busy() {
            return Err(EncounterError::MonsterBusy(id));
        }
        let from = topology.validate(monster.cell)?;

        monster.tick_move_turn();
        if !monster.can_move() {
            monster.set_busy(false);
            return Ok(TurnDecision::Wait {
                remaining: monster.move_turn_remaining,
            });
        }

        if monster.can_attack(&topology) {
            self.transition(id, CreatureState::Attack)?;
            return Ok(TurnDecision::Attack);
        }

        let speed = monster.archetype.move_speed;
        let committed = self
            .grid
            .try_move_forward(id, speed)
            .filter(|&to| self.grid.is_committed(id, to));

        let Some(to) = committed else {
            let monster = find_mut(self.state, id)?;
            monster.set_busy(false);
            monster.reset_move_turn();
            return Ok(TurnDecision::Blocked);
        };

        let monster = find_mut(self.state, id)?;
        monster.cell = Some(to);
        monster.destination = Some(to);
        monster.set_busy(true);
        monster.facing = Facing::toward_centre(&topology, from);
        self.transition(id, CreatureState::Moving)?;
        self.events.emit(EncounterEvent::MonsterMoved {
            monster: id,
            from,
            to,
        });

        Ok(TurnDecision::Move { from, to })
    }
}
