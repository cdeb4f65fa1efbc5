//! Spawn, arrival, end of turn, death and discard.

use crate::ability::Trigger;
use crate::env::MonsterArchetype;
use crate::events::EncounterEvent;
use crate::grid::{CellIndex, GridError, Heading};
use crate::state::{
    CreatureState, DeathCause, DeathRecord, Facing, MonsterFlags, MonsterId, MonsterState,
};

use super::{CombatEngine, EncounterError, find, find_mut};

impl CombatEngine<'_> {
    /// Starts a new game turn, returning its number.
    pub fn begin_turn(&mut self) -> u64 {
        self.state.turn += 1;
        self.state.turn
    }

    /// Places a new monster built from `archetype` on `cell`.
    ///
    /// The monster stays busy until [`complete_spawn`](Self::complete_spawn)
    /// reports that its appearance, delayed by `appear_after_ms`, finished.
    pub fn spawn(
        &mut self,
        archetype: MonsterArchetype,
        cell: CellIndex,
        appear_after_ms: u64,
    ) -> Result<MonsterId, EncounterError> {
        let topology = *self.grid.topology();
        let cell = topology.validate(Some(cell))?;
        if let Some(occupant) = self.grid.occupant(cell) {
            return Err(GridError::CellOccupied { cell, occupant }.into());
        }

        let id = self.state.allocate_id();
        self.grid.place(id, cell)?;

        let template = archetype.template_id;
        let mut monster = MonsterState::new(id, archetype);
        monster.cell = Some(cell);
        monster.facing = Facing::toward_centre(&topology, cell);
        self.state.monsters.push(monster);

        self.events.emit(EncounterEvent::MonsterSpawned {
            monster: id,
            template,
            cell,
            appear_after_ms,
        });
        Ok(id)
    }

    /// Ends the appearance of a spawned monster.
    pub fn complete_spawn(&mut self, id: MonsterId) -> Result<(), EncounterError> {
        find_mut(self.state, id)?.set_busy(false);
        Ok(())
    }

    /// Finishes a move or knockback bounce.
    ///
    /// A monster that spent its turn moving (still busy) restarts its move
    /// cooldown. A bounce never does.
    pub fn arrive(&mut self, id: MonsterId) -> Result<(), EncounterError> {
        let monster = find_mut(self.state, id)?;
        if monster.state != CreatureState::Moving {
            return Ok(());
        }

        if monster.is_busy() {
            monster.reset_move_turn();
        }
        monster.set_busy(false);
        monster.destination = None;
        self.transition(id, CreatureState::Idle)
    }

    /// Closes the turn for a monster.
    pub fn end_turn(&mut self, id: MonsterId) -> Result<(), EncounterError> {
        let monster = find_mut(self.state, id)?;
        monster.set_busy(false);
        if monster.can_move() {
            monster.reset_move_turn();
        }
        Ok(())
    }

    /// Puts a monster into the terminal `Dead` state.
    ///
    /// Returns `false` if it was already dead; nothing changes in that case.
    /// Otherwise the monster leaves the grid, its death hooks fire, and the
    /// death is announced with the number of monsters still alive. Slain
    /// monsters also drop their coins.
    pub fn kill(
        &mut self,
        id: MonsterId,
        cause: DeathCause,
        heading: Heading,
    ) -> Result<bool, EncounterError> {
        let monster = find_mut(self.state, id)?;
        if monster.is_dead() {
            return Ok(false);
        }

        monster.hp = 0;
        monster.death = Some(DeathRecord { cause, heading });
        monster.destination = None;
        let cell = monster.cell.take();
        let template = monster.template_id();
        let drop_coin = monster.archetype.drop_coin;
        let hooks = monster.abilities.clone();

        self.grid.remove(id);
        self.transition(id, CreatureState::Dead)?;

        for &effect in hooks.hooks(Trigger::Death) {
            self.apply_effect(id, effect)?;
        }

        self.events.emit(EncounterEvent::MonsterDied {
            monster: id,
            template,
            cause,
            remaining: self.state.remaining(),
        });

        if cause == DeathCause::Slain {
            self.state.rewards.deposit(drop_coin);
            if let Some(cell) = cell {
                self.events.emit(EncounterEvent::CoinDropped {
                    cell,
                    amount: drop_coin,
                });
            }
        }
        Ok(true)
    }

    /// Removes a dead monster from the roster for good.
    pub fn discard(&mut self, id: MonsterId) -> Result<MonsterState, EncounterError> {
        if !find(self.state, id)?.is_dead() {
            return Err(EncounterError::NotDead(id));
        }
        let monster = self
            .state
            .take(id)
            .ok_or(EncounterError::MonsterNotFound(id))?;
        self.events.emit(EncounterEvent::MonsterDiscarded { monster: id });
        Ok(monster)
    }

    /// Marks whether the monster is inside the defender's interaction region.
    pub fn set_selected(&mut self, id: MonsterId, selected: bool) -> Result<(), EncounterError> {
        let monster = find_mut(self.state, id)?;
        if monster.is_selected() == selected {
            return Ok(());
        }
        monster.flags.set(MonsterFlags::SELECTED, selected);
        self.events.emit(EncounterEvent::SelectionChanged {
            monster: id,
            selected,
        });
        Ok(())
    }

    /// Abandons whatever the monster was resolving.
    ///
    /// Used when the scheduler gave up waiting on it. A pending attack is
    /// dropped without reaching the defender.
    pub fn force_idle(&mut self, id: MonsterId) -> Result<(), EncounterError> {
        let monster = find_mut(self.state, id)?;
        monster.set_busy(false);
        monster.attack_phase = None;
        monster.destination = None;
        if monster.state == CreatureState::Moving {
            self.transition(id, CreatureState::Idle)?;
        }
        Ok(())
    }
}
