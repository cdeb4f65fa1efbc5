//! Mutable encounter state.
//!
//! [`EncounterState`] is the aggregate the engine mutates: the monster roster,
//! the defender, the allied boss and the stage rewards. Occupancy lives in the
//! positional index, not here; `MonsterState::cell` mirrors it.
mod actors;
mod common;
mod monster;

pub use actors::{BossState, DefenderState, StageRewards};
pub use common::{MonsterId, TemplateId};
pub use monster::{
    AttackPhase, CreatureState, DeathCause, DeathRecord, Facing, MonsterFlags, MonsterState,
};

use crate::config::GameConfig;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterState {
    /// Spawned monsters, dead ones included until they are discarded.
    pub monsters: Vec<MonsterState>,
    pub defender: DefenderState,
    pub boss: BossState,
    pub rewards: StageRewards,
    /// Number of game turns started so far.
    pub turn: u64,
    next_monster_id: u32,
}

impl EncounterState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            monsters: Vec::new(),
            defender: config.defender.clone(),
            boss: config.boss,
            rewards: StageRewards::default(),
            turn: 0,
            next_monster_id: 1,
        }
    }

    /// Reserves the next unique monster id.
    pub fn allocate_id(&mut self) -> MonsterId {
        let id = MonsterId(self.next_monster_id.max(1));
        self.next_monster_id = id.0 + 1;
        id
    }

    pub fn monster(&self, id: MonsterId) -> Option<&MonsterState> {
        self.monsters.iter().find(|monster| monster.id == id)
    }

    pub fn monster_mut(&mut self, id: MonsterId) -> Option<&mut MonsterState> {
        self.monsters.iter_mut().find(|monster| monster.id == id)
    }

    pub fn living(&self) -> impl Iterator<Item = &MonsterState> {
        self.monsters.iter().filter(|monster| !monster.is_dead())
    }

    /// Monsters still alive.
    pub fn remaining(&self) -> usize {
        self.living().count()
    }

    /// Living monsters in turn priority order: innermost cell first, then id.
    pub fn turn_order(&self) -> Vec<MonsterId> {
        let mut order: Vec<_> = self
            .living()
            .map(|monster| (monster.cell.map_or(u32::MAX, |cell| cell.0), monster.id))
            .collect();
        order.sort_unstable();
        order.into_iter().map(|(_, id)| id).collect()
    }

    /// Drops a monster from the roster, returning it.
    pub(crate) fn take(&mut self, id: MonsterId) -> Option<MonsterState> {
        let index = self.monsters.iter().position(|monster| monster.id == id)?;
        Some(self.monsters.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MonsterArchetype;
    use crate::grid::CellIndex;

    fn placed(state: &mut EncounterState, cell: u32) -> MonsterId {
        let id = state.allocate_id();
        let mut monster =
            MonsterState::new(id, MonsterArchetype::new(TemplateId(1), "slime", 10));
        monster.cell = Some(CellIndex(cell));
        state.monsters.push(monster);
        id
    }

    #[test]
    fn ids_are_unique_and_start_at_one() {
        let mut state = EncounterState::new(&GameConfig::default());

        assert_eq!(state.allocate_id(), MonsterId(1));
        assert_eq!(state.allocate_id(), MonsterId(2));
    }

    #[test]
    fn turn_order_puts_inner_monsters_first() {
        let mut state = EncounterState::new(&GameConfig::default());
        let outer = placed(&mut state, 40);
        let inner = placed(&mut state, 3);
        let dead = placed(&mut state, 1);
        state.monster_mut(dead).unwrap().state = CreatureState::Dead;

        assert_eq!(state.turn_order(), vec![inner, outer]);
        assert_eq!(state.remaining(), 2);
    }
}
