#![allow(dead_code)]

use siege_core::{
    CellIndex, CombatEngine, EncounterEvent, EncounterState, GameConfig, MonsterArchetype,
    MonsterId, MonsterState, RingGrid, TemplateId,
};

/// Owns everything a `CombatEngine` borrows.
pub struct Encounter {
    pub state: EncounterState,
    pub grid: RingGrid,
    pub config: GameConfig,
    pub events: Vec<EncounterEvent>,
}

impl Encounter {
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: EncounterState::new(&config),
            grid: RingGrid::new(config.grid),
            config,
            events: Vec::new(),
        }
    }

    pub fn engine(&mut self) -> CombatEngine<'_> {
        CombatEngine::new(
            &mut self.state,
            &mut self.grid,
            &self.config,
            &mut self.events,
        )
    }

    /// Spawns a monster and finishes its appearance so it may act.
    pub fn ready(&mut self, archetype: MonsterArchetype, cell: u32) -> MonsterId {
        let mut engine = self.engine();
        let id = engine.spawn(archetype, CellIndex(cell), 0).unwrap();
        engine.complete_spawn(id).unwrap();
        id
    }

    pub fn monster(&self, id: MonsterId) -> &MonsterState {
        self.state.monster(id).unwrap()
    }

    pub fn count(&self, matches: impl Fn(&EncounterEvent) -> bool) -> usize {
        self.events.iter().filter(|event| matches(event)).count()
    }
}

pub fn slime(hp: u32) -> MonsterArchetype {
    MonsterArchetype::new(TemplateId(1), "slime", hp)
}
