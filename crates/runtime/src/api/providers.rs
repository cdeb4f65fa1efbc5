//! Asynchronous abstraction for sourcing the defender's strikes.
//!
//! Runtime users plug in [`DefenderProvider`] implementations so the turn loop
//! can run against human input, scripted fixtures, or AI policies.
use async_trait::async_trait;
use siege_core::{EncounterState, Heading, MonsterId};

use super::errors::Result;

/// One defender strike against a monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub target: MonsterId,
    /// Direction the blow travels; it decides the death heading of a kill.
    pub heading: Heading,
}

/// Trait for deciding the defender's strikes at the start of a turn.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Scripted fixtures
/// - Testing fixtures
#[async_trait]
pub trait DefenderProvider: Send + Sync {
    /// Plan the strikes for this turn from a read-only snapshot.
    ///
    /// Strikes are applied in order; a target that died to an earlier strike
    /// is ignored by the engine.
    async fn plan_strikes(&self, state: &EncounterState) -> Result<Vec<Strike>>;
}

/// A defender that never strikes.
/// Useful for testing or as a fallback.
pub struct PassiveDefender;

#[async_trait]
impl DefenderProvider for PassiveDefender {
    async fn plan_strikes(&self, _state: &EncounterState) -> Result<Vec<Strike>> {
        Ok(Vec::new())
    }
}

/// Strikes the innermost idle monsters, pushing them outward.
pub struct ScriptedDefender {
    strikes_per_turn: usize,
}

impl ScriptedDefender {
    pub fn new(strikes_per_turn: usize) -> Self {
        Self { strikes_per_turn }
    }
}

impl Default for ScriptedDefender {
    fn default() -> Self {
        Self::new(1)
    }
}

#[async_trait]
impl DefenderProvider for ScriptedDefender {
    async fn plan_strikes(&self, state: &EncounterState) -> Result<Vec<Strike>> {
        Ok(state
            .turn_order()
            .into_iter()
            .filter(|id| {
                state
                    .monster(*id)
                    .is_some_and(|monster| !monster.is_resolving())
            })
            .take(self.strikes_per_turn)
            .map(|target| Strike {
                target,
                heading: Heading::OUTWARD,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siege_core::{
        CellIndex, CombatEngine, GameConfig, MonsterArchetype, NullSink, RingGrid, TemplateId,
    };

    #[tokio::test]
    async fn scripted_defender_targets_innermost_idle_monsters() {
        let config = GameConfig::default();
        let mut state = EncounterState::new(&config);
        let mut grid = RingGrid::new(config.grid);
        let mut sink = NullSink;
        let mut engine = CombatEngine::new(&mut state, &mut grid, &config, &mut sink);

        let archetype = MonsterArchetype::new(TemplateId(1), "slime", 5);
        let outer = engine.spawn(archetype.clone(), CellIndex(40), 0).unwrap();
        let inner = engine.spawn(archetype.clone(), CellIndex(14), 0).unwrap();
        let appearing = engine.spawn(archetype, CellIndex(2), 0).unwrap();
        engine.complete_spawn(outer).unwrap();
        engine.complete_spawn(inner).unwrap();

        let strikes = ScriptedDefender::new(2).plan_strikes(&state).await.unwrap();

        let targets: Vec<_> = strikes.iter().map(|strike| strike.target).collect();
        assert_eq!(targets, vec![inner, outer]);
        assert!(!targets.contains(&appearing));
        assert!(strikes.iter().all(|strike| strike.heading == Heading::OUTWARD));
    }
}
