//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and drives the game turn: defender strikes, monster decisions in turn
//! order, the attack phase, and the end-of-turn bookkeeping.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};

use siege_content::WaveSpec;
use siege_core::{
    ArchetypeOracle, AttackStart, GameConfig, GameError, MonsterId, StrikeOutcome, TurnDecision,
};

use crate::api::{DefenderProvider, Result, RuntimeError, RuntimeHandle, ScriptedDefender};
use crate::events::{EncounterOutcome, Event, EventBus, TurnEvent};
use crate::oracle::ArchetypeOracleImpl;
use crate::workers::{Command, PresentationTimings, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub timings: PresentationTimings,
    /// Longest wait on a busy monster before it is forced idle. `None` waits
    /// forever.
    pub busy_timeout: Option<Duration>,
    /// Turn limit for [`Runtime::run`].
    pub max_turns: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            timings: PresentationTimings::default(),
            busy_timeout: None,
            max_turns: 100,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// What happened during one game turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u64,
    pub strikes: Vec<(MonsterId, StrikeOutcome)>,
    pub decisions: Vec<(MonsterId, TurnDecision)>,
    /// Monsters whose decision was rejected by the engine.
    pub skipped: Vec<MonsterId>,
    pub attacks: Vec<MonsterId>,
    pub remaining: usize,
    pub defender_hp: u32,
}

impl TurnReport {
    pub fn decision(&self, monster: MonsterId) -> Option<TurnDecision> {
        self.decisions
            .iter()
            .find(|(id, _)| *id == monster)
            .map(|(_, decision)| *decision)
    }
}

/// Main runtime that orchestrates the encounter
///
/// Design: Runtime owns the worker and coordinates the turn.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    // Shared handle (can be cloned for clients)
    handle: RuntimeHandle,
    config: RuntimeConfig,
    archetypes: ArchetypeOracleImpl,
    defender: Box<dyn DefenderProvider>,

    // Background worker
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Spawn every monster of a wave and wait for their appearances.
    pub async fn spawn_wave(&self, wave: &WaveSpec) -> Result<Vec<MonsterId>> {
        let mut spawned = Vec::with_capacity(wave.spawns.len());
        for spawn in &wave.spawns {
            let archetype = self
                .archetypes
                .archetype(spawn.template)
                .ok_or(RuntimeError::UnknownTemplate(spawn.template))?
                .clone();
            let id = self
                .handle
                .spawn(archetype, spawn.cell, spawn.interval_ms)
                .await?;
            spawned.push(id);
        }

        info!(
            target: "runtime",
            wave = %wave.name,
            monsters = spawned.len(),
            "wave spawned"
        );
        self.await_all_idle(&spawned).await?;
        Ok(spawned)
    }

    /// Execute a single game turn.
    pub async fn run_turn(&mut self) -> Result<TurnReport> {
        let turn = self.handle.begin_turn().await?;
        self.publish(TurnEvent::TurnStarted { turn });
        info!(target: "runtime", turn, "turn started");

        let mut report = TurnReport {
            turn,
            ..TurnReport::default()
        };

        // Defender phase
        let snapshot = self.handle.query_state().await?;
        for strike in self.defender.plan_strikes(&snapshot).await? {
            match self.handle.strike(strike.target, strike.heading).await {
                Ok(outcome) => report.strikes.push((strike.target, outcome)),
                Err(e) if e.encounter_severity().is_some() => {
                    warn!(target: "runtime", monster = %strike.target, error = %e, "strike rejected");
                }
                Err(e) => return Err(e),
            }
        }
        let settling: Vec<_> = self.handle.query_state().await?.turn_order();
        self.await_all_idle(&settling).await?;

        // Decision phase: strictly sequential so each move commits before the
        // next monster looks at the grid.
        let order = self.handle.query_state().await?.turn_order();
        for &monster in &order {
            match self.handle.take_turn(monster).await {
                Ok(decision) => {
                    self.publish(TurnEvent::DecisionMade { monster, decision });
                    report.decisions.push((monster, decision));
                }
                Err(RuntimeError::Encounter(e)) => {
                    let severity = e.severity();
                    if severity.is_internal() {
                        error!(target: "runtime", %monster, error = %e, code = e.error_code(), "turn failed");
                    } else {
                        debug!(target: "runtime", %monster, error = %e, severity = severity.as_str(), "turn skipped");
                    }
                    self.publish(TurnEvent::TurnSkipped {
                        monster,
                        error: e.error_code().to_string(),
                    });
                    report.skipped.push(monster);
                }
                Err(e) => return Err(e),
            }
        }
        self.await_all_idle(&order).await?;

        // Attack phase: every living monster resolves concurrently.
        let attackers = self.handle.query_state().await?.turn_order();
        let mut attacks = JoinSet::new();
        for monster in attackers {
            let handle = self.handle.clone();
            attacks.spawn(async move { (monster, handle.start_monster_attack(monster).await) });
        }
        while let Some(joined) = attacks.join_next().await {
            let (monster, result) = joined.map_err(RuntimeError::WorkerJoin)?;
            match result {
                Ok(AttackStart::Started) => report.attacks.push(monster),
                Ok(AttackStart::Skipped) => {}
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }
        report.attacks.sort_unstable();

        // End of turn
        for monster in self.handle.query_state().await?.turn_order() {
            match self.handle.end_turn(monster).await {
                Err(e) if e.is_not_found() => {}
                other => other?,
            }
        }

        let state = self.handle.query_state().await?;
        report.remaining = state.remaining();
        report.defender_hp = state.defender.hp;
        self.publish(TurnEvent::TurnEnded {
            turn,
            remaining: report.remaining,
            defender_hp: report.defender_hp,
        });
        info!(
            target: "runtime",
            turn,
            remaining = report.remaining,
            defender_hp = report.defender_hp,
            "turn ended"
        );

        Ok(report)
    }

    /// Run turns until one side is beaten or the turn limit is reached.
    pub async fn run(&mut self) -> Result<EncounterOutcome> {
        let mut turns = 0;
        let outcome = loop {
            if let Some(outcome) = self.outcome().await? {
                break outcome;
            }
            if turns >= self.config.max_turns {
                break EncounterOutcome::Stalemate;
            }
            self.run_turn().await?;
            turns += 1;
        };

        self.publish(TurnEvent::EncounterFinished { outcome, turns });
        info!(target: "runtime", ?outcome, turns, "encounter finished");
        Ok(outcome)
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }

    async fn outcome(&self) -> Result<Option<EncounterOutcome>> {
        let state = self.handle.query_state().await?;
        Ok(if state.defender.is_defeated() {
            Some(EncounterOutcome::Defeat)
        } else if state.remaining() == 0 {
            Some(EncounterOutcome::Victory)
        } else {
            None
        })
    }

    async fn await_all_idle(&self, monsters: &[MonsterId]) -> Result<()> {
        let mut waits = JoinSet::new();
        for &monster in monsters {
            let handle = self.handle.clone();
            waits.spawn(async move { handle.await_idle(monster).await });
        }
        while let Some(joined) = waits.join_next().await {
            joined.map_err(RuntimeError::WorkerJoin)??;
        }
        Ok(())
    }

    fn publish(&self, event: TurnEvent) {
        self.handle.event_bus().publish(Event::Turn(event));
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    archetypes: Option<ArchetypeOracleImpl>,
    defender: Option<Box<dyn DefenderProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            archetypes: None,
            defender: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the encounter rules only
    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    /// Set required archetype catalog
    pub fn archetypes(mut self, archetypes: ArchetypeOracleImpl) -> Self {
        self.archetypes = Some(archetypes);
        self
    }

    /// Set defender provider (optional, defaults to [`ScriptedDefender`])
    pub fn defender_provider(mut self, provider: impl DefenderProvider + 'static) -> Self {
        self.defender = Some(Box::new(provider));
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let archetypes = self.archetypes.ok_or(RuntimeError::MissingArchetypes)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(
            command_tx.clone(),
            event_bus.clone(),
            self.config.busy_timeout,
        );

        let sim_worker = SimulationWorker::new(
            self.config.game_config.clone(),
            self.config.timings,
            command_rx,
            command_tx.downgrade(),
            event_bus,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            config: self.config,
            archetypes,
            defender: self
                .defender
                .unwrap_or_else(|| Box::new(ScriptedDefender::default())),
            sim_worker_handle,
        })
    }
}
