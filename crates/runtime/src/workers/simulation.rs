//! Simulation worker that owns the authoritative [`EncounterState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::api::RuntimeHandle), runs
//! them through [`CombatEngine`], publishes every [`EncounterEvent`] on the
//! bus, and turns those events into presentation timers that call back into
//! the engine once the beat has elapsed.

use std::collections::HashMap;
use std::time::Duration;

use siege_core::{
    AttackStart, CellIndex, CombatEngine, EncounterError, EncounterEvent, EncounterState,
    GameConfig, GameError, Heading, KnockbackOutcome, MonsterArchetype, MonsterId, RingGrid,
    StrikeOutcome, TurnDecision,
};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::AbortHandle;
use tracing::{debug, error, trace, warn};

use super::lifetime::InstanceLifetime;
use super::timings::PresentationTimings;
use crate::events::{Event, EventBus};

type EngineResult<T> = std::result::Result<T, EncounterError>;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Start a new game turn. Returns the turn number.
    BeginTurn { reply: oneshot::Sender<u64> },
    /// Place a monster; its appearance starts after `interval_ms`.
    Spawn {
        archetype: MonsterArchetype,
        cell: CellIndex,
        interval_ms: u64,
        reply: oneshot::Sender<EngineResult<MonsterId>>,
    },
    TakeTurn {
        monster: MonsterId,
        reply: oneshot::Sender<EngineResult<TurnDecision>>,
    },
    StartAttack {
        monster: MonsterId,
        reply: oneshot::Sender<EngineResult<AttackStart>>,
    },
    FinishAttack {
        monster: MonsterId,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    /// Defender strike against a monster.
    Strike {
        monster: MonsterId,
        heading: Heading,
        reply: oneshot::Sender<EngineResult<StrikeOutcome>>,
    },
    EndTurn {
        monster: MonsterId,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    SetSelected {
        monster: MonsterId,
        selected: bool,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    /// Abandon whatever the monster is resolving and cancel its timers.
    ForceIdle {
        monster: MonsterId,
        reply: oneshot::Sender<EngineResult<()>>,
    },
    /// Subscribe to a monster's busy flag. `None` once it has been discarded.
    BusySignal {
        monster: MonsterId,
        reply: oneshot::Sender<Option<watch::Receiver<bool>>>,
    },
    /// Query the current encounter state (read-only).
    QueryState {
        reply: oneshot::Sender<EncounterState>,
    },
    /// A presentation beat elapsed.
    Timer(Timer),
}

/// Engine callbacks scheduled after a presentation beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    SpawnCompleted(MonsterId),
    Arrived(MonsterId),
    AdvanceAttack(MonsterId),
    Discard(MonsterId),
}

impl Timer {
    fn monster(&self) -> MonsterId {
        match *self {
            Timer::SpawnCompleted(id)
            | Timer::Arrived(id)
            | Timer::AdvanceAttack(id)
            | Timer::Discard(id) => id,
        }
    }
}

/// Background task that processes encounter commands.
///
/// The worker is the only owner of the state and the grid, so commands are
/// applied strictly in arrival order.
pub struct SimulationWorker {
    state: EncounterState,
    grid: RingGrid,
    config: GameConfig,
    timings: PresentationTimings,
    command_rx: mpsc::Receiver<Command>,
    /// Timers hold a weak sender so they never keep the worker alive.
    timer_tx: mpsc::WeakSender<Command>,
    event_bus: EventBus,
    instances: HashMap<MonsterId, InstanceLifetime>,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        config: GameConfig,
        timings: PresentationTimings,
        command_rx: mpsc::Receiver<Command>,
        timer_tx: mpsc::WeakSender<Command>,
        event_bus: EventBus,
    ) -> Self {
        tracing::info!(
            target: "runtime::worker",
            slices = config.grid.slice_count,
            rings = config.grid.ring_count,
            defender_hp = config.defender.hp,
            "SimulationWorker initialized"
        );

        Self {
            state: EncounterState::new(&config),
            grid: RingGrid::new(config.grid),
            config,
            timings,
            command_rx,
            timer_tx,
            event_bus,
            instances: HashMap::new(),
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!(target: "runtime::worker", "command channel closed, worker stopping");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::BeginTurn { reply } => {
                let turn = self.with_engine(|engine| engine.begin_turn());
                respond(reply, turn, "BeginTurn");
            }
            Command::Spawn {
                archetype,
                cell,
                interval_ms,
                reply,
            } => {
                let result =
                    self.with_engine(|engine| engine.spawn(archetype, cell, interval_ms));
                respond(reply, result, "Spawn");
            }
            Command::TakeTurn { monster, reply } => {
                let result = self.with_engine(|engine| engine.take_turn(monster));
                if let Ok(decision) = &result {
                    debug!(target: "runtime::worker", %monster, ?decision, "turn decided");
                }
                respond(reply, result, "TakeTurn");
            }
            Command::StartAttack { monster, reply } => {
                let result = self.with_engine(|engine| engine.start_attack(monster));
                respond(reply, result, "StartAttack");
            }
            Command::FinishAttack { monster, reply } => {
                let result = self.with_engine(|engine| engine.finish_attack(monster));
                respond(reply, result, "FinishAttack");
            }
            Command::Strike {
                monster,
                heading,
                reply,
            } => {
                let result =
                    self.with_engine(|engine| engine.strike_from_defender(monster, heading));
                respond(reply, result, "Strike");
            }
            Command::EndTurn { monster, reply } => {
                let result = self.with_engine(|engine| engine.end_turn(monster));
                respond(reply, result, "EndTurn");
            }
            Command::SetSelected {
                monster,
                selected,
                reply,
            } => {
                let result = self.with_engine(|engine| engine.set_selected(monster, selected));
                respond(reply, result, "SetSelected");
            }
            Command::ForceIdle { monster, reply } => {
                if let Some(lifetime) = self.instances.get_mut(&monster) {
                    lifetime.cancel_timers();
                }
                let result = self.with_engine(|engine| engine.force_idle(monster));
                respond(reply, result, "ForceIdle");
            }
            Command::BusySignal { monster, reply } => {
                let signal = self
                    .instances
                    .get(&monster)
                    .map(InstanceLifetime::busy_signal);
                respond(reply, signal, "BusySignal");
            }
            Command::QueryState { reply } => {
                respond(reply, self.state.clone(), "QueryState");
            }
            Command::Timer(timer) => self.handle_timer(timer),
        }
    }

    fn handle_timer(&mut self, timer: Timer) {
        let monster = timer.monster();
        let result = match timer {
            Timer::SpawnCompleted(id) => self.with_engine(|engine| engine.complete_spawn(id)),
            Timer::Arrived(id) => self.with_engine(|engine| engine.arrive(id)),
            Timer::AdvanceAttack(id) => {
                self.with_engine(|engine| engine.advance_attack(id).map(|_| ()))
            }
            Timer::Discard(id) => self.discard(id),
        };

        if let Err(e) = result {
            // Timers may outlive what they were scheduled for; report and move on.
            if e.severity().is_internal() {
                error!(target: "runtime::worker", %monster, ?timer, error = %e, "timer failed");
            } else {
                debug!(target: "runtime::worker", %monster, ?timer, error = %e, "stale timer");
            }
        }
    }

    /// Discards a dead monster after its fade.
    fn discard(&mut self, id: MonsterId) -> EngineResult<()> {
        self.with_engine(|engine| engine.discard(id))?;
        self.instances.remove(&id);
        Ok(())
    }

    /// Runs one engine operation, then publishes and reacts to its events.
    fn with_engine<T>(&mut self, op: impl FnOnce(&mut CombatEngine<'_>) -> T) -> T {
        let mut events = Vec::new();
        let result = {
            let mut engine =
                CombatEngine::new(&mut self.state, &mut self.grid, &self.config, &mut events);
            op(&mut engine)
        };

        for event in events {
            self.react(&event);
            self.event_bus.publish(Event::Encounter(event));
        }
        self.sync_busy_signals();
        self.schedule_discards();
        result
    }

    /// Schedules the presentation timer an event calls for, if any.
    fn react(&mut self, event: &EncounterEvent) {
        match *event {
            EncounterEvent::MonsterSpawned {
                monster,
                appear_after_ms,
                ..
            } => {
                self.instances.insert(monster, InstanceLifetime::new());
                let delay = self.timings.spawn_delay(appear_after_ms);
                self.schedule(monster, delay, Timer::SpawnCompleted(monster));
            }
            EncounterEvent::MonsterMoved { monster, .. } => {
                let delay = self.timings.scaled(self.timings.travel);
                self.schedule(monster, delay, Timer::Arrived(monster));
            }
            EncounterEvent::Knockback {
                monster,
                outcome: KnockbackOutcome::Bounce { .. } | KnockbackOutcome::Displaced { .. },
            } => {
                let delay = self.timings.scaled(self.timings.knockback);
                self.schedule(monster, delay, Timer::Arrived(monster));
            }
            EncounterEvent::AttackPhaseChanged { monster, phase } => {
                if let Some(delay) = self.timings.attack_phase(phase) {
                    self.schedule(monster, delay, Timer::AdvanceAttack(monster));
                }
            }
            _ => {}
        }
    }

    /// Starts the fade of every dead monster that has nothing left to resolve.
    ///
    /// An attack already in flight when its attacker died keeps the monster
    /// around until the sequence reaches `Done` or is forced idle.
    fn schedule_discards(&mut self) {
        let delay = self.timings.scaled(self.timings.fade);
        for (id, lifetime) in &mut self.instances {
            if lifetime.discard_scheduled() {
                continue;
            }
            let settled = self
                .state
                .monster(*id)
                .is_some_and(|monster| monster.is_dead() && !monster.is_resolving());
            if settled {
                trace!(target: "runtime::worker", monster = %id, ?delay, "discard scheduled");
                let timer = spawn_timer(&self.timer_tx, delay, Timer::Discard(*id));
                lifetime.track_discard(timer);
            }
        }
    }

    fn schedule(&mut self, monster: MonsterId, delay: Duration, timer: Timer) {
        let Some(lifetime) = self.instances.get_mut(&monster) else {
            warn!(target: "runtime::worker", %monster, ?timer, "no lifetime for timer");
            return;
        };
        lifetime.track(spawn_timer(&self.timer_tx, delay, timer));
    }

    fn sync_busy_signals(&self) {
        for (id, lifetime) in &self.instances {
            let resolving = self
                .state
                .monster(*id)
                .is_some_and(|monster| monster.is_resolving());
            lifetime.set_busy(resolving);
        }
    }
}

fn spawn_timer(tx: &mpsc::WeakSender<Command>, delay: Duration, timer: Timer) -> AbortHandle {
    let tx = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Some(tx) = tx.upgrade() {
            let _ = tx.send(Command::Timer(timer)).await;
        }
    })
    .abort_handle()
}

fn respond<T>(reply: oneshot::Sender<T>, value: T, command: &'static str) {
    if reply.send(value).is_err() {
        debug!(target: "runtime::worker", command, "reply channel closed (caller dropped)");
    }
}
