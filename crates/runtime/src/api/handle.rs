//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving monsters through their turn or streaming events from specific
//! topics.
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::warn;

use siege_core::{
    AttackStart, CellIndex, EncounterError, EncounterState, Heading, MonsterArchetype, MonsterId,
    StrikeOutcome, TurnDecision,
};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    busy_timeout: Option<Duration>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        busy_timeout: Option<Duration>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            busy_timeout,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    async fn engine_request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<std::result::Result<T, EncounterError>>) -> Command,
    ) -> Result<T> {
        Ok(self.request(build).await??)
    }

    /// Start a new game turn, returning its number.
    pub async fn begin_turn(&self) -> Result<u64> {
        self.request(|reply| Command::BeginTurn { reply }).await
    }

    /// Place a monster on `cell`. It becomes able to act once its appearance,
    /// delayed by `interval_ms`, completes.
    pub async fn spawn(
        &self,
        archetype: MonsterArchetype,
        cell: CellIndex,
        interval_ms: u64,
    ) -> Result<MonsterId> {
        self.engine_request(|reply| Command::Spawn {
            archetype,
            cell,
            interval_ms,
            reply,
        })
        .await
    }

    /// Run one monster's turn decision.
    pub async fn take_turn(&self, monster: MonsterId) -> Result<TurnDecision> {
        self.engine_request(|reply| Command::TakeTurn { monster, reply })
            .await
    }

    pub async fn start_attack(&self, monster: MonsterId) -> Result<AttackStart> {
        self.engine_request(|reply| Command::StartAttack { monster, reply })
            .await
    }

    pub async fn finish_attack(&self, monster: MonsterId) -> Result<()> {
        self.engine_request(|reply| Command::FinishAttack { monster, reply })
            .await
    }

    /// Runs a monster's attack phase to completion.
    ///
    /// Starts the attack, waits until everything it set in motion has
    /// resolved, then returns the monster to `Idle`. A monster that was not
    /// ready to attack only has its busy flag cleared.
    pub async fn start_monster_attack(&self, monster: MonsterId) -> Result<AttackStart> {
        let started = self.start_attack(monster).await?;
        if started == AttackStart::Started {
            self.await_idle(monster).await?;
            match self.finish_attack(monster).await {
                // Died mid-attack and already faded out.
                Err(e) if e.is_not_found() => {}
                other => other?,
            }
        }
        Ok(started)
    }

    /// Waits until the monster has nothing left to resolve.
    ///
    /// With a busy timeout configured, a monster still resolving when it
    /// expires is forced idle. Returns immediately for discarded monsters.
    pub async fn await_idle(&self, monster: MonsterId) -> Result<()> {
        let Some(mut signal) = self.busy_signal(monster).await? else {
            return Ok(());
        };
        // A closed signal means the monster was discarded.
        let settled = async move {
            let _ = signal.wait_for(|busy| !*busy).await;
        };

        match self.busy_timeout {
            None => {
                settled.await;
                Ok(())
            }
            Some(limit) => {
                if tokio::time::timeout(limit, settled).await.is_err() {
                    warn!(
                        target: "runtime::handle",
                        %monster,
                        timeout_ms = limit.as_millis() as u64,
                        "monster stayed busy, forcing idle"
                    );
                    match self.force_idle(monster).await {
                        Err(e) if e.is_not_found() => {}
                        other => other?,
                    }
                }
                Ok(())
            }
        }
    }

    /// Abandon whatever the monster is resolving.
    pub async fn force_idle(&self, monster: MonsterId) -> Result<()> {
        self.engine_request(|reply| Command::ForceIdle { monster, reply })
            .await
    }

    pub async fn end_turn(&self, monster: MonsterId) -> Result<()> {
        self.engine_request(|reply| Command::EndTurn { monster, reply })
            .await
    }

    /// Apply a defender strike travelling along `heading`.
    pub async fn strike(&self, monster: MonsterId, heading: Heading) -> Result<StrikeOutcome> {
        self.engine_request(|reply| Command::Strike {
            monster,
            heading,
            reply,
        })
        .await
    }

    /// Mark whether the monster sits inside the defender's interaction region.
    pub async fn set_selected(&self, monster: MonsterId, selected: bool) -> Result<()> {
        self.engine_request(|reply| Command::SetSelected {
            monster,
            selected,
            reply,
        })
        .await
    }

    /// Subscribe to a monster's busy flag, or `None` if it is gone.
    pub async fn busy_signal(&self, monster: MonsterId) -> Result<Option<watch::Receiver<bool>>> {
        self.request(|reply| Command::BusySignal { monster, reply })
            .await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Encounter` - Engine notifications (moves, damage, deaths)
    /// - `Topic::Turn` - Turn loop progress
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use siege_runtime::Topic;
    ///
    /// let mut rx = handle.subscribe(Topic::Encounter);
    /// while let Ok(event) = rx.recv().await {
    ///     // Animate the event
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Query the current encounter state (read-only snapshot)
    pub async fn query_state(&self) -> Result<EncounterState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
