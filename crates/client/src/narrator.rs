//! Turns runtime events into a readable encounter log.
use std::collections::HashMap;

use siege_core::{DeathCause, EncounterEvent, KnockbackOutcome, MonsterId, TemplateId};
use siege_runtime::{Event, RuntimeHandle, Topic, TurnEvent};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

/// Counters gathered while narrating.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub spawned: usize,
    pub slain: usize,
    pub self_destructed: usize,
    pub defender_damage: u32,
    pub coins: u32,
}

pub struct Narrator {
    names: HashMap<TemplateId, String>,
    monsters: HashMap<MonsterId, TemplateId>,
    tally: Tally,
}

impl Narrator {
    pub fn new(names: impl IntoIterator<Item = (TemplateId, String)>) -> Self {
        Self {
            names: names.into_iter().collect(),
            monsters: HashMap::new(),
            tally: Tally::default(),
        }
    }

    /// Subscribes right away, then logs every event on a background task
    /// until the runtime's event bus closes.
    pub fn spawn(self, handle: &RuntimeHandle) -> JoinHandle<Tally> {
        let encounter = handle.subscribe(Topic::Encounter);
        let turns = handle.subscribe(Topic::Turn);
        tokio::spawn(self.run(encounter, turns))
    }

    async fn run(
        mut self,
        mut encounter: broadcast::Receiver<Event>,
        mut turns: broadcast::Receiver<Event>,
    ) -> Tally {
        let (mut encounter_open, mut turns_open) = (true, true);
        while encounter_open || turns_open {
            let (received, from_encounter) = tokio::select! {
                event = encounter.recv(), if encounter_open => (event, true),
                event = turns.recv(), if turns_open => (event, false),
            };
            match received {
                Ok(event) => {
                    if let Some(line) = self.describe(&event) {
                        tracing::info!(target: "siege::narrator", "{}", line);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(target: "siege::narrator", skipped, "narrator fell behind");
                }
                // A closed topic still hands out what it queued first, so keep
                // draining the other one.
                Err(RecvError::Closed) if from_encounter => encounter_open = false,
                Err(RecvError::Closed) => turns_open = false,
            }
        }
        self.tally
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// One log line for an event, or `None` for events not worth a line.
    pub fn describe(&mut self, event: &Event) -> Option<String> {
        match event {
            Event::Encounter(event) => self.describe_encounter(event),
            Event::Turn(TurnEvent::TurnStarted { turn }) => Some(format!("-- turn {} --", turn)),
            Event::Turn(TurnEvent::TurnEnded {
                remaining,
                defender_hp,
                ..
            }) => Some(format!(
                "{} monsters remain, defender at {} hp",
                remaining, defender_hp
            )),
            Event::Turn(TurnEvent::TurnSkipped { monster, error }) => {
                Some(format!("{} skipped its turn ({})", self.name(*monster), error))
            }
            Event::Turn(TurnEvent::EncounterFinished { outcome, turns }) => {
                Some(format!("encounter over after {} turns: {:?}", turns, outcome))
            }
            Event::Turn(TurnEvent::DecisionMade { .. }) => None,
        }
    }

    fn describe_encounter(&mut self, event: &EncounterEvent) -> Option<String> {
        let line = match *event {
            EncounterEvent::MonsterSpawned {
                monster,
                template,
                cell,
                ..
            } => {
                self.monsters.insert(monster, template);
                self.tally.spawned += 1;
                format!("{} appears on {}", self.name(monster), cell)
            }
            EncounterEvent::MonsterMoved { monster, from, to } => {
                format!("{} advances {} -> {}", self.name(monster), from, to)
            }
            EncounterEvent::DefenderDamaged {
                monster,
                amount,
                remaining,
            } => {
                self.tally.defender_damage += amount;
                format!(
                    "{} hits the defender for {} ({} left)",
                    self.name(monster),
                    amount,
                    remaining
                )
            }
            EncounterEvent::DamageApplied {
                monster, amount, ..
            } => format!("{} takes {} damage", self.name(monster), amount),
            EncounterEvent::Knockback {
                monster,
                ref outcome,
            } => match outcome {
                KnockbackOutcome::Bounce { .. } => {
                    format!("{} staggers in place", self.name(monster))
                }
                KnockbackOutcome::Displaced { to, .. } => {
                    format!("{} is knocked to {}", self.name(monster), to)
                }
                KnockbackOutcome::Collision { at, .. } => {
                    format!("{} is slammed into {}", self.name(monster), at)
                }
            },
            EncounterEvent::MonsterDied {
                monster,
                cause,
                remaining,
                ..
            } => {
                let verb = match cause {
                    DeathCause::Slain => {
                        self.tally.slain += 1;
                        "is slain"
                    }
                    DeathCause::SelfDestruct => {
                        self.tally.self_destructed += 1;
                        "blows itself up"
                    }
                };
                format!("{} {} ({} remain)", self.name(monster), verb, remaining)
            }
            EncounterEvent::CoinDropped { amount, .. } => {
                self.tally.coins += amount;
                format!("{} coins dropped", amount)
            }
            EncounterEvent::BossHealed {
                monster, amount, hp, ..
            } => format!(
                "{} heals the boss for {} (boss at {})",
                self.name(monster),
                amount,
                hp
            ),
            EncounterEvent::BossDamaged {
                monster, amount, hp, ..
            } => format!(
                "{} strikes the boss for {} (boss at {})",
                self.name(monster),
                amount,
                hp
            ),
            _ => return None,
        };
        Some(line)
    }

    fn name(&self, monster: MonsterId) -> String {
        let name = self
            .monsters
            .get(&monster)
            .and_then(|template| self.names.get(template))
            .map_or("monster", String::as_str);
        format!("{}{}", name, monster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siege_core::CellIndex;

    fn narrator() -> Narrator {
        Narrator::new([(TemplateId(1), "slime".to_string())])
    }

    #[test]
    fn names_monsters_by_template() {
        let mut narrator = narrator();
        let spawned = Event::Encounter(EncounterEvent::MonsterSpawned {
            monster: MonsterId(4),
            template: TemplateId(1),
            cell: CellIndex(30),
            appear_after_ms: 0,
        });

        let line = narrator.describe(&spawned).unwrap();

        assert!(line.starts_with("slime#4 appears"));
        assert_eq!(narrator.tally().spawned, 1);
    }

    #[test]
    fn tallies_deaths_and_coins() {
        let mut narrator = narrator();
        let died = Event::Encounter(EncounterEvent::MonsterDied {
            monster: MonsterId(2),
            template: TemplateId(1),
            cause: DeathCause::Slain,
            remaining: 0,
        });
        let coins = Event::Encounter(EncounterEvent::CoinDropped {
            cell: CellIndex(12),
            amount: 3,
        });

        narrator.describe(&died);
        narrator.describe(&coins);

        assert_eq!(
            narrator.tally(),
            &Tally {
                slain: 1,
                coins: 3,
                ..Tally::default()
            }
        );
    }

    #[tokio::test]
    async fn drains_both_topics_after_the_bus_closes() {
        let bus = siege_runtime::EventBus::new();
        let encounter = bus.subscribe(Topic::Encounter);
        let turns = bus.subscribe(Topic::Turn);
        bus.publish(Event::Turn(TurnEvent::TurnStarted { turn: 1 }));
        for amount in [1, 2, 3] {
            bus.publish(Event::Encounter(EncounterEvent::CoinDropped {
                cell: CellIndex(12),
                amount,
            }));
        }
        drop(bus);

        let tally = narrator().run(encounter, turns).await;

        assert_eq!(tally.coins, 6);
    }

    #[test]
    fn decisions_are_not_narrated() {
        let mut narrator = narrator();
        let decision = Event::Turn(TurnEvent::DecisionMade {
            monster: MonsterId(1),
            decision: siege_core::TurnDecision::Blocked,
        });

        assert_eq!(narrator.describe(&decision), None);
    }
}
