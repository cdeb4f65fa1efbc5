//! Incoming damage and the knockback chain.
//!
//! A defender strike that leaves its target alive knocks the target back
//! once. If the knockback runs into another monster, that monster takes the
//! victim's damage as a monster hit, which never knocks back again. The chain
//! is therefore at most one level deep.

use crate::combat::{
    DamageSource, KnockbackOutcome, StrikeOutcome, apply_damage, classify, collision_damage,
    defender_damage, query_destination,
};
use crate::events::EncounterEvent;
use crate::grid::Heading;
use crate::state::{CreatureState, DeathCause, MonsterId};

use super::{CombatEngine, EncounterError, find, find_mut};

impl CombatEngine<'_> {
    /// Resolves a defender strike against `target`.
    ///
    /// `heading` is the direction of the blow; a killed target flies off
    /// along it.
    pub fn strike_from_defender(
        &mut self,
        target: MonsterId,
        heading: Heading,
    ) -> Result<StrikeOutcome, EncounterError> {
        let damage = defender_damage(&self.state.defender);
        let Some(remaining) = self.hit(target, damage, DamageSource::Defender)? else {
            return Ok(StrikeOutcome::Ignored);
        };

        if remaining == 0 {
            self.kill(target, DeathCause::Slain, heading)?;
            return Ok(StrikeOutcome::Killed);
        }

        let knockback = self.knockback(target)?;
        Ok(StrikeOutcome::KnockedBack {
            remaining,
            knockback,
        })
    }

    /// Resolves a collision hit from `source` against `target`.
    pub fn strike_from_monster(
        &mut self,
        target: MonsterId,
        source: MonsterId,
    ) -> Result<StrikeOutcome, EncounterError> {
        let attacker = find(self.state, source)?;
        let damage = collision_damage(attacker);
        let from = attacker.cell;

        let Some(remaining) = self.hit(target, damage, DamageSource::Monster)? else {
            return Ok(StrikeOutcome::Ignored);
        };

        if remaining > 0 {
            return Ok(StrikeOutcome::Damaged { remaining });
        }

        let heading = match (from, find(self.state, target)?.cell) {
            (Some(from), Some(to)) => self.grid.topology().heading(from, to),
            _ => Heading::default(),
        };
        self.kill(target, DeathCause::Slain, heading)?;
        Ok(StrikeOutcome::Killed)
    }

    /// Applies damage to a living monster, returning its remaining hp.
    ///
    /// `None` when the target is already dead.
    fn hit(
        &mut self,
        target: MonsterId,
        amount: u32,
        source: DamageSource,
    ) -> Result<Option<u32>, EncounterError> {
        let topology = *self.grid.topology();
        let monster = find_mut(self.state, target)?;
        if monster.is_dead() {
            return Ok(None);
        }
        let cell = topology.validate(monster.cell)?;

        monster.hp = apply_damage(monster.hp, amount);
        let remaining = monster.hp;
        self.events.emit(EncounterEvent::DamageApplied {
            monster: target,
            cell,
            amount,
            source,
        });
        Ok(Some(remaining))
    }

    fn knockback(&mut self, victim: MonsterId) -> Result<KnockbackOutcome, EncounterError> {
        let topology = *self.grid.topology();
        let origin = topology.validate(find(self.state, victim)?.cell)?;
        let direction = self.state.defender.knockback;

        let destination = query_destination(
            &mut *self.grid,
            victim,
            direction,
            self.config.knockback_distance,
        );
        let outcome = classify(&*self.grid, victim, origin, destination);

        let monster = find_mut(self.state, victim)?;
        monster.cell = Some(outcome.final_cell());
        self.events.emit(EncounterEvent::Knockback {
            monster: victim,
            outcome,
        });

        match outcome {
            KnockbackOutcome::Bounce { cell } | KnockbackOutcome::Displaced { to: cell, .. } => {
                find_mut(self.state, victim)?.destination = Some(cell);
                self.transition(victim, CreatureState::Moving)?;
            }
            KnockbackOutcome::Collision { at, occupant, .. } => {
                self.events.emit(EncounterEvent::ChainCollision {
                    source: victim,
                    target: occupant,
                    at,
                });
                if let Some(occupant) = occupant {
                    self.strike_from_monster(occupant, victim)?;
                }
            }
        }

        Ok(outcome)
    }
}
