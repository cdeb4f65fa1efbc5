//! Attack trigger and the standard attack phase machine.

use crate::ability::{Effect, Trigger};
use crate::combat::apply_damage;
use crate::events::EncounterEvent;
use crate::grid::Heading;
use crate::state::{AttackPhase, CreatureState, DeathCause, MonsterId};

use super::{CombatEngine, EncounterError, find, find_mut};

/// Whether `start_attack` fired the monster's attack hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackStart {
    Started,
    Skipped,
}

impl CombatEngine<'_> {
    /// Fires the attack trigger of a monster that decided to attack.
    ///
    /// A monster that is not in the `Attack` state, or is still busy, does not
    /// attack. Unless it is travelling, its busy flag is cleared so the
    /// scheduler does not wait on it.
    pub fn start_attack(&mut self, id: MonsterId) -> Result<AttackStart, EncounterError> {
        let monster = find_mut(self.state, id)?;

        if monster.state == CreatureState::Attack && !monster.is_busy() {
            monster.set_busy(true);
            let hooks = monster.abilities.clone();
            for &effect in hooks.hooks(Trigger::Attack) {
                self.apply_effect(id, effect)?;
            }
            return Ok(AttackStart::Started);
        }

        if monster.state != CreatureState::Moving {
            monster.set_busy(false);
        }
        Ok(AttackStart::Skipped)
    }

    /// Runs one bound effect on behalf of monster `id`.
    pub(super) fn apply_effect(
        &mut self,
        id: MonsterId,
        effect: Effect,
    ) -> Result<(), EncounterError> {
        match effect {
            Effect::StandardAttack => {
                find_mut(self.state, id)?.attack_phase = Some(AttackPhase::Approaching);
                self.events.emit(EncounterEvent::AttackPhaseChanged {
                    monster: id,
                    phase: AttackPhase::Approaching,
                });
            }
            Effect::HealBoss => {
                let monster = find_mut(self.state, id)?;
                monster.set_busy(false);
                let hp = monster.hp;
                let amount = self.state.boss.heal(hp);
                self.events.emit(EncounterEvent::BossHealed {
                    monster: id,
                    amount,
                    hp: self.state.boss.hp,
                });
            }
            Effect::SelfDestruct => {
                self.kill(id, DeathCause::SelfDestruct, Heading::default())?;
            }
            Effect::CounterBoss => self.counter_boss(id)?,
        }
        Ok(())
    }

    /// Moves the standard attack one phase forward.
    ///
    /// Entering `DamageApplied` hits the defender. Entering `Done` ends the
    /// attack: busy clears and the move cooldown restarts. The attacker may
    /// have died since the attack started; its attack still lands.
    pub fn advance_attack(&mut self, id: MonsterId) -> Result<AttackPhase, EncounterError> {
        let monster = find_mut(self.state, id)?;
        let phase = monster
            .attack_phase
            .and_then(AttackPhase::next)
            .ok_or(EncounterError::NoAttackInProgress(id))?;

        monster.attack_phase = Some(phase);
        let damage = monster.damage();
        self.events.emit(EncounterEvent::AttackPhaseChanged { monster: id, phase });

        match phase {
            AttackPhase::DamageApplied => {
                let defender = &mut self.state.defender;
                defender.hp = apply_damage(defender.hp, damage);
                self.events.emit(EncounterEvent::DefenderDamaged {
                    monster: id,
                    amount: damage,
                    remaining: defender.hp,
                });
            }
            AttackPhase::Done => {
                let monster = find_mut(self.state, id)?;
                monster.attack_phase = None;
                monster.set_busy(false);
                monster.reset_move_turn();
            }
            AttackPhase::Approaching | AttackPhase::Retreating => {}
        }

        Ok(phase)
    }

    /// Returns an attacking monster to `Idle` once its sequence completed.
    ///
    /// A monster that died during its attack stays dead.
    pub fn finish_attack(&mut self, id: MonsterId) -> Result<(), EncounterError> {
        if find(self.state, id)?.state == CreatureState::Attack {
            self.transition(id, CreatureState::Idle)?;
        }
        Ok(())
    }

    /// Deals the monster's damage to the allied boss.
    fn counter_boss(&mut self, id: MonsterId) -> Result<(), EncounterError> {
        let damage = find(self.state, id)?.damage();
        let amount = self.state.boss.hurt(damage);
        self.events.emit(EncounterEvent::BossDamaged {
            monster: id,
            amount,
            hp: self.state.boss.hp,
        });
        Ok(())
    }
}
