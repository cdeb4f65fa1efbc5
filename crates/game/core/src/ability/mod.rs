//! Archetype-driven composition of monster effects.
//!
//! Each monster carries an [`AbilityBinding`]: an ordered list of [`Effect`]s
//! per [`Trigger`], assembled once at spawn from the archetype's
//! [`SpecialAbility`]. The engine fires every hook of a trigger in order; the
//! binding itself never changes afterwards.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::env::SpecialAbility;

/// Moment at which bound effects fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    /// The monster starts its attack sequence.
    Attack,
    /// The monster enters the `Dead` state, by any cause.
    Death,
}

/// Effect a monster can bind to a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// Lunge at the defender, deal damage, retreat. Runs as a phased sequence.
    StandardAttack,
    /// Enter `Dead` immediately.
    SelfDestruct,
    /// Transfer current hp to the allied boss, capped at its maximum.
    HealBoss,
    /// Deal this monster's damage to the allied boss.
    CounterBoss,
}

type Hooks = ArrayVec<Effect, { GameConfig::MAX_HOOKS }>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityBinding {
    on_attack: Hooks,
    on_death: Hooks,
}

impl AbilityBinding {
    /// Builds the binding table entry for an archetype variant.
    pub fn for_ability(ability: SpecialAbility) -> Self {
        let mut binding = Self::default();
        match ability {
            SpecialAbility::Basic => {
                binding.attach(Trigger::Attack, Effect::StandardAttack);
            }
            SpecialAbility::Suicidal => {
                binding.attach(Trigger::Attack, Effect::StandardAttack);
                binding.attach(Trigger::Attack, Effect::SelfDestruct);
            }
            SpecialAbility::Support => {
                binding.attach(Trigger::Attack, Effect::HealBoss);
                binding.attach(Trigger::Attack, Effect::SelfDestruct);
                binding.attach(Trigger::Death, Effect::CounterBoss);
            }
        }
        binding
    }

    /// Effects bound to `trigger`, in firing order.
    pub fn hooks(&self, trigger: Trigger) -> &[Effect] {
        match trigger {
            Trigger::Attack => self.on_attack.as_slice(),
            Trigger::Death => self.on_death.as_slice(),
        }
    }

    /// Appends an effect. Hooks beyond [`GameConfig::MAX_HOOKS`] are dropped.
    fn attach(&mut self, trigger: Trigger, effect: Effect) {
        let hooks = match trigger {
            Trigger::Attack => &mut self.on_attack,
            Trigger::Death => &mut self.on_death,
        };
        let _ = hooks.try_push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_only_attacks() {
        let binding = AbilityBinding::for_ability(SpecialAbility::Basic);

        assert_eq!(binding.hooks(Trigger::Attack), &[Effect::StandardAttack]);
        assert!(binding.hooks(Trigger::Death).is_empty());
    }

    #[test]
    fn suicidal_attacks_then_dies() {
        let binding = AbilityBinding::for_ability(SpecialAbility::Suicidal);

        assert_eq!(
            binding.hooks(Trigger::Attack),
            &[Effect::StandardAttack, Effect::SelfDestruct]
        );
    }

    #[test]
    fn support_heals_dies_and_counters() {
        let binding = AbilityBinding::for_ability(SpecialAbility::Support);

        assert_eq!(
            binding.hooks(Trigger::Attack),
            &[Effect::HealBoss, Effect::SelfDestruct]
        );
        assert_eq!(binding.hooks(Trigger::Death), &[Effect::CounterBoss]);
    }
}
