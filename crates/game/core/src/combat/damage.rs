//! Damage calculation and application.

use crate::state::{DefenderState, MonsterState};

/// Origin of a hit against a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageSource {
    /// Strike from the player-side defender. Triggers knockback on survival.
    Defender,
    /// Collision with a knocked-back monster. Never triggers knockback.
    Monster,
}

/// Damage the defender's next strike deals.
///
/// ```text
/// damage = defender.damage * defender.combo_count
/// ```
pub fn defender_damage(defender: &DefenderState) -> u32 {
    defender.strike_damage()
}

/// Damage a colliding monster deals to the occupant it hits.
pub fn collision_damage(source: &MonsterState) -> u32 {
    source.damage()
}

/// Apply damage to current HP.
///
/// # Returns
///
/// New HP value (clamped to 0)
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_clamps_at_zero() {
        assert_eq!(apply_damage(5, 3), 2);
        assert_eq!(apply_damage(5, 9), 0);
        assert_eq!(apply_damage(0, 1), 0);
    }
}
