//! Actors outside the monster roster that monster effects touch.

use crate::combat::KnockbackDirection;

/// Player-side proxy that monsters attack and that strikes monsters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefenderState {
    pub hp: u32,
    pub max_hp: u32,
    /// Base damage of a single strike.
    pub damage: u32,
    /// Multiplier applied to `damage` by the current combo.
    pub combo_count: u32,
    /// Direction monsters are pushed when they survive a strike.
    pub knockback: KnockbackDirection,
}

impl DefenderState {
    pub fn new(hp: u32, damage: u32) -> Self {
        Self {
            hp,
            max_hp: hp,
            damage,
            combo_count: 1,
            knockback: KnockbackDirection::None,
        }
    }

    pub fn with_combo(mut self, combo_count: u32) -> Self {
        self.combo_count = combo_count;
        self
    }

    pub fn with_knockback(mut self, knockback: KnockbackDirection) -> Self {
        self.knockback = knockback;
        self
    }

    /// Damage of the next strike against a monster.
    pub fn strike_damage(&self) -> u32 {
        self.damage.saturating_mul(self.combo_count)
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

impl Default for DefenderState {
    fn default() -> Self {
        Self::new(100, 10)
    }
}

/// Allied boss that support monsters heal and counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossState {
    pub hp: u32,
    pub max_hp: u32,
}

impl BossState {
    pub fn new(hp: u32, max_hp: u32) -> Self {
        Self {
            hp: hp.min(max_hp),
            max_hp,
        }
    }

    /// Restores hp up to the maximum, returning the amount actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Removes hp down to zero, returning the amount actually lost.
    pub fn hurt(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(amount);
        before - self.hp
    }
}

impl Default for BossState {
    fn default() -> Self {
        Self::new(200, 200)
    }
}

/// Coins collected during the current stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageRewards {
    pub coins: u32,
}

impl StageRewards {
    pub fn deposit(&mut self, coins: u32) {
        self.coins = self.coins.saturating_add(coins);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boss_heal_is_capped_at_max() {
        let mut boss = BossState::new(95, 100);

        assert_eq!(boss.heal(10), 5);
        assert_eq!(boss.hp, 100);
    }

    #[test]
    fn boss_hurt_saturates() {
        let mut boss = BossState::new(3, 100);

        assert_eq!(boss.hurt(10), 3);
        assert_eq!(boss.hp, 0);
    }

    #[test]
    fn strike_damage_scales_with_combo() {
        let defender = DefenderState::new(50, 4).with_combo(3);

        assert_eq!(defender.strike_damage(), 12);
    }
}
