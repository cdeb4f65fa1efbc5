//! Strike result types.

use super::knockback::KnockbackOutcome;

/// Outcome of a single strike against a monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeOutcome {
    /// The target was already dead; nothing changed.
    Ignored,
    /// The target survived a hit that carries no knockback.
    Damaged { remaining: u32 },
    /// The hit reduced the target to zero hp.
    Killed,
    /// The target survived a defender strike and was knocked back.
    KnockedBack {
        remaining: u32,
        knockback: KnockbackOutcome,
    },
}

impl StrikeOutcome {
    pub fn is_kill(&self) -> bool {
        matches!(self, Self::Killed)
    }
}
