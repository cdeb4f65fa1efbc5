use crate::grid::GridTopology;
use crate::state::{BossState, DefenderState};

/// Encounter rules and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Ring/slice layout of the battlefield.
    pub grid: GridTopology,
    /// Rings a monster is pushed by a front knockback.
    pub knockback_distance: u32,
    /// Initial state of the player-side actor.
    pub defender: DefenderState,
    /// Initial state of the allied boss.
    pub boss: BossState,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Effects attachable to a single trigger.
    pub const MAX_HOOKS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_KNOCKBACK_DISTANCE: u32 = 1;

    pub fn new() -> Self {
        Self {
            grid: GridTopology::default(),
            knockback_distance: Self::DEFAULT_KNOCKBACK_DISTANCE,
            defender: DefenderState::default(),
            boss: BossState::default(),
        }
    }

    pub fn with_grid(mut self, grid: GridTopology) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_defender(mut self, defender: DefenderState) -> Self {
        self.defender = defender;
        self
    }

    pub fn with_boss(mut self, boss: BossState) -> Self {
        self.boss = boss;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
