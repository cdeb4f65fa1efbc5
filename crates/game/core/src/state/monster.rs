//! Per-instance monster record and its state machine vocabulary.

use bitflags::bitflags;

use crate::ability::AbilityBinding;
use crate::env::MonsterArchetype;
use crate::grid::{CellIndex, GridTopology, Heading};

use super::{MonsterId, TemplateId};

/// Lifecycle state of a monster.
///
/// `Dead` is terminal; every other state can reach it through damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreatureState {
    #[default]
    Idle,
    Moving,
    Attack,
    Dead,
}

/// Logic-level phases of the standard attack.
///
/// Presentation observes these; gameplay never waits on an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackPhase {
    Approaching,
    DamageApplied,
    Retreating,
    Done,
}

impl AttackPhase {
    /// Phase that follows this one, `None` after `Done`.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Approaching => Some(Self::DamageApplied),
            Self::DamageApplied => Some(Self::Retreating),
            Self::Retreating => Some(Self::Done),
            Self::Done => None,
        }
    }
}

bitflags! {
    /// Boolean gates tracked per monster.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MonsterFlags: u8 {
        /// An action is still resolving; the turn scheduler waits on this.
        const BUSY = 1 << 0;
        /// Inside the defender's interaction region.
        const SELECTED = 1 << 1;
    }
}

/// Horizontal orientation of the sprite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Monsters on the right half face left, toward the centre.
    pub fn toward_centre(topology: &GridTopology, cell: CellIndex) -> Self {
        if topology.is_right_half(cell) {
            Self::Left
        } else {
            Self::Right
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeathCause {
    /// Reduced to zero hp by the defender or a knockback collision.
    Slain,
    /// Died as part of its own ability chain.
    SelfDestruct,
}

/// How a monster died, kept for the death motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeathRecord {
    pub cause: DeathCause,
    pub heading: Heading,
}

/// Complete state of one monster instance.
///
/// # Invariants
///
/// - `hp <= max_hp`
/// - `hp == 0` exactly when `state == Dead`
/// - `cell` mirrors the positional index while alive and is cleared on death
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterState {
    pub id: MonsterId,
    pub archetype: MonsterArchetype,
    pub abilities: AbilityBinding,

    pub hp: u32,
    pub max_hp: u32,

    /// Cell held in the positional index. `None` until placed and after death.
    pub cell: Option<CellIndex>,
    /// Target of an in-flight move or knockback.
    pub destination: Option<CellIndex>,

    /// Turns left before the next move is allowed.
    pub move_turn_remaining: u32,
    pub flags: MonsterFlags,
    pub state: CreatureState,
    pub facing: Facing,
    pub attack_phase: Option<AttackPhase>,
    pub death: Option<DeathRecord>,
}

impl MonsterState {
    /// Creates an unplaced monster at full health.
    ///
    /// The instance starts busy until its appearance completes, and with an
    /// empty move-turn counter so it may act on its first turn.
    pub fn new(id: MonsterId, archetype: MonsterArchetype) -> Self {
        let abilities = AbilityBinding::for_ability(archetype.special_ability);
        Self {
            id,
            hp: archetype.hp,
            max_hp: archetype.hp,
            archetype,
            abilities,
            cell: None,
            destination: None,
            move_turn_remaining: 0,
            flags: MonsterFlags::BUSY,
            state: CreatureState::Idle,
            facing: Facing::default(),
            attack_phase: None,
            death: None,
        }
    }

    pub fn template_id(&self) -> TemplateId {
        self.archetype.template_id
    }

    /// Damage this monster deals, both to the defender and on collision.
    pub fn damage(&self) -> u32 {
        self.archetype.damage
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state == CreatureState::Dead
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.flags.contains(MonsterFlags::BUSY)
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.flags.set(MonsterFlags::BUSY, busy);
    }

    #[inline]
    pub fn is_selected(&self) -> bool {
        self.flags.contains(MonsterFlags::SELECTED)
    }

    /// True while an action of this monster is still playing out.
    ///
    /// A dead monster only resolves an attack it started before dying. A
    /// living one also resolves while busy or travelling to a destination.
    pub fn is_resolving(&self) -> bool {
        if self.is_dead() {
            return self.attack_phase.is_some();
        }
        self.is_busy() || self.state == CreatureState::Moving || self.attack_phase.is_some()
    }

    pub fn can_move(&self) -> bool {
        self.move_turn_remaining == 0
    }

    /// True when the current cell is already within weapon range.
    pub fn can_attack(&self, topology: &GridTopology) -> bool {
        self.cell
            .is_some_and(|cell| topology.within_attack_range(cell, self.archetype.attack_range))
    }

    pub fn reset_move_turn(&mut self) {
        self.move_turn_remaining = self.archetype.move_turn;
    }

    /// Counts one turn off the move cooldown, never below zero.
    pub fn tick_move_turn(&mut self) {
        self.move_turn_remaining = self.move_turn_remaining.saturating_sub(1);
    }
}
