//! Monster archetype definitions and oracle interface.
//!
//! An archetype is the immutable template shared by every instance of a
//! monster kind. Wave data references archetypes by [`TemplateId`]; the
//! runtime resolves them through an [`ArchetypeOracle`] and hands the result
//! to the spawn operation.

use crate::state::TemplateId;

/// Ability bundle selected by an archetype.
///
/// Archetype files store the numeric code used by the original wave tables,
/// so the serde representation goes through `u8`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum SpecialAbility {
    /// Attacks the defender and retreats.
    #[default]
    Basic,
    /// Attacks the defender, then dies.
    Suicidal,
    /// Heals the allied boss, dies, and hurts the boss on death.
    Support,
}

impl SpecialAbility {
    pub const fn code(self) -> u8 {
        match self {
            Self::Basic => 0,
            Self::Suicidal => 1,
            Self::Support => 2,
        }
    }
}

impl From<SpecialAbility> for u8 {
    fn from(ability: SpecialAbility) -> Self {
        ability.code()
    }
}

/// Raised when an archetype references an ability code that does not exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown special ability code {0}")]
pub struct UnknownAbility(pub u8);

impl TryFrom<u8> for SpecialAbility {
    type Error = UnknownAbility;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Basic),
            1 => Ok(Self::Suicidal),
            2 => Ok(Self::Support),
            other => Err(UnknownAbility(other)),
        }
    }
}

/// Immutable parameters loaded once per monster kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterArchetype {
    pub template_id: TemplateId,
    pub name: String,
    pub hp: u32,
    /// Damage dealt to the defender on attack and to monsters on collision.
    pub damage: u32,
    /// Turns between moves.
    pub move_turn: u32,
    /// Rings covered by a single forward move.
    pub move_speed: u32,
    /// Rings from the centre within which the monster can attack.
    pub attack_range: u32,
    pub drop_coin: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub special_ability: SpecialAbility,
}

impl MonsterArchetype {
    /// Creates a basic archetype; tests and tools adjust fields afterwards.
    pub fn new(template_id: TemplateId, name: impl Into<String>, hp: u32) -> Self {
        Self {
            template_id,
            name: name.into(),
            hp,
            damage: 1,
            move_turn: 1,
            move_speed: 1,
            attack_range: 1,
            drop_coin: 0,
            special_ability: SpecialAbility::Basic,
        }
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    pub fn with_move_turn(mut self, move_turn: u32) -> Self {
        self.move_turn = move_turn;
        self
    }

    pub fn with_move_speed(mut self, move_speed: u32) -> Self {
        self.move_speed = move_speed;
        self
    }

    pub fn with_attack_range(mut self, attack_range: u32) -> Self {
        self.attack_range = attack_range;
        self
    }

    pub fn with_drop_coin(mut self, drop_coin: u32) -> Self {
        self.drop_coin = drop_coin;
        self
    }

    pub fn with_ability(mut self, ability: SpecialAbility) -> Self {
        self.special_ability = ability;
        self
    }
}

/// Read-only lookup of archetypes by template id.
pub trait ArchetypeOracle: Send + Sync {
    fn archetype(&self, template: TemplateId) -> Option<&MonsterArchetype>;

    /// Template ids known to this oracle, in ascending order.
    fn templates(&self) -> Vec<TemplateId>;
}
