//! Knockback direction selection and destination classification.

use crate::grid::{CellIndex, PositionalIndex};
use crate::state::MonsterId;

/// Direction the defender pushes monsters that survive a strike.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KnockbackDirection {
    #[default]
    None,
    /// Toward the centre.
    Front,
    /// Away from the centre.
    Back,
    Clockwise,
    AntiClockwise,
}

/// Result of a single knockback resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnockbackOutcome {
    /// No destination exists; the victim bounces out and back on its own cell.
    Bounce { cell: CellIndex },
    /// The index moved the victim; it bounces toward its new cell.
    Displaced { from: CellIndex, to: CellIndex },
    /// The destination belongs to someone else. Its occupant (if any) takes
    /// collision damage and the victim settles back on `settle`.
    Collision {
        at: CellIndex,
        occupant: Option<MonsterId>,
        settle: CellIndex,
    },
}

impl KnockbackOutcome {
    /// Cell the victim ends up on.
    pub fn final_cell(&self) -> CellIndex {
        match *self {
            Self::Bounce { cell } => cell,
            Self::Displaced { to, .. } => to,
            Self::Collision { settle, .. } => settle,
        }
    }
}

/// Runs the movement query selected by `direction`.
pub fn query_destination(
    grid: &mut dyn PositionalIndex,
    victim: MonsterId,
    direction: KnockbackDirection,
    distance: u32,
) -> Option<CellIndex> {
    match direction {
        KnockbackDirection::Front => grid.try_move_forward(victim, distance),
        KnockbackDirection::Back => grid.try_move_backward(victim),
        KnockbackDirection::Clockwise => grid.try_move_clockwise(victim, true),
        KnockbackDirection::AntiClockwise => grid.try_move_clockwise(victim, false),
        KnockbackDirection::None => None,
    }
}

/// Classifies the query result against the occupancy it left behind.
///
/// `origin` is the victim's cell before the query.
pub fn classify(
    grid: &dyn PositionalIndex,
    victim: MonsterId,
    origin: CellIndex,
    destination: Option<CellIndex>,
) -> KnockbackOutcome {
    let Some(destination) = destination else {
        return KnockbackOutcome::Bounce { cell: origin };
    };

    if grid.is_committed(victim, destination) {
        return KnockbackOutcome::Displaced {
            from: origin,
            to: destination,
        };
    }

    KnockbackOutcome::Collision {
        at: destination,
        occupant: grid.occupant(destination).filter(|&occupant| occupant != victim),
        settle: grid.cell_of(victim).unwrap_or(origin),
    }
}
