//! Error types for engine operations.

use crate::error::{ErrorSeverity, GameError};
use crate::grid::GridError;
use crate::state::MonsterId;

/// Errors surfaced by [`CombatEngine`](super::CombatEngine) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("monster {0} does not exist")]
    MonsterNotFound(MonsterId),

    #[error("monster {0} is dead")]
    MonsterDead(MonsterId),

    #[error("monster {0} is still resolving its previous action")]
    MonsterBusy(MonsterId),

    #[error("monster {0} has no attack in progress")]
    NoAttackInProgress(MonsterId),

    #[error("monster {0} cannot be discarded while alive")]
    NotDead(MonsterId),

    #[error(transparent)]
    Grid(#[from] GridError),
}

impl GameError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MonsterDead(_) | Self::MonsterBusy(_) => ErrorSeverity::Recoverable,
            Self::MonsterNotFound(_) | Self::NoAttackInProgress(_) | Self::NotDead(_) => {
                ErrorSeverity::Validation
            }
            Self::Grid(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MonsterNotFound(_) => "ENCOUNTER_MONSTER_NOT_FOUND",
            Self::MonsterDead(_) => "ENCOUNTER_MONSTER_DEAD",
            Self::MonsterBusy(_) => "ENCOUNTER_MONSTER_BUSY",
            Self::NoAttackInProgress(_) => "ENCOUNTER_NO_ATTACK_IN_PROGRESS",
            Self::NotDead(_) => "ENCOUNTER_NOT_DEAD",
            Self::Grid(error) => error.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellIndex;

    #[test]
    fn grid_errors_keep_their_severity() {
        let error = EncounterError::from(GridError::CellOutOfRange {
            cell: CellIndex(200),
            cell_count: 144,
        });

        assert_eq!(error.severity(), ErrorSeverity::Internal);
        assert_eq!(error.error_code(), "GRID_CELL_OUT_OF_RANGE");
        assert!(EncounterError::MonsterBusy(MonsterId(1)).severity().is_recoverable());
    }
}
