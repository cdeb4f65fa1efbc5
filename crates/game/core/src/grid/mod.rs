//! Circular battlefield geometry and occupancy.
//!
//! [`GridTopology`] is pure index arithmetic. [`PositionalIndex`] is the
//! occupancy contract the engine consults; [`RingGrid`] is the in-memory
//! implementation used by the runtime and tests.
mod index;
mod topology;

pub use index::{PositionalIndex, RingGrid};
pub use topology::{CellIndex, GridTopology, Heading};

use crate::error::{ErrorSeverity, GameError};
use crate::state::MonsterId;

/// Errors raised by grid validation and placement.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("monster is not placed on the grid")]
    Unplaced,

    #[error("{cell} lies outside the grid ({cell_count} cells)")]
    CellOutOfRange { cell: CellIndex, cell_count: u32 },

    #[error("{cell} is already occupied by monster {occupant}")]
    CellOccupied { cell: CellIndex, occupant: MonsterId },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Unplaced | Self::CellOutOfRange { .. } => ErrorSeverity::Internal,
            Self::CellOccupied { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unplaced => "GRID_UNPLACED",
            Self::CellOutOfRange { .. } => "GRID_CELL_OUT_OF_RANGE",
            Self::CellOccupied { .. } => "GRID_CELL_OCCUPIED",
        }
    }
}
