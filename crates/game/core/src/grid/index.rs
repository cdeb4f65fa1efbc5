//! Occupancy index consulted by the turn controller and the knockback resolver.

use std::collections::HashMap;

use super::{CellIndex, GridError, GridTopology};
use crate::state::MonsterId;

/// Authoritative owner of cell occupancy.
///
/// Movement queries either commit the monster to a new cell and return it, or
/// return a cell without committing (a collision with its occupant), or return
/// `None` when no destination exists. Callers tell the cases apart by asking
/// [`PositionalIndex::occupant`] for the returned cell.
pub trait PositionalIndex {
    fn topology(&self) -> &GridTopology;

    /// Cell currently held by `monster`.
    fn cell_of(&self, monster: MonsterId) -> Option<CellIndex>;

    /// Monster currently holding `cell`.
    fn occupant(&self, cell: CellIndex) -> Option<MonsterId>;

    /// Places a monster on an empty cell.
    fn place(&mut self, monster: MonsterId, cell: CellIndex) -> Result<(), GridError>;

    /// Releases the cell held by `monster`, returning it.
    fn remove(&mut self, monster: MonsterId) -> Option<CellIndex>;

    /// Advances up to `speed` rings toward the centre.
    fn try_move_forward(&mut self, monster: MonsterId, speed: u32) -> Option<CellIndex>;

    /// Retreats one ring away from the centre.
    fn try_move_backward(&mut self, monster: MonsterId) -> Option<CellIndex>;

    /// Shifts one slice around the current ring.
    fn try_move_clockwise(&mut self, monster: MonsterId, clockwise: bool) -> Option<CellIndex>;

    /// True when the last query moved `monster` onto `cell`.
    fn is_committed(&self, monster: MonsterId, cell: CellIndex) -> bool {
        self.occupant(cell) == Some(monster)
    }
}

/// In-memory [`PositionalIndex`] over a [`GridTopology`].
#[derive(Clone, Debug, Default)]
pub struct RingGrid {
    topology: GridTopology,
    cells: HashMap<CellIndex, MonsterId>,
    positions: HashMap<MonsterId, CellIndex>,
}

impl RingGrid {
    pub fn new(topology: GridTopology) -> Self {
        Self {
            topology,
            cells: HashMap::new(),
            positions: HashMap::new(),
        }
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.len()
    }

    fn relocate(&mut self, monster: MonsterId, from: CellIndex, to: CellIndex) {
        self.cells.remove(&from);
        self.cells.insert(to, monster);
        self.positions.insert(monster, to);
    }

    /// Shared single-step rule: commit when free, report a collision when taken.
    fn step(&mut self, monster: MonsterId, from: CellIndex, to: CellIndex) -> CellIndex {
        if self.cells.contains_key(&to) {
            return to;
        }
        self.relocate(monster, from, to);
        to
    }
}

impl PositionalIndex for RingGrid {
    fn topology(&self) -> &GridTopology {
        &self.topology
    }

    fn cell_of(&self, monster: MonsterId) -> Option<CellIndex> {
        self.positions.get(&monster).copied()
    }

    fn occupant(&self, cell: CellIndex) -> Option<MonsterId> {
        self.cells.get(&cell).copied()
    }

    fn place(&mut self, monster: MonsterId, cell: CellIndex) -> Result<(), GridError> {
        let cell = self.topology.validate(Some(cell))?;
        if let Some(&occupant) = self.cells.get(&cell) {
            return Err(GridError::CellOccupied { cell, occupant });
        }
        if let Some(previous) = self.positions.insert(monster, cell) {
            self.cells.remove(&previous);
        }
        self.cells.insert(cell, monster);
        Ok(())
    }

    fn remove(&mut self, monster: MonsterId) -> Option<CellIndex> {
        let cell = self.positions.remove(&monster)?;
        self.cells.remove(&cell);
        Some(cell)
    }

    fn try_move_forward(&mut self, monster: MonsterId, speed: u32) -> Option<CellIndex> {
        let start = self.cell_of(monster)?;
        let first = self.topology.inward(start, 1)?;
        if self.cells.contains_key(&first) {
            return Some(first);
        }

        let mut reached = first;
        for _ in 1..speed {
            match self.topology.inward(reached, 1) {
                Some(next) if !self.cells.contains_key(&next) => reached = next,
                _ => break,
            }
        }

        self.relocate(monster, start, reached);
        Some(reached)
    }

    fn try_move_backward(&mut self, monster: MonsterId) -> Option<CellIndex> {
        let start = self.cell_of(monster)?;
        let target = self.topology.outward(start, 1)?;
        Some(self.step(monster, start, target))
    }

    fn try_move_clockwise(&mut self, monster: MonsterId, clockwise: bool) -> Option<CellIndex> {
        let start = self.cell_of(monster)?;
        let target = self.topology.rotate(start, clockwise);
        if target == start {
            return None;
        }
        Some(self.step(monster, start, target))
    }
}
