//! Ring-and-slice addressing for the circular battlefield.

use std::fmt;

use super::GridError;

/// Flat index of a grid cell. `ring = index / slices`, `slice = index % slices`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CellIndex(pub u32);

impl CellIndex {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {}", self.0)
    }
}

/// Integer heading used to orient death and bounce motion.
///
/// Components are expressed in grid steps: `slices` counts angular steps and
/// `rings` counts radial steps (negative points toward the centre).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heading {
    pub slices: i32,
    pub rings: i32,
}

impl Heading {
    /// Straight toward the defended point.
    pub const INWARD: Self = Self {
        slices: 0,
        rings: -1,
    };

    /// Straight away from the defended point.
    pub const OUTWARD: Self = Self {
        slices: 0,
        rings: 1,
    };

    pub const fn new(slices: i32, rings: i32) -> Self {
        Self { slices, rings }
    }
}

/// Pure geometry over cell indices. Holds no occupancy state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridTopology {
    pub slice_count: u32,
    pub ring_count: u32,
}

impl GridTopology {
    pub const DEFAULT_SLICE_COUNT: u32 = 12;
    pub const DEFAULT_RING_COUNT: u32 = 12;

    pub const fn new(slice_count: u32, ring_count: u32) -> Self {
        Self {
            slice_count,
            ring_count,
        }
    }

    /// Total number of addressable cells, saturating at `u32::MAX`.
    pub const fn cell_count(&self) -> u32 {
        self.slice_count.saturating_mul(self.ring_count)
    }

    /// `None` when the grid has more cells than a `CellIndex` can address.
    pub const fn checked_cell_count(&self) -> Option<u32> {
        self.slice_count.checked_mul(self.ring_count)
    }

    pub const fn contains(&self, cell: CellIndex) -> bool {
        cell.0 < self.cell_count()
    }

    pub const fn ring(&self, cell: CellIndex) -> u32 {
        cell.0 / self.slice_count
    }

    pub const fn slice(&self, cell: CellIndex) -> u32 {
        cell.0 % self.slice_count
    }

    /// Builds the index for `(ring, slice)`, or `None` outside the grid.
    pub fn cell_at(&self, ring: u32, slice: u32) -> Option<CellIndex> {
        (ring < self.ring_count && slice < self.slice_count)
            .then(|| CellIndex(ring * self.slice_count + slice))
    }

    /// True when a monster standing on `cell` reaches the defended point with
    /// a weapon spanning `attack_range` rings.
    pub const fn within_attack_range(&self, cell: CellIndex, attack_range: u32) -> bool {
        self.ring(cell) < attack_range
    }

    /// Checks that an optional position is placed inside the grid.
    pub fn validate(&self, cell: Option<CellIndex>) -> Result<CellIndex, GridError> {
        let cell = cell.ok_or(GridError::Unplaced)?;
        if self.contains(cell) {
            Ok(cell)
        } else {
            Err(GridError::CellOutOfRange {
                cell,
                cell_count: self.cell_count(),
            })
        }
    }

    /// Cell `rings` steps closer to the centre along the same slice.
    pub fn inward(&self, cell: CellIndex, rings: u32) -> Option<CellIndex> {
        let ring = self.ring(cell).checked_sub(rings)?;
        self.cell_at(ring, self.slice(cell))
    }

    /// Cell `rings` steps further from the centre along the same slice.
    pub fn outward(&self, cell: CellIndex, rings: u32) -> Option<CellIndex> {
        let ring = self.ring(cell).checked_add(rings)?;
        self.cell_at(ring, self.slice(cell))
    }

    /// Neighbouring cell in the same ring. Clockwise is `slice + 1`, wrapping.
    pub fn rotate(&self, cell: CellIndex, clockwise: bool) -> CellIndex {
        let slice = self.slice(cell);
        let next = if clockwise {
            (slice + 1) % self.slice_count
        } else {
            (slice + self.slice_count - 1) % self.slice_count
        };
        CellIndex(self.ring(cell) * self.slice_count + next)
    }

    /// Heading from `from` to `to`, taking the short way around the ring.
    pub fn heading(&self, from: CellIndex, to: CellIndex) -> Heading {
        let slices = self.slice_count as i32;
        let mut ds = self.slice(to) as i32 - self.slice(from) as i32;
        if ds > slices / 2 {
            ds -= slices;
        } else if ds < -(slices / 2) {
            ds += slices;
        }
        let dr = self.ring(to) as i32 - self.ring(from) as i32;
        Heading::new(ds.signum(), dr.signum())
    }

    /// Whether a cell sits on the right half of the screen.
    ///
    /// Slices are laid out starting at twelve o'clock and proceed clockwise,
    /// so the first half of the slices lies right of the vertical axis.
    pub fn is_right_half(&self, cell: CellIndex) -> bool {
        let slice = self.slice(cell);
        slice > 0 && slice * 2 < self.slice_count
    }
}

impl Default for GridTopology {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SLICE_COUNT, Self::DEFAULT_RING_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_and_slice_decompose_index() {
        let grid = GridTopology::default();

        assert_eq!(grid.ring(CellIndex(25)), 2);
        assert_eq!(grid.slice(CellIndex(25)), 1);
        assert_eq!(grid.cell_at(2, 1), Some(CellIndex(25)));
        assert_eq!(grid.cell_at(12, 0), None);
    }

    #[test]
    fn attack_range_boundary() {
        let grid = GridTopology::default();

        assert!(grid.within_attack_range(CellIndex(11), 1));
        assert!(!grid.within_attack_range(CellIndex(12), 1));
        assert!(grid.within_attack_range(CellIndex(23), 2));
        assert!(grid.within_attack_range(CellIndex(100), 400_000_000));
        assert!(grid.within_attack_range(CellIndex(143), u32::MAX));
        assert!(!grid.within_attack_range(CellIndex(0), 0));
    }

    #[test]
    fn oversized_grid_saturates_cell_count() {
        let grid = GridTopology::new(u32::MAX, 2);

        assert_eq!(grid.checked_cell_count(), None);
        assert_eq!(grid.cell_count(), u32::MAX);
        assert_eq!(GridTopology::default().checked_cell_count(), Some(144));
    }

    #[test]
    fn validate_rejects_unplaced_and_out_of_range() {
        let grid = GridTopology::default();

        assert_eq!(grid.validate(None), Err(GridError::Unplaced));
        assert_eq!(
            grid.validate(Some(CellIndex(144))),
            Err(GridError::CellOutOfRange {
                cell: CellIndex(144),
                cell_count: 144,
            })
        );
        assert_eq!(grid.validate(Some(CellIndex(143))), Ok(CellIndex(143)));
    }

    #[test]
    fn rotation_wraps_within_ring() {
        let grid = GridTopology::default();

        assert_eq!(grid.rotate(CellIndex(23), true), CellIndex(12));
        assert_eq!(grid.rotate(CellIndex(12), false), CellIndex(23));
        assert_eq!(grid.rotate(CellIndex(5), true), CellIndex(6));
    }

    #[test]
    fn inward_stops_at_centre() {
        let grid = GridTopology::default();

        assert_eq!(grid.inward(CellIndex(24), 1), Some(CellIndex(12)));
        assert_eq!(grid.inward(CellIndex(24), 2), Some(CellIndex(0)));
        assert_eq!(grid.inward(CellIndex(24), 3), None);
        assert_eq!(grid.outward(CellIndex(140), 1), None);
    }

    #[test]
    fn heading_takes_short_way_around() {
        let grid = GridTopology::default();

        assert_eq!(grid.heading(CellIndex(11), CellIndex(0)), Heading::new(1, 0));
        assert_eq!(grid.heading(CellIndex(24), CellIndex(12)), Heading::INWARD);
    }
}
