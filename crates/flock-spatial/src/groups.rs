//! Per-tick table of precomputed neighbor groups.

use flock_core::AgentId;

use crate::CellCoord;

/// Every cell's 3×3 neighbor group, computed once from a grid snapshot.
///
/// Unoccupied cells hold an empty group: no agent will ever ask for them.
/// The table is immutable and `Sync`, so the read phase may share it across
/// worker threads.
#[derive(Clone, Debug, Default)]
pub struct NeighborGroups {
    rows:   usize,
    cols:   usize,
    groups: Vec<Vec<AgentId>>,
}

impl NeighborGroups {
    pub(crate) fn new(rows: usize, cols: usize, groups: Vec<Vec<AgentId>>) -> Self {
        debug_assert_eq!(groups.len(), rows * cols);
        Self { rows, cols, groups }
    }

    /// Candidates for an agent standing in `cell`.  Cells outside the table
    /// yield an empty slice.
    #[inline]
    pub fn get(&self, cell: CellCoord) -> &[AgentId] {
        if cell.row >= self.rows || cell.col >= self.cols {
            return &[];
        }
        &self.groups[cell.row * self.cols + cell.col]
    }

    /// Number of non-empty groups.
    pub fn occupied(&self) -> usize {
        self.groups.iter().filter(|g| !g.is_empty()).count()
    }
}
