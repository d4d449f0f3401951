//! `SpatialGrid` — a fixed `rows × cols` array of cells holding agent ids.
//!
//! # Addressing
//!
//! A position maps to `(row, col) = (⌊y / cell_size⌋, ⌊x / cell_size⌋)`.  With
//! wraparound on, row and column are taken modulo the grid dimensions
//! (toroidal); with it off, a coordinate outside the grid is an
//! [`OutOfBoundsCellAccess`][SpatialError::OutOfBoundsCellAccess].
//!
//! Cells store [`AgentId`]s, not agents: the grid never owns agent state.
//! Within a cell, ids keep their insertion order, so neighbor groups are
//! deterministic for a given insertion sequence.

use std::fmt;

use flock_core::{AgentId, Bounds, Vec2};

use crate::{NeighborGroups, SpatialError, SpatialResult};

/// `⌊v / cell_size⌋`, capped at the last cell for `v` inside `[0, extent)`.
#[inline]
fn axis_index(v: f64, cell_size: f64, extent: f64, count: usize) -> i64 {
    let i = (v / cell_size).floor() as i64;
    if (0.0..extent).contains(&v) { i.min(count as i64 - 1) } else { i }
}

// ── CellCoord ─────────────────────────────────────────────────────────────────

/// A validated cell address.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ── SpatialGrid ───────────────────────────────────────────────────────────────

/// Uniform bucket grid over the world rectangle.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    rows:       usize,
    cols:       usize,
    cell_size:  f64,
    wraparound: bool,
    /// World size the cells cover.  Positions inside it always land in a
    /// cell, even where `coord / cell_size` rounds up to `cols` or `rows`.
    extent:     Vec2,
    /// Row-major: `cells[row * cols + col]`.
    cells:      Vec<Vec<AgentId>>,
}

impl SpatialGrid {
    /// An empty grid with explicit dimensions.
    pub fn new(rows: usize, cols: usize, cell_size: f64, wraparound: bool) -> SpatialResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(SpatialError::InvalidDimensions(format!("{rows}x{cols} has no cells")));
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpatialError::InvalidDimensions(format!(
                "cell_size must be positive and finite, got {cell_size}"
            )));
        }
        Ok(Self {
            rows,
            cols,
            cell_size,
            wraparound,
            extent: Vec2::new(cols as f64 * cell_size, rows as f64 * cell_size),
            cells: vec![Vec::new(); rows * cols],
        })
    }

    /// An empty grid just large enough to cover `bounds`.
    ///
    /// The last row and column may be partial when the bounds are not an
    /// exact multiple of `cell_size`.
    pub fn covering(bounds: Bounds, cell_size: f64, wraparound: bool) -> SpatialResult<Self> {
        if !(bounds.width > 0.0 && bounds.height > 0.0) {
            return Err(SpatialError::InvalidDimensions(format!(
                "bounds {} x {} are empty",
                bounds.width, bounds.height
            )));
        }
        let rows = (bounds.height / cell_size).ceil().max(1.0) as usize;
        let cols = (bounds.width / cell_size).ceil().max(1.0) as usize;
        let mut grid = Self::new(rows, cols, cell_size, wraparound)?;
        grid.extent = Vec2::new(bounds.width, bounds.height);
        Ok(grid)
    }

    // ── Metadata ──────────────────────────────────────────────────────────

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    pub fn wraparound(&self) -> bool {
        self.wraparound
    }

    /// Total number of ids stored across all cells.
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    // ── Addressing ────────────────────────────────────────────────────────

    /// Resolve raw (possibly negative or overflowing) cell coordinates,
    /// wrapping or bounds-checking per the grid's mode.
    pub fn resolve(&self, row: i64, col: i64) -> SpatialResult<CellCoord> {
        if self.wraparound {
            return Ok(CellCoord::new(
                row.rem_euclid(self.rows as i64) as usize,
                col.rem_euclid(self.cols as i64) as usize,
            ));
        }
        if (0..self.rows as i64).contains(&row) && (0..self.cols as i64).contains(&col) {
            Ok(CellCoord::new(row as usize, col as usize))
        } else {
            Err(self.out_of_bounds(row, col))
        }
    }

    /// Cell containing `position`.
    pub fn cell_of(&self, position: Vec2) -> SpatialResult<CellCoord> {
        let row = axis_index(position.y, self.cell_size, self.extent.y, self.rows);
        let col = axis_index(position.x, self.cell_size, self.extent.x, self.cols);
        self.resolve(row, col)
    }

    fn out_of_bounds(&self, row: i64, col: i64) -> SpatialError {
        SpatialError::OutOfBoundsCellAccess { row, col, rows: self.rows, cols: self.cols }
    }

    fn index_of(&self, cell: CellCoord) -> SpatialResult<usize> {
        if cell.row < self.rows && cell.col < self.cols {
            Ok(cell.row * self.cols + cell.col)
        } else {
            Err(self.out_of_bounds(cell.row as i64, cell.col as i64))
        }
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Append `agent` to `cell`.
    pub fn insert(&mut self, agent: AgentId, cell: CellCoord) -> SpatialResult<()> {
        let i = self.index_of(cell)?;
        self.cells[i].push(agent);
        Ok(())
    }

    /// Append `agent` to the cell containing `position`; returns that cell.
    pub fn insert_at(&mut self, agent: AgentId, position: Vec2) -> SpatialResult<CellCoord> {
        let cell = self.cell_of(position)?;
        self.insert(agent, cell)?;
        Ok(cell)
    }

    /// Remove one occurrence of `agent` from `cell`, preserving the order of
    /// the remaining ids.
    pub fn remove(&mut self, agent: AgentId, cell: CellCoord) -> SpatialResult<()> {
        let i = self.index_of(cell)?;
        let bucket = &mut self.cells[i];
        match bucket.iter().position(|&a| a == agent) {
            Some(at) => {
                bucket.remove(at);
                Ok(())
            }
            None => Err(SpatialError::NotFound { agent, cell }),
        }
    }

    /// Move `agent` from `from` to `to`.  A no-op when the cells are equal.
    pub fn relocate(&mut self, agent: AgentId, from: CellCoord, to: CellCoord) -> SpatialResult<()> {
        if from == to {
            return Ok(());
        }
        self.remove(agent, from)?;
        self.insert(agent, to)
    }

    /// Empty every cell, keeping allocations.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Clear, then bucket every `(agent, position)` in iteration order.
    ///
    /// Returns the cell assigned to each agent, in the same order.
    pub fn rebuild<I>(&mut self, agents: I) -> SpatialResult<Vec<(AgentId, CellCoord)>>
    where
        I: IntoIterator<Item = (AgentId, Vec2)>,
    {
        self.clear();
        agents
            .into_iter()
            .map(|(agent, position)| Ok((agent, self.insert_at(agent, position)?)))
            .collect()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Ids stored in one cell.
    pub fn cell(&self, cell: CellCoord) -> SpatialResult<&[AgentId]> {
        let i = self.index_of(cell)?;
        Ok(&self.cells[i])
    }

    /// The concatenation of the 3×3 block of cells centered on `center`.
    ///
    /// Rows are visited top to bottom and columns left to right, each cell in
    /// insertion order.  With wraparound, neighbors are taken modulo the grid
    /// size and a cell reachable by two offsets (grids narrower than three
    /// cells) is visited once.  Without wraparound, neighbors that fall off
    /// the grid are skipped; only `center` itself must be valid.
    pub fn neighbor_group(&self, center: CellCoord) -> SpatialResult<Vec<AgentId>> {
        self.index_of(center)?;
        let mut group = Vec::new();
        self.for_each_group_cell(center, |bucket| group.extend_from_slice(bucket));
        Ok(group)
    }

    /// Precompute the neighbor group of every occupied cell.
    ///
    /// Groups depend only on the cell, never on which agent asks, so one pass
    /// serves every agent for the rest of the tick.
    pub fn neighbor_groups(&self) -> NeighborGroups {
        let groups = (0..self.cells.len())
            .map(|i| {
                if self.cells[i].is_empty() {
                    return Vec::new();
                }
                let center = CellCoord::new(i / self.cols, i % self.cols);
                let mut group = Vec::new();
                self.for_each_group_cell(center, |bucket| group.extend_from_slice(bucket));
                group
            })
            .collect();
        NeighborGroups::new(self.rows, self.cols, groups)
    }

    fn for_each_group_cell(&self, center: CellCoord, mut visit: impl FnMut(&[AgentId])) {
        let rows = self.axis_neighbors(center.row, self.rows);
        let cols = self.axis_neighbors(center.col, self.cols);
        for &row in rows.iter().flatten() {
            for &col in cols.iter().flatten() {
                visit(&self.cells[row * self.cols + col]);
            }
        }
    }

    /// Distinct in-grid indices among `i - 1`, `i`, `i + 1` on one axis.
    fn axis_neighbors(&self, i: usize, len: usize) -> [Option<usize>; 3] {
        let mut out = [None; 3];
        for (slot, offset) in [-1_i64, 0, 1].into_iter().enumerate() {
            let raw = i as i64 + offset;
            let resolved = if self.wraparound {
                Some(raw.rem_euclid(len as i64) as usize)
            } else if (0..len as i64).contains(&raw) {
                Some(raw as usize)
            } else {
                None
            };
            if let Some(r) = resolved {
                if !out[..slot].contains(&Some(r)) {
                    out[slot] = Some(r);
                }
            }
        }
        out
    }
}
