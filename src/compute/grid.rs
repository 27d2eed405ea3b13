//! Bounded Game of Life grid.

use std::collections::HashMap;
use std::fmt;

use crate::schema::{Cell, Pattern, PatternError};

/// Relative positions of the eight Moore neighbors.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A pattern of alive cells on a non-wrapping grid.
///
/// Rows and columns both range over `[0, grid_size]` inclusive. Cells beyond
/// that edge neither live nor count as neighbors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    pattern: Pattern,
    grid_size: usize,
}

impl Grid {
    /// Create a grid, rejecting cells outside `[0, grid_size]`.
    pub fn new(pattern: Pattern, grid_size: usize) -> Result<Self, PatternError> {
        if let Some(cell) = pattern
            .iter()
            .find(|c| c.row > grid_size || c.col > grid_size)
        {
            return Err(PatternError::OutOfBounds {
                row: cell.row as i64,
                col: cell.col as i64,
                grid_size,
            });
        }
        Ok(Self { pattern, grid_size })
    }

    /// Create a grid from raw signed coordinates, as read from a pattern store.
    ///
    /// Duplicates collapse into one cell; any coordinate outside the grid is
    /// an error.
    pub fn from_cells<I>(cells: I, grid_size: usize) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut pattern = Pattern::new();
        for (row, col) in cells {
            let cell = usize::try_from(row)
                .ok()
                .zip(usize::try_from(col).ok())
                .map(Cell::from)
                .filter(|c| c.row <= grid_size && c.col <= grid_size)
                .ok_or(PatternError::OutOfBounds {
                    row,
                    col,
                    grid_size,
                })?;
            pattern.insert(cell);
        }
        Ok(Self { pattern, grid_size })
    }

    /// Grid with no alive cells.
    pub fn empty(grid_size: usize) -> Self {
        Self {
            pattern: Pattern::new(),
            grid_size,
        }
    }

    /// Wrap a pattern whose cells the caller already keeps in bounds.
    pub(crate) fn from_bounded(pattern: Pattern, grid_size: usize) -> Self {
        debug_assert!(
            pattern
                .iter()
                .all(|c| c.row <= grid_size && c.col <= grid_size)
        );
        Self { pattern, grid_size }
    }

    /// Advance one generation under B3/S23.
    pub fn evolve(&mut self) {
        let mut neighbor_counts: HashMap<Cell, u8> = HashMap::with_capacity(self.pattern.len() * 8);

        for &cell in &self.pattern {
            for (drow, dcol) in NEIGHBOR_OFFSETS {
                if let Some(neighbor) = self.offset(cell, drow, dcol) {
                    *neighbor_counts.entry(neighbor).or_insert(0) += 1;
                }
            }
        }

        self.pattern = neighbor_counts
            .into_iter()
            .filter(|(cell, count)| match *count {
                3 => true,
                2 => self.pattern.contains(cell),
                _ => false,
            })
            .map(|(cell, _)| cell)
            .collect();
    }

    /// Neighbor of `cell` at the given offset, if it lies on the grid.
    #[inline]
    fn offset(&self, cell: Cell, drow: isize, dcol: isize) -> Option<Cell> {
        let row = cell.row.checked_add_signed(drow)?;
        let col = cell.col.checked_add_signed(dcol)?;
        let neighbor = Cell { row, col };
        self.contains(neighbor).then_some(neighbor)
    }

    /// Number of alive cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.pattern.len()
    }

    /// Current alive cells.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Largest valid row/column index.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Whether `cell` lies on the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row <= self.grid_size && cell.col <= self.grid_size
    }

    pub fn is_alive(&self, cell: Cell) -> bool {
        self.pattern.contains(&cell)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..=self.grid_size {
            let line: String = (0..=self.grid_size)
                .map(|col| {
                    if self.is_alive(Cell { row, col }) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
