//! Cell and pattern types shared by the grid, the simulation and the search.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A `(row, column)` coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Set of alive cells.
///
/// Ordered so that iteration (and therefore seeded sampling) is reproducible.
pub type Pattern = BTreeSet<Cell>;

/// Build a pattern from `(row, col)` pairs, dropping duplicates.
pub fn pattern_of<I>(cells: I) -> Pattern
where
    I: IntoIterator<Item = (usize, usize)>,
{
    cells.into_iter().map(Cell::from).collect()
}

/// Errors raised when external coordinates do not describe a valid pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Cell ({row}, {col}) lies outside the grid bounds [0, {grid_size}]")]
    OutOfBounds { row: i64, col: i64, grid_size: usize },
}
