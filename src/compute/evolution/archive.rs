//! Pattern archive for storing and loading discovered patterns.
//!
//! Patterns are kept in a JSON object keyed by `"<cells>:<fitness>"`:
//!
//! ```json
//! {
//!   "9:131": { "alive_cells": [[5, 10], [5, 11], [7, 7]] }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::compute::Grid;
use crate::schema::{Pattern, PatternError};

/// Supplies raw seed coordinates by name.
pub trait PatternSource {
    /// Coordinates stored under `name`, or `None` if there is no such entry.
    fn load(&self, name: &str) -> Result<Option<Vec<(i64, i64)>>, ArchiveError>;
}

/// Persists a discovered pattern together with its fitness.
pub trait PatternSink {
    /// Store `pattern`, returning the label it was stored under.
    fn save(&mut self, pattern: &Pattern, fitness: usize) -> Result<String, ArchiveError>;
}

/// Pattern store errors.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed pattern file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error("Refusing to store an empty pattern")]
    EmptyPattern,
}

/// One stored pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPattern {
    /// Alive cells as `[row, col]` pairs.
    pub alive_cells: Vec<[i64; 2]>,
}

impl From<&Pattern> for StoredPattern {
    fn from(pattern: &Pattern) -> Self {
        Self {
            alive_cells: pattern
                .iter()
                .map(|c| [c.row as i64, c.col as i64])
                .collect(),
        }
    }
}

/// Keyed pattern store, optionally backed by a JSON file.
#[derive(Debug, Default)]
pub struct PatternArchive {
    patterns: BTreeMap<String, StoredPattern>,
    path: Option<PathBuf>,
}

impl PatternArchive {
    /// Archive that lives only in memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a file-backed archive. A missing file starts an empty archive.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let path = path.as_ref().to_path_buf();
        let patterns = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            patterns,
            path: Some(path),
        })
    }

    /// Stored labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&StoredPattern> {
        self.patterns.get(name)
    }

    /// Load `name` as a grid of the given size, validating every coordinate.
    pub fn load_grid(&self, name: &str, grid_size: usize) -> Result<Option<Grid>, ArchiveError> {
        match self.load(name)? {
            Some(cells) => Ok(Some(Grid::from_cells(cells, grid_size)?)),
            None => Ok(None),
        }
    }

    /// Get archive size.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if archive is empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn flush(&self) -> Result<(), ArchiveError> {
        if let Some(path) = &self.path {
            let json = serde_json::to_string_pretty(&self.patterns)?;
            fs::write(path, json)?;
        }
        Ok(())
    }
}

impl PatternSource for PatternArchive {
    fn load(&self, name: &str) -> Result<Option<Vec<(i64, i64)>>, ArchiveError> {
        Ok(self.patterns.get(name).map(|stored| {
            stored
                .alive_cells
                .iter()
                .map(|&[row, col]| (row, col))
                .collect()
        }))
    }
}

impl PatternSink for PatternArchive {
    fn save(&mut self, pattern: &Pattern, fitness: usize) -> Result<String, ArchiveError> {
        if pattern.is_empty() {
            return Err(ArchiveError::EmptyPattern);
        }

        let label = format!("{}:{}", pattern.len(), fitness);
        self.patterns.insert(label.clone(), StoredPattern::from(pattern));
        self.flush()?;

        if let Some(path) = &self.path {
            info!("Methuselah pattern saved to {} as {label}", path.display());
        }
        Ok(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::pattern_of;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patterns.json");

        let pattern = pattern_of([(5, 10), (5, 11), (7, 7)]);
        let mut archive = PatternArchive::open(&path).unwrap();
        assert!(archive.is_empty());

        let label = archive.save(&pattern, 42).unwrap();
        assert_eq!(label, "3:42");
        assert!(path.exists());

        let reopened = PatternArchive::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        let grid = reopened.load_grid("3:42", 20).unwrap().unwrap();
        assert_eq!(grid.pattern(), &pattern);
    }

    #[test]
    fn test_save_merges_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patterns.json");

        let mut archive = PatternArchive::open(&path).unwrap();
        archive.save(&pattern_of([(1, 1)]), 1).unwrap();
        archive.save(&pattern_of([(1, 1), (2, 2)]), 7).unwrap();

        let reopened = PatternArchive::open(&path).unwrap();
        let labels: Vec<_> = reopened.labels().collect();
        assert_eq!(labels, vec!["1:1", "2:7"]);
    }

    #[test]
    fn test_missing_pattern_is_none() {
        let archive = PatternArchive::new();
        assert_eq!(archive.load("9:131").unwrap(), None);
        assert!(archive.load_grid("9:131", 20).unwrap().is_none());
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let mut archive = PatternArchive::new();
        assert!(matches!(
            archive.save(&Pattern::new(), 0),
            Err(ArchiveError::EmptyPattern)
        ));
    }

    #[test]
    fn test_out_of_bounds_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        fs::write(&path, r#"{"2:5": {"alive_cells": [[1, 1], [3, 25]]}}"#).unwrap();

        let archive = PatternArchive::open(&path).unwrap();
        let err = archive.load_grid("2:5", 20).unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::Pattern(PatternError::OutOfBounds { row: 3, col: 25, .. })
        ));
    }

    #[test]
    fn test_non_integer_coordinates_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        fs::write(&path, r#"{"1:1": {"alive_cells": [[1.5, 2]]}}"#).unwrap();

        assert!(matches!(
            PatternArchive::open(&path),
            Err(ArchiveError::Parse(_))
        ));
    }

    #[test]
    fn test_duplicate_coordinates_collapse() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        fs::write(&path, r#"{"3:3": {"alive_cells": [[1, 1], [1, 1], [2, 2]]}}"#).unwrap();

        let archive = PatternArchive::open(&path).unwrap();
        let grid = archive.load_grid("3:3", 5).unwrap().unwrap();
        assert_eq!(grid.size(), 2);
    }
}
