//! Configuration types for the Methuselah genetic search.

use serde::{Deserialize, Serialize};

/// Top-level search configuration.
///
/// Immutable for the duration of a run; validated once by
/// [`GeneticSearch::new`](crate::compute::evolution::GeneticSearch::new).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of chromosomes in every generation.
    #[serde(default = "default_pop_size")]
    pub pop_size: usize,
    /// Largest row/column index; the playable area is `(grid_size + 1)²`.
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    /// Minimum alive cells in a freshly generated chromosome.
    #[serde(default = "default_min_cells")]
    pub min_cells: usize,
    /// Maximum alive cells in any chromosome.
    #[serde(default = "default_max_cells")]
    pub max_cells: usize,
    /// Number of generations to search before giving up.
    #[serde(default = "default_gen_limit")]
    pub gen_limit: usize,
    /// Probability that a parent pair is recombined (0.0-1.0).
    #[serde(default = "default_crossover_prob")]
    pub crossover_prob: f64,
    /// Probability that a single mutation trial fires (0.0-1.0).
    #[serde(default = "default_mutation_prob")]
    pub mutation_prob: f64,
    /// Mutation trials applied to every offspring.
    #[serde(default = "default_mutation_count")]
    pub mutation_count: usize,
    /// Peak size a pattern must reach to count as a Methuselah.
    #[serde(default = "default_threshold_fit")]
    pub threshold_fit: usize,
    /// Generation cap for each fitness simulation.
    #[serde(default = "default_simulation_limit")]
    pub simulation_limit: usize,
    /// Where random cells are placed.
    #[serde(default)]
    pub genesis: GenesisRegion,
    /// How two parents are recombined.
    #[serde(default)]
    pub crossover: CrossoverPolicy,
    /// Cache fitness by pattern instead of re-simulating.
    #[serde(default)]
    pub memoize_fitness: bool,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pop_size: default_pop_size(),
            grid_size: default_grid_size(),
            min_cells: default_min_cells(),
            max_cells: default_max_cells(),
            gen_limit: default_gen_limit(),
            crossover_prob: default_crossover_prob(),
            mutation_prob: default_mutation_prob(),
            mutation_count: default_mutation_count(),
            threshold_fit: default_threshold_fit(),
            simulation_limit: default_simulation_limit(),
            genesis: GenesisRegion::default(),
            crossover: CrossoverPolicy::default(),
            memoize_fitness: false,
            random_seed: None,
        }
    }
}

fn default_pop_size() -> usize {
    50
}
fn default_grid_size() -> usize {
    20
}
fn default_min_cells() -> usize {
    5
}
fn default_max_cells() -> usize {
    10
}
fn default_gen_limit() -> usize {
    200
}
fn default_crossover_prob() -> f64 {
    0.8
}
fn default_mutation_prob() -> f64 {
    0.8
}
fn default_mutation_count() -> usize {
    3
}
fn default_threshold_fit() -> usize {
    100
}
fn default_simulation_limit() -> usize {
    crate::compute::DEFAULT_GENERATION_LIMIT
}

/// Sub-region of the grid in which random cells are sampled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenesisRegion {
    /// Central band `[grid_size / 4, 3 * grid_size / 4 - 1]` on both axes.
    #[default]
    Centered,
    /// The whole grid `[0, grid_size]`.
    Full,
}

impl GenesisRegion {
    /// Inclusive coordinate range on each axis, or `None` if the region is empty.
    pub fn bounds(self, grid_size: usize) -> Option<(usize, usize)> {
        match self {
            Self::Centered => {
                let lo = grid_size / 4;
                // floor(3 * grid_size / 4) without the intermediate product
                let three_quarters = grid_size / 4 * 3 + grid_size % 4 * 3 / 4;
                let hi = three_quarters.checked_sub(1)?;
                (hi >= lo).then_some((lo, hi))
            }
            Self::Full => Some((0, grid_size)),
        }
    }

    /// Number of distinct cells in the region, saturating at `usize::MAX`.
    pub fn capacity(self, grid_size: usize) -> usize {
        self.bounds(grid_size)
            .map(|(lo, hi)| {
                (hi - lo)
                    .checked_add(1)
                    .and_then(|side| side.checked_pow(2))
                    .unwrap_or(usize::MAX)
            })
            .unwrap_or(0)
    }
}

/// Recombination policy for two parent patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverPolicy {
    /// Child takes up to `max_cells / 2` cells from its primary parent, then
    /// fills to `max_cells` from the other parent.
    #[default]
    Sampling,
    /// Every cell of either parent goes to one child or the other with
    /// equal probability, while that child has room.
    Uniform,
}

impl SearchConfig {
    /// Number of elite chromosomes kept by generational replacement.
    #[inline]
    pub fn elite_size(&self) -> usize {
        self.pop_size.div_ceil(10).max(1)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pop_size < 2 {
            return Err(ConfigError::InvalidPopulation(self.pop_size));
        }
        if self.max_cells == 0 {
            return Err(ConfigError::InvalidMaxCells);
        }
        if self.min_cells > self.max_cells {
            return Err(ConfigError::InvalidCellRange {
                min: self.min_cells,
                max: self.max_cells,
            });
        }
        for (name, value) in [
            ("crossover_prob", self.crossover_prob),
            ("mutation_prob", self.mutation_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        let capacity = self.genesis.capacity(self.grid_size);
        if capacity < self.max_cells {
            return Err(ConfigError::RegionTooSmall {
                capacity,
                max_cells: self.max_cells,
            });
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be at least 2, got {0}")]
    InvalidPopulation(usize),
    #[error("Maximum cell count must be non-zero")]
    InvalidMaxCells,
    #[error("Minimum cell count {min} exceeds maximum {max}")]
    InvalidCellRange { min: usize, max: usize },
    #[error("Probability {name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Genesis region holds {capacity} cells, fewer than max_cells = {max_cells}")]
    RegionTooSmall { capacity: usize, max_cells: usize },
}
