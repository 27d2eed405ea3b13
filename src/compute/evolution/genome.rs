//! Chromosome manipulation utilities for evolutionary search.
//!
//! Provides random genesis, crossover, and mutation. Every operator returns a
//! fresh [`Grid`]; parents are never edited in place.
//!
//! The operators assume a [`SearchConfig`] that passed
//! [`SearchConfig::validate`], which is why they are only reachable through
//! [`GeneticSearch`](super::GeneticSearch).

use rand::prelude::*;

use crate::compute::Grid;
use crate::schema::{Cell, CrossoverPolicy, Pattern, SearchConfig};

/// Random number generator wrapper for chromosome operations.
pub struct ChromosomeRng {
    rng: StdRng,
}

impl ChromosomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generate a random chromosome of `min_cells..=max_cells` unique cells
    /// inside the configured genesis region.
    ///
    /// A validated config has a region of at least `max_cells` cells, so
    /// sampling always reaches the drawn count.
    pub(crate) fn random_chromosome(&mut self, config: &SearchConfig) -> Grid {
        let bounds = config.genesis.bounds(config.grid_size);
        debug_assert!(bounds.is_some(), "genesis region must not be empty");
        let Some(bounds) = bounds else {
            return Grid::empty(config.grid_size);
        };

        let num_cells = self.rng.gen_range(config.min_cells..=config.max_cells);
        let mut pattern = Pattern::new();
        while pattern.len() < num_cells {
            pattern.insert(self.random_cell(bounds));
        }

        Grid::from_bounded(pattern, config.grid_size)
    }

    /// Uniform random cell with both coordinates in `lo..=hi`.
    fn random_cell(&mut self, (lo, hi): (usize, usize)) -> Cell {
        Cell::new(self.rng.gen_range(lo..=hi), self.rng.gen_range(lo..=hi))
    }

    /// Recombine two parents with probability `crossover_prob`; otherwise the
    /// parents pass through unchanged.
    pub(crate) fn crossover(
        &mut self,
        parent1: &Grid,
        parent2: &Grid,
        config: &SearchConfig,
    ) -> (Grid, Grid) {
        if !self.rng.gen_bool(config.crossover_prob) {
            return (parent1.clone(), parent2.clone());
        }

        let (child1, child2) = match config.crossover {
            CrossoverPolicy::Sampling => (
                self.sample_offspring(parent1.pattern(), parent2.pattern(), config.max_cells),
                self.sample_offspring(parent2.pattern(), parent1.pattern(), config.max_cells),
            ),
            CrossoverPolicy::Uniform => {
                self.uniform_offspring(parent1.pattern(), parent2.pattern(), config.max_cells)
            }
        };

        (
            Grid::from_bounded(child1, config.grid_size),
            Grid::from_bounded(child2, config.grid_size),
        )
    }

    /// Up to `max_cells / 2` cells from `primary`, then fill up to `max_cells`
    /// from the cells of `secondary` not already taken.
    fn sample_offspring(&mut self, primary: &Pattern, secondary: &Pattern, max_cells: usize) -> Pattern {
        let primary_take = primary.len().min(max_cells / 2);
        let mut offspring: Pattern = primary
            .iter()
            .copied()
            .choose_multiple(&mut self.rng, primary_take)
            .into_iter()
            .collect();

        let remaining: Vec<Cell> = secondary.difference(&offspring).copied().collect();
        let secondary_take = remaining.len().min(max_cells - offspring.len());
        offspring.extend(remaining.choose_multiple(&mut self.rng, secondary_take).copied());

        offspring
    }

    /// Deal every cell of either parent to one child or the other by coin
    /// flip. A cell drawn for a full child goes to its sibling if that one
    /// has room, and is dropped otherwise.
    fn uniform_offspring(
        &mut self,
        parent1: &Pattern,
        parent2: &Pattern,
        max_cells: usize,
    ) -> (Pattern, Pattern) {
        let mut children = [Pattern::new(), Pattern::new()];

        for &cell in parent1.union(parent2) {
            let first = usize::from(self.rng.gen_bool(0.5));
            let second = 1 - first;
            if children[first].len() < max_cells {
                children[first].insert(cell);
            } else if children[second].len() < max_cells {
                children[second].insert(cell);
            }
        }

        let [child1, child2] = children;
        (child1, child2)
    }

    /// Run `mutation_count` trials on a copy of `individual`.
    ///
    /// Each trial fires with probability `mutation_prob` and either removes a
    /// random alive cell or adds a random cell from the genesis region while
    /// the pattern has room. Added cells that fall outside `individual`'s own
    /// grid are skipped. A result still above `max_cells` is cut back by
    /// seeded random eviction.
    pub(crate) fn mutate(&mut self, individual: &Grid, config: &SearchConfig) -> Grid {
        let mut pattern = individual.pattern().clone();
        let bounds = config.genesis.bounds(config.grid_size);

        for _ in 0..config.mutation_count {
            if !self.rng.gen_bool(config.mutation_prob) {
                continue;
            }

            if self.rng.gen_bool(0.5) && !pattern.is_empty() {
                let victim = pattern.iter().choose(&mut self.rng).copied();
                if let Some(victim) = victim {
                    pattern.remove(&victim);
                }
            } else if let Some(bounds) = bounds
                && pattern.len() < config.max_cells
            {
                let cell = self.random_cell(bounds);
                if individual.contains(cell) {
                    pattern.insert(cell);
                }
            }
        }

        if pattern.len() > config.max_cells {
            pattern = self.evict(pattern, config.max_cells);
        }

        Grid::from_bounded(pattern, individual.grid_size())
    }

    /// Keep a uniformly random subset of `keep` cells.
    fn evict(&mut self, pattern: Pattern, keep: usize) -> Pattern {
        let mut cells: Vec<Cell> = pattern.into_iter().collect();
        cells.shuffle(&mut self.rng);
        cells.truncate(keep);
        cells.into_iter().collect()
    }

    /// Uniform draw from `[0, 1)`.
    pub(crate) fn unit(&mut self) -> f64 {
        self.rng.r#gen()
    }

    /// Uniform index into a collection of `len` items.
    pub(crate) fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Number of cells alive in exactly one of the two patterns.
pub fn pattern_distance(a: &Pattern, b: &Pattern) -> usize {
    a.symmetric_difference(b).count()
}
