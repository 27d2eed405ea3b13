//! Fitness evaluation for chromosomes.
//!
//! A chromosome's fitness is the peak alive-cell count reached by a fresh
//! [`Simulation`] of it.

use std::collections::{HashMap, HashSet};

use crate::compute::{Grid, Simulation, SimulationSummary};
use crate::schema::Pattern;

/// Evaluates chromosomes by simulating them.
///
/// Without memoization every call runs a new simulation. With it, results
/// are cached by pattern; since simulation is deterministic the reported
/// fitness is the same either way. The cache only holds what the caller keeps
/// through [`FitnessEvaluator::retain`], so it stays bounded by the live
/// population.
#[derive(Debug)]
pub struct FitnessEvaluator {
    simulation_limit: usize,
    cache: Option<HashMap<Pattern, usize>>,
    simulations: u64,
}

impl FitnessEvaluator {
    /// Create a new fitness evaluator.
    pub fn new(simulation_limit: usize, memoize: bool) -> Self {
        Self {
            simulation_limit,
            cache: memoize.then(HashMap::new),
            simulations: 0,
        }
    }

    /// Peak size reached by `chromosome`.
    pub fn fitness(&mut self, chromosome: &Grid) -> usize {
        if let Some(&cached) = self
            .cache
            .as_ref()
            .and_then(|cache| cache.get(chromosome.pattern()))
        {
            return cached;
        }

        let fitness = self.evaluate(chromosome).max_size;
        if let Some(cache) = &mut self.cache {
            cache.insert(chromosome.pattern().clone(), fitness);
        }
        fitness
    }

    /// Simulate `chromosome` to completion and report the run.
    pub fn evaluate(&mut self, chromosome: &Grid) -> SimulationSummary {
        self.simulations += 1;
        Simulation::new(chromosome, self.simulation_limit)
            .simulate()
            .summary()
    }

    /// Drop cached results for patterns not in `population`.
    pub fn retain(&mut self, population: &[Grid]) {
        if let Some(cache) = &mut self.cache {
            let live: HashSet<&Pattern> = population.iter().map(Grid::pattern).collect();
            cache.retain(|pattern, _| live.contains(pattern));
        }
    }

    /// Number of cached patterns; always zero without memoization.
    pub fn cached(&self) -> usize {
        self.cache.as_ref().map_or(0, HashMap::len)
    }

    /// Simulations run so far.
    pub fn simulations(&self) -> u64 {
        self.simulations
    }

    pub fn simulation_limit(&self) -> usize {
        self.simulation_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::pattern_of;

    fn r_pentomino() -> Grid {
        Grid::new(
            pattern_of([(9, 10), (9, 11), (10, 9), (10, 10), (11, 10)]),
            20,
        )
        .unwrap()
    }

    #[test]
    fn test_fitness_is_peak_size() {
        let block = Grid::new(pattern_of([(1, 1), (1, 2), (2, 1), (2, 2)]), 5).unwrap();
        let mut evaluator = FitnessEvaluator::new(100, false);
        assert_eq!(evaluator.fitness(&block), 4);
        assert_eq!(evaluator.fitness(&Grid::empty(5)), 0);
    }

    #[test]
    fn test_no_memoization_resimulates() {
        let mut evaluator = FitnessEvaluator::new(100, false);
        let life = r_pentomino();
        evaluator.fitness(&life);
        evaluator.fitness(&life);
        assert_eq!(evaluator.simulations(), 2);
    }

    #[test]
    fn test_memoization_preserves_values() {
        let life = r_pentomino();
        let mut plain = FitnessEvaluator::new(100, false);
        let mut cached = FitnessEvaluator::new(100, true);

        let expected = plain.fitness(&life);
        assert_eq!(cached.fitness(&life), expected);
        assert_eq!(cached.fitness(&life), expected);
        assert_eq!(cached.simulations(), 1);
    }

    #[test]
    fn test_retain_evicts_dead_patterns() {
        let life = r_pentomino();
        let block = Grid::new(pattern_of([(1, 1), (1, 2), (2, 1), (2, 2)]), 20).unwrap();
        let mut evaluator = FitnessEvaluator::new(100, true);
        evaluator.fitness(&life);
        evaluator.fitness(&block);
        assert_eq!(evaluator.cached(), 2);

        evaluator.retain(std::slice::from_ref(&block));
        assert_eq!(evaluator.cached(), 1);

        // Evicted patterns are simulated again on the next query.
        evaluator.fitness(&block);
        evaluator.fitness(&life);
        assert_eq!(evaluator.simulations(), 3);

        let mut plain = FitnessEvaluator::new(100, false);
        plain.fitness(&life);
        plain.retain(&[]);
        assert_eq!(plain.cached(), 0);
    }
}
