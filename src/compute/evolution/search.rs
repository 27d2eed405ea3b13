//! Genetic search driver for Methuselah discovery.

use std::cmp::Reverse;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::compute::Grid;
use crate::schema::{ConfigError, SearchConfig};

use super::fitness::FitnessEvaluator;
use super::genome::{ChromosomeRng, pattern_distance};

/// A chromosome that reached the fitness threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Methuselah {
    /// The seed pattern.
    pub grid: Grid,
    /// Peak size reached when simulated.
    pub fitness: usize,
    /// Search generation in which it was found.
    pub generation: usize,
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// A chromosome met the fitness threshold.
    Found,
    /// The generation limit was exhausted.
    GenerationLimit,
    /// The cancel handle was raised.
    Cancelled,
}

/// Summary statistics of a finished search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    /// Generational replacements performed.
    pub generations: usize,
    /// Simulations run for fitness evaluation.
    pub simulations: u64,
    /// Best fitness observed in any evaluated generation.
    pub best_fitness: usize,
    pub elapsed_seconds: f64,
    pub stop_reason: StopReason,
}

/// Result of [`GeneticSearch::find_methuselah`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The qualifying chromosome, or `None` if none was found.
    pub methuselah: Option<Methuselah>,
    pub stats: SearchStats,
}

/// Per-generation progress report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchProgress {
    pub generation: usize,
    pub total_generations: usize,
    /// Best fitness in this generation.
    pub best_fitness: usize,
    /// Mean fitness in this generation.
    pub avg_fitness: f64,
    /// Mean pairwise pattern distance across the population.
    pub diversity: f64,
}

/// Elitist genetic algorithm over Game of Life seed patterns.
pub struct GeneticSearch {
    config: SearchConfig,
    rng: ChromosomeRng,
    evaluator: FitnessEvaluator,
    population: Vec<Grid>,
    generation: usize,
    cancelled: Arc<AtomicBool>,
}

impl GeneticSearch {
    /// Create a search, seeding its generator from `random_seed` when set.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        let rng = match config.random_seed {
            Some(seed) => ChromosomeRng::new(seed),
            None => ChromosomeRng::random(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a search driven by an explicit random source.
    pub fn with_rng(config: SearchConfig, rng: ChromosomeRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let evaluator = FitnessEvaluator::new(config.simulation_limit, config.memoize_fitness);

        Ok(Self {
            config,
            rng,
            evaluator,
            population: Vec::new(),
            generation: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get cancellation handle.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Current population. Order is the tie-break order for the threshold scan.
    pub fn population(&self) -> &[Grid] {
        &self.population
    }

    /// Generational replacements since the population was initialized.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Random chromosome within the configured cell-count and region bounds.
    pub fn generate_chromosome(&mut self) -> Grid {
        self.rng.random_chromosome(&self.config)
    }

    /// Peak size reached by `chromosome` in a fresh simulation.
    pub fn fitness(&mut self, chromosome: &Grid) -> usize {
        self.evaluator.fitness(chromosome)
    }

    /// Replace the population with `pop_size` random chromosomes.
    pub fn init_population(&mut self) {
        self.population = (0..self.config.pop_size)
            .map(|_| self.rng.random_chromosome(&self.config))
            .collect();
        self.evaluator.retain(&self.population);
        self.generation = 0;
    }

    fn ensure_population(&mut self) {
        if self.population.is_empty() {
            self.init_population();
        }
    }

    /// Fitness of every chromosome, in population order.
    fn evaluate_population(&mut self) -> Vec<usize> {
        let evaluator = &mut self.evaluator;
        self.population
            .iter()
            .map(|chromosome| evaluator.fitness(chromosome))
            .collect()
    }

    /// Pick two parents by fitness-proportionate (roulette wheel) selection.
    pub fn selection(&mut self) -> (Grid, Grid) {
        self.ensure_population();
        let fitnesses = self.evaluate_population();

        let first = self.roulette_index(&fitnesses);
        let second = self.roulette_index(&fitnesses);
        (
            self.population[first].clone(),
            self.population[second].clone(),
        )
    }

    /// Walk the population accumulating `fitness / total` until the running
    /// sum reaches a uniform draw. Falls back to a uniform pick when every
    /// fitness is zero.
    fn roulette_index(&mut self, fitnesses: &[usize]) -> usize {
        let total: usize = fitnesses.iter().sum();
        if total == 0 {
            warn!("Total population fitness is zero, selecting uniformly");
            return self.rng.index(fitnesses.len());
        }

        let target = self.rng.unit();
        let mut cumulative = 0.0;
        for (i, &fitness) in fitnesses.iter().enumerate() {
            cumulative += fitness as f64 / total as f64;
            if cumulative >= target {
                return i;
            }
        }
        // Rounding can leave the sum a hair under the draw.
        fitnesses.len() - 1
    }

    /// Recombine two parents according to the configured policy.
    pub fn crossover(&mut self, parent1: &Grid, parent2: &Grid) -> (Grid, Grid) {
        self.rng.crossover(parent1, parent2, &self.config)
    }

    /// Mutated copy of `individual`.
    pub fn mutation(&mut self, individual: &Grid) -> Grid {
        self.rng.mutate(individual, &self.config)
    }

    /// Population indices sorted by descending fitness, ties by index.
    fn rank(&mut self) -> Vec<usize> {
        let fitnesses = self.evaluate_population();
        let mut order: Vec<usize> = (0..fitnesses.len()).collect();
        order.sort_by_key(|&i| Reverse(fitnesses[i]));
        order
    }

    /// Build the next generation by elitism, crossover, and mutation.
    ///
    /// The top half of the elite carries over unchanged. Offspring come from
    /// pairing a random bottom-half elite with a random non-elite.
    pub fn next_generation(&mut self) {
        self.ensure_population();
        let pop_size = self.config.pop_size;
        let order = self.rank();

        let elite_size = self.config.elite_size();
        let (elite, non_elite) = order.split_at(elite_size);
        let (top_elite, bottom_elite) = elite.split_at(elite_size / 2);

        let mut next_gen: Vec<Grid> = Vec::with_capacity(pop_size);
        next_gen.extend(top_elite.iter().map(|&i| self.population[i].clone()));

        while next_gen.len() < pop_size {
            let parent1 = bottom_elite[self.rng.index(bottom_elite.len())];
            let parent2 = non_elite[self.rng.index(non_elite.len())];

            let (child1, child2) = self.rng.crossover(
                &self.population[parent1],
                &self.population[parent2],
                &self.config,
            );
            let child1 = self.rng.mutate(&child1, &self.config);
            let child2 = self.rng.mutate(&child2, &self.config);

            next_gen.push(child1);
            if next_gen.len() < pop_size {
                next_gen.push(child2);
            }
        }

        self.population = next_gen;
        self.evaluator.retain(&self.population);
        self.generation += 1;
    }

    /// Mean pairwise pattern distance across the population.
    fn diversity(&self) -> f64 {
        let n = self.population.len();
        if n < 2 {
            return 0.0;
        }

        let mut total = 0usize;
        for i in 0..n {
            for j in (i + 1)..n {
                total += pattern_distance(self.population[i].pattern(), self.population[j].pattern());
            }
        }
        total as f64 / (n * (n - 1) / 2) as f64
    }

    /// Run the search (blocking).
    pub fn find_methuselah(&mut self) -> SearchOutcome {
        self.find_methuselah_with_callback(|_| {})
    }

    /// Run the search, reporting progress after every evaluated generation.
    ///
    /// Each generation is scanned in population order and the first
    /// chromosome whose fitness meets `threshold_fit` is returned, even if a
    /// later one is fitter. The cancel handle is checked between generations.
    pub fn find_methuselah_with_callback<F>(&mut self, mut callback: F) -> SearchOutcome
    where
        F: FnMut(&SearchProgress),
    {
        let start_time = Instant::now();
        let simulations_before = self.evaluator.simulations();
        let threshold = self.config.threshold_fit;

        self.init_population();
        let mut best_fitness = 0;

        let (methuselah, stop_reason) = loop {
            if self.cancelled.load(Ordering::Relaxed) {
                warn!("Search cancelled at generation {}", self.generation);
                break (None, StopReason::Cancelled);
            }
            if self.generation >= self.config.gen_limit {
                info!(
                    "Reached generation limit ({}). No Methuselah found.",
                    self.config.gen_limit
                );
                break (None, StopReason::GenerationLimit);
            }

            let mut fitnesses = Vec::with_capacity(self.population.len());
            let mut found = None;
            for (i, chromosome) in self.population.iter().enumerate() {
                let fitness = self.evaluator.fitness(chromosome);
                fitnesses.push(fitness);
                if fitness >= threshold {
                    found = Some((i, fitness));
                    break;
                }
            }

            let generation_best = fitnesses.iter().copied().max().unwrap_or(0);
            best_fitness = best_fitness.max(generation_best);
            let progress = SearchProgress {
                generation: self.generation,
                total_generations: self.config.gen_limit,
                best_fitness: generation_best,
                avg_fitness: fitnesses.iter().sum::<usize>() as f64
                    / fitnesses.len().max(1) as f64,
                diversity: self.diversity(),
            };
            debug!(
                "Generation {}: best={} avg={:.2} diversity={:.2}",
                progress.generation, progress.best_fitness, progress.avg_fitness, progress.diversity
            );
            callback(&progress);

            if let Some((index, fitness)) = found {
                info!(
                    "Found Methuselah in generation {} with fitness: {}",
                    self.generation, fitness
                );
                let methuselah = Methuselah {
                    grid: self.population[index].clone(),
                    fitness,
                    generation: self.generation,
                };
                break (Some(methuselah), StopReason::Found);
            }

            if self.generation % 10 == 0 {
                info!(
                    "Generation {}: Best fitness so far: {}",
                    self.generation, best_fitness
                );
            }

            self.next_generation();
        };

        SearchOutcome {
            methuselah,
            stats: SearchStats {
                generations: self.generation,
                simulations: self.evaluator.simulations() - simulations_before,
                best_fitness,
                elapsed_seconds: start_time.elapsed().as_secs_f64(),
                stop_reason,
            },
        }
    }
}
