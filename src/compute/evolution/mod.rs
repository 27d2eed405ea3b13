//! Evolutionary search for Methuselah patterns.
//!
//! # Overview
//!
//! The search system consists of:
//!
//! - **Genome Operations** (`genome`): Random genesis, crossover, and mutation
//!   of chromosomes, driven by a seeded generator
//! - **Fitness** (`fitness`): Peak population of a fresh [`Simulation`] run
//! - **Search** (`search`): Elitist genetic algorithm with a fitness threshold
//! - **Pattern Archive** (`archive`): Keyed store for discovered patterns
//!
//! # Example
//!
//! ```rust,no_run
//! use methuselah::compute::evolution::GeneticSearch;
//! use methuselah::schema::SearchConfig;
//!
//! let config = SearchConfig {
//!     random_seed: Some(7),
//!     ..Default::default()
//! };
//! let mut search = GeneticSearch::new(config).expect("valid config");
//! let outcome = search.find_methuselah_with_callback(|progress| {
//!     println!("Generation {}: best fitness = {}",
//!         progress.generation, progress.best_fitness);
//! });
//!
//! match outcome.methuselah {
//!     Some(found) => println!("Found {} cells, fitness {}", found.grid.size(), found.fitness),
//!     None => println!("No Methuselah within {} generations", outcome.stats.generations),
//! }
//! ```
//!
//! [`Simulation`]: crate::compute::Simulation

mod archive;
mod fitness;
mod genome;
mod search;

pub use archive::{ArchiveError, PatternArchive, PatternSink, PatternSource, StoredPattern};
pub use fitness::FitnessEvaluator;
pub use genome::{ChromosomeRng, pattern_distance};
pub use search::{
    GeneticSearch, Methuselah, SearchOutcome, SearchProgress, SearchStats, StopReason,
};
