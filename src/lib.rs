//! Methuselah - Genetic search for long-lived Game of Life patterns.
//!
//! This crate evolves small seed patterns on a bounded Conway's Game of Life
//! grid, looking for "Methuselahs": seeds whose population peaks far above
//! their starting size before the run settles into a repeat.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Search configuration, cells and patterns
//! - `compute`: Automaton engine (`Grid`), single-run fitness simulation
//!   (`Simulation`), and the genetic search (`evolution`)
//!
//! # Example
//!
//! ```rust,no_run
//! use methuselah::{
//!     compute::{Grid, Simulation},
//!     schema::pattern_of,
//! };
//!
//! // R-pentomino near the middle of a 41x41 grid
//! let seed = pattern_of([(19, 20), (19, 21), (20, 19), (20, 20), (21, 20)]);
//! let life = Grid::new(seed, 40).expect("cells are in bounds");
//!
//! let mut simulation = Simulation::new(&life, 400);
//! println!("{}", simulation.simulate().summary());
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{GeneticSearch, PatternArchive, SearchOutcome};
pub use compute::{Grid, Simulation, SimulationSummary};
pub use schema::{Cell, Pattern, SearchConfig};
