//! Compute module - Cellular automaton engine, simulation and search.

mod grid;
mod simulation;

pub mod evolution;

pub use grid::*;
pub use simulation::*;
