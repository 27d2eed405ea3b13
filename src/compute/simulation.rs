//! Single-run simulation used as the fitness oracle.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Grid;
use crate::schema::Pattern;

/// Default generation cap for a simulation run.
pub const DEFAULT_GENERATION_LIMIT: usize = 400;

/// Lifecycle of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationState {
    /// Still advancing.
    Running,
    /// The current pattern repeats an earlier generation.
    Stabilized,
    /// The generation cap was exceeded without a repeat.
    LimitReached,
}

impl SimulationState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Drives a private copy of a [`Grid`] until it repeats or hits the cap,
/// tracking the peak population along the way.
#[derive(Debug, Clone)]
pub struct Simulation {
    life: Grid,
    generation: usize,
    generation_limit: usize,
    history: HashSet<Pattern>,
    size: usize,
    max_size: usize,
    max_size_generation: usize,
    state: SimulationState,
}

impl Simulation {
    /// Start a simulation from a copy of `life`.
    pub fn new(life: &Grid, generation_limit: usize) -> Self {
        let life = life.clone();
        let size = life.size();
        Self {
            life,
            generation: 0,
            generation_limit,
            history: HashSet::new(),
            size,
            max_size: size,
            max_size_generation: 0,
            state: SimulationState::Running,
        }
    }

    /// Advance one generation, unless a terminal state is reached first.
    ///
    /// The current pattern is checked against every recorded generation
    /// before evolving, so cycles of any period are detected.
    pub fn step(&mut self) -> SimulationState {
        if self.state.is_terminal() {
            return self.state;
        }
        if self.history.contains(self.life.pattern()) {
            self.state = SimulationState::Stabilized;
            return self.state;
        }
        if self.generation > self.generation_limit {
            self.state = SimulationState::LimitReached;
            return self.state;
        }

        self.history.insert(self.life.pattern().clone());
        self.life.evolve();
        self.generation += 1;
        self.update_size();

        self.state
    }

    /// Run until the pattern stabilizes or the generation cap is exceeded.
    pub fn simulate(&mut self) -> &Self {
        while !self.step().is_terminal() {}
        self
    }

    fn update_size(&mut self) {
        self.size = self.life.size();
        if self.size > self.max_size {
            self.max_size = self.size;
            self.max_size_generation = self.generation;
        }
    }

    /// Largest alive-cell count seen so far, including generation 0.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Generation at which [`max_size`](Self::max_size) was first reached.
    pub fn max_size_generation(&self) -> usize {
        self.max_size_generation
    }

    /// Alive cells in the current generation.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn generation_limit(&self) -> usize {
        self.generation_limit
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    /// Whether the current pattern equals an earlier one.
    pub fn is_stabilized(&self) -> bool {
        self.history.contains(self.life.pattern())
    }

    /// The simulated grid in its current generation.
    pub fn grid(&self) -> &Grid {
        &self.life
    }

    /// Snapshot of the run for reporting.
    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            generation: self.generation,
            stabilized: self.is_stabilized(),
            max_size: self.max_size,
            max_size_generation: self.max_size_generation,
        }
    }
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub generation: usize,
    pub stabilized: bool,
    pub max_size: usize,
    pub max_size_generation: usize,
}

impl fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Simulation ended at gen {} and {}",
            self.generation,
            if self.stabilized {
                "stabilized"
            } else {
                "did not stabilize"
            }
        )?;
        write!(
            f,
            "Max size will be {}, size will peak at gen {}",
            self.max_size, self.max_size_generation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::pattern_of;
    use proptest::prelude::*;

    fn grid(cells: &[(usize, usize)], grid_size: usize) -> Grid {
        Grid::new(pattern_of(cells.iter().copied()), grid_size).unwrap()
    }

    #[test]
    fn test_does_not_mutate_caller_grid() {
        let life = grid(&[(2, 1), (2, 2), (2, 3)], 5);
        let before = life.clone();
        Simulation::new(&life, 10).simulate();
        assert_eq!(life, before);
    }

    #[test]
    fn test_still_life_stabilizes_after_one_step() {
        let block = grid(&[(1, 1), (1, 2), (2, 1), (2, 2)], 3);
        let mut sim = Simulation::new(&block, 100);
        sim.simulate();

        assert_eq!(sim.state(), SimulationState::Stabilized);
        assert!(sim.is_stabilized());
        assert_eq!(sim.generation(), 1);
        assert_eq!(sim.max_size(), 4);
        assert_eq!(sim.max_size_generation(), 0);
    }

    #[test]
    fn test_blinker_detected_as_period_two() {
        let blinker = grid(&[(2, 1), (2, 2), (2, 3)], 5);
        let mut sim = Simulation::new(&blinker, 100);
        sim.simulate();

        assert_eq!(sim.state(), SimulationState::Stabilized);
        assert_eq!(sim.generation(), 2);
        assert_eq!(sim.max_size(), 3);
    }

    #[test]
    fn test_empty_pattern_stabilizes() {
        let mut sim = Simulation::new(&Grid::empty(5), 100);
        sim.simulate();
        assert!(sim.is_stabilized());
        assert_eq!(sim.max_size(), 0);
    }

    #[test]
    fn test_limit_reached() {
        // Glider on a large grid does not repeat within a handful of steps.
        let glider = grid(&[(5, 6), (6, 7), (7, 5), (7, 6), (7, 7)], 50);
        let mut sim = Simulation::new(&glider, 3);
        sim.simulate();

        assert_eq!(sim.state(), SimulationState::LimitReached);
        assert!(!sim.is_stabilized());
        assert_eq!(sim.generation(), 4);
        assert_eq!(sim.max_size(), 5);
    }

    #[test]
    fn test_peak_tracks_growth() {
        // R-pentomino grows well past its initial five cells.
        let r_pentomino = grid(&[(9, 10), (9, 11), (10, 9), (10, 10), (11, 10)], 20);
        let mut sim = Simulation::new(&r_pentomino, 400);
        sim.simulate();

        assert!(sim.max_size() > 5);
        assert!(sim.max_size_generation() > 0);
    }

    #[test]
    fn test_summary_text() {
        let block = grid(&[(1, 1), (1, 2), (2, 1), (2, 2)], 3);
        let mut sim = Simulation::new(&block, 100);
        let text = sim.simulate().summary().to_string();
        assert_eq!(
            text,
            "Simulation ended at gen 1 and stabilized\nMax size will be 4, size will peak at gen 0"
        );
    }

    proptest! {
        #[test]
        fn prop_max_size_is_running_maximum(cells in prop::collection::vec((0usize..=10, 0usize..=10), 0..30)) {
            let life = grid(&cells, 10);
            let mut sim = Simulation::new(&life, 60);
            let mut observed = sim.size();
            let mut previous = sim.max_size();
            prop_assert_eq!(previous, observed);

            while !sim.step().is_terminal() {
                observed = observed.max(sim.size());
                prop_assert!(sim.max_size() >= previous);
                prop_assert_eq!(sim.max_size(), observed);
                previous = sim.max_size();
            }
        }

        #[test]
        fn prop_stabilized_iff_pattern_seen(cells in prop::collection::vec((0usize..=8, 0usize..=8), 0..20)) {
            let life = grid(&cells, 8);
            let mut sim = Simulation::new(&life, 200);
            let mut seen = vec![life.pattern().clone()];

            loop {
                let state = sim.step();
                if state == SimulationState::Stabilized {
                    let current = sim.grid().pattern();
                    prop_assert!(seen[..seen.len() - 1].contains(current));
                    break;
                }
                if state.is_terminal() {
                    break;
                }
                let current = sim.grid().pattern().clone();
                let repeats = seen.contains(&current);
                seen.push(current);
                prop_assert_eq!(sim.is_stabilized(), repeats);
            }
        }
    }
}
