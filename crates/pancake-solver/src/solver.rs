//! Solver front-end: picks a strategy, seeds randomness, times the run.
//!
//! The strategies themselves live in [`crate::search`]; this module wraps
//! them with configuration and reporting for callers such as the CLI.

use std::time::{Duration, Instant};

use clap::ValueEnum;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::heuristics::Heuristic;
use crate::search::{
    best_first, breadth_first, depth_first, random_restart, SearchOutcome,
    DEFAULT_MAX_ITERATIONS,
};
use crate::state::State;

/// Which search strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Breadth-first, shortest path
    Breadth,
    /// Depth-first, smallest reversal index first
    Depth,
    /// Random restarts of random walks
    Random,
    /// Greedy best-first by inversions, reports the goal only
    HeuristicA,
    /// Greedy best-first by fixed points, reports the path
    HeuristicB,
    /// Greedy best-first by the configured heuristic
    BestFirst,
}

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub strategy: Strategy,
    /// Heuristic for [`Strategy::BestFirst`]
    pub heuristic: Heuristic,
    /// Maximum random walks for [`Strategy::Random`]
    pub max_iterations: usize,
    /// Per-walk move cap for [`Strategy::Random`]; unbounded when `None`
    pub max_walk_steps: Option<usize>,
    /// Seed for the random strategy; a fresh one is drawn when `None`
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Breadth,
            heuristic: Heuristic::Gaps,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_walk_steps: None,
            seed: None,
        }
    }
}

/// Result of a solve call
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub strategy: Strategy,
    /// Whether a sorted stack was reached
    pub found: bool,
    /// Root-to-goal path; `None` for strategies that report the goal only
    pub path: Option<Vec<State>>,
    /// The sorted state that was reached
    pub goal: Option<State>,
    pub states_explored: usize,
    pub states_generated: usize,
    pub trials: usize,
    /// Seed the random source was built from
    pub seed: u64,
    pub time_elapsed: Duration,
}

impl SolverResult {
    /// Number of reversals in the path, when a path is reported
    pub fn moves(&self) -> Option<usize> {
        self.path.as_ref().map(|path| path.len().saturating_sub(1))
    }
}

/// Build a seeded random source, drawing a fresh seed when none is given.
///
/// Returns the seed alongside so runs can be replayed.
pub fn seeded_rng(seed: Option<u64>) -> (ChaCha8Rng, u64) {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    (ChaCha8Rng::seed_from_u64(seed), seed)
}

/// Solve `root` with the strategy selected in `config`
pub fn solve(root: &State, config: &SolverConfig) -> SolverResult {
    let (mut rng, seed) = seeded_rng(config.seed);

    info!(
        event = "solve_start",
        strategy = ?config.strategy,
        pancakes = root.len(),
        root = %root,
        seed,
    );

    let start_time = Instant::now();
    let outcome: SearchOutcome = match config.strategy {
        Strategy::Breadth => breadth_first(root),
        Strategy::Depth => depth_first(root),
        Strategy::Random => {
            random_restart(root, config.max_iterations, config.max_walk_steps, &mut rng)
        }
        Strategy::HeuristicA => best_first(root, Heuristic::Inversions),
        Strategy::HeuristicB => best_first(root, Heuristic::FixedPoints),
        Strategy::BestFirst => best_first(root, config.heuristic),
    };
    let time_elapsed = start_time.elapsed();

    let found = outcome.found();
    let goal = outcome.path.as_ref().and_then(|path| path.last().cloned());
    let path = match config.strategy {
        Strategy::HeuristicA => None,
        _ => outcome.path,
    };

    info!(
        event = "solve_end",
        found,
        explored = outcome.states_explored,
        generated = outcome.states_generated,
        elapsed_us = time_elapsed.as_micros() as u64,
    );

    SolverResult {
        strategy: config.strategy,
        found,
        path,
        goal,
        states_explored: outcome.states_explored,
        states_generated: outcome.states_generated,
        trials: outcome.trials,
        seed,
        time_elapsed,
    }
}
