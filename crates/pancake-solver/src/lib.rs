//! Search toolkit for the pancake sorting puzzle.
//!
//! A puzzle is a permutation of `1..=N`; a move reverses the stack from a
//! chosen index to the end. This crate provides the state representation,
//! the move generator, three heuristics, and five interchangeable search
//! strategies that find a sequence of moves sorting the stack.

pub mod actions;
pub mod error;
pub mod heuristics;
pub mod search;
pub mod solver;
pub mod state;
pub mod tree;

// Re-export main types
pub use actions::{actions, apply, move_between};
pub use error::{PancakeError, Result};
pub use heuristics::{fixed_points, gaps, inversions, Heuristic};
pub use search::{
    best_first, breadth_first, depth_first, random_restart, solve_breadth, solve_depth,
    solve_heuristic_a, solve_heuristic_b, solve_random, SearchOutcome, DEFAULT_MAX_ITERATIONS,
};
pub use solver::{seeded_rng, solve, SolverConfig, SolverResult, Strategy};
pub use state::{Fingerprint, State};
pub use tree::{NodeId, SearchTree};
