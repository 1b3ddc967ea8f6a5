//! Heuristic estimates used to rank the best-first frontier.
//!
//! None of these are used as A* bounds; they only order states. Only
//! [`gaps`] is a lower bound on the remaining reversals.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::state::State;

/// Number of pairs `i < j` with `values[i] > values[j]`. O(N²).
pub fn inversions(state: &State) -> usize {
    let values = state.values();
    let mut count = 0;
    for i in 0..values.len() {
        for j in i + 1..values.len() {
            if values[i] > values[j] {
                count += 1;
            }
        }
    }
    count
}

/// Number of pancakes already in their final position. O(N).
///
/// Not admissible: a sorted stack scores highest.
pub fn fixed_points(state: &State) -> usize {
    state
        .values()
        .iter()
        .enumerate()
        .filter(|&(i, &value)| value as usize == i + 1)
        .count()
}

/// Number of adjacent pairs whose values are not consecutive.
///
/// A reversal from index `i` only changes the adjacency between `i - 1` and
/// `i`; for `i = 0` that is the adjacency with a virtual plate `0` in front
/// of the stack. Each move closes at most one gap, so this is a lower bound
/// on the remaining moves.
pub fn gaps(state: &State) -> usize {
    let mut previous = 0u32;
    let mut count = 0;
    for &value in state.values() {
        if value.abs_diff(previous) != 1 {
            count += 1;
        }
        previous = value;
    }
    count
}

/// Selectable heuristic for the best-first search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    Inversions,
    FixedPoints,
    Gaps,
}

impl Heuristic {
    pub fn evaluate(self, state: &State) -> usize {
        match self {
            Heuristic::Inversions => inversions(state),
            Heuristic::FixedPoints => fixed_points(state),
            Heuristic::Gaps => gaps(state),
        }
    }
}
