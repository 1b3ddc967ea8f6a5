//! The five search strategies over pancake states.
//!
//! Every strategy depends only on [`actions`], [`State::is_goal`] and, for
//! the informed ones, a [`Heuristic`]. Deterministic strategies keep an
//! explored set of fingerprints and never expand a state twice; the random
//! restart strategy keeps none.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet, VecDeque};

use rand::Rng;
use tracing::{debug, trace};

use crate::actions::{actions, apply};
use crate::heuristics::Heuristic;
use crate::state::{Fingerprint, State};
use crate::tree::{NodeId, SearchTree};

/// Default number of restarts for the random strategy
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Result of running one strategy, with counters for reporting
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Root-to-goal path, inclusive; `None` if the search gave up
    pub path: Option<Vec<State>>,
    /// States popped from the frontier and goal-tested
    pub states_explored: usize,
    /// States created by the action generator and kept
    pub states_generated: usize,
    /// Random walks started (random restart only)
    pub trials: usize,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Discipline {
    Fifo,
    Lifo,
}

/// Shared loop for breadth- and depth-first search
fn uninformed(root: &State, discipline: Discipline) -> SearchOutcome {
    let (mut tree, root_id) = SearchTree::with_root(root.clone());
    let mut explored: HashSet<Fingerprint> = HashSet::new();
    let mut frontier: VecDeque<NodeId> = VecDeque::new();
    frontier.push_back(root_id);

    let mut outcome = SearchOutcome::default();

    loop {
        let next = match discipline {
            Discipline::Fifo => frontier.pop_front(),
            Discipline::Lifo => frontier.pop_back(),
        };
        let Some(id) = next else {
            break;
        };

        // Duplicates can sit in the frontier; expand only the first copy
        if !explored.insert(tree.state(id).fingerprint()) {
            continue;
        }
        outcome.states_explored += 1;

        if tree.state(id).is_goal() {
            outcome.path = Some(tree.path_to(id));
            break;
        }

        let mut successors = actions(tree.state(id));
        if discipline == Discipline::Lifo {
            // Smallest reversal index ends up on top of the stack
            successors.reverse();
        }
        for succ in successors {
            if !explored.contains(&succ.fingerprint()) {
                let child = tree.insert_child(id, succ);
                frontier.push_back(child);
            }
        }
    }

    outcome.states_generated = tree.len();
    outcome
}

/// Breadth-first search. Returns a shortest move sequence.
pub fn breadth_first(root: &State) -> SearchOutcome {
    uninformed(root, Discipline::Fifo)
}

/// Depth-first search, expanding the smallest reversal index first.
pub fn depth_first(root: &State) -> SearchOutcome {
    uninformed(root, Discipline::Lifo)
}

/// Greedy best-first search ordered by `heuristic`, lowest value first.
///
/// Ties are broken by insertion order. The result is not guaranteed to be
/// a shortest path.
pub fn best_first(root: &State, heuristic: Heuristic) -> SearchOutcome {
    let (mut tree, root_id) = SearchTree::with_root(root.clone());
    let mut explored: HashSet<Fingerprint> = HashSet::new();

    // Node ids grow with insertion, so they double as the tie breaker
    let mut frontier: BinaryHeap<Reverse<(usize, NodeId)>> = BinaryHeap::new();
    frontier.push(Reverse((heuristic.evaluate(root), root_id)));

    let mut outcome = SearchOutcome::default();

    while let Some(Reverse((score, id))) = frontier.pop() {
        if !explored.insert(tree.state(id).fingerprint()) {
            continue;
        }
        outcome.states_explored += 1;
        trace!(score, depth = tree.depth(id), "best-first pop");

        if tree.state(id).is_goal() {
            outcome.path = Some(tree.path_to(id));
            break;
        }

        for succ in actions(tree.state(id)) {
            if !explored.contains(&succ.fingerprint()) {
                let score = heuristic.evaluate(&succ);
                let child = tree.insert_child(id, succ);
                frontier.push(Reverse((score, child)));
            }
        }
    }

    outcome.states_generated = tree.len();
    outcome
}

/// Random restart search: up to `max_iterations` independent random walks
/// from `root`, each ending when it reaches the goal.
///
/// A walk has no step limit unless `max_walk_steps` is set, in which case a
/// walk that makes that many moves without reaching the goal is abandoned.
/// Each step picks uniformly among the reversals that change the stack.
pub fn random_restart<R: Rng + ?Sized>(
    root: &State,
    max_iterations: usize,
    max_walk_steps: Option<usize>,
    rng: &mut R,
) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();

    for trial in 0..max_iterations {
        outcome.trials = trial + 1;
        let mut path = vec![root.clone()];

        loop {
            let current = &path[path.len() - 1];
            outcome.states_explored += 1;
            if current.is_goal() {
                outcome.states_generated += path.len() - 1;
                outcome.path = Some(path);
                return outcome;
            }

            let steps = path.len() - 1;
            if max_walk_steps.is_some_and(|cap| steps >= cap) {
                debug!(trial, steps, "random walk abandoned");
                break;
            }

            // The last index is a no-op reversal; a goal-free state has len >= 2
            let index = rng.random_range(0..current.len() - 1);
            let next = apply(current, index);
            path.push(next);
        }

        outcome.states_generated += path.len() - 1;
    }

    outcome
}

/// Breadth-first solution path, or `None` if the space is exhausted
pub fn solve_breadth(root: &State) -> Option<Vec<State>> {
    breadth_first(root).path
}

/// Depth-first solution path, or `None` if the space is exhausted
pub fn solve_depth(root: &State) -> Option<Vec<State>> {
    depth_first(root).path
}

/// Random restart with unbounded walks; `None` after `max_iterations` trials
pub fn solve_random<R: Rng + ?Sized>(
    root: &State,
    max_iterations: usize,
    rng: &mut R,
) -> Option<Vec<State>> {
    random_restart(root, max_iterations, None, rng).path
}

/// Greedy best-first by inversion count. Yields the goal state only.
pub fn solve_heuristic_a(root: &State) -> Option<State> {
    best_first(root, Heuristic::Inversions)
        .path
        .and_then(|path| path.into_iter().last())
}

/// Greedy best-first by fixed-point count, with the full path.
pub fn solve_heuristic_b(root: &State) -> Option<Vec<State>> {
    best_first(root, Heuristic::FixedPoints).path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::move_between;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn state(values: &[u32]) -> State {
        State::from_values(values).unwrap()
    }

    fn assert_valid_path(root: &State, path: &[State]) {
        assert!(!path.is_empty());
        assert!(path[0].fingerprint_equals(root));
        assert!(path[path.len() - 1].is_goal());
        for pair in path.windows(2) {
            assert!(
                move_between(&pair[0], &pair[1]).is_some(),
                "{} -> {} is not a single reversal",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_two_pancakes_every_strategy() {
        let root = state(&[2, 1]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert_eq!(solve_breadth(&root).unwrap().len(), 2);
        assert_eq!(solve_depth(&root).unwrap().len(), 2);
        assert_eq!(solve_random(&root, 10, &mut rng).unwrap().len(), 2);
        assert_eq!(solve_heuristic_b(&root).unwrap().len(), 2);

        let goal = solve_heuristic_a(&root).unwrap();
        assert!(goal.is_goal());
        assert_eq!(move_between(&root, &goal), Some(0));
        assert_eq!(best_first(&root, Heuristic::Inversions).path.unwrap().len(), 2);
    }

    #[test]
    fn test_breadth_not_longer_than_depth() {
        let root = state(&[3, 1, 2]);
        let bfs = solve_breadth(&root).unwrap();
        let dfs = solve_depth(&root).unwrap();
        assert_valid_path(&root, &bfs);
        assert_valid_path(&root, &dfs);
        assert_eq!(bfs.len(), 3);
        assert_eq!(dfs.len(), 5);
        assert!(bfs.len() <= dfs.len());

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..10 {
            let root = State::random(5, &mut rng);
            let bfs = solve_breadth(&root).unwrap();
            let dfs = solve_depth(&root).unwrap();
            assert_valid_path(&root, &bfs);
            assert_valid_path(&root, &dfs);
            assert!(bfs.len() <= dfs.len());
        }
    }

    #[test]
    fn test_breadth_is_shortest_for_reversed_stack() {
        let root = state(&[5, 4, 3, 2, 1]);
        assert_eq!(solve_breadth(&root).unwrap().len(), 2);
    }

    #[test]
    fn test_sorted_root_is_its_own_solution() {
        let root = State::sorted(4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(solve_breadth(&root).unwrap().len(), 1);
        assert_eq!(solve_depth(&root).unwrap().len(), 1);
        assert_eq!(solve_random(&root, 1, &mut rng).unwrap().len(), 1);
        assert_eq!(solve_heuristic_b(&root).unwrap().len(), 1);
        assert_eq!(solve_heuristic_a(&root).unwrap(), root);
    }

    #[test]
    fn test_random_zero_iterations() {
        let root = state(&[3, 1, 2]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(solve_random(&root, 0, &mut rng).is_none());

        let outcome = random_restart(&root, 0, None, &mut rng);
        assert_eq!(outcome.trials, 0);
        assert!(!outcome.found());
    }

    #[test]
    fn test_random_walk_cap() {
        let root = state(&[3, 1, 2]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        // A walk allowed zero moves can never leave an unsorted root
        let outcome = random_restart(&root, 25, Some(0), &mut rng);
        assert!(!outcome.found());
        assert_eq!(outcome.trials, 25);
    }

    #[test]
    fn test_random_finds_valid_path() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let root = State::random(5, &mut rng);
        let path = solve_random(&root, DEFAULT_MAX_ITERATIONS, &mut rng).unwrap();
        assert_valid_path(&root, &path);
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let root = state(&[4, 1, 3, 5, 2]);
        let a = solve_random(&root, 100, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
        let b = solve_random(&root, 100, &mut ChaCha8Rng::seed_from_u64(8)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_best_first_paths_are_valid() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..5 {
            let root = State::random(6, &mut rng);
            for heuristic in [Heuristic::Inversions, Heuristic::FixedPoints, Heuristic::Gaps] {
                let path = best_first(&root, heuristic).path.unwrap();
                assert_valid_path(&root, &path);
            }
            assert!(solve_heuristic_a(&root).unwrap().is_goal());
            assert_valid_path(&root, &solve_heuristic_b(&root).unwrap());
        }
    }

    #[test]
    fn test_deterministic_strategies_repeatable() {
        let a = state(&[2, 4, 1, 3, 5]);
        let b = state(&[2, 4, 1, 3, 5]);
        assert_eq!(solve_breadth(&a).unwrap().len(), solve_breadth(&b).unwrap().len());
        assert_eq!(solve_depth(&a).unwrap().len(), solve_depth(&b).unwrap().len());
        assert_eq!(
            solve_heuristic_b(&a).unwrap().len(),
            solve_heuristic_b(&b).unwrap().len()
        );
        assert_eq!(
            best_first(&a, Heuristic::Inversions).path.unwrap().len(),
            best_first(&b, Heuristic::Inversions).path.unwrap().len()
        );
    }

    #[test]
    fn test_never_expands_twice() {
        let root = state(&[4, 3, 1, 2]);
        let outcome = depth_first(&root);
        // 4! states at most
        assert!(outcome.states_explored <= 24);
        let outcome = best_first(&root, Heuristic::FixedPoints);
        assert!(outcome.states_explored <= 24);
    }
}
