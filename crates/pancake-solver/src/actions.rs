//! Move generation: every state reachable by one reversal.

use crate::state::State;

/// Apply the reversal at `index` to a copy of `state`
pub fn apply(state: &State, index: usize) -> State {
    state.child(index)
}

/// All successors of `state`, one per reversal index, in index order.
///
/// Always yields exactly `state.len()` states, including the full reversal
/// at index 0 and the single-pancake no-op at the last index.
pub fn actions(state: &State) -> Vec<State> {
    (0..state.len()).map(|index| apply(state, index)).collect()
}

/// Find the reversal index that turns `from` into `to`, if one exists.
///
/// With distinct values only the last index is a no-op, so the answer is
/// unique.
pub fn move_between(from: &State, to: &State) -> Option<usize> {
    if from.len() != to.len() {
        return None;
    }
    (0..from.len()).find(|&index| {
        let (head, tail) = from.values().split_at(index);
        to.values()[..index] == *head && to.values()[index..].iter().eq(tail.iter().rev())
    })
}
