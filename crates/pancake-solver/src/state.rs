//! Permutation states for the pancake puzzle.
//!
//! A state is a permutation of `1..=N`. Equality and hashing go through the
//! state's [`Fingerprint`] only, never through the values themselves.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;

use crate::error::{PancakeError, Result};

/// Stacks up to this size are stored inline without a heap allocation
pub const INLINE_PANCAKES: usize = 16;

/// Largest size whose fingerprint is an exact permutation rank (34! < 2^128)
pub const MAX_RANKED_LEN: usize = 34;

/// Backing storage for the values of a state
pub type Values = SmallVec<[u32; INLINE_PANCAKES]>;

/// Order-sensitive deduplication key derived from a state's values.
///
/// For stacks up to [`MAX_RANKED_LEN`] this is the Lehmer-code rank of the
/// permutation, which is a bijection onto `0..N!`. Larger stacks fall back to
/// two independently salted 64-bit hashes of the full sequence.
///
/// Fingerprints are only comparable between states of the same length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u128);

impl Fingerprint {
    /// Compute the fingerprint of a sequence of values
    pub fn of(values: &[u32]) -> Self {
        if values.len() <= MAX_RANKED_LEN {
            Self(lehmer_rank(values))
        } else {
            Self(wide_hash(values))
        }
    }

    pub fn as_u128(self) -> u128 {
        self.0
    }
}

/// Mixed-radix rank: sum of `smaller_after(i) * (n - 1 - i)!`, in Horner form
fn lehmer_rank(values: &[u32]) -> u128 {
    let n = values.len();
    let mut rank: u128 = 0;
    for (i, &value) in values.iter().enumerate() {
        let smaller_after = values[i + 1..].iter().filter(|&&v| v < value).count();
        rank = rank * (n - i) as u128 + smaller_after as u128;
    }
    rank
}

fn wide_hash(values: &[u32]) -> u128 {
    let salted = |salt: u64| {
        let mut hasher = DefaultHasher::new();
        salt.hash(&mut hasher);
        values.hash(&mut hasher);
        hasher.finish()
    };
    (u128::from(salted(0x9e37_79b9_7f4a_7c15)) << 64) | u128::from(salted(0xc2b2_ae3d_27d4_eb4f))
}

/// One configuration of the pancake stack
#[derive(Debug, Clone)]
pub struct State {
    values: Values,
    fingerprint: Fingerprint,
}

impl State {
    /// Create a uniformly shuffled stack of `len` pancakes.
    ///
    /// Panics if `len` is zero.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        assert!(len > 0, "a pancake stack needs at least one pancake");
        let mut values: Values = (1..=len as u32).collect();
        values.shuffle(rng);
        Self::from_permutation(values)
    }

    /// The sorted stack `1, 2, ..., len`
    pub fn sorted(len: usize) -> Self {
        Self::from_permutation((1..=len as u32).collect())
    }

    /// Build a state from caller-supplied values, checking they form a
    /// permutation of `1..=N`.
    pub fn from_values(values: &[u32]) -> Result<Self> {
        if values.is_empty() {
            return Err(PancakeError::EmptyPuzzle);
        }

        let len = values.len();
        let mut seen = vec![false; len];
        for &value in values {
            let slot = (value as usize).checked_sub(1).filter(|&s| s < len);
            match slot {
                Some(s) if !seen[s] => seen[s] = true,
                _ => {
                    return Err(PancakeError::InvalidPermutation {
                        values: values.to_vec(),
                        len,
                    })
                }
            }
        }

        Ok(Self::from_permutation(values.iter().copied().collect()))
    }

    fn from_permutation(values: Values) -> Self {
        let fingerprint = Fingerprint::of(&values);
        Self {
            values,
            fingerprint,
        }
    }

    /// Empty placeholder with room for `len` values; only filled by `child`
    fn with_len(len: usize) -> Self {
        Self {
            values: SmallVec::with_capacity(len),
            fingerprint: Fingerprint::default(),
        }
    }

    /// Copy this state and apply the reversal at `index` to the copy.
    ///
    /// The copy is never visible before the reversal, so every state is
    /// mutated at most once.
    pub fn child(&self, index: usize) -> Self {
        let mut child = Self::with_len(self.values.len());
        child.values.extend_from_slice(&self.values);
        child.reverse_from(index);
        child
    }

    /// Reverse `values[index..]` in place and refresh the fingerprint.
    ///
    /// Panics if `index` is out of range.
    pub fn reverse_from(&mut self, index: usize) {
        assert!(
            index < self.values.len(),
            "reversal index {} out of range for {} pancakes",
            index,
            self.values.len()
        );
        self.values[index..].reverse();
        self.fingerprint = Fingerprint::of(&self.values);
    }

    /// True iff every pancake sits at its own position (`values[i] == i + 1`)
    pub fn is_goal(&self) -> bool {
        self.values
            .iter()
            .enumerate()
            .all(|(i, &value)| value as usize == i + 1)
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Equality as used by the explored sets: fingerprints only
    pub fn fingerprint_equals(&self, other: &State) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint_equals(other)
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn all_permutations(len: u32) -> Vec<Vec<u32>> {
        if len == 0 {
            return vec![vec![]];
        }
        let mut result = Vec::new();
        for shorter in all_permutations(len - 1) {
            for pos in 0..=shorter.len() {
                let mut perm = shorter.clone();
                perm.insert(pos, len);
                result.push(perm);
            }
        }
        result
    }

    fn is_permutation(values: &[u32]) -> bool {
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        sorted.iter().enumerate().all(|(i, &v)| v as usize == i + 1)
    }

    #[test]
    fn test_random_state_is_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for len in 1..=20 {
            let state = State::random(len, &mut rng);
            assert_eq!(state.len(), len);
            assert!(is_permutation(state.values()));
        }
    }

    #[test]
    fn test_same_seed_same_root() {
        let a = State::random(12, &mut ChaCha8Rng::seed_from_u64(42));
        let b = State::random(12, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a.values(), b.values());
        assert_eq!(a, b);
    }

    #[test]
    fn test_is_goal() {
        assert!(State::sorted(1).is_goal());
        assert!(State::sorted(6).is_goal());
        assert!(!State::from_values(&[2, 1]).unwrap().is_goal());

        // Any single out-of-order adjacent pair breaks the goal
        for i in 0..5 {
            let mut values: Vec<u32> = (1..=6).collect();
            values.swap(i, i + 1);
            assert!(!State::from_values(&values).unwrap().is_goal());
        }
    }

    #[test]
    fn test_from_values_rejects_non_permutations() {
        assert!(matches!(State::from_values(&[]), Err(PancakeError::EmptyPuzzle)));
        assert!(State::from_values(&[1, 1, 2]).is_err());
        assert!(State::from_values(&[0, 1, 2]).is_err());
        assert!(State::from_values(&[1, 2, 4]).is_err());
        assert!(State::from_values(&[3, 1, 2]).is_ok());
    }

    #[test]
    fn test_reverse_from() {
        let mut state = State::from_values(&[3, 1, 2, 5, 4]).unwrap();
        state.reverse_from(2);
        assert_eq!(state.values(), &[3, 1, 4, 5, 2]);
        assert_eq!(state.fingerprint(), Fingerprint::of(&[3, 1, 4, 5, 2]));

        state.reverse_from(0);
        assert_eq!(state.values(), &[2, 5, 4, 1, 3]);

        // Last index is a single-element no-op
        let before = state.clone();
        state.reverse_from(4);
        assert_eq!(state, before);
    }

    #[test]
    #[should_panic]
    fn test_reverse_from_out_of_range() {
        let mut state = State::sorted(3);
        state.reverse_from(3);
    }

    #[test]
    fn test_child_leaves_parent_untouched() {
        let parent = State::from_values(&[1, 2, 3]).unwrap();
        let child = parent.child(0);
        assert_eq!(parent.values(), &[1, 2, 3]);
        assert_eq!(child.values(), &[3, 2, 1]);
        assert!(!child.fingerprint_equals(&parent));
    }

    #[test]
    fn test_ranked_fingerprints_are_distinct() {
        for len in 1..=6 {
            let perms = all_permutations(len);
            let fingerprints: HashSet<Fingerprint> =
                perms.iter().map(|p| Fingerprint::of(p)).collect();
            assert_eq!(fingerprints.len(), perms.len());
        }
        assert_eq!(Fingerprint::of(&[1, 2, 3]).as_u128(), 0);
        assert_eq!(Fingerprint::of(&[3, 2, 1]).as_u128(), 5);
    }

    #[test]
    fn test_wide_fingerprints_for_large_stacks() {
        let len = MAX_RANKED_LEN + 6;
        let sorted = State::sorted(len);
        let mut seen = HashSet::new();
        seen.insert(sorted.fingerprint());
        for index in 0..len - 1 {
            assert!(seen.insert(sorted.child(index).fingerprint()));
        }
    }

    #[test]
    fn test_display() {
        let state = State::from_values(&[3, 1, 2]).unwrap();
        assert_eq!(state.to_string(), "[3, 1, 2]");
    }
}
