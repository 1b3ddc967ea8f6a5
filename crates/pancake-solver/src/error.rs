//! Error types for the pancake solver.
//!
//! "No solution found" is not an error: strategies report it as `None`.
//! Broken internal preconditions panic instead of returning these.

use thiserror::Error;

/// Errors raised while building puzzles or reporting results.
#[derive(Debug, Error)]
pub enum PancakeError {
    /// A puzzle needs at least one pancake
    #[error("puzzle must contain at least one pancake")]
    EmptyPuzzle,

    /// The given values are not a permutation of 1..=N
    #[error("values {values:?} are not a permutation of 1..={len}")]
    InvalidPermutation { values: Vec<u32>, len: usize },

    /// Benchmark size range is empty
    #[error("invalid size range {min}..={max}")]
    InvalidSizeRange { min: usize, max: usize },

    /// Report could not be rendered
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pancake solver operations
pub type Result<T> = std::result::Result<T, PancakeError>;
