//! Random Sudoku puzzle generation.
//!
//! Generation runs in two phases on top of the solver: build a complete
//! valid grid by filling cells in random order with randomly chosen allowed
//! digits (retrying from scratch on the rare dead end), then carve clues out
//! of it in a second random order, keeping each removal only if the puzzle
//! still has a unique solution.
//!
//! All randomness flows through a [`ByteSource`]: either the process-wide
//! pool of OS-provided entropy, or a deterministic stream expanded from a
//! [`Seed`]. [`generate`] draws a fresh seed and reports it with the puzzle,
//! so every result can be reproduced later with [`generate_with_seed`].
//!
//! # Examples
//!
//! ```
//! use gridlock_generator::{Seed, generate_with_seed};
//!
//! let puzzle = generate_with_seed(Seed::from_phrase("lunch break"))?;
//!
//! assert!(puzzle.problem.is_subset_of(&puzzle.solution));
//! assert!(puzzle.difficulty >= 1.0);
//! # Ok::<(), gridlock_generator::GenerateError>(())
//! ```

mod entropy;
mod generate;
mod seed;

pub use self::{
    entropy::{ByteSource, EntropyPool, SeededBytes},
    generate::{GenerateError, Puzzle, generate, generate_with_seed},
    seed::{ParseSeedError, Seed},
};
