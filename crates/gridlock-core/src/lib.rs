//! Core data model for the gridlock Sudoku engine.
//!
//! This crate defines the vocabulary shared by the solver and the generator:
//!
//! - [`Digit`]: a type-safe Sudoku digit in the range 1-9
//! - [`Cell`]: a position on the 9×9 board, indexed 0-80 in row-major order
//! - [`DigitSet`]: a bitmask over digits 1-9, used both for candidate sets
//!   and for per-cell conflict tracking
//! - [`Grid`]: a flat 81-cell array of digits (0 = empty) with parsing and
//!   text rendering
//!
//! The peer relation (the 20 cells sharing a row, column, or box with a given
//! cell) is precomputed at compile time and exposed through [`Cell::peers`].
//!
//! # Examples
//!
//! ```
//! use gridlock_core::{Cell, Digit, Grid};
//!
//! let mut grid = Grid::new();
//! grid.set(Cell::from_row_col(4, 4), Some(Digit::D5));
//!
//! assert_eq!(grid.clue_count(), 1);
//! assert_eq!(grid.to_line().chars().nth(40), Some('5'));
//! ```

pub mod cell;
pub mod digit;
pub mod digit_set;
pub mod grid;

pub use self::{
    cell::Cell,
    digit::Digit,
    digit_set::DigitSet,
    grid::{Grid, ParseGridError},
};
