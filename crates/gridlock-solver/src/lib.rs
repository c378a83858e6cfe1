//! Constraint-propagation Sudoku solver.
//!
//! The solver maintains, for every cell, a bitmask of digits forbidden by the
//! cells sharing its row, column, or box. Assigning a digit with
//! [`Solver::mark`] updates the masks of the 20 peers and immediately chases
//! every forced consequence through a FIFO work queue, so a single call can
//! fill large parts of the board. When propagation alone is not enough,
//! [`Solver::search`] branches on the most constrained cell, trying each
//! remaining candidate on an independent copy of the whole solver state.
//!
//! # Examples
//!
//! ```
//! use gridlock_solver::{SolutionLimit, solve};
//!
//! let grid = "53__7____6__195____98____6_8___6___34__8_3__17___2___6_6____28____419__5____8__79"
//!     .parse()?;
//! let report = solve(&grid, SolutionLimit::Unique).expect("clues are consistent");
//!
//! assert_eq!(report.solutions.len(), 1);
//! assert_eq!(report.difficulty, 1.0);
//! # Ok::<(), gridlock_core::ParseGridError>(())
//! ```

mod search;
mod solver;

pub use self::{
    search::{SolutionLimit, SolveReport, solve},
    solver::{Contradiction, LoadError, Solver},
};
