//! Backtracking search and the difficulty estimate.

use gridlock_core::Grid;

use crate::solver::{LoadError, Solver};

/// How many solutions a search should look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionLimit {
    /// Stop as soon as a second solution is found.
    ///
    /// This bounds the work of "does exactly one solution exist?" to the
    /// first two solutions instead of exhaustive enumeration; the returned
    /// list then has zero, one, or two entries.
    Unique,
    /// Enumerate every solution.
    All,
}

/// The outcome of [`solve`]: every solution found and the difficulty score.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Solutions in discovery order. Empty when the grid is unsatisfiable.
    pub solutions: Vec<Grid>,
    /// Difficulty estimate for the input grid (1.0 for grids solved by
    /// propagation alone).
    pub difficulty: f64,
}

impl Solver {
    /// Searches for completions of the current state.
    ///
    /// If the grid is already complete it is the only solution. Otherwise
    /// the solver picks the most constrained unassigned cell and tries each
    /// of its remaining candidates in ascending order, each on an
    /// independent clone of the whole state; branch clones never share
    /// mutable masks. Under [`SolutionLimit::Unique`], remaining branches
    /// are abandoned as soon as two solutions exist.
    ///
    /// Assignment counts from every explored branch accumulate into this
    /// solver's [`steps`](Solver::steps), which is what
    /// [`difficulty`](Solver::difficulty) is computed from.
    pub fn search(&mut self, limit: SolutionLimit) -> Vec<Grid> {
        let mut solutions = Vec::new();
        self.search_into(limit, &mut solutions);
        solutions
    }

    fn search_into(&mut self, limit: SolutionLimit, solutions: &mut Vec<Grid>) -> usize {
        if self.is_complete() {
            solutions.push(self.grid());
            return 1;
        }

        debug_assert!(
            self.queue_is_empty(),
            "pending forced assignments must be drained before branching"
        );

        let cell = self.branch_cell();
        let mut found = 0;
        for digit in self.candidates_at(cell) {
            let mut branch = self.clone();
            if branch.mark(cell, digit).is_ok() {
                found += branch.search_into(limit, solutions);
            }
            // Work spent in the branch counts toward the difficulty input,
            // whether or not the branch panned out.
            self.set_steps(branch.steps());
            if limit == SolutionLimit::Unique && found > 1 {
                return found;
            }
        }
        found
    }

    /// Returns the difficulty estimate for the work done so far.
    ///
    /// Computed as `ln(max(steps / 81, 1)) + 1`: a grid whose solution is
    /// forced entirely by propagation performs exactly 81 assignments and
    /// scores exactly 1.0; guesswork inflates `steps` and the score grows
    /// logarithmically with it.
    #[must_use]
    pub fn difficulty(&self) -> f64 {
        (f64::from(self.steps()) / 81.0).max(1.0).ln() + 1.0
    }
}

/// Loads `grid` into a fresh solver and searches for its solutions.
///
/// # Errors
///
/// Returns [`LoadError`] when the clues themselves are contradictory. A
/// well-formed but unsatisfiable grid is not an error: it yields an empty
/// solution list.
///
/// # Examples
///
/// ```
/// use gridlock_solver::{SolutionLimit, solve};
///
/// // The empty grid is never unique: the search stops at two solutions.
/// let report = solve(&gridlock_core::Grid::new(), SolutionLimit::Unique)?;
/// assert_eq!(report.solutions.len(), 2);
/// # Ok::<(), gridlock_solver::LoadError>(())
/// ```
pub fn solve(grid: &Grid, limit: SolutionLimit) -> Result<SolveReport, LoadError> {
    let mut solver = Solver::new();
    solver.load(grid)?;
    let solutions = solver.search(limit);
    Ok(SolveReport {
        solutions,
        difficulty: solver.difficulty(),
    })
}
