//! Solver state and constraint propagation.

use gridlock_core::{Cell, Digit, DigitSet, Grid};
use tinyvec::ArrayVec;

/// An assignment conflicted with an already-derived constraint.
///
/// This is an expected outcome while exploring a branch, not a fatal error:
/// the search engine treats it as "this branch is dead" and moves on. A
/// solver that returned `Contradiction` is no longer usable and must be
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("assignment contradicts a propagated constraint")]
pub struct Contradiction;

/// The clue grid itself is inconsistent.
///
/// Returned by [`Solver::load`] when a clue conflicts with constraints
/// derived from earlier clues. This is distinct from a well-formed grid that
/// merely has no solution; the latter surfaces as an empty solution list
/// after searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("clue {digit} at {cell} contradicts the other clues")]
pub struct LoadError {
    /// The cell whose clue could not be applied.
    pub cell: Cell,
    /// The digit that clue held.
    pub digit: Digit,
}

/// Propagation state for one solve attempt.
///
/// Holds the working grid, one forbidden-digit mask per cell, a FIFO queue of
/// cells forced down to a single candidate, and the step counter feeding the
/// difficulty estimate. The whole state is a plain value: the search engine
/// isolates branches by cloning it, never by undoing mutations.
///
/// A solver is created fresh per attempt and discarded afterwards; any method
/// returning [`Contradiction`] leaves it unusable.
///
/// # Examples
///
/// ```
/// use gridlock_core::{Cell, Digit};
/// use gridlock_solver::Solver;
///
/// let mut solver = Solver::new();
/// solver.mark(Cell::from_row_col(0, 0), Digit::D5)?;
///
/// // The peers of r1c1 can no longer hold a 5.
/// assert!(!solver.candidates_at(Cell::from_row_col(0, 8)).contains(Digit::D5));
/// # Ok::<(), gridlock_solver::Contradiction>(())
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    grid: Grid,
    forbidden: [DigitSet; 81],
    queue: ArrayVec<[u8; 81]>,
    queue_head: usize,
    filled: u8,
    steps: u32,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Creates a solver with an empty grid and no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            forbidden: [DigitSet::EMPTY; 81],
            queue: ArrayVec::default(),
            queue_head: 0,
            filled: 0,
            steps: 0,
        }
    }

    /// Assigns `digit` to `cell` and propagates all consequences.
    ///
    /// Re-marking a cell with its current digit is a no-op, so redundant
    /// clues in over-constrained input are accepted. Otherwise the digit is
    /// recorded, the forbidden masks of the 20 peers are updated, and every
    /// peer reduced to a single remaining candidate is assigned in turn,
    /// FIFO, until nothing is forced anymore.
    ///
    /// # Errors
    ///
    /// Returns [`Contradiction`] if the digit is already forbidden at `cell`,
    /// or if any propagated assignment leaves some unassigned cell with no
    /// candidate. The solver must then be discarded.
    pub fn mark(&mut self, cell: Cell, digit: Digit) -> Result<(), Contradiction> {
        self.assign(cell, digit)?;

        while self.queue_head < self.queue.len() {
            let next = Cell::new(self.queue[self.queue_head]);
            self.queue_head += 1;
            // A queued cell still has exactly one candidate: growing its
            // mask to nine bits would already have failed propagation.
            let forced = self.forbidden[next.index()]
                .complement()
                .single()
                .ok_or(Contradiction)?;
            self.assign(next, forced)?;
        }
        self.queue.clear();
        self.queue_head = 0;
        Ok(())
    }

    /// Records one assignment and updates peer masks, enqueueing any peer
    /// reduced to a single candidate.
    #[expect(clippy::cast_possible_truncation)]
    fn assign(&mut self, cell: Cell, digit: Digit) -> Result<(), Contradiction> {
        if self.grid.digit(cell) == Some(digit) {
            return Ok(());
        }
        if self.forbidden[cell.index()].contains(digit) {
            return Err(Contradiction);
        }

        self.forbidden[cell.index()] = DigitSet::FULL;
        self.grid.set(cell, Some(digit));
        self.filled += 1;
        self.steps += 1;

        for peer in cell.peers() {
            let mask = &mut self.forbidden[peer.index()];
            if mask.contains(digit) {
                continue;
            }
            mask.insert(digit);
            if mask.is_full() {
                // The peer is unassigned (assigned cells already had a full
                // mask) and just lost its last candidate.
                return Err(Contradiction);
            }
            if mask.len() == 8 {
                self.queue.push(peer.index() as u8);
            }
        }
        Ok(())
    }

    /// Marks every non-empty cell of `grid`, in index order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] naming the first clue that conflicts with the
    /// constraints derived from the clues before it.
    pub fn load(&mut self, grid: &Grid) -> Result<(), LoadError> {
        for cell in Cell::all() {
            let Some(digit) = grid.digit(cell) else {
                continue;
            };
            self.mark(cell, digit)
                .map_err(|Contradiction| LoadError { cell, digit })?;
        }
        Ok(())
    }

    /// Returns the digits still allowed at `cell`.
    ///
    /// For an assigned cell this is empty.
    #[must_use]
    pub fn candidates_at(&self, cell: Cell) -> DigitSet {
        self.forbidden[cell.index()].complement()
    }

    /// Returns the digit assigned to `cell`, if any.
    #[must_use]
    pub fn digit_at(&self, cell: Cell) -> Option<Digit> {
        self.grid.digit(cell)
    }

    /// Returns the working grid.
    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Returns `true` once all 81 cells are assigned.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.filled == 81
    }

    /// Returns the number of cell assignments performed so far, including
    /// assignments made in branches explored by the search engine.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub(crate) fn set_steps(&mut self, steps: u32) {
        self.steps = steps;
    }

    pub(crate) fn queue_is_empty(&self) -> bool {
        self.queue_head >= self.queue.len()
    }

    /// Picks the unassigned cell with the fewest remaining candidates.
    ///
    /// Ties go to the lowest cell index. Every unassigned cell has at least
    /// two candidates when this runs, so scanning stops as soon as a cell
    /// with exactly two is found.
    pub(crate) fn branch_cell(&self) -> Cell {
        let mut candidate = Cell::new(0);
        let mut score = 0;
        for cell in Cell::all() {
            if self.grid.digit(cell).is_some() {
                continue;
            }
            let conflicts = self.forbidden[cell.index()].len();
            if conflicts > score {
                candidate = cell;
                score = conflicts;
                if score >= 7 {
                    break;
                }
            }
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_updates_peers() {
        let mut solver = Solver::new();
        solver.mark(Cell::from_row_col(4, 4), Digit::D5).unwrap();

        assert_eq!(solver.digit_at(Cell::from_row_col(4, 4)), Some(Digit::D5));
        assert!(solver.candidates_at(Cell::from_row_col(4, 4)).is_empty());

        // Same row, column, and box lose the digit; an unrelated cell keeps it.
        for peer in [
            Cell::from_row_col(4, 0),
            Cell::from_row_col(0, 4),
            Cell::from_row_col(5, 5),
        ] {
            assert!(!solver.candidates_at(peer).contains(Digit::D5));
            assert_eq!(solver.candidates_at(peer).len(), 8);
        }
        assert!(solver.candidates_at(Cell::from_row_col(0, 0)).contains(Digit::D5));
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut solver = Solver::new();
        solver.mark(Cell::new(0), Digit::D7).unwrap();
        let steps = solver.steps();

        solver.mark(Cell::new(0), Digit::D7).unwrap();
        assert_eq!(solver.steps(), steps);
        assert_eq!(solver.digit_at(Cell::new(0)), Some(Digit::D7));
    }

    #[test]
    fn test_mark_forbidden_digit_fails() {
        let mut solver = Solver::new();
        solver.mark(Cell::from_row_col(0, 0), Digit::D5).unwrap();

        // Same digit elsewhere in the row conflicts.
        assert_eq!(
            solver.mark(Cell::from_row_col(0, 8), Digit::D5),
            Err(Contradiction)
        );
    }

    #[test]
    fn test_mark_reassignment_fails() {
        let mut solver = Solver::new();
        solver.mark(Cell::new(0), Digit::D5).unwrap();
        assert_eq!(solver.mark(Cell::new(0), Digit::D6), Err(Contradiction));
    }

    #[test]
    fn test_mark_cascades_forced_cells() {
        let mut solver = Solver::new();

        // Fill eight cells of the top row; the ninth is forced by the last
        // mark's propagation.
        for (col, digit) in (0..8).zip(Digit::ALL) {
            solver.mark(Cell::from_row_col(0, col), digit).unwrap();
        }

        assert_eq!(solver.digit_at(Cell::from_row_col(0, 8)), Some(Digit::D9));
        assert_eq!(solver.steps(), 9);
    }

    #[test]
    fn test_load_easy_grid_completes_by_propagation() {
        let grid =
            "53__7____6__195____98____6_8___6___34__8_3__17___2___6_6____28____419__5____8__79"
                .parse()
                .unwrap();
        let mut solver = Solver::new();
        solver.load(&grid).unwrap();

        assert!(solver.is_complete());
        assert_eq!(solver.steps(), 81);
    }

    #[test]
    fn test_load_contradictory_clues_fails() {
        // Two 5s in the first row.
        let grid: Grid = "5___5____".parse().unwrap();
        let mut solver = Solver::new();
        let err = solver.load(&grid).unwrap_err();
        assert_eq!(err.cell, Cell::from_row_col(0, 4));
        assert_eq!(err.digit, Digit::D5);
        assert_eq!(
            err.to_string(),
            "clue 5 at r1c5 contradicts the other clues"
        );
    }

    #[test]
    fn test_load_accepts_redundant_clues() {
        let mut solver = Solver::new();
        solver.mark(Cell::new(0), Digit::D5).unwrap();
        let grid: Grid = "5________".parse().unwrap();
        solver.load(&grid).unwrap();
        assert_eq!(solver.steps(), 1);
    }

    #[test]
    fn test_branch_cell_prefers_most_constrained() {
        let mut solver = Solver::new();
        assert_eq!(solver.branch_cell(), Cell::new(0));

        // Constrain r5c5 more than anything else.
        solver.mark(Cell::from_row_col(4, 0), Digit::D1).unwrap();
        solver.mark(Cell::from_row_col(4, 1), Digit::D2).unwrap();
        solver.mark(Cell::from_row_col(0, 4), Digit::D3).unwrap();
        solver.mark(Cell::from_row_col(1, 4), Digit::D4).unwrap();

        let cell = solver.branch_cell();
        assert_eq!(cell, Cell::from_row_col(4, 4));
        assert_eq!(solver.candidates_at(cell).len(), 5);
    }
}
