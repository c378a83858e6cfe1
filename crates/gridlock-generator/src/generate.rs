//! Puzzle construction: random fill, then uniqueness-guarded minimization.

use gridlock_core::{Cell, Grid};
use gridlock_solver::{SolutionLimit, Solver};

use crate::{
    entropy::{ByteSource, SeededBytes},
    seed::Seed,
};

/// Sanity bound on fresh random-fill attempts.
///
/// A single attempt fails only when the random fill paints itself into a
/// corner, which happens well under half the time, so hitting this bound
/// means the byte source is broken rather than unlucky.
const MAX_FILL_ATTEMPTS: u32 = 10_000;

/// Error returned when puzzle generation fails.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
pub enum GenerateError {
    /// The operating system could not provide random bytes.
    #[display("random source unavailable: {_0}")]
    Entropy(#[error(not(source))] getrandom::Error),
    /// No complete grid came out of the bounded number of random fills.
    #[display("no complete grid after {_0} random fill attempts")]
    RetriesExhausted(#[error(not(source))] u32),
}

/// A generated puzzle and how it came to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Puzzle {
    /// The minimized problem grid; its solution is unique.
    pub problem: Grid,
    /// The complete grid the problem was carved from.
    pub solution: Grid,
    /// Difficulty estimate of the problem.
    pub difficulty: f64,
    /// Seed that reproduces this puzzle.
    pub seed: Seed,
}

/// Generates a random puzzle with a unique solution.
///
/// A fresh [`Seed`] is drawn from the process-wide entropy pool and the rest
/// of the run is a deterministic function of it, so the returned
/// [`Puzzle::seed`] reproduces the same puzzle through
/// [`generate_with_seed`].
///
/// # Errors
///
/// Returns [`GenerateError::Entropy`] when the operating system cannot
/// provide random bytes, or [`GenerateError::RetriesExhausted`] if the
/// random-fill phase keeps failing beyond any plausible streak of bad luck.
pub fn generate() -> Result<Puzzle, GenerateError> {
    generate_with_seed(Seed::from_entropy()?)
}

/// Generates the puzzle determined by `seed`.
///
/// # Errors
///
/// Returns [`GenerateError::RetriesExhausted`] if the random-fill phase
/// keeps failing beyond any plausible streak of bad luck.
pub fn generate_with_seed(seed: Seed) -> Result<Puzzle, GenerateError> {
    let mut source = SeededBytes::new(seed);
    let solution = random_grid(&mut source)?;
    let (problem, difficulty) = minimize(solution, &mut source)?;
    Ok(Puzzle {
        problem,
        solution,
        difficulty,
        seed,
    })
}

/// Builds a complete valid grid from random assignments.
///
/// Cells are visited in a random order; every still-unassigned one gets a
/// uniformly random digit from its remaining candidates. A contradiction
/// discards the whole attempt, and a fresh permutation starts over.
fn random_grid<S: ByteSource>(source: &mut S) -> Result<Grid, GenerateError> {
    for attempt in 1..=MAX_FILL_ATTEMPTS {
        let mut solver = Solver::new();
        let mut stuck = false;
        for &index in &source.permutation()? {
            let cell = Cell::new(index);
            if solver.digit_at(cell).is_some() {
                continue;
            }
            let digit = source.pick(solver.candidates_at(cell))?;
            if solver.mark(cell, digit).is_err() {
                stuck = true;
                break;
            }
        }
        if !stuck {
            debug_assert!(solver.is_complete());
            log::debug!("built a complete grid in {attempt} attempt(s)");
            return Ok(solver.grid());
        }
    }
    Err(GenerateError::RetriesExhausted(MAX_FILL_ATTEMPTS))
}

/// Carves a problem out of a complete grid.
///
/// Cells are visited in a random order; each is tentatively cleared, and the
/// clearing sticks only if a fresh solve still finds exactly one solution.
/// The reported difficulty comes from the last check that confirmed
/// uniqueness.
fn minimize<S: ByteSource>(solution: Grid, source: &mut S) -> Result<(Grid, f64), GenerateError> {
    let mut problem = solution;
    let mut difficulty = 1.0;
    for &index in &source.permutation()? {
        let cell = Cell::new(index);
        let removed = problem.digit(cell);
        problem.set(cell, None);

        let mut solver = Solver::new();
        let loaded = solver.load(&problem);
        debug_assert!(loaded.is_ok(), "a subgrid of a valid grid always loads");
        if loaded.is_ok() && solver.search(SolutionLimit::Unique).len() == 1 {
            difficulty = solver.difficulty();
        } else {
            problem.set(cell, removed);
        }
    }
    log::debug!(
        "minimized to {} clues, difficulty {difficulty:.2}",
        problem.clue_count()
    );
    Ok((problem, difficulty))
}

#[cfg(test)]
mod tests {
    use gridlock_solver::solve;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let seed = Seed::from_phrase("reproducible");
        let first = generate_with_seed(seed).unwrap();
        let second = generate_with_seed(seed).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_puzzle_has_unique_solution() {
        let puzzle = generate_with_seed(Seed::from_phrase("uniqueness")).unwrap();

        let report = solve(&puzzle.problem, SolutionLimit::Unique).unwrap();
        assert_eq!(report.solutions, vec![puzzle.solution]);
    }

    #[test]
    fn test_puzzle_is_strict_clue_subset() {
        let puzzle = generate_with_seed(Seed::from_phrase("subset")).unwrap();

        assert!(puzzle.solution.is_complete());
        assert!(puzzle.problem.is_subset_of(&puzzle.solution));
        assert!(puzzle.problem.clue_count() < 81);
        // No unique puzzle exists below 17 clues.
        assert!(puzzle.problem.clue_count() >= 17);
    }

    #[test]
    fn test_removing_clues_never_lowers_difficulty() {
        let puzzle = generate_with_seed(Seed::from_phrase("monotone")).unwrap();

        // The problem's clues are a subset of the full grid's, so its
        // difficulty must be at least the full grid's floor of 1.0.
        let full = solve(&puzzle.solution, SolutionLimit::Unique).unwrap();
        assert_eq!(full.difficulty, 1.0);
        assert!(puzzle.difficulty >= full.difficulty);

        let report = solve(&puzzle.problem, SolutionLimit::Unique).unwrap();
        assert_eq!(report.difficulty, puzzle.difficulty);
    }

    #[test]
    fn test_generate_from_entropy() {
        let puzzle = generate().unwrap();
        let report = solve(&puzzle.problem, SolutionLimit::Unique).unwrap();
        assert_eq!(report.solutions.len(), 1);

        // Reported seed reproduces the same puzzle.
        assert_eq!(generate_with_seed(puzzle.seed).unwrap(), puzzle);
    }

    #[test]
    fn test_repeated_generation_never_leaks_multiple_solutions() {
        for i in 0..100 {
            let seed = Seed::from_phrase(&format!("soak {i}"));
            let puzzle = generate_with_seed(seed).unwrap();
            let report = solve(&puzzle.problem, SolutionLimit::Unique).unwrap();
            assert_eq!(report.solutions.len(), 1, "seed {i} leaked");
        }
    }

    #[test]
    fn test_concurrent_generation_shares_the_pool() {
        use rayon::prelude::*;

        let puzzles: Vec<Puzzle> = (0..16)
            .into_par_iter()
            .map(|_| generate().unwrap())
            .collect();
        for puzzle in &puzzles {
            let report = solve(&puzzle.problem, SolutionLimit::Unique).unwrap();
            assert_eq!(report.solutions, vec![puzzle.solution]);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(4))]

        #[test]
        fn test_any_seed_yields_a_valid_puzzle(bytes in prop::array::uniform32(any::<u8>())) {
            let puzzle = generate_with_seed(Seed::from_bytes(bytes)).unwrap();
            prop_assert!(puzzle.problem.is_subset_of(&puzzle.solution));
            let report = solve(&puzzle.problem, SolutionLimit::Unique).unwrap();
            prop_assert_eq!(report.solutions.len(), 1);
        }
    }
}
