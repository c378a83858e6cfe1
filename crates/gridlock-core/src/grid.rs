//! The 81-cell board and its text formats.

use std::{
    fmt::{self, Debug, Display, Write as _},
    str::FromStr,
};

use crate::{cell::Cell, digit::Digit};

/// A 9×9 board as a flat array of 81 digits, `0` meaning empty.
///
/// This is the exchange format between the solver, the generator, and any
/// host: a plain row-major sequence of digits. Three text renderings are
/// supported, all accepted back by the [`FromStr`] parser (the console form
/// is output-only):
///
/// - **line**: 81 characters on one line, `_` for empty cells
/// - **grid**: nine lines of nine characters
/// - **console**: a human-friendly table with row separators
///
/// # Examples
///
/// ```
/// use gridlock_core::Grid;
///
/// let grid: Grid = "53__7____6__195____98____6_8___6___34__8_3__17___2___6_6____28____419__5____8__79"
///     .parse()?;
/// assert_eq!(grid.clue_count(), 30);
/// assert_eq!(grid.to_line().len(), 81);
/// # Ok::<(), gridlock_core::ParseGridError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    values: [u8; 81],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self { values: [0; 81] }
    }

    /// Creates a grid from a flat array of digit values.
    ///
    /// # Panics
    ///
    /// Panics if any value is greater than 9.
    #[must_use]
    pub fn from_values(values: [u8; 81]) -> Self {
        assert!(values.iter().all(|&v| v <= 9), "cell value out of range");
        Self { values }
    }

    /// Returns the flat array of digit values (`0` = empty).
    #[must_use]
    pub const fn values(&self) -> &[u8; 81] {
        &self.values
    }

    /// Returns the digit at `cell`, or `None` if the cell is empty.
    #[must_use]
    pub fn digit(&self, cell: Cell) -> Option<Digit> {
        match self.values[cell.index()] {
            0 => None,
            value => Some(Digit::from_value(value)),
        }
    }

    /// Sets or clears the digit at `cell`.
    pub fn set(&mut self, cell: Cell, digit: Option<Digit>) {
        self.values[cell.index()] = digit.map_or(0, Digit::value);
    }

    /// Returns the number of non-empty cells.
    #[must_use]
    pub fn clue_count(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0).count()
    }

    /// Returns `true` if every cell holds a digit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|&v| v != 0)
    }

    /// Returns `true` if every clue of `self` also appears in `other`.
    ///
    /// Empty cells of `self` are unconstrained; this is the "clue subset"
    /// relation used to check a puzzle against its solution.
    #[must_use]
    pub fn is_subset_of(&self, other: &Grid) -> bool {
        self.values
            .iter()
            .zip(&other.values)
            .all(|(&mine, &theirs)| mine == 0 || mine == theirs)
    }

    /// Renders the grid as one line of 81 characters, `_` for empty cells.
    #[must_use]
    pub fn to_line(&self) -> String {
        self.values.iter().map(|&v| value_char(v, '_')).collect()
    }

    /// Renders the grid as nine lines of nine characters, `_` for empty
    /// cells, with a trailing newline.
    #[must_use]
    pub fn to_grid_string(&self) -> String {
        let mut out = String::with_capacity(90);
        for (i, &v) in self.values.iter().enumerate() {
            out.push(value_char(v, '_'));
            if i % 9 == 8 {
                out.push('\n');
            }
        }
        out
    }

    /// Renders the grid as a console table with row separators, blanks for
    /// empty cells, with a trailing newline.
    #[must_use]
    pub fn to_console(&self) -> String {
        let sep = " --- --- --- --- --- --- --- --- --- \n";
        let mut out = String::new();
        out.push_str(sep);
        for row in self.values.chunks(9) {
            out.push('|');
            for &v in row {
                let _ = write!(out, " {} |", value_char(v, ' '));
            }
            out.push('\n');
            out.push_str(sep);
        }
        out
    }
}

fn value_char(value: u8, empty: char) -> char {
    match value {
        0 => empty,
        v => char::from(b'0' + v),
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_console())
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Grid").field(&self.to_line()).finish()
    }
}

/// Error returned when parsing a [`Grid`] from text fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    /// The input is neither one line of up to 81 characters nor nine lines
    /// of up to nine characters.
    #[display("input is not a 9x9 grid")]
    Shape,
    /// The input contains a character other than a digit, `_`, `.`, or
    /// space.
    #[display("cell contains invalid character {_0:?}")]
    InvalidCharacter(#[error(not(source))] char),
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parses the line and grid formats produced by [`Grid::to_line`] and
    /// [`Grid::to_grid_string`].
    ///
    /// Empty cells may be written as `_`, `.`, or space; short lines are
    /// padded with empty cells on the right, so trailing blanks and the
    /// final newline are optional.
    #[expect(clippy::cast_possible_truncation)]
    fn from_str(input: &str) -> Result<Self, ParseGridError> {
        let rows: Vec<&str> = input.lines().collect();

        let mut values = [0_u8; 81];
        let positions: Vec<(usize, &str)> = if rows.len() == 1 && rows[0].chars().count() <= 81 {
            vec![(0, rows[0])]
        } else if rows.len() == 9 && rows.iter().all(|row| row.chars().count() <= 9) {
            rows.iter().enumerate().map(|(i, row)| (i * 9, *row)).collect()
        } else {
            return Err(ParseGridError::Shape);
        };

        for (start, row) in positions {
            for (offset, ch) in row.chars().enumerate() {
                values[start + offset] = match ch {
                    ' ' | '.' | '_' => 0,
                    '1'..='9' => ch as u8 - b'0',
                    _ => return Err(ParseGridError::InvalidCharacter(ch)),
                };
            }
        }
        Ok(Self { values })
    }
}
