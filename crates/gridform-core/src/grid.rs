//! Cell indices and the cell store

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::label::{column_label, letters_to_column};
use crate::matrix::{to_matrix, Matrix};
use crate::{CELL_COUNT, COLS, ROWS};

/// Row-major position of a cell in the grid
///
/// Always in `[0, CELL_COUNT)`. The mapping between `(row, col)` and the
/// flat index is `row * COLS + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellIndex(usize);

impl CellIndex {
    /// Create a checked index
    pub fn new(index: usize) -> Result<Self> {
        if index < CELL_COUNT {
            Ok(Self(index))
        } else {
            Err(Error::out_of_range(index as i64))
        }
    }

    /// Create an index from 0-based row and column
    pub fn from_row_col(row: usize, col: usize) -> Result<Self> {
        if row >= ROWS {
            return Err(Error::RowOutOfBounds(row, ROWS - 1));
        }
        if col >= COLS {
            return Err(Error::ColumnOutOfBounds(col, COLS - 1));
        }
        Ok(Self(row * COLS + col))
    }

    /// Parse an A1-style address ("A1" through "E10")
    ///
    /// # Examples
    /// ```
    /// use gridform_core::CellIndex;
    ///
    /// let index = CellIndex::parse("B3").unwrap();
    /// assert_eq!(index.row(), 2);
    /// assert_eq!(index.col(), 1);
    /// assert_eq!(index.get(), 11);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, digits) = s.split_at(split);

        if letters.is_empty() {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        if digits.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }

        let col = letters_to_column(letters)?;
        let row: usize = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        // Rows are 1-based in addresses
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Self::from_row_col(row - 1, col)
    }

    /// The flat index value
    pub fn get(self) -> usize {
        self.0
    }

    /// 0-based row
    pub fn row(self) -> usize {
        self.0 / COLS
    }

    /// 0-based column
    pub fn col(self) -> usize {
        self.0 % COLS
    }

    /// Format as A1-style string
    pub fn to_a1(self) -> String {
        format!("{}{}", column_label(self.col()), self.row() + 1)
    }

    /// Iterate over every index in row-major order
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (0..CELL_COUNT).map(CellIndex)
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

impl FromStr for CellIndex {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<i64> for CellIndex {
    type Error = Error;

    fn try_from(index: i64) -> Result<Self> {
        usize::try_from(index)
            .map_err(|_| Error::out_of_range(index))
            .and_then(CellIndex::new)
    }
}

impl From<CellIndex> for usize {
    fn from(index: CellIndex) -> usize {
        index.0
    }
}

/// The authoritative grid state for a session
///
/// Holds exactly [`CELL_COUNT`] strings. The length never changes; cells are
/// only ever replaced one at a time through [`CellStore::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellStore {
    cells: Vec<String>,
}

impl CellStore {
    /// Create an all-empty store
    pub fn new() -> Self {
        Self {
            cells: vec![String::new(); CELL_COUNT],
        }
    }

    /// Build a store from a full sequence of cell values
    pub fn from_values(values: Vec<String>) -> Result<Self> {
        if values.len() != CELL_COUNT {
            return Err(Error::LengthMismatch {
                expected: CELL_COUNT,
                actual: values.len(),
            });
        }
        Ok(Self { cells: values })
    }

    /// Current value of a cell, empty if never set
    pub fn get(&self, index: usize) -> Result<&str> {
        self.cells
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| Error::out_of_range(index as i64))
    }

    /// Replace the value of a cell
    pub fn set<S: Into<String>>(&mut self, index: usize, value: S) -> Result<()> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or_else(|| Error::out_of_range(index as i64))?;
        *cell = value.into();
        Ok(())
    }

    /// Value at a 0-based row and column
    pub fn get_at(&self, row: usize, col: usize) -> Result<&str> {
        let index = CellIndex::from_row_col(row, col)?;
        Ok(&self.cells[index.get()])
    }

    /// Set the value at a 0-based row and column
    pub fn set_at<S: Into<String>>(&mut self, row: usize, col: usize, value: S) -> Result<()> {
        let index = CellIndex::from_row_col(row, col)?;
        self.cells[index.get()] = value.into();
        Ok(())
    }

    /// All cell values in index order
    pub fn values(&self) -> &[String] {
        &self.cells
    }

    /// Iterate over `(index, value)` pairs in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &str)> {
        CellIndex::all().zip(self.cells.iter().map(String::as_str))
    }

    /// Number of cells holding a non-empty value
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|v| !v.is_empty()).count()
    }

    /// Whether every cell is empty
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(String::is_empty)
    }

    /// Row-major matrix view for export
    pub fn to_matrix(&self) -> Matrix {
        to_matrix(self)
    }
}

impl Default for CellStore {
    fn default() -> Self {
        Self::new()
    }
}
