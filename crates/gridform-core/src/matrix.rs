//! Row-major matrix view of the cell store

use crate::grid::CellStore;
use crate::COLS;

/// A transient row/column view of the grid, used for export
///
/// Rows are stored in order; every row has the same number of columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vec<String>>,
}

impl Matrix {
    /// Build a matrix from rows, padding short rows with empty strings
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { rows }
    }

    /// All rows in order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn col_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Value at a 0-based row and column
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

/// Convert the flat store into a `ROWS x COLS` matrix
///
/// `matrix[i][j] == store.get(i * COLS + j)`.
pub fn to_matrix(store: &CellStore) -> Matrix {
    let rows = store
        .values()
        .chunks(COLS)
        .map(|chunk| chunk.to_vec())
        .collect();
    Matrix { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellIndex, ROWS};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_store_gives_blank_matrix() {
        let matrix = to_matrix(&CellStore::new());
        assert_eq!(matrix.row_count(), ROWS);
        assert_eq!(matrix.col_count(), COLS);
        assert!(matrix.rows().iter().flatten().all(String::is_empty));
    }

    #[test]
    fn test_matrix_matches_store() {
        let mut store = CellStore::new();
        for index in CellIndex::all() {
            store.set(index.get(), index.to_a1()).unwrap();
        }

        let matrix = to_matrix(&store);
        for row in 0..ROWS {
            for col in 0..COLS {
                let index = CellIndex::from_row_col(row, col).unwrap();
                assert_eq!(matrix.get(row, col), Some(store.get(index.get()).unwrap()));
            }
        }
        assert_eq!(matrix.get(0, 0), Some("A1"));
        assert_eq!(matrix.get(9, 4), Some("E10"));
        assert_eq!(matrix.get(10, 0), None);
    }

    #[test]
    fn test_single_edit_shows_in_matrix() {
        let mut store = CellStore::new();
        store.set(0, "Q1").unwrap();

        let matrix = store.to_matrix();
        assert_eq!(matrix.get(0, 0), Some("Q1"));
        let filled: Vec<&String> = matrix.rows().iter().flatten().filter(|v| !v.is_empty()).collect();
        assert_eq!(filled, vec!["Q1"]);
    }

    #[test]
    fn test_to_matrix_is_idempotent() {
        let mut store = CellStore::new();
        store.set(12, "x").unwrap();
        assert_eq!(to_matrix(&store), to_matrix(&store));
    }

    #[test]
    fn test_from_rows_pads() {
        let matrix = Matrix::from_rows(vec![
            vec!["a".into()],
            vec!["b".into(), "c".into()],
        ]);
        assert_eq!(matrix.col_count(), 2);
        assert_eq!(matrix.get(0, 1), Some(""));
    }
}
