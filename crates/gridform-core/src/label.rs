//! Row and column header labels

use crate::error::{Error, Result};

/// 1-based decimal label for a row (`0 -> "1"`, `9 -> "10"`)
pub fn row_label(row: usize) -> String {
    (row + 1).to_string()
}

/// Letter label for a column (0 = A, 25 = Z, 26 = AA, etc.)
pub fn column_label(col: usize) -> String {
    let mut result = String::new();
    let mut n = col + 1; // 1-based for calculation

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
///
/// Case insensitive. Does not check against the grid width; callers that
/// need a bounded column go through [`crate::CellIndex::parse`].
pub fn letters_to_column(letters: &str) -> Result<usize> {
    if letters.is_empty() {
        return Err(Error::InvalidAddress("empty column letters".into()));
    }

    let mut col: usize = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidAddress(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        col = col
            .checked_mul(26)
            .and_then(|v| v.checked_add(c.to_ascii_uppercase() as usize - 'A' as usize + 1))
            .ok_or_else(|| Error::InvalidAddress(format!("column '{}' too large", letters)))?;
    }

    Ok(col - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{COLS, ROWS};

    #[test]
    fn test_column_labels_for_grid() {
        let labels: Vec<String> = (0..COLS).map(column_label).collect();
        assert_eq!(labels, ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_row_labels_for_grid() {
        let labels: Vec<String> = (0..ROWS).map(row_label).collect();
        assert_eq!(
            labels,
            ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]
        );
    }

    #[test]
    fn test_column_label_wraparound() {
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(701), "ZZ");
        assert_eq!(column_label(702), "AAA");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(letters_to_column("A").unwrap(), 0);
        assert_eq!(letters_to_column("e").unwrap(), 4);
        assert_eq!(letters_to_column("AA").unwrap(), 26);
        assert!(letters_to_column("").is_err());
        assert!(letters_to_column("A1").is_err());
    }
}
