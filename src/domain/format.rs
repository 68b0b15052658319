//! Plain-text board format.
//!
//! One line per row, top to bottom, one character per column:
//! `'1'` for alive, `'0'` for dead, each line terminated by `'\n'`.
//! No header and no trailing metadata.

use super::Grid;
use crate::error::FormatError;
use serde::{Deserialize, Serialize};

/// How `import` derives the number of rows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Count newline-terminated lines and require every one to be `cols` wide
    #[default]
    Strict,
    /// Derive rows from the total text length the way the first
    /// version of the format did; a row narrower than the first line
    /// leaves the rest of that row dead
    Legacy,
}

/// Dimensions and alive flags read from text, not yet applied to a grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    pub rows: usize,
    pub cols: usize,
    pub alive: Vec<bool>,
}

pub fn export(grid: &Grid) -> String {
    let mut text = String::with_capacity(grid.len() + grid.rows());
    for row in grid.cells().chunks(grid.cols()) {
        text.extend(row.iter().map(|cell| if cell.is_alive() { '1' } else { '0' }));
        text.push('\n');
    }
    text
}

pub fn import(text: &str, mode: ImportMode) -> Result<BoardState, FormatError> {
    if text.is_empty() {
        return Err(FormatError::Empty);
    }
    match mode {
        ImportMode::Strict => import_strict(text),
        ImportMode::Legacy => import_legacy(text),
    }
}

/// Only `'1'` is alive; anything else reads as dead.
fn parse_row(line: &str) -> impl Iterator<Item = bool> + '_ {
    line.chars().map(|ch| ch == '1')
}

fn import_strict(text: &str) -> Result<BoardState, FormatError> {
    let mut lines = Vec::new();
    for (number, segment) in text.split_inclusive('\n').enumerate() {
        let Some(line) = segment.strip_suffix('\n') else {
            return Err(FormatError::MissingTrailingNewline { line: number + 1 });
        };
        // Accept files saved with CRLF endings
        lines.push(line.strip_suffix('\r').unwrap_or(line));
    }

    let cols = lines.first().map_or(0, |line| line.chars().count());
    if cols == 0 {
        return Err(FormatError::EmptyRow { line: 1 });
    }

    let mut alive = Vec::with_capacity(lines.len() * cols);
    for (number, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != cols {
            return Err(FormatError::RaggedRow {
                line: number + 1,
                expected: cols,
                found,
            });
        }
        alive.extend(parse_row(line));
    }

    Ok(BoardState {
        rows: lines.len(),
        cols,
        alive,
    })
}

/// Row count of the original format: `floor(len * (cols / (cols + 1)) / cols)`,
/// evaluated in double precision like the program that wrote these files.
pub fn legacy_row_count(text_len: usize, cols: usize) -> usize {
    if cols == 0 {
        return 0;
    }
    let len = text_len as f64;
    let cols = cols as f64;
    (len * (cols / (cols + 1.0)) / cols).floor() as usize
}

fn import_legacy(text: &str) -> Result<BoardState, FormatError> {
    let first = text.split('\n').next().unwrap_or_default();
    let cols = first.chars().count();
    if cols == 0 {
        return Err(FormatError::EmptyRow { line: 1 });
    }
    let rows = legacy_row_count(text.chars().count(), cols);

    let body = text.strip_suffix('\n').unwrap_or(text);
    let mut alive = vec![false; rows * cols];
    for (y, line) in body.split('\n').enumerate() {
        if y >= rows {
            return Err(FormatError::RowOverflow { line: y + 1, rows });
        }
        let found = line.chars().count();
        if found > cols {
            return Err(FormatError::RaggedRow {
                line: y + 1,
                expected: cols,
                found,
            });
        }
        for (x, is_alive) in parse_row(line).enumerate() {
            alive[y * cols + x] = is_alive;
        }
    }

    Ok(BoardState { rows, cols, alive })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_blank_grid() {
        let grid = Grid::new(2, 3).unwrap();
        assert_eq!(export(&grid), "000\n000\n");
    }

    #[test]
    fn test_export_pattern() {
        let mut grid = Grid::new(3, 3).unwrap();
        for (x, y) in [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)] {
            grid.cell_mut(x, y).unwrap().set_state(true);
        }
        assert_eq!(export(&grid), "010\n111\n010\n");
    }

    #[test]
    fn test_round_trip_alive_flags() {
        let mut grid = Grid::new(3, 4).unwrap();
        for (x, y) in [(0, 0), (3, 0), (2, 1), (1, 2)] {
            grid.cell_mut(x, y).unwrap().set_state(true);
        }
        let state = import(&export(&grid), ImportMode::Strict).unwrap();
        assert_eq!((state.rows, state.cols), (3, 4));
        assert_eq!(state.alive, grid.alive_flags());
    }

    #[test]
    fn test_strict_rejects_empty() {
        assert_eq!(import("", ImportMode::Strict), Err(FormatError::Empty));
        assert_eq!(import("", ImportMode::Legacy), Err(FormatError::Empty));
    }

    #[test]
    fn test_strict_rejects_unterminated_single_line() {
        assert_eq!(
            import("0110", ImportMode::Strict),
            Err(FormatError::MissingTrailingNewline { line: 1 })
        );
        assert_eq!(
            import("01\n10", ImportMode::Strict),
            Err(FormatError::MissingTrailingNewline { line: 2 })
        );
    }

    #[test]
    fn test_strict_rejects_short_row() {
        assert_eq!(
            import("011\n01\n110\n", ImportMode::Strict),
            Err(FormatError::RaggedRow { line: 2, expected: 3, found: 2 })
        );
    }

    #[test]
    fn test_strict_rejects_long_row_and_blank_lines() {
        assert!(matches!(
            import("01\n011\n", ImportMode::Strict),
            Err(FormatError::RaggedRow { line: 2, .. })
        ));
        assert!(matches!(
            import("01\n10\n\n", ImportMode::Strict),
            Err(FormatError::RaggedRow { line: 3, found: 0, .. })
        ));
        assert_eq!(import("\n01\n", ImportMode::Strict), Err(FormatError::EmptyRow { line: 1 }));
    }

    #[test]
    fn test_unknown_characters_are_dead() {
        let state = import("1x\n#1\n", ImportMode::Strict).unwrap();
        assert_eq!(state.alive, vec![true, false, false, true]);
    }

    #[test]
    fn test_crlf_accepted() {
        let state = import("10\r\n01\r\n", ImportMode::Strict).unwrap();
        assert_eq!((state.rows, state.cols), (2, 2));
        assert_eq!(state.alive, vec![true, false, false, true]);
    }

    #[test]
    fn test_legacy_row_count_canonical_inputs() {
        // "010\n111\n010\n"
        assert_eq!(legacy_row_count(12, 3), 3);
        // 8 rows of 7 columns, newline-terminated
        assert_eq!(legacy_row_count(64, 7), 8);
        // 1 row of 1 column
        assert_eq!(legacy_row_count(2, 1), 1);
        // Missing final newline loses the last row
        assert_eq!(legacy_row_count(11, 3), 2);
        // Single line without newline derives zero rows
        assert_eq!(legacy_row_count(4, 4), 0);
    }

    #[test]
    fn test_legacy_matches_strict_on_canonical_text() {
        let text = "010\n111\n010\n";
        assert_eq!(
            import(text, ImportMode::Legacy).unwrap(),
            import(text, ImportMode::Strict).unwrap()
        );
    }

    #[test]
    fn test_legacy_short_row_shrinks_derived_rows() {
        // 10 chars * 3/4 / 3 = 2.5, so only two rows fit and line 3 overflows
        assert_eq!(legacy_row_count(10, 3), 2);
        assert_eq!(
            import("111\n1\n111\n", ImportMode::Legacy),
            Err(FormatError::RowOverflow { line: 3, rows: 2 })
        );
    }

    #[test]
    fn test_legacy_rejects_rows_past_derived_count() {
        assert_eq!(
            import("010\n111\n010", ImportMode::Legacy),
            Err(FormatError::RowOverflow { line: 3, rows: 2 })
        );
        assert_eq!(
            import("0110", ImportMode::Legacy),
            Err(FormatError::RowOverflow { line: 1, rows: 0 })
        );
    }

    #[test]
    fn test_legacy_rejects_wide_rows() {
        assert_eq!(
            import("01\n0110\n01\n", ImportMode::Legacy),
            Err(FormatError::RaggedRow { line: 2, expected: 2, found: 4 })
        );
    }
}
