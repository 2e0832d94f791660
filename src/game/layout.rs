use crate::error::ConfigError;

use super::board::Position;

/// Inclusive range of column counts a board may have.
pub const MIN_COLS: usize = 6;
pub const MAX_COLS: usize = 11;

/// Number of don't-care cells every board carries.
pub const DONT_CARE_CELLS: usize = 2;

/// Tallest column accepted; anything higher is a malformed height.
pub const MAX_HEIGHT: usize = 64;

/// Validated board configuration. Immutable once built; a `Board` is
/// created from it for every game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardLayout {
    heights: Vec<usize>,
    dont_care: Vec<Position>,
    rows: usize,
}

impl BoardLayout {
    /// Parse space-separated column heights (`"7 8 6 7 8 9 8"`) and
    /// don't-care cells (`"A3 B1"`, letter + 1-based row from the bottom).
    pub fn parse(heights: &str, dont_care: &str) -> Result<Self, ConfigError> {
        let heights = heights
            .split_whitespace()
            .map(|token| match parse_digits(token) {
                Some(h) if (1..=MAX_HEIGHT).contains(&h) => Ok(h),
                _ => Err(ConfigError::MalformedHeight(token.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if !(MIN_COLS..=MAX_COLS).contains(&heights.len()) {
            return Err(ConfigError::ColumnCount {
                got: heights.len(),
                min: MIN_COLS,
                max: MAX_COLS,
            });
        }

        let tokens: Vec<&str> = dont_care.split_whitespace().collect();
        if tokens.len() != DONT_CARE_CELLS {
            return Err(ConfigError::DontCareCount {
                got: tokens.len(),
                expected: DONT_CARE_CELLS,
            });
        }

        let rows = heights.iter().copied().max().unwrap_or(0);
        let mut cells = Vec::with_capacity(DONT_CARE_CELLS);
        for token in tokens {
            let (col, row_from_bottom) = parse_cell(token)?;
            // Row numbers are 1-based and must sit inside the column's
            // playable part, not in its dead cap.
            if col >= heights.len() || row_from_bottom == 0 || row_from_bottom > heights[col] {
                return Err(ConfigError::CellOutOfBounds(token.to_string()));
            }
            let pos = Position::new(rows - row_from_bottom, col);
            if cells.contains(&pos) {
                return Err(ConfigError::DuplicateDontCare(token.to_string()));
            }
            cells.push(pos);
        }

        Ok(BoardLayout {
            heights,
            dont_care: cells,
            rows,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.heights.len()
    }

    pub fn heights(&self) -> &[usize] {
        &self.heights
    }

    pub fn dont_care(&self) -> &[Position] {
        &self.dont_care
    }

    /// Heights in the same notation `parse` accepts.
    pub fn heights_notation(&self) -> String {
        self.heights
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Don't-care cells in the same notation `parse` accepts.
    pub fn dont_care_notation(&self) -> String {
        self.dont_care
            .iter()
            .map(|pos| format!("{}{}", column_letter(pos.col), self.rows - pos.row))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Map a column letter (case-insensitive) to its index: A -> 0, B -> 1, ...
pub fn column_index(letter: char) -> Option<usize> {
    if letter.is_ascii_alphabetic() {
        Some((letter.to_ascii_uppercase() as u8 - b'A') as usize)
    } else {
        None
    }
}

/// Inverse of `column_index`.
pub fn column_letter(col: usize) -> char {
    (b'A' + col as u8) as char
}

fn parse_cell(token: &str) -> Result<(usize, usize), ConfigError> {
    let malformed = || ConfigError::MalformedCell(token.to_string());
    let mut chars = token.chars();
    let col = chars.next().and_then(column_index).ok_or_else(malformed)?;
    let row = parse_digits(chars.as_str()).ok_or_else(malformed)?;
    Ok((col, row))
}

/// Plain ASCII digits only; `usize::from_str` would also take a leading `+`.
fn parse_digits(token: &str) -> Option<usize> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
