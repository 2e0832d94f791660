use std::fmt;

use super::layout::BoardLayout;
use super::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Playable and unoccupied
    Empty,
    /// Above a column's fill line; never playable
    Dead,
    /// Playable don't-care cell, unoccupied
    DontCare,
    /// A piece on an ordinary cell
    Piece(Player),
    /// A piece on a don't-care cell
    DontCarePiece(Player),
}

impl Cell {
    /// The player owning a piece in this cell, regardless of cell kind.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Piece(p) | Cell::DontCarePiece(p) => Some(p),
            _ => None,
        }
    }

    /// True if a piece may land here.
    pub fn is_open(self) -> bool {
        matches!(self, Cell::Empty | Cell::DontCare)
    }

    /// Console symbol; empty cells render as nothing.
    pub fn symbol(self) -> Option<char> {
        match self {
            Cell::Empty => None,
            Cell::Dead => Some('#'),
            Cell::DontCare => Some('.'),
            Cell::Piece(p) => Some(p.symbol()),
            Cell::DontCarePiece(p) => Some(p.dont_care_symbol()),
        }
    }
}

/// Grid coordinate. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is outside the board")]
    InvalidColumn,
    #[error("game is already over")]
    GameOver,
}

/// Irregular board: columns share a row count but may be capped by dead
/// cells at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Build the initial board for a validated layout.
    pub fn new(layout: &BoardLayout) -> Self {
        let rows = layout.rows();
        let cols = layout.cols();
        let mut cells = vec![Cell::Empty; rows * cols];

        for (col, &height) in layout.heights().iter().enumerate() {
            for row in 0..rows - height {
                cells[row * cols + col] = Cell::Dead;
            }
        }
        for pos in layout.dont_care() {
            cells[pos.row * cols + pos.col] = Cell::DontCare;
        }

        Board { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Cell at a signed offset, `None` when outside the grid.
    pub(crate) fn get_signed(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.get(row, col))
    }

    /// True iff the column exists and still has an open cell.
    pub fn is_legal_move(&self, col: usize) -> bool {
        col < self.cols && (0..self.rows).any(|row| self.get(row, col).is_open())
    }

    /// Columns that can still take a piece, in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.cols).filter(|&c| self.is_legal_move(c)).collect()
    }

    /// Drop a piece in a column, returns where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<Position, MoveError> {
        if col >= self.cols {
            return Err(MoveError::InvalidColumn);
        }

        for row in (0..self.rows).rev() {
            let idx = row * self.cols + col;
            match self.cells[idx] {
                Cell::Empty => {
                    self.cells[idx] = Cell::Piece(player);
                    return Ok(Position::new(row, col));
                }
                Cell::DontCare => {
                    self.cells[idx] = Cell::DontCarePiece(player);
                    return Ok(Position::new(row, col));
                }
                _ => continue,
            }
        }

        Err(MoveError::ColumnFull)
    }

    /// True when no ordinary empty cell remains. Unoccupied don't-care
    /// cells do not keep the board open.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|&c| c == Cell::Empty)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols {
                let symbol = self
                    .get(row, col)
                    .symbol()
                    .map(String::from)
                    .unwrap_or_default();
                write!(f, "{:2}|", symbol)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(heights: &str, dont_care: &str) -> BoardLayout {
        BoardLayout::parse(heights, dont_care).unwrap()
    }

    fn sample_board() -> Board {
        Board::new(&layout("7 8 6 7 8 9 8", "A3 B1"))
    }

    #[test]
    fn test_new_board_shape() {
        let board = sample_board();
        assert_eq!(board.rows(), 9);
        assert_eq!(board.cols(), 7);

        // Column A has height 7: two dead cells on top
        assert_eq!(board.get(0, 0), Cell::Dead);
        assert_eq!(board.get(1, 0), Cell::Dead);
        assert_eq!(board.get(2, 0), Cell::Empty);

        // Column F is the tallest: no dead cells
        assert_eq!(board.get(0, 5), Cell::Empty);

        // Don't-care cells: A3 and B1
        assert_eq!(board.get(6, 0), Cell::DontCare);
        assert_eq!(board.get(8, 1), Cell::DontCare);
    }

    #[test]
    fn test_drop_piece_lands_at_bottom() {
        let mut board = sample_board();
        let pos = board.drop_piece(3, Player::X).unwrap();
        assert_eq!(pos, Position::new(8, 3));
        assert_eq!(board.get(8, 3), Cell::Piece(Player::X));

        let pos = board.drop_piece(3, Player::O).unwrap();
        assert_eq!(pos, Position::new(7, 3));
    }

    #[test]
    fn test_drop_piece_on_dont_care_cell() {
        let mut board = sample_board();
        let pos = board.drop_piece(1, Player::O).unwrap();
        assert_eq!(pos, Position::new(8, 1));
        assert_eq!(board.get(8, 1), Cell::DontCarePiece(Player::O));
    }

    #[test]
    fn test_column_full_stops_at_dead_cells() {
        let mut board = sample_board();
        // Column C has height 6
        for _ in 0..6 {
            board.drop_piece(2, Player::X).unwrap();
        }
        assert!(!board.is_legal_move(2));
        assert_eq!(board.drop_piece(2, Player::O), Err(MoveError::ColumnFull));
        assert_eq!(board.get(2, 2), Cell::Dead);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = sample_board();
        assert!(!board.is_legal_move(7));
        assert_eq!(board.drop_piece(7, Player::X), Err(MoveError::InvalidColumn));
    }

    #[test]
    fn test_legal_columns() {
        let mut board = sample_board();
        assert_eq!(board.legal_columns(), vec![0, 1, 2, 3, 4, 5, 6]);
        for _ in 0..6 {
            board.drop_piece(2, Player::X).unwrap();
        }
        assert_eq!(board.legal_columns(), vec![0, 1, 3, 4, 5, 6]);
    }

    #[test]
    fn test_fresh_board_is_not_full() {
        assert!(!sample_board().is_full());
    }

    #[test]
    fn test_full_board_ignores_open_dont_care_cells() {
        let mut board = Board::new(&layout("1 1 1 1 1 1", "A1 B1"));
        for col in 2..6 {
            assert!(!board.is_full());
            board.drop_piece(col, Player::X).unwrap();
        }
        assert!(board.is_full());
        // The don't-care cells are still playable
        assert!(board.is_legal_move(0));
    }

    #[test]
    fn test_display_pads_cells() {
        let mut board = Board::new(&layout("1 2 1 1 1 1", "A1 B2"));
        board.drop_piece(2, Player::X).unwrap();
        board.drop_piece(0, Player::O).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "# |. |# |# |# |# |");
        assert_eq!(lines[1], "o |  |X |  |  |  |");
    }
}
