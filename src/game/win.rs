//! Four-in-a-row detection anchored at the most recent placement.

use super::board::{Board, Position};

/// Run length needed to win.
pub const WIN_LENGTH: usize = 4;

/// Axes scanned from the anchor: vertical, horizontal, down-right, down-left.
const AXES: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

impl Board {
    /// Check if the piece at `pos` completes a run of four for its owner.
    ///
    /// Ownership is case-insensitive: pieces on don't-care cells count
    /// for their owner exactly like ordinary pieces. Dead and empty cells
    /// end a run.
    pub fn check_win(&self, pos: Position) -> bool {
        let owner = match self.get(pos.row, pos.col).owner() {
            Some(p) => p,
            None => return false,
        };

        AXES.iter().any(|&(dr, dc)| {
            let mut count = 1;
            for sign in [1, -1] {
                let (dr, dc) = (dr * sign, dc * sign);
                let mut r = pos.row as isize + dr;
                let mut c = pos.col as isize + dc;
                while let Some(cell) = self.get_signed(r, c) {
                    if cell.owner() != Some(owner) {
                        break;
                    }
                    count += 1;
                    if count >= WIN_LENGTH {
                        return true;
                    }
                    r += dr;
                    c += dc;
                }
            }
            false
        })
    }
}

/// Win check against an optional anchor; no anchor means no win.
pub fn detect_win(board: &Board, anchor: Option<Position>) -> bool {
    anchor.is_some_and(|pos| board.check_win(pos))
}
