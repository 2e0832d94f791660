use super::board::{Board, MoveError, Position};
use super::layout::BoardLayout;
use super::player::Player;
use super::win::detect_win;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// One game in progress: the board, whose turn it is, and the anchor for
/// the next win check.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    last_placement: Option<Position>,
    outcome: Option<GameOutcome>,
    move_count: usize,
}

impl GameState {
    /// Fresh game on a new board built from `layout`.
    pub fn new(layout: &BoardLayout, first: Player) -> Self {
        Self::with_board(Board::new(layout), first)
    }

    /// Continue from an existing board. A board with no empty cell left
    /// is a draw straight away.
    pub fn with_board(board: Board, first: Player) -> Self {
        let outcome = board.is_full().then_some(GameOutcome::Draw);
        GameState {
            board,
            current_player: first,
            last_placement: None,
            outcome,
            move_count: 0,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Where the most recent piece landed, if any move was made.
    pub fn last_placement(&self) -> Option<Position> {
        self.last_placement
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Number of moves applied to this state.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Get list of legal columns
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    /// Apply a move for the current player in place. Returns where the
    /// piece landed.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<Position, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let pos = self.board.drop_piece(column, self.current_player)?;
        self.last_placement = Some(pos);
        self.move_count += 1;

        if detect_win(&self.board, self.last_placement) {
            self.outcome = Some(GameOutcome::Winner(self.current_player));
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_player = self.current_player.other();

        Ok(pos)
    }
}
