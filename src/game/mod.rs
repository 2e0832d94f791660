//! Core game logic: irregular board with dead and don't-care cells, layout
//! parsing, four-in-a-row detection and the per-game state.

mod board;
mod layout;
mod player;
mod state;
mod win;

pub use board::{Board, Cell, MoveError, Position};
pub use layout::{
    column_index, column_letter, BoardLayout, DONT_CARE_CELLS, MAX_COLS, MAX_HEIGHT, MIN_COLS,
};
pub use player::Player;
pub use state::{GameOutcome, GameState};
pub use win::{detect_win, WIN_LENGTH};
