use std::io::Write;

use log::info;

use crate::error::GameError;
use crate::game::{column_letter, GameOutcome, GameState, Player};

use super::controller::Controller;

/// Who controls which side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    AiVsAi,
    /// The AI plays X and the human plays O; `human_first` picks the opener.
    HumanVsAi { human_first: bool },
}

impl GameMode {
    /// The side that opens the game.
    pub fn first_player(self) -> Player {
        match self {
            GameMode::HumanVsAi { human_first: true } => Player::O,
            _ => Player::X,
        }
    }
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameReport {
    pub outcome: GameOutcome,
    pub moves: usize,
}

/// Alternates turns between two controllers until someone wins or the
/// board fills up, printing the board after every move.
pub struct GameLoop<W: Write> {
    state: GameState,
    x: Box<dyn Controller>,
    o: Box<dyn Controller>,
    out: W,
}

impl<W: Write> GameLoop<W> {
    pub fn new(state: GameState, x: Box<dyn Controller>, o: Box<dyn Controller>, out: W) -> Self {
        GameLoop { state, x, o, out }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Consume the loop and hand back its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Play the game to the end.
    pub fn run(&mut self) -> Result<GameReport, GameError> {
        let GameLoop { state, x, o, out } = self;

        writeln!(out, "Initial game board")?;
        writeln!(out, "{}", state.board())?;

        loop {
            if let Some(outcome) = state.outcome() {
                match outcome {
                    GameOutcome::Winner(player) => {
                        let label = match player {
                            Player::X => x.label(),
                            Player::O => o.label(),
                        };
                        writeln!(out, "{} {} has won the match", label, player.name())?;
                    }
                    GameOutcome::Draw => writeln!(out, "Game is a draw.")?,
                }
                info!(
                    "game over after {} moves: {:?}",
                    state.move_count(),
                    outcome
                );
                return Ok(GameReport {
                    outcome,
                    moves: state.move_count(),
                });
            }

            let player = state.current_player();
            let controller = match player {
                Player::X => &mut **x,
                Player::O => &mut **o,
            };

            let pos = controller.play_turn(state, &mut *out)?;
            writeln!(
                out,
                "{} {} played column {}",
                controller.label(),
                player.name(),
                column_letter(pos.col)
            )?;
            writeln!(out, "{}", state.board())?;
        }
    }
}
