use std::io::{BufRead, Write};

use crate::ai::Agent;
use crate::error::GameError;
use crate::game::{column_index, GameState, Position};

/// Something that can make a move for one side of a game.
pub trait Controller {
    /// Place one piece for the player to move in `state` and return where
    /// it landed. Prompts and feedback go to `out`.
    fn play_turn(&mut self, state: &mut GameState, out: &mut dyn Write)
        -> Result<Position, GameError>;

    /// Display label, e.g. "AI player" or "Human player".
    fn label(&self) -> &str;
}

/// Computer side backed by an `Agent`.
pub struct AiController {
    agent: Box<dyn Agent>,
}

impl AiController {
    pub fn new(agent: Box<dyn Agent>) -> Self {
        AiController { agent }
    }
}

impl Controller for AiController {
    fn play_turn(
        &mut self,
        state: &mut GameState,
        _out: &mut dyn Write,
    ) -> Result<Position, GameError> {
        let column = self.agent.select_action(state)?;
        state
            .apply_move_mut(column)
            .map_err(|source| GameError::IllegalAiMove {
                agent: self.agent.name().to_string(),
                column,
                source,
            })
    }

    fn label(&self) -> &str {
        "AI player"
    }
}

/// Human side reading one column letter per line.
pub struct HumanController<R> {
    input: R,
}

impl<R: BufRead> HumanController<R> {
    pub fn new(input: R) -> Self {
        HumanController { input }
    }
}

impl<R: BufRead> Controller for HumanController<R> {
    fn play_turn(
        &mut self,
        state: &mut GameState,
        out: &mut dyn Write,
    ) -> Result<Position, GameError> {
        loop {
            writeln!(out, "Please enter a column in alphabets ex. A or B... to play.")?;
            out.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(GameError::InputClosed);
            }

            let column = match parse_column(line.trim()) {
                Some(col) => col,
                None => {
                    writeln!(out, "'{}' is not a column letter.", line.trim())?;
                    continue;
                }
            };

            match state.apply_move_mut(column) {
                Ok(pos) => return Ok(pos),
                Err(_) => {
                    writeln!(out, "Selected column is full or out of the board.")?;
                }
            }
        }
    }

    fn label(&self) -> &str {
        "Human player"
    }
}

/// A single letter naming a column.
fn parse_column(text: &str) -> Option<usize> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => column_index(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RolloutAgent;
    use crate::game::{BoardLayout, Cell, Player};
    use std::io::Cursor;

    fn state() -> GameState {
        GameState::new(
            &BoardLayout::parse("1 1 1 1 1 1", "A1 B1").unwrap(),
            Player::O,
        )
    }

    #[test]
    fn test_human_retries_until_legal() {
        let mut state = state();
        state.apply_move_mut(2).unwrap(); // O fills C
        let mut human = HumanController::new(Cursor::new("7\nZ\nc\nAB\nd\n"));
        let mut out = Vec::new();

        let pos = human.play_turn(&mut state, &mut out).unwrap();
        assert_eq!(pos, Position::new(0, 3));
        assert_eq!(state.board().get(0, 3), Cell::Piece(Player::X));

        let text = String::from_utf8(out).unwrap();
        // "7" and "AB" are not letters; Z is off the board; C is full
        assert_eq!(text.matches("not a column letter").count(), 2);
        assert_eq!(
            text.matches("Selected column is full or out of the board.")
                .count(),
            2
        );
    }

    #[test]
    fn test_human_input_closed() {
        let mut state = state();
        let mut human = HumanController::new(Cursor::new("z\n"));
        let err = human.play_turn(&mut state, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, GameError::InputClosed));
    }

    #[test]
    fn test_ai_controller_places_piece() {
        let mut state = state();
        let mut ai = AiController::new(Box::new(RolloutAgent::with_seed(80, 1)));
        let pos = ai.play_turn(&mut state, &mut Vec::new()).unwrap();
        assert_eq!(state.last_placement(), Some(pos));
        assert_eq!(state.current_player(), Player::X);
        assert_eq!(ai.label(), "AI player");
    }

    #[test]
    fn test_parse_column() {
        assert_eq!(parse_column("a"), Some(0));
        assert_eq!(parse_column("K"), Some(10));
        assert_eq!(parse_column(""), None);
        assert_eq!(parse_column("AA"), None);
    }
}
