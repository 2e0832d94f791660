use crate::error::SelectorError;
use crate::game::GameState;

/// Interface for computer players.
pub trait Agent {
    /// Select a column for the player to move in `state`. The column must
    /// be legal on `state`'s board.
    fn select_action(&mut self, state: &GameState) -> Result<usize, SelectorError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
