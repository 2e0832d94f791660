//! Turn-by-turn play: the game loop, the controllers that move for each
//! side, and the console prompts used to set a game up.

mod controller;
mod game_loop;
mod prompt;

pub use controller::{AiController, Controller, HumanController};
pub use game_loop::{GameLoop, GameMode, GameReport};
pub use prompt::{prompt_layout, prompt_mode};
