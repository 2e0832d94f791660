//! Terminal UI: a ratatui view for playing against the rollout AI.

mod app;
mod game_view;

pub use app::App;
