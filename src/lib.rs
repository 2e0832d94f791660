//! # Irregular Connect Four
//!
//! Connect Four on boards whose columns differ in height and which carry
//! "don't-care" cells. The computer player picks moves by flat one-ply random
//! rollouts. Games run on the console, in a Ratatui terminal UI, or in bulk
//! through the experiment harness.
//!
//! ## Modules
//!
//! - [`game`]: Board layout parsing, cells, win detection, game state
//! - [`ai`]: Agent trait, rollout statistics, the rollout selector
//! - [`session`]: Console prompts, controllers and the turn loop
//! - [`experiment`]: Budget sweeps, CSV logging, summaries
//! - [`ui`]: Terminal UI for playing against the AI
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod experiment;
pub mod game;
pub mod session;
pub mod ui;
