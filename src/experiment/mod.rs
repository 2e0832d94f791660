//! Batch experiments: sweep boards and simulation budgets, play many
//! silent AI-vs-AI games and log one row per game.

mod harness;
mod metrics;
mod record;

pub use harness::{write_summary, BoardSpec, Experiment, ExperimentConfig};
pub use metrics::{ExperimentSummary, PairingSummary};
pub use record::{CsvSink, ExperimentSink, GameRecord};
