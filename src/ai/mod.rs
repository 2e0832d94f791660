mod agent;
mod rollout;
mod stats;

pub use agent::Agent;
pub use rollout::{derive_seed, run_trials, Decision, Pass, RolloutAgent, RolloutConfig};
pub use stats::{ColumnStats, RolloutStatistics};
