use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use log::info;
use serde::{Deserialize, Serialize};

use crate::ai::{derive_seed, RolloutAgent, RolloutConfig};
use crate::error::{ConfigError, ExperimentError};
use crate::game::{BoardLayout, GameState, Player};
use crate::session::{AiController, GameLoop};

use super::metrics::ExperimentSummary;
use super::record::{ExperimentSink, GameRecord};

/// A board in the notation the console prompts accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSpec {
    pub heights: String,
    pub dont_care: String,
}

impl BoardSpec {
    pub fn new(heights: &str, dont_care: &str) -> Self {
        BoardSpec {
            heights: heights.to_string(),
            dont_care: dont_care.to_string(),
        }
    }

    pub fn layout(&self) -> Result<BoardLayout, ConfigError> {
        BoardLayout::parse(&self.heights, &self.dont_care)
    }
}

/// Experiment sweep configuration, loadable from the `[experiment]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Budgets swept for each side; every (X, O) combination is played.
    pub budgets: Vec<usize>,
    pub games_per_pairing: usize,
    /// CSV log, appended to across runs.
    pub output: PathBuf,
    /// Optional JSON summary written at the end of a run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub boards: Vec<BoardSpec>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            budgets: vec![80, 150, 500, 2000],
            games_per_pairing: 10,
            output: PathBuf::from("experiment_result.csv"),
            summary: None,
            seed: None,
            boards: vec![
                BoardSpec::new("7 8 6 7 8 9 8 6", "A3 B1"),
                BoardSpec::new("7 6 6 5 7 6 7 5 7", "B2 C3"),
                BoardSpec::new("7 6 5 8 6 6 6 7", "D1 D3"),
                BoardSpec::new("5 6 7 8 6 7 8 6", "E1 E2"),
            ],
        }
    }
}

impl ExperimentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.boards.is_empty() {
            return Err(ConfigError::Validation(
                "experiment.boards must not be empty".into(),
            ));
        }
        for board in &self.boards {
            board.layout()?;
        }
        if self.budgets.is_empty() {
            return Err(ConfigError::Validation(
                "experiment.budgets must not be empty".into(),
            ));
        }
        if self.games_per_pairing == 0 {
            return Err(ConfigError::Validation(
                "experiment.games_per_pairing must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Games a full sweep plays.
    pub fn total_games(&self) -> usize {
        self.boards.len() * self.budgets.len() * self.budgets.len() * self.games_per_pairing
    }
}

/// Plays silent AI-vs-AI games over every board and budget pairing.
pub struct Experiment {
    config: ExperimentConfig,
    rollout: RolloutConfig,
}

impl Experiment {
    /// `rollout` supplies the shared selector settings; its budget and seed
    /// are replaced per game.
    pub fn new(config: ExperimentConfig, rollout: RolloutConfig) -> Self {
        Experiment { config, rollout }
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Run the sweep, feeding every game to `sink`.
    pub fn run(
        &self,
        sink: &mut dyn ExperimentSink,
        progress: Option<&ProgressBar>,
    ) -> Result<ExperimentSummary, ExperimentError> {
        let layouts = self
            .config
            .boards
            .iter()
            .map(BoardSpec::layout)
            .collect::<Result<Vec<_>, _>>()?;

        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        info!(
            "experiment: {} games, base seed {}",
            self.config.total_games(),
            base_seed
        );

        let mut summary = ExperimentSummary::new();
        let mut game_index = 0;

        for layout in &layouts {
            for &x_sims in &self.config.budgets {
                for &o_sims in &self.config.budgets {
                    for _ in 0..self.config.games_per_pairing {
                        let x_seed = derive_seed(base_seed, 2 * game_index);
                        let o_seed = derive_seed(base_seed, 2 * game_index + 1);
                        let record = self.play_one(layout, (x_sims, x_seed), (o_sims, o_seed))?;

                        sink.on_game(&record)?;
                        summary.record(&record);
                        if let Some(pb) = progress {
                            pb.inc(1);
                        }
                        game_index += 1;
                    }
                    info!(
                        "board [{}] X({}) vs O({}) done",
                        layout.heights_notation(),
                        x_sims,
                        o_sims
                    );
                }
            }
        }

        sink.finish()?;
        Ok(summary)
    }

    fn play_one(
        &self,
        layout: &BoardLayout,
        (x_sims, x_seed): (usize, u64),
        (o_sims, o_seed): (usize, u64),
    ) -> Result<GameRecord, ExperimentError> {
        let agent = |simulations, seed| {
            Box::new(AiController::new(Box::new(RolloutAgent::new(RolloutConfig {
                simulations,
                seed: Some(seed),
                ..self.rollout.clone()
            }))))
        };

        let state = GameState::new(layout, Player::X);
        let mut game = GameLoop::new(
            state,
            agent(x_sims, x_seed),
            agent(o_sims, o_seed),
            io::sink(),
        );
        let report = game.run()?;

        Ok(GameRecord::from_outcome(
            layout.heights_notation(),
            layout.dont_care_notation(),
            x_sims,
            o_sims,
            report.outcome,
            report.moves,
        ))
    }
}

/// Write the summary as pretty JSON.
pub fn write_summary(summary: &ExperimentSummary, path: &Path) -> Result<(), ExperimentError> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json).map_err(|source| ExperimentError::Output {
        path: path.to_path_buf(),
        source,
    })
}
