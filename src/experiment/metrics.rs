use serde::{Deserialize, Serialize};

use crate::game::Player;

use super::record::GameRecord;

/// Aggregated results for one board and budget pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairingSummary {
    pub heights: String,
    pub dont_care: String,
    pub x_simulations: usize,
    pub o_simulations: usize,
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub total_moves: usize,
}

impl PairingSummary {
    fn matches(&self, r: &GameRecord) -> bool {
        self.heights == r.heights
            && self.dont_care == r.dont_care
            && self.x_simulations == r.x_simulations
            && self.o_simulations == r.o_simulations
    }

    /// Fraction of games won by X.
    pub fn x_win_rate(&self) -> f32 {
        rate(self.x_wins, self.games)
    }

    /// Fraction of games won by O.
    pub fn o_win_rate(&self) -> f32 {
        rate(self.o_wins, self.games)
    }

    pub fn draw_rate(&self) -> f32 {
        rate(self.draws, self.games)
    }

    pub fn average_game_length(&self) -> f32 {
        rate(self.total_moves, self.games)
    }
}

fn rate(count: usize, total: usize) -> f32 {
    if total == 0 {
        0.0
    } else {
        count as f32 / total as f32
    }
}

/// Running summary of an experiment, in pairing order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub pairings: Vec<PairingSummary>,
}

impl ExperimentSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, r: &GameRecord) {
        let idx = match self.pairings.iter().position(|p| p.matches(r)) {
            Some(idx) => idx,
            None => {
                self.pairings.push(PairingSummary {
                    heights: r.heights.clone(),
                    dont_care: r.dont_care.clone(),
                    x_simulations: r.x_simulations,
                    o_simulations: r.o_simulations,
                    games: 0,
                    x_wins: 0,
                    o_wins: 0,
                    draws: 0,
                    total_moves: 0,
                });
                self.pairings.len() - 1
            }
        };

        let p = &mut self.pairings[idx];
        p.games += 1;
        p.total_moves += r.moves;
        match r.winner {
            Some(Player::X) => p.x_wins += 1,
            Some(Player::O) => p.o_wins += 1,
            None => p.draws += 1,
        }
    }

    pub fn total_games(&self) -> usize {
        self.pairings.iter().map(|p| p.games).sum()
    }

    /// Human-readable table, one line per pairing.
    pub fn table_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{:<22} {:<8} {:>6} {:>6} {:>6} {:>7} {:>7} {:>7} {:>8}",
            "heights", "cells", "x_sims", "o_sims", "games", "x_win%", "o_win%", "draw%", "avg_len"
        )];
        for p in &self.pairings {
            lines.push(format!(
                "{:<22} {:<8} {:>6} {:>6} {:>6} {:>7.1} {:>7.1} {:>7.1} {:>8.1}",
                p.heights,
                p.dont_care,
                p.x_simulations,
                p.o_simulations,
                p.games,
                p.x_win_rate() * 100.0,
                p.o_win_rate() * 100.0,
                p.draw_rate() * 100.0,
                p.average_game_length(),
            ));
        }
        lines
    }
}
