//! Flat one-ply rollout move selection.
//!
//! Each pass samples random columns, drops a hypothetical piece on a copy
//! of the board and records whether that single placement wins. The best
//! win ratio picks the column. When the acting player has no winning
//! placement, a second pass asks the same question for the opponent so a
//! threat can be blocked. With no signal from either pass, a random legal
//! column is played.

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::SelectorError;
use crate::game::{Board, GameState, Player};

use super::agent::Agent;
use super::stats::RolloutStatistics;

/// Rollout selector configuration, loadable from the `[game]` table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RolloutConfig {
    /// Random draws per pass. Draws on illegal columns are discarded.
    pub simulations: usize,
    /// Fixed seed for reproducible play; a fresh OS seed when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Evaluate budget partitions on the rayon pool.
    pub parallel: bool,
    /// Number of budget partitions when `parallel` is set.
    pub rollout_chunks: usize,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        RolloutConfig {
            simulations: 80,
            seed: None,
            parallel: false,
            rollout_chunks: 8,
        }
    }
}

/// Which side a pass simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Own,
    Opponent,
}

/// How the last selection was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Pass(Pass),
    RandomFallback,
}

/// Computer player driven by flat rollouts.
pub struct RolloutAgent {
    config: RolloutConfig,
    rng: StdRng,
    name: String,
    last_decision: Option<Decision>,
}

impl RolloutAgent {
    pub fn new(config: RolloutConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let name = format!("Rollout({})", config.simulations);
        RolloutAgent {
            config,
            rng,
            name,
            last_decision: None,
        }
    }

    /// Agent with a given budget and seed, other settings default.
    pub fn with_seed(simulations: usize, seed: u64) -> Self {
        Self::new(RolloutConfig {
            simulations,
            seed: Some(seed),
            ..RolloutConfig::default()
        })
    }

    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    pub fn simulations(&self) -> usize {
        self.config.simulations
    }

    /// How the most recent `select_column` call reached its answer.
    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }

    /// Pick a column for the player to move in `state`.
    pub fn select_column(&mut self, state: &GameState) -> Result<usize, SelectorError> {
        let board = state.board();
        let legal = board.legal_columns();
        if legal.is_empty() {
            return Err(SelectorError::NoLegalMoves);
        }

        let me = state.current_player();
        for (pass, player) in [(Pass::Own, me), (Pass::Opponent, me.other())] {
            let stats = self.sample(board, player);
            trace!(
                "{:?} pass for {}: ratios {:?} over {} trials",
                pass,
                player.name(),
                stats.win_ratios(),
                stats.total_trials()
            );
            if !stats.is_uninformative() {
                let col = stats.best_column();
                debug!("{} picks column {} from {:?} pass", self.name, col, pass);
                self.last_decision = Some(Decision::Pass(pass));
                return Ok(col);
            }
        }

        let col = legal[self.rng.random_range(0..legal.len())];
        debug!("{} found no signal, random column {}", self.name, col);
        self.last_decision = Some(Decision::RandomFallback);
        Ok(col)
    }

    /// Run one pass for `player` over the whole budget.
    fn sample(&mut self, board: &Board, player: Player) -> RolloutStatistics {
        if !self.config.parallel || self.config.rollout_chunks <= 1 {
            return run_trials(board, player, self.config.simulations, &mut self.rng);
        }

        let chunks = self.config.rollout_chunks;
        let base_seed: u64 = self.rng.random();
        let budgets = split_budget(self.config.simulations, chunks);

        budgets
            .into_par_iter()
            .enumerate()
            .map(|(idx, budget)| {
                let mut rng = StdRng::seed_from_u64(derive_seed(base_seed, idx));
                run_trials(board, player, budget, &mut rng)
            })
            .reduce(|| RolloutStatistics::new(board.cols()), RolloutStatistics::merge)
    }
}

impl Agent for RolloutAgent {
    fn select_action(&mut self, state: &GameState) -> Result<usize, SelectorError> {
        self.select_column(state)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Draw `budget` random columns and test a single placement for `player`
/// in each legal one, each on its own copy of the board.
pub fn run_trials<R: Rng>(
    board: &Board,
    player: Player,
    budget: usize,
    rng: &mut R,
) -> RolloutStatistics {
    let cols = board.cols();
    let mut stats = RolloutStatistics::new(cols);

    for _ in 0..budget {
        let col = rng.random_range(0..cols);
        if !board.is_legal_move(col) {
            continue;
        }
        let mut trial = board.clone();
        if let Ok(pos) = trial.drop_piece(col, player) {
            stats.record(col, trial.check_win(pos));
        }
    }

    stats
}

/// Split `total` into `parts` near-equal shares, larger shares first.
fn split_budget(total: usize, parts: usize) -> Vec<usize> {
    let base = total / parts;
    let extra = total % parts;
    (0..parts).map(|i| base + usize::from(i < extra)).collect()
}

/// Derive a deterministic seed for a budget partition.
pub fn derive_seed(base_seed: u64, index: usize) -> u64 {
    // FNV-1a-inspired mixing for deterministic, well-distributed seeds
    let mut hash = base_seed ^ 0x517cc1b727220a95;
    let index = index as u64;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index >> 32;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BoardLayout;

    fn scenario_layout() -> BoardLayout {
        BoardLayout::parse("7 8 6 7 8 9 8", "A3 B1").unwrap()
    }

    fn play(state: &mut GameState, cols: &[usize]) {
        for &col in cols {
            state.apply_move_mut(col).unwrap();
        }
    }

    /// X holds C1, D1, E1 with F1 open; O has blocked B1. X to move.
    fn winning_threat_for_x() -> GameState {
        let mut state = GameState::new(&scenario_layout(), Player::X);
        play(&mut state, &[2, 1, 3, 6, 4, 6]);
        state
    }

    #[test]
    fn test_picks_winning_column_with_large_budget() {
        let state = winning_threat_for_x();
        let hits = (0..50)
            .filter(|&seed| {
                let mut agent = RolloutAgent::with_seed(500, seed);
                agent.select_column(&state).unwrap() == 5
            })
            .count();
        assert!(hits as f64 / 50.0 > 0.9, "only {hits}/50 picked the win");
    }

    #[test]
    fn test_blocks_opponent_threat() {
        // X holds C1, D1, E1; O to move with no win of its own.
        let mut state = GameState::new(&scenario_layout(), Player::X);
        play(&mut state, &[2, 1, 3, 0, 4]);
        assert_eq!(state.current_player(), Player::O);

        let mut agent = RolloutAgent::with_seed(500, 7);
        assert_eq!(agent.select_column(&state).unwrap(), 5);
        assert_eq!(
            agent.last_decision(),
            Some(Decision::Pass(Pass::Opponent))
        );
    }

    #[test]
    fn test_two_winning_columns_pick_the_lowest() {
        // X: C1 D1 E1 with both B1 (don't-care) and F1 open, O stacked above.
        let mut state = GameState::new(&scenario_layout(), Player::X);
        play(&mut state, &[2, 2, 3, 3, 4, 4]);
        let mut agent = RolloutAgent::with_seed(500, 11);
        assert_eq!(agent.select_column(&state).unwrap(), 1);
        assert_eq!(agent.last_decision(), Some(Decision::Pass(Pass::Own)));
    }

    #[test]
    fn test_same_seed_same_choice() {
        let state = GameState::new(&scenario_layout(), Player::X);
        for seed in 0..10 {
            let a = RolloutAgent::with_seed(80, seed).select_column(&state).unwrap();
            let b = RolloutAgent::with_seed(80, seed).select_column(&state).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_no_signal_falls_back_to_random_legal_column() {
        let state = GameState::new(&scenario_layout(), Player::X);
        let legal = state.legal_actions();
        for seed in 0..20 {
            let mut agent = RolloutAgent::with_seed(80, seed);
            let col = agent.select_column(&state).unwrap();
            assert!(legal.contains(&col));
            assert_eq!(agent.last_decision(), Some(Decision::RandomFallback));
        }
    }

    #[test]
    fn test_fallback_only_returns_legal_columns() {
        // Six one-cell columns; only D is left open.
        let layout = BoardLayout::parse("1 1 1 1 1 1", "A1 B1").unwrap();
        let mut state = GameState::new(&layout, Player::X);
        play(&mut state, &[0, 1, 2, 4, 5]);
        assert_eq!(state.legal_actions(), vec![3]);

        for seed in 0..20 {
            // A budget of one draw usually samples nothing legal at all
            let mut agent = RolloutAgent::with_seed(1, seed);
            assert_eq!(agent.select_column(&state).unwrap(), 3);
        }
    }

    #[test]
    fn test_zero_budget_still_moves() {
        let state = GameState::new(&scenario_layout(), Player::O);
        let mut agent = RolloutAgent::with_seed(0, 3);
        let col = agent.select_column(&state).unwrap();
        assert!(state.board().is_legal_move(col));
    }

    #[test]
    fn test_no_legal_moves_is_an_error() {
        let layout = BoardLayout::parse("1 1 1 1 1 1", "A1 B1").unwrap();
        let mut board = Board::new(&layout);
        for (col, player) in [Player::X, Player::O, Player::O, Player::X, Player::X, Player::O]
            .into_iter()
            .enumerate()
        {
            board.drop_piece(col, player).unwrap();
        }
        let state = GameState::with_board(board, Player::X);
        let mut agent = RolloutAgent::with_seed(80, 0);
        assert_eq!(
            agent.select_column(&state),
            Err(SelectorError::NoLegalMoves)
        );
    }

    #[test]
    fn test_selection_does_not_touch_real_board() {
        let state = winning_threat_for_x();
        let before = state.clone();
        let mut agent = RolloutAgent::with_seed(200, 5);
        agent.select_column(&state).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_run_trials_skips_illegal_draws() {
        let layout = BoardLayout::parse("1 1 1 1 1 1", "A1 B1").unwrap();
        let mut board = Board::new(&layout);
        for col in [0, 1, 2, 4, 5] {
            board.drop_piece(col, Player::X).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(9);
        let stats = run_trials(&board, Player::O, 300, &mut rng);
        assert!(stats.total_trials() > 0);
        assert!(stats.total_trials() < 300);
        assert_eq!(stats.total_trials(), stats.columns()[3].trials);
    }

    #[test]
    fn test_parallel_matches_itself_for_same_seed() {
        let state = winning_threat_for_x();
        let config = RolloutConfig {
            simulations: 600,
            seed: Some(42),
            parallel: true,
            rollout_chunks: 6,
        };
        let a = RolloutAgent::new(config.clone()).select_column(&state).unwrap();
        let b = RolloutAgent::new(config).select_column(&state).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, 5);
    }

    #[test]
    fn test_parallel_statistics_independent_of_thread_count() {
        let state = winning_threat_for_x();
        let config = RolloutConfig {
            simulations: 600,
            seed: Some(42),
            parallel: true,
            rollout_chunks: 6,
        };
        let sample_in_pool = |threads: usize| {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap();
            pool.install(|| {
                let mut agent = RolloutAgent::new(config.clone());
                let stats = agent.sample(state.board(), Player::X);
                let mut agent = RolloutAgent::new(config.clone());
                let column = agent.select_column(&state).unwrap();
                (stats, column)
            })
        };

        let (single_stats, single_column) = sample_in_pool(1);
        let (multi_stats, multi_column) = sample_in_pool(4);
        assert_eq!(single_stats, multi_stats);
        assert_eq!(single_stats.total_trials(), multi_stats.total_trials());
        assert_eq!(single_column, multi_column);
        assert_eq!(single_column, 5);
    }

    #[test]
    fn test_split_budget() {
        assert_eq!(split_budget(10, 4), vec![3, 3, 2, 2]);
        assert_eq!(split_budget(3, 5), vec![1, 1, 1, 0, 0]);
        assert_eq!(split_budget(10, 4).iter().sum::<usize>(), 10);
    }

    #[test]
    fn test_derive_seed_varies() {
        assert_eq!(derive_seed(42, 1), derive_seed(42, 1));
        assert_ne!(derive_seed(42, 0), derive_seed(42, 1));
        assert_ne!(derive_seed(1, 0), derive_seed(2, 0));
    }

    #[test]
    fn test_agent_name() {
        let agent = RolloutAgent::with_seed(150, 0);
        assert_eq!(agent.name(), "Rollout(150)");
    }
}
