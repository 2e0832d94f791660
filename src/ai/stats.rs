/// Win/trial counters for one candidate column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnStats {
    pub wins: u64,
    pub trials: u64,
}

impl ColumnStats {
    /// Wins over trials; a column never tried scores 0.0.
    pub fn win_ratio(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.wins as f64 / self.trials as f64
        }
    }
}

/// Per-column rollout counters for a single selection pass. Built fresh
/// for every pass and thrown away afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloutStatistics {
    columns: Vec<ColumnStats>,
}

impl RolloutStatistics {
    pub fn new(cols: usize) -> Self {
        RolloutStatistics {
            columns: vec![ColumnStats::default(); cols],
        }
    }

    pub fn record(&mut self, col: usize, won: bool) {
        let stats = &mut self.columns[col];
        stats.trials += 1;
        if won {
            stats.wins += 1;
        }
    }

    /// Add another partition's counters into this one.
    pub fn merge(mut self, other: RolloutStatistics) -> Self {
        for (mine, theirs) in self.columns.iter_mut().zip(other.columns) {
            mine.wins += theirs.wins;
            mine.trials += theirs.trials;
        }
        self
    }

    pub fn columns(&self) -> &[ColumnStats] {
        &self.columns
    }

    pub fn total_trials(&self) -> u64 {
        self.columns.iter().map(|c| c.trials).sum()
    }

    pub fn win_ratios(&self) -> Vec<f64> {
        self.columns.iter().map(ColumnStats::win_ratio).collect()
    }

    /// Column with the highest win ratio; ties go to the lowest index.
    pub fn best_column(&self) -> usize {
        let mut best = 0;
        let mut best_ratio = f64::NEG_INFINITY;
        for (col, ratio) in self.win_ratios().into_iter().enumerate() {
            if ratio > best_ratio {
                best = col;
                best_ratio = ratio;
            }
        }
        best
    }

    /// True when the pass carries no signal: the pick fell on column 0
    /// only because every ratio is zero.
    pub fn is_uninformative(&self) -> bool {
        self.best_column() == 0 && self.columns.iter().all(|c| c.win_ratio() == 0.0)
    }
}
