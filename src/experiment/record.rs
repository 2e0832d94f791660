use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::error::ExperimentError;
use crate::game::{GameOutcome, Player};

/// One finished experiment game, serialized as one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub heights: String,
    pub dont_care: String,
    pub x_simulations: usize,
    pub o_simulations: usize,
    #[serde(serialize_with = "serialize_winner")]
    pub winner: Option<Player>,
    pub moves: usize,
}

impl GameRecord {
    pub fn from_outcome(
        heights: String,
        dont_care: String,
        x_simulations: usize,
        o_simulations: usize,
        outcome: GameOutcome,
        moves: usize,
    ) -> Self {
        let winner = match outcome {
            GameOutcome::Winner(p) => Some(p),
            GameOutcome::Draw => None,
        };
        GameRecord {
            heights,
            dont_care,
            x_simulations,
            o_simulations,
            winner,
            moves,
        }
    }
}

/// Winner column value: the player symbol, or `draw`.
fn serialize_winner<S: Serializer>(winner: &Option<Player>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(winner.map(Player::name).unwrap_or("draw"))
}

/// Receives every finished experiment game.
pub trait ExperimentSink {
    fn on_game(&mut self, record: &GameRecord) -> Result<(), ExperimentError>;

    /// Flush buffered output at the end of a run.
    fn finish(&mut self) -> Result<(), ExperimentError> {
        Ok(())
    }
}

/// Collects records in memory.
impl ExperimentSink for Vec<GameRecord> {
    fn on_game(&mut self, record: &GameRecord) -> Result<(), ExperimentError> {
        self.push(record.clone());
        Ok(())
    }
}

/// Appends one CSV row per game; the header goes out only when the file
/// is new or empty.
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvSink {
    pub fn open(path: &Path) -> Result<Self, ExperimentError> {
        let wrap = |source: io::Error| ExperimentError::Output {
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(wrap)?;
        let is_empty = file.metadata().map_err(wrap)?.len() == 0;

        let writer = csv::WriterBuilder::new()
            .has_headers(is_empty)
            .from_writer(file);

        Ok(CsvSink {
            path: path.to_path_buf(),
            writer,
        })
    }
}

impl ExperimentSink for CsvSink {
    fn on_game(&mut self, record: &GameRecord) -> Result<(), ExperimentError> {
        self.writer.serialize(record)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExperimentError> {
        self.writer.flush().map_err(|source| ExperimentError::Output {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(winner: GameOutcome) -> GameRecord {
        GameRecord::from_outcome(
            "7 8 6 7 8 9 8".to_string(),
            "A3 B1".to_string(),
            80,
            150,
            winner,
            17,
        )
    }

    #[test]
    fn test_csv_sink_appends_with_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        {
            let mut sink = CsvSink::open(&path).unwrap();
            sink.on_game(&record(GameOutcome::Winner(Player::X))).unwrap();
            sink.finish().unwrap();
        }
        {
            let mut sink = CsvSink::open(&path).unwrap();
            sink.on_game(&record(GameOutcome::Draw)).unwrap();
            sink.finish().unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "heights,dont_care,x_simulations,o_simulations,winner,moves"
        );
        assert_eq!(lines[1], "7 8 6 7 8 9 8,A3 B1,80,150,X,17");
        assert_eq!(lines[2], "7 8 6 7 8 9 8,A3 B1,80,150,draw,17");
    }

    #[test]
    fn test_csv_sink_quotes_fields_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quoted.csv");

        let mut odd = record(GameOutcome::Winner(Player::O));
        odd.dont_care = "A3,B1".to_string();
        {
            let mut sink = CsvSink::open(&path).unwrap();
            sink.on_game(&odd).unwrap();
            sink.finish().unwrap();
        }

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "A3,B1");
        assert_eq!(&rows[0][4], "O");
    }

    #[test]
    fn test_csv_sink_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("results.csv");
        assert!(matches!(
            CsvSink::open(&path),
            Err(ExperimentError::Output { .. })
        ));
    }
}
