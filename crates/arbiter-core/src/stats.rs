use std::collections::HashMap;
use std::path::Path;

use tokio::fs;

use crate::{
    cache::read_ndjson,
    error::Result,
    types::{ArenaStats, GameRecord},
};

/// Running totals over archived tournament games: game count, move count
/// and distinct starting positions.
#[derive(Debug, Clone, Default)]
pub struct GameStats {
    pub games: u64,
    pub moves: u64,
    pub positions: HashMap<String, u64>,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one exported game. Moves are counted as space separators in
    /// the move text, so a single-move game counts zero.
    pub fn add_game(&mut self, game: &GameRecord) {
        self.games += 1;
        self.moves += game.moves.matches(' ').count() as u64;
        *self.positions.entry(game.initial_fen.clone()).or_insert(0) += 1;
    }

    pub async fn add_ndjson_file(&mut self, path: &Path) -> Result<()> {
        let games: Vec<GameRecord> = read_ndjson(path).await?;
        for game in &games {
            self.add_game(game);
        }
        Ok(())
    }

    /// Accumulate every `*.ndjson` file in a directory.
    pub async fn add_ndjson_dir(&mut self, dir: &Path) -> Result<()> {
        let mut entries = fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "ndjson") {
                self.add_ndjson_file(&path).await?;
            }
        }
        Ok(())
    }

    /// Add the slim totals of one arena; no per-game position data.
    pub fn add_arena_totals(&mut self, stats: &ArenaStats) {
        self.games += stats.stats.games;
        self.moves += stats.stats.moves;
    }

    /// Positions with their occurrence counts, most common first. Ties
    /// break on the FEN string so output is deterministic.
    pub fn positions_by_count(&self) -> Vec<(&str, u64)> {
        let mut positions: Vec<(&str, u64)> = self
            .positions
            .iter()
            .map(|(fen, count)| (fen.as_str(), *count))
            .collect();
        positions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        positions
    }

    pub fn summary(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Games: {}\n", self.games));
        output.push_str(&format!("Moves: {}\n", self.moves));
        output.push_str(&format!("Positions: {}\n", self.positions.len()));

        let positions = self.positions_by_count();
        if let (Some(first), Some(last)) = (positions.first(), positions.last()) {
            output.push_str(&format!("Min: {}\n", last.1));
            output.push_str(&format!("Max: {}\n", first.1));
        }
        for (fen, count) in &positions {
            output.push_str(&format!("{count} {fen}\n"));
        }
        output
    }
}
