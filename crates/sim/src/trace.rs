use crate::SimError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Outcome of one complete game in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub game: u32,
    pub seed: u64,
    /// Phase-2 turns resolved.
    pub turns: u32,
    /// Snapshots recorded, initial purges and the terminal one included.
    pub steps: u32,
    pub loser: Option<String>,
    /// Cards banked on the table by game end.
    pub table_pairs: usize,
    /// Cards still held across all hands at game end.
    pub cards_left: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingRecord {
    pub name: String,
    pub losses: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub seed: u64,
    pub games: Vec<GameRecord>,
    pub standings: Vec<StandingRecord>,
    pub wall_time_ms: u64,
}

impl BatchResult {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!(
                "batch: seed={} games={} wall_ms={}",
                self.seed,
                self.games.len(),
                self.wall_time_ms
            ),
            String::new(),
            "standings:".to_string(),
        ];
        if self.standings.is_empty() {
            lines.push("  (none)".to_string());
        } else {
            for entry in &self.standings {
                lines.push(format!("  {:<16} {} losses", entry.name, entry.losses));
            }
        }
        lines.push(String::new());
        lines.push("games:".to_string());
        for record in &self.games {
            lines.push(format!(
                "  game {:>4} | seed {:>10} | {:>4} turns | table {:>2} | left {:>2} | loser: {}",
                record.game,
                record.seed,
                record.turns,
                record.table_pairs,
                record.cards_left,
                record.loser.as_deref().unwrap_or("(none)")
            ));
        }
        lines.join("\n")
    }

    pub fn write_json(&self, path: &Path) -> Result<(), SimError> {
        let body = serde_json::to_string_pretty(self)?;
        fs::write(path, body)?;
        Ok(())
    }
}
