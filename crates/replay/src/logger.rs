use anyhow::{Context, Result};
use rouilleux_core::{GameState, SnapshotSink};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const FILE_PREFIX: &str = "replay_game_";
const FILE_SUFFIX: &str = ".log";

pub fn default_replay_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("ROUILLEUX_REPLAYS") {
        return PathBuf::from(dir);
    }
    PathBuf::from("replays")
}

/// Writes one JSON line per snapshot into a per-game file named
/// `replay_game_{n}_{timestamp}.log`, picking n = (max existing n) + 1.
pub struct ReplayLogger {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ReplayLogger {
    pub fn create_in(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("create replay directory {}", dir.display()))?;
        let game = next_game_number(dir)?;
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let path = dir.join(format!("{FILE_PREFIX}{game}_{stamp}{FILE_SUFFIX}"));
        let file =
            File::create(&path).with_context(|| format!("create replay {}", path.display()))?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSink for ReplayLogger {
    fn record(&mut self, state: &GameState) -> std::io::Result<()> {
        let line = serde_json::to_string(state)?;
        writeln!(self.writer, "{line}")?;
        // Flush per snapshot so a crash mid-game still leaves a usable log.
        self.writer.flush()
    }
}

/// Reads a replay file back into ordered snapshots.
pub fn load_replay(path: &Path) -> Result<Vec<GameState>> {
    let file = File::open(path).with_context(|| format!("open replay {}", path.display()))?;
    let mut states = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("read replay {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let state: GameState = serde_json::from_str(&line)
            .with_context(|| format!("parse line {} of {}", idx + 1, path.display()))?;
        states.push(state);
    }
    Ok(states)
}

/// Replay files in `dir`, ordered by game number.
pub fn list_replays(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found: Vec<(u32, PathBuf)> = Vec::new();
    if !dir.exists() {
        return Ok(Vec::new());
    }
    for entry in fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))? {
        let entry = entry?;
        let name = entry.file_name();
        if let Some(game) = parse_game_number(&name.to_string_lossy()) {
            found.push((game, entry.path()));
        }
    }
    found.sort_by_key(|(game, _)| *game);
    Ok(found.into_iter().map(|(_, path)| path).collect())
}

/// Deletes every replay file in `dir`.
pub fn clear_replays(dir: &Path) -> Result<()> {
    for path in list_replays(dir)? {
        fs::remove_file(&path).with_context(|| format!("delete {}", path.display()))?;
    }
    Ok(())
}

fn next_game_number(dir: &Path) -> Result<u32> {
    let max = list_replays(dir)?
        .iter()
        .filter_map(|p| parse_game_number(&p.file_name()?.to_string_lossy()))
        .max()
        .unwrap_or(0);
    Ok(max + 1)
}

fn parse_game_number(name: &str) -> Option<u32> {
    let rest = name.strip_prefix(FILE_PREFIX)?;
    if !name.ends_with(FILE_SUFFIX) {
        return None;
    }
    let digits = rest.split('_').next()?;
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rouilleux_core::PlayerSnapshot;
    use std::path::PathBuf;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rouilleux-replay-{tag}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn sample_state(step: u32) -> GameState {
        GameState {
            step,
            description: format!("step {step}"),
            players: vec![PlayerSnapshot {
                name: "a".to_string(),
                hand: Vec::new(),
            }],
        }
    }

    #[test]
    fn writes_and_reads_back_in_order() {
        let dir = temp_dir("roundtrip");
        let mut logger = ReplayLogger::create_in(&dir).unwrap();
        for step in 0..3 {
            logger.record(&sample_state(step)).unwrap();
        }
        let path = logger.path().to_path_buf();
        drop(logger);

        let states = load_replay(&path).unwrap();
        assert_eq!(states.len(), 3);
        assert_eq!(states[0].step, 0);
        assert_eq!(states[2].description, "step 2");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn numbers_games_past_the_highest_existing() {
        let dir = temp_dir("numbering");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("replay_game_7_12345.log"), "").unwrap();
        fs::write(dir.join("not_a_replay.txt"), "").unwrap();

        let logger = ReplayLogger::create_in(&dir).unwrap();
        let name = logger.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("replay_game_8_"), "got {name}");
        drop(logger);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn clear_removes_only_replay_files() {
        let dir = temp_dir("clear");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("replay_game_1_1.log"), "").unwrap();
        fs::write(dir.join("keep.txt"), "").unwrap();

        clear_replays(&dir).unwrap();
        assert!(list_replays(&dir).unwrap().is_empty());
        assert!(dir.join("keep.txt").exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
