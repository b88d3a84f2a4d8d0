use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: String,
    pub losses: u32,
}

/// Loss counts per player name, persisted as JSON across games.
#[derive(Debug)]
pub struct Scoreboard {
    path: PathBuf,
    losses: BTreeMap<String, u32>,
}

impl Scoreboard {
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os("ROUILLEUX_SCORES") {
            return PathBuf::from(path);
        }
        PathBuf::from("scores.json")
    }

    /// A missing file is an empty board; a corrupt one is an error the
    /// caller reports without tearing the game down.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let losses = if path.exists() {
            let body = fs::read_to_string(&path)
                .with_context(|| format!("read scoreboard {}", path.display()))?;
            serde_json::from_str(&body)
                .with_context(|| format!("parse scoreboard {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, losses })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bumps the player's loss count and saves immediately.
    pub fn record_loss(&mut self, name: &str) -> Result<()> {
        *self.losses.entry(name.to_string()).or_insert(0) += 1;
        self.save()
    }

    pub fn losses_for(&self, name: &str) -> u32 {
        self.losses.get(name).copied().unwrap_or(0)
    }

    /// Sorted by losses descending; names break ties so the order is stable.
    pub fn standings(&self) -> Vec<ScoreEntry> {
        let mut entries: Vec<ScoreEntry> = self
            .losses
            .iter()
            .map(|(name, losses)| ScoreEntry {
                name: name.clone(),
                losses: *losses,
            })
            .collect();
        entries.sort_by(|a, b| b.losses.cmp(&a.losses).then_with(|| a.name.cmp(&b.name)));
        entries
    }

    /// Forgets everything, in memory and on disk.
    pub fn clear(&mut self) -> Result<()> {
        self.losses.clear();
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("delete scoreboard {}", self.path.display()))?;
        }
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }
        let body = serde_json::to_string_pretty(&self.losses).context("serialize scoreboard")?;
        fs::write(&self.path, body)
            .with_context(|| format!("write scoreboard {}", self.path.display()))
    }
}
