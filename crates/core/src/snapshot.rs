use crate::{Card, Player};
use serde::{Deserialize, Serialize};

/// One player's name and hand at a moment in time. Never mutated after
/// capture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub name: String,
    pub hand: Vec<Card>,
}

/// A single moment in the game: a step number, a human-readable description,
/// and every player's hand at that moment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub step: u32,
    pub description: String,
    pub players: Vec<PlayerSnapshot>,
}

impl GameState {
    pub fn capture(step: u32, description: String, players: &[Player]) -> Self {
        Self {
            step,
            description,
            players: players
                .iter()
                .map(|p| PlayerSnapshot {
                    name: p.name().to_string(),
                    hand: p.hand().cards().to_vec(),
                })
                .collect(),
        }
    }
}

/// Replay collaborator. Receives snapshots strictly in the order turns are
/// resolved. Write failures are surfaced through the engine's event stream
/// and never abort turn resolution.
pub trait SnapshotSink: Send {
    fn record(&mut self, state: &GameState) -> std::io::Result<()>;
}
