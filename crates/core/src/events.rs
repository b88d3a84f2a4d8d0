use crate::{Card, GameState};
use std::sync::mpsc::Sender;

/// What the engine tells a subscribed frontend. Delivery is best effort: a
/// subscriber that hung up never stalls turn resolution.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A snapshot was recorded (initial purge, turn, or terminal).
    Snapshot(GameState),
    /// A hand changed mid-turn (human purge or sort) and should be redrawn
    /// before the turn finishes.
    HandChanged { player: String, hand: Vec<Card> },
    /// A snapshot sink failed to write; the game keeps going.
    SinkError(String),
    /// Terminal state reached. `loser` is empty only when no player holds
    /// cards at all.
    GameOver { loser: Option<String> },
    /// The driving worker hit an invariant-violation error and stopped.
    /// Emitted by frontends, never by the engine itself.
    Fault(String),
}

/// Optional fan-out to a frontend on another thread.
#[derive(Debug, Clone, Default)]
pub struct EventSender {
    tx: Option<Sender<EngineEvent>>,
}

impl EventSender {
    pub fn attached(tx: Sender<EngineEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn detached() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: EngineEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}
