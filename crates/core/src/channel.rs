use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender};

/// Discrete UI actions a human player can take during their turn. Enqueued
/// by the presentation layer, consumed exactly once each by the blocked
/// human strategy, in FIFO order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HumanAction {
    PurgePairs,
    SortByRank,
    SortBySuit,
    SortByColor,
    EndTurn,
}

/// Producer half, held by the UI thread. Cloneable; enqueue never blocks.
#[derive(Debug, Clone)]
pub struct HumanHandle {
    tx: Sender<HumanAction>,
}

impl HumanHandle {
    pub fn enqueue(&self, action: HumanAction) {
        // A consumer that already shut down just drops the action.
        let _ = self.tx.send(action);
    }
}

/// Consumer half, owned by the game the human plays in.
#[derive(Debug)]
pub struct HumanChannel {
    rx: Receiver<HumanAction>,
}

impl HumanChannel {
    /// Blocks until an action arrives. `None` means every producer is gone;
    /// the caller treats that as cancellation and keeps what it has.
    pub fn wait(&self) -> Option<HumanAction> {
        self.rx.recv().ok()
    }
}

/// One queue per running game, not a process-wide static, so several games
/// (and tests) can coexist.
pub fn human_channel() -> (HumanHandle, HumanChannel) {
    let (tx, rx) = mpsc::channel();
    (HumanHandle { tx }, HumanChannel { rx })
}
