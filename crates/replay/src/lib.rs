//! File-backed collaborators of the engine: per-game replay logs and the
//! persistent loss scoreboard. Everything here is best effort from the
//! engine's point of view; failures surface to the frontend, not into turn
//! resolution.

mod logger;
mod scoreboard;

pub use logger::*;
pub use scoreboard::*;
