use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("need at least two players, got {0}")]
    NotEnoughPlayers(usize),
    #[error("cannot draw from an empty hand")]
    EmptyDraw,
    #[error("player {0} uses the human strategy but no human channel is attached")]
    MissingHumanChannel(String),
}
