//! Core turn-resolution engine for Pouilleux. Keep this crate free of IO and
//! platform concerns.

pub mod cards;
pub mod channel;
pub mod deck;
pub mod engine;
pub mod error;
pub mod events;
pub mod hand;
pub mod player;
pub mod rng;
pub mod snapshot;
pub mod strategy;

pub use cards::*;
pub use channel::*;
pub use deck::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use hand::*;
pub use player::*;
pub use rng::*;
pub use snapshot::*;
pub use strategy::*;
